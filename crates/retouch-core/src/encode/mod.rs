//! Raster encoding.
//!
//! A rendered state is re-encoded losslessly as PNG when the host needs the
//! bytes back, e.g. to export the current surface or to route a crop bake
//! through its own asynchronous decoder.

mod png;

pub use png::{encode_png, EncodeError};
