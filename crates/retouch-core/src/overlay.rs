//! Text overlay model.
//!
//! Annotations are plain values. Every edit produces a new [`Overlays`]
//! sequence, so a snapshot's overlays can never be changed through another
//! snapshot. An annotation's identity is its index in the sequence; entries
//! are only ever appended, never removed or reordered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from overlay edits.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OverlayError {
    #[error("Annotation index {index} out of range ({len} annotations)")]
    OutOfRange { index: usize, len: usize },

    #[error("Font size must be a positive number, got {0}")]
    InvalidFontSize(f64),

    #[error("Invalid color: {0:?} (expected #rgb or #rrggbb)")]
    InvalidColor(String),
}

/// A point in rendered-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single line of styled text drawn over the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub text: String,
    /// Baseline-left anchor of the text.
    pub position: Point,
    pub font_size: f64,
    /// CSS hex color, e.g. `#000000`.
    pub color: String,
}

/// Axis-aligned hit box of an annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl TextBounds {
    /// Inclusive on every edge.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

impl Annotation {
    /// Approximate box assuming every glyph is `font_size` wide.
    ///
    /// Horizontally `[x, x + len * font_size]`, vertically
    /// `[y - font_size, y]` since `position` is the baseline. `len` counts
    /// UTF-16 code units, the way a JS string reports its length, so a
    /// character outside the BMP (most emoji) counts as two.
    pub fn bounds(&self) -> TextBounds {
        let glyphs = self.text.encode_utf16().count() as f64;
        TextBounds {
            left: self.position.x,
            top: self.position.y - self.font_size,
            right: self.position.x + glyphs * self.font_size,
            bottom: self.position.y,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }
}

/// Which annotation wins when hit boxes overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HitPriority {
    /// Lowest index first: the earliest-added annotation wins.
    #[default]
    EarliestAdded,
    /// Highest index first, matching draw order (last drawn is on top).
    Topmost,
}

/// Ordered sequence of annotations owned by one snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overlays(Vec<Annotation>);

impl Overlays {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Annotation> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    /// Append an annotation, returning the new sequence and its index.
    pub fn with_added(&self, annotation: Annotation) -> (Self, usize) {
        let mut items = self.0.clone();
        items.push(annotation);
        let index = items.len() - 1;
        (Self(items), index)
    }

    /// Index of the annotation under `point`, if any.
    pub fn hit_test(&self, point: Point, priority: HitPriority) -> Option<usize> {
        match priority {
            HitPriority::EarliestAdded => self.0.iter().position(|a| a.contains(point)),
            HitPriority::Topmost => self.0.iter().rposition(|a| a.contains(point)),
        }
    }

    pub fn with_position(&self, index: usize, position: Point) -> Result<Self, OverlayError> {
        self.replace(index, |a| a.position = position)
    }

    pub fn with_text(&self, index: usize, text: &str) -> Result<Self, OverlayError> {
        self.replace(index, |a| a.text = text.to_string())
    }

    pub fn with_font_size(&self, index: usize, font_size: f64) -> Result<Self, OverlayError> {
        validate_font_size(font_size)?;
        self.replace(index, |a| a.font_size = font_size)
    }

    pub fn with_color(&self, index: usize, color: &str) -> Result<Self, OverlayError> {
        validate_color(color)?;
        self.replace(index, |a| a.color = color.to_string())
    }

    /// Every annotation shifted by (dx, dy).
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self(
            self.0
                .iter()
                .map(|a| Annotation {
                    position: Point::new(a.position.x + dx, a.position.y + dy),
                    ..a.clone()
                })
                .collect(),
        )
    }

    fn replace(&self, index: usize, edit: impl FnOnce(&mut Annotation)) -> Result<Self, OverlayError> {
        let len = self.0.len();
        let mut items = self.0.clone();
        let target = items
            .get_mut(index)
            .ok_or(OverlayError::OutOfRange { index, len })?;
        edit(target);
        Ok(Self(items))
    }
}

impl From<Vec<Annotation>> for Overlays {
    fn from(items: Vec<Annotation>) -> Self {
        Self(items)
    }
}

pub(crate) fn validate_font_size(font_size: f64) -> Result<(), OverlayError> {
    if font_size.is_finite() && font_size > 0.0 {
        Ok(())
    } else {
        Err(OverlayError::InvalidFontSize(font_size))
    }
}

pub(crate) fn validate_color(color: &str) -> Result<(), OverlayError> {
    parse_hex_color(color)
        .map(|_| ())
        .ok_or_else(|| OverlayError::InvalidColor(color.to_string()))
}

/// Parse `#rgb` or `#rrggbb` into opaque RGBA.
pub fn parse_hex_color(color: &str) -> Option<[u8; 4]> {
    let hex = color.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut rgba = [0, 0, 0, 255];
            for (i, c) in hex.chars().enumerate() {
                let v = channel(&c.to_string())?;
                rgba[i] = v * 17;
            }
            Some(rgba)
        }
        6 => Some([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        ]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str, x: f64, y: f64, size: f64) -> Annotation {
        Annotation {
            text: text.to_string(),
            position: Point::new(x, y),
            font_size: size,
            color: "#000000".to_string(),
        }
    }

    fn two_apart() -> Overlays {
        // "abc" at size 10 spans x 10..40, y 10..20
        // "xy" at size 20 spans x 100..140, y 80..100
        Overlays::from(vec![label("abc", 10.0, 20.0, 10.0), label("xy", 100.0, 100.0, 20.0)])
    }

    #[test]
    fn test_bounds_monospace_approximation() {
        let b = label("abcd", 50.0, 50.0, 20.0).bounds();
        assert_eq!(
            b,
            TextBounds {
                left: 50.0,
                top: 30.0,
                right: 130.0,
                bottom: 50.0
            }
        );
    }

    #[test]
    fn test_bounds_count_chars_not_bytes() {
        let b = label("héé", 0.0, 10.0, 10.0).bounds();
        assert_eq!(b.right, 30.0);
    }

    #[test]
    fn test_bounds_count_utf16_units() {
        // One astral-plane emoji is two UTF-16 units
        let b = label("a\u{1F600}", 0.0, 10.0, 10.0).bounds();
        assert_eq!(b.right, 30.0);
    }

    #[test]
    fn test_hit_inside_single_box() {
        let overlays = two_apart();
        assert_eq!(overlays.hit_test(Point::new(25.0, 15.0), HitPriority::EarliestAdded), Some(0));
        assert_eq!(overlays.hit_test(Point::new(120.0, 90.0), HitPriority::EarliestAdded), Some(1));
    }

    #[test]
    fn test_hit_outside_every_box() {
        let overlays = two_apart();
        assert_eq!(overlays.hit_test(Point::new(60.0, 60.0), HitPriority::EarliestAdded), None);
        assert_eq!(overlays.hit_test(Point::new(25.0, 21.0), HitPriority::Topmost), None);
        assert_eq!(Overlays::new().hit_test(Point::new(0.0, 0.0), HitPriority::EarliestAdded), None);
    }

    #[test]
    fn test_hit_edges_are_inclusive() {
        let overlays = two_apart();
        assert_eq!(overlays.hit_test(Point::new(10.0, 10.0), HitPriority::EarliestAdded), Some(0));
        assert_eq!(overlays.hit_test(Point::new(40.0, 20.0), HitPriority::EarliestAdded), Some(0));
    }

    #[test]
    fn test_overlap_priority() {
        let overlays = Overlays::from(vec![
            label("first", 0.0, 20.0, 10.0),
            label("second", 5.0, 25.0, 10.0),
        ]);
        let p = Point::new(10.0, 18.0);
        assert_eq!(overlays.hit_test(p, HitPriority::EarliestAdded), Some(0));
        assert_eq!(overlays.hit_test(p, HitPriority::Topmost), Some(1));
    }

    #[test]
    fn test_edits_do_not_alias() {
        let original = two_apart();
        let moved = original.with_position(0, Point::new(1.0, 2.0)).unwrap();

        assert_eq!(original.get(0).unwrap().position, Point::new(10.0, 20.0));
        assert_eq!(moved.get(0).unwrap().position, Point::new(1.0, 2.0));
        assert_eq!(moved.get(1), original.get(1));
    }

    #[test]
    fn test_with_added_returns_index() {
        let (overlays, index) = two_apart().with_added(label("new", 0.0, 0.0, 12.0));
        assert_eq!(index, 2);
        assert_eq!(overlays.len(), 3);
    }

    #[test]
    fn test_edit_out_of_range() {
        let result = two_apart().with_text(5, "nope");
        assert_eq!(result, Err(OverlayError::OutOfRange { index: 5, len: 2 }));
    }

    #[test]
    fn test_font_size_validation() {
        let overlays = two_apart();
        assert!(overlays.with_font_size(0, 32.0).is_ok());
        assert_eq!(
            overlays.with_font_size(0, 0.0),
            Err(OverlayError::InvalidFontSize(0.0))
        );
        assert!(overlays.with_font_size(0, -4.0).is_err());
        assert!(overlays.with_font_size(0, f64::NAN).is_err());
    }

    #[test]
    fn test_color_validation() {
        let overlays = two_apart();
        assert_eq!(
            overlays.with_color(1, "#ff8800").unwrap().get(1).unwrap().color,
            "#ff8800"
        );
        assert!(overlays.with_color(1, "#abc").is_ok());
        assert!(overlays.with_color(1, "red").is_err());
        assert!(overlays.with_color(1, "#12345").is_err());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some([255, 0, 0, 255]));
        assert_eq!(parse_hex_color("#0f0"), Some([0, 255, 0, 255]));
        assert_eq!(parse_hex_color("#GGGGGG"), None);
        assert_eq!(parse_hex_color("000000"), None);
    }

    #[test]
    fn test_translated() {
        let shifted = two_apart().translated(-10.0, -5.0);
        assert_eq!(shifted.get(0).unwrap().position, Point::new(0.0, 15.0));
        assert_eq!(shifted.get(1).unwrap().position, Point::new(90.0, 95.0));
    }
}
