//! Linear undo/redo history over immutable snapshots.
//!
//! `past` holds every committed state in order (the last entry is current),
//! `future` holds undone states with the nearest redo first. Committing
//! discards `future` entirely, even when the new state equals one that was
//! undone.

use std::collections::VecDeque;

use thiserror::Error;

/// Undo/redo at a history boundary.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Nothing to undo")]
    NoHistory,
    #[error("Nothing to redo")]
    NoFuture,
}

/// Branch-discarding undo/redo log.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<T>,
    future: VecDeque<T>,
    limit: Option<usize>,
}

impl<T> History<T> {
    /// Start a history whose only state is `initial`.
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, None)
    }

    /// Like [`History::new`], keeping at most `limit` states in `past`.
    /// A limit of zero is treated as one.
    pub fn with_limit(initial: T, limit: Option<usize>) -> Self {
        let mut past = VecDeque::new();
        past.push_back(initial);
        Self {
            past,
            future: VecDeque::new(),
            limit: limit.map(|l| l.max(1)),
        }
    }

    /// The state to render.
    pub fn current(&self) -> &T {
        // past is never empty
        &self.past[self.past.len() - 1]
    }

    /// Append `next` as the current state and drop the redo lineage.
    pub fn commit(&mut self, next: T) {
        self.past.push_back(next);
        self.future.clear();

        if let Some(limit) = self.limit {
            while self.past.len() > limit {
                self.past.pop_front();
            }
        }
    }

    /// Step back one state.
    pub fn undo(&mut self) -> Result<&T, HistoryError> {
        if self.past.len() <= 1 {
            return Err(HistoryError::NoHistory);
        }
        let undone = self.past.pop_back().ok_or(HistoryError::NoHistory)?;
        self.future.push_front(undone);
        Ok(self.current())
    }

    /// Re-apply the most recently undone state.
    pub fn redo(&mut self) -> Result<&T, HistoryError> {
        let next = self.future.pop_front().ok_or(HistoryError::NoFuture)?;
        self.past.push_back(next);
        Ok(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.past.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: N commits, N-1 undos, N-1 redos restore the final state.
        #[test]
        fn prop_undo_then_redo_restores(values in prop::collection::vec(any::<u32>(), 1..40)) {
            let mut h = History::new(values[0]);
            for v in &values[1..] {
                h.commit(*v);
            }
            let last = *h.current();
            let steps = values.len() - 1;

            for _ in 0..steps {
                prop_assert!(h.undo().is_ok());
            }
            prop_assert_eq!(*h.current(), values[0]);
            prop_assert!(!h.can_undo());

            for _ in 0..steps {
                prop_assert!(h.redo().is_ok());
            }
            prop_assert_eq!(*h.current(), last);
            prop_assert!(!h.can_redo());
        }

        /// Property: Future is empty after any commit.
        #[test]
        fn prop_commit_clears_future(
            commits in 1usize..20,
            undos in 0usize..20,
            next in any::<u32>(),
        ) {
            let mut h = History::new(0u32);
            for i in 0..commits {
                h.commit(i as u32);
            }
            for _ in 0..undos {
                let _ = h.undo();
            }
            h.commit(next);
            prop_assert_eq!(h.future_len(), 0);
            prop_assert_eq!(*h.current(), next);
        }
    }
}
