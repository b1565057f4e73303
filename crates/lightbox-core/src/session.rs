#![forbid(unsafe_code)]

//! Gallery session state: the active group and the displayed index.

use crate::payload::GalleryEntry;

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

/// The group shown by an open overlay.
///
/// Invariant: `entries` is never empty and `current < entries.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySession {
    entries: Vec<GalleryEntry>,
    current: usize,
}

impl GallerySession {
    /// Start a session at `start`. Returns `None` for an empty group or an
    /// out-of-range start.
    #[must_use]
    pub fn new(entries: Vec<GalleryEntry>, start: usize) -> Option<Self> {
        if start >= entries.len() {
            return None;
        }
        Some(Self {
            entries,
            current: start,
        })
    }

    #[must_use]
    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn current_entry(&self) -> &GalleryEntry {
        &self.entries[self.current]
    }

    /// Step one image with wraparound and return the new index.
    pub fn navigate(&mut self, direction: Direction) -> usize {
        let len = self.entries.len();
        self.current = match direction {
            Direction::Next => (self.current + 1) % len,
            Direction::Previous => (self.current + len - 1) % len,
        };
        self.current
    }

    /// Jump to `index`. Out-of-range indices leave the session unchanged.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.current = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn session(len: usize, start: usize) -> Option<GallerySession> {
        let entries = (0..len)
            .map(|i| GalleryEntry::from_src(format!("{i}.jpg")))
            .collect();
        GallerySession::new(entries, start)
    }

    #[test]
    fn empty_or_out_of_range_start_is_rejected() {
        assert!(session(0, 0).is_none());
        assert!(session(3, 3).is_none());
        assert!(session(3, 2).is_some());
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut s = session(3, 2).unwrap();
        assert_eq!(s.navigate(Direction::Next), 0);
        assert_eq!(s.navigate(Direction::Previous), 2);
        assert_eq!(s.navigate(Direction::Previous), 1);
        assert_eq!(s.current_entry().src, "1.jpg");
    }

    #[test]
    fn single_entry_wraps_to_itself() {
        let mut s = session(1, 0).unwrap();
        assert_eq!(s.navigate(Direction::Next), 0);
        assert_eq!(s.navigate(Direction::Previous), 0);
    }

    #[test]
    fn select_ignores_out_of_range() {
        let mut s = session(4, 0).unwrap();
        assert!(s.select(3));
        assert_eq!(s.current(), 3);
        assert!(!s.select(4));
        assert_eq!(s.current(), 3);
    }
}
