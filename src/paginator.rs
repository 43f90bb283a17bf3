//! Flashcard position within a section list.

/// Where the paginator sits relative to its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    NoSections,
    AtStart,
    Middle,
    AtEnd,
}

/// Clamped index into `len` sections.
///
/// `index < len` holds whenever `len > 0`. Moving past either end is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paginator {
    len: usize,
    index: usize,
}

impl Paginator {
    pub const fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    /// Advance one card, stopping at the last.
    pub const fn next(&mut self) {
        if self.index + 1 < self.len {
            self.index += 1;
        }
    }

    /// Go back one card, stopping at the first.
    pub const fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Start over on a new section list.
    pub const fn reset(&mut self, len: usize) {
        self.len = len;
        self.index = 0;
    }

    pub const fn current(&self) -> Option<usize> {
        if self.len == 0 { None } else { Some(self.index) }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn is_at_start(&self) -> bool {
        self.index == 0
    }

    pub const fn is_at_end(&self) -> bool {
        self.index + 1 >= self.len
    }

    pub const fn state(&self) -> PageState {
        if self.len == 0 {
            PageState::NoSections
        } else if self.is_at_start() {
            PageState::AtStart
        } else if self.is_at_end() {
            PageState::AtEnd
        } else {
            PageState::Middle
        }
    }
}
