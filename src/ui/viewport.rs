//! Scroll position over the rendered lines of the current view.

use std::ops::Range;

/// The visible window into a rendered document or card.
///
/// Offsets are always clamped so the last page is full whenever the
/// document is longer than the window.
///
/// # Example
///
/// ```
/// use cheatdeck::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 20, 50);
/// vp.page_down();
/// assert_eq!(vp.visible_range(), 20..40);
/// vp.go_to_bottom();
/// assert_eq!(vp.offset(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    /// `width` is the full terminal width; `height` is the rows left for text.
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.height as usize).min(self.total_lines);
        self.offset..end
    }

    /// Scroll position as 0-100; short documents report 100.
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }
        // offset <= max_offset, so the quotient is at most 100
        u8::try_from(self.offset * 100 / max_offset).unwrap_or(100)
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Called after every re-render.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_viewport_starts_at_top() {
        let vp = Viewport::new(80, 20, 50);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.visible_range(), 0..20);
    }

    #[test]
    fn test_visible_range_with_short_document() {
        let vp = Viewport::new(80, 20, 7);
        assert_eq!(vp.visible_range(), 0..7);
    }

    #[test]
    fn test_scroll_down_clamps_to_last_page() {
        let mut vp = Viewport::new(80, 20, 50);
        vp.scroll_down(1000);
        assert_eq!(vp.offset(), 30);
        assert!(!vp.can_scroll_down());
    }

    #[test]
    fn test_scroll_up_clamps_to_zero() {
        let mut vp = Viewport::new(80, 20, 50);
        vp.scroll_down(5);
        vp.scroll_up(100);
        assert_eq!(vp.offset(), 0);
        assert!(!vp.can_scroll_up());
    }

    #[test]
    fn test_page_up_and_down() {
        let mut vp = Viewport::new(80, 20, 50);
        vp.page_down();
        assert_eq!(vp.offset(), 20);
        vp.page_down();
        assert_eq!(vp.offset(), 30);
        vp.page_up();
        assert_eq!(vp.offset(), 10);
    }

    #[test]
    fn test_scroll_percent() {
        let mut vp = Viewport::new(80, 20, 50);
        assert_eq!(vp.scroll_percent(), 0);
        vp.scroll_down(15);
        assert_eq!(vp.scroll_percent(), 50);
        vp.go_to_bottom();
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_scroll_percent_fits_on_screen() {
        assert_eq!(Viewport::new(80, 20, 0).scroll_percent(), 100);
        assert_eq!(Viewport::new(80, 20, 12).scroll_percent(), 100);
    }

    #[test]
    fn test_resize_keeps_valid_offset() {
        let mut vp = Viewport::new(80, 20, 50);
        vp.go_to_bottom();
        vp.resize(100, 40);
        assert_eq!(vp.offset(), 10);
        assert_eq!(vp.width(), 100);
    }

    #[test]
    fn test_set_total_lines_clamps_offset() {
        let mut vp = Viewport::new(80, 20, 50);
        vp.go_to_bottom();
        vp.set_total_lines(25);
        assert_eq!(vp.offset(), 5);
        assert_eq!(vp.total_lines(), 25);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn visible_range_within_bounds(
                total_lines in 0..10000usize,
                height in 1..100u16,
                scroll in 0..20000usize,
            ) {
                let mut vp = Viewport::new(80, height, total_lines);
                vp.scroll_down(scroll);

                let range = vp.visible_range();
                prop_assert!(range.start <= range.end);
                prop_assert!(range.end <= total_lines);
                prop_assert!(vp.scroll_percent() <= 100);
            }
        }
    }
}
