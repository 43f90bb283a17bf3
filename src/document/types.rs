//! Core document types.

/// Rendered terminal lines for one or more sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Rendered lines for display
    lines: Vec<RenderedLine>,
    /// First rendered line of every section in this document
    section_starts: Vec<usize>,
}

impl Document {
    /// Create an empty document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap the lines of a single section.
    pub(crate) fn from_lines(lines: Vec<RenderedLine>) -> Self {
        let section_starts = if lines.is_empty() { Vec::new() } else { vec![0] };
        Self {
            lines,
            section_starts,
        }
    }

    /// Append another rendered document below this one.
    ///
    /// Section starts of `other` are shifted so they keep pointing at the
    /// same rendered lines.
    pub fn append(&mut self, other: Self) {
        let base = self.lines.len();
        self.lines.extend(other.lines);
        self.section_starts
            .extend(other.section_starts.into_iter().map(|start| start + base));
    }

    /// Push a single line at the end.
    pub(crate) fn push_line(&mut self, line: RenderedLine) {
        self.lines.push(line);
    }

    /// Get the total number of rendered lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// First rendered line of each section.
    pub fn section_starts(&self) -> &[usize] {
        &self.section_starts
    }

    /// Index of the section that owns rendered line `line`.
    ///
    /// Divider lines belong to the section above them. Returns `None` for an
    /// empty document.
    pub fn section_at(&self, line: usize) -> Option<usize> {
        self.section_starts
            .partition_point(|&start| start <= line)
            .checked_sub(1)
    }

    /// Get visible lines for rendering.
    ///
    /// Returns lines from `offset` to `offset + count`.
    pub fn visible_lines(&self, offset: usize, count: usize) -> Vec<&RenderedLine> {
        self.lines.iter().skip(offset).take(count).collect()
    }

    /// Get a specific rendered line by index.
    pub fn line_at(&self, index: usize) -> Option<&RenderedLine> {
        self.lines.get(index)
    }

    /// All rendered lines.
    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }
}

/// A single rendered line with styling information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// The text content of the line
    content: String,
    /// The type of line (for styling)
    line_type: LineType,
    /// Optional inline-styled spans for rendering
    spans: Vec<InlineSpan>,
}

impl RenderedLine {
    /// Create a new rendered line.
    pub const fn new(content: String, line_type: LineType) -> Self {
        Self {
            content,
            line_type,
            spans: Vec::new(),
        }
    }

    /// Create a new rendered line with inline spans.
    pub const fn with_spans(content: String, line_type: LineType, spans: Vec<InlineSpan>) -> Self {
        Self {
            content,
            line_type,
            spans,
        }
    }

    /// Get the text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the line type.
    pub const fn line_type(&self) -> &LineType {
        &self.line_type
    }

    /// Get inline spans, if present.
    pub fn spans(&self) -> Option<&[InlineSpan]> {
        if self.spans.is_empty() {
            None
        } else {
            Some(&self.spans)
        }
    }
}

/// Inline style flags for a text span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub code: bool,
    pub strikethrough: bool,
    pub link: bool,
    pub fg: Option<InlineColor>,
}

/// RGB color for inline styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A styled inline span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self { text, style }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }
}

/// Type of a rendered line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Normal paragraph text
    Paragraph,
    /// Heading with level (1-6)
    Heading(u8),
    /// Code block line
    CodeBlock,
    /// Block quote line
    BlockQuote,
    /// List item with nesting level
    ListItem(usize),
    /// Table row
    Table,
    /// Horizontal rule inside a section
    HorizontalRule,
    /// Divider drawn between sections in continuous mode
    SectionBreak,
    /// Empty line
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(lines: &[&str]) -> Document {
        Document::from_lines(
            lines
                .iter()
                .map(|l| RenderedLine::new((*l).to_string(), LineType::Paragraph))
                .collect(),
        )
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::empty();
        assert_eq!(doc.line_count(), 0);
        assert!(doc.section_starts().is_empty());
        assert_eq!(doc.section_at(0), None);
    }

    #[test]
    fn test_rendered_line_type() {
        let line = RenderedLine::new("# Heading".to_string(), LineType::Heading(1));
        assert_eq!(line.line_type(), &LineType::Heading(1));
        assert!(line.spans().is_none());
    }

    #[test]
    fn test_visible_lines() {
        let doc = doc_with(&["Line 1", "Line 2", "Line 3", "Line 4", "Line 5"]);
        let visible = doc.visible_lines(1, 2);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].content(), "Line 2");
        assert_eq!(visible[1].content(), "Line 3");
    }

    #[test]
    fn test_visible_lines_beyond_end() {
        let doc = doc_with(&["Line 1", "Line 2"]);
        assert_eq!(doc.visible_lines(0, 10).len(), 2);
    }

    #[test]
    fn test_append_shifts_section_starts() {
        let mut doc = doc_with(&["A", "a body"]);
        doc.append(doc_with(&["B", "b body", "more"]));

        assert_eq!(doc.line_count(), 5);
        assert_eq!(doc.section_starts(), &[0, 2]);
        assert_eq!(doc.line_at(2).unwrap().content(), "B");
    }

    #[test]
    fn test_section_at_maps_lines_to_owning_section() {
        let mut doc = doc_with(&["A", "a body"]);
        doc.append(doc_with(&["B", "b body", "more"]));
        doc.append(doc_with(&["C"]));

        assert_eq!(doc.section_at(0), Some(0));
        assert_eq!(doc.section_at(1), Some(0));
        assert_eq!(doc.section_at(2), Some(1));
        assert_eq!(doc.section_at(4), Some(1));
        assert_eq!(doc.section_at(5), Some(2));
        assert_eq!(doc.section_at(500), Some(2));
    }

    #[test]
    fn test_append_empty_document_adds_no_section() {
        let mut doc = doc_with(&["A"]);
        doc.append(Document::empty());
        assert_eq!(doc.section_starts(), &[0]);
    }
}
