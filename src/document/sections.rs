//! Splitting raw cheat-sheet text into sections.
//!
//! A section boundary is every literal occurrence of [`SECTION_SEPARATOR`].
//! The split knows nothing about Markdown: a `---` inside a code fence or a
//! table delimiter row splits the text just the same.

use std::ops::Range;

/// The literal token that separates sections.
pub const SECTION_SEPARATOR: &str = "---";

/// One trimmed fragment of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    index: usize,
    text: String,
    span: Range<usize>,
}

impl Section {
    fn from_fragment(index: usize, raw: &str, span: Range<usize>) -> Self {
        Self {
            index,
            text: raw[span.clone()].trim().to_string(),
            span,
        }
    }

    /// Position of this section in its list.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Trimmed Markdown text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte range of the untrimmed fragment in the source text.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// True when the fragment holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Split `raw` at every [`SECTION_SEPARATOR`].
///
/// Always returns exactly `k + 1` sections for `k` separators, in source
/// order, each trimmed of surrounding whitespace. Empty input yields a
/// single empty section.
pub fn split_sections(raw: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut start = 0;
    for (pos, separator) in raw.match_indices(SECTION_SEPARATOR) {
        sections.push(Section::from_fragment(sections.len(), raw, start..pos));
        start = pos + separator.len();
    }
    sections.push(Section::from_fragment(sections.len(), raw, start..raw.len()));
    sections
}

/// Sections worth showing: [`split_sections`] without blank fragments.
///
/// Indexes are renumbered so they stay dense. A document that is empty or
/// made only of separators has no displayable sections.
pub fn displayable_sections(raw: &str) -> Vec<Section> {
    split_sections(raw)
        .into_iter()
        .filter(|section| !section.is_blank())
        .enumerate()
        .map(|(index, section)| Section { index, ..section })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn texts(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(Section::text).collect()
    }

    #[test]
    fn test_split_three_sections() {
        let sections = split_sections("# A\n\n---\n\n# B\n\n---\n\n# C");
        assert_eq!(texts(&sections), vec!["# A", "# B", "# C"]);
        assert_eq!(
            sections.iter().map(Section::index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_split_empty_input_yields_one_empty_section() {
        let sections = split_sections("");
        assert_eq!(sections.len(), 1);
        assert!(sections[0].is_blank());
    }

    #[test]
    fn test_split_without_separator_yields_whole_text() {
        let sections = split_sections("no separator here");
        assert_eq!(texts(&sections), vec!["no separator here"]);
    }

    #[test]
    fn test_split_keeps_blank_fragments() {
        let sections = split_sections("---\n---");
        assert_eq!(sections.len(), 3);
        assert!(sections.iter().all(Section::is_blank));
    }

    #[test]
    fn test_separator_inside_code_fence_still_splits() {
        let raw = "```yaml\n---\nkey: value\n```";
        let sections = split_sections(raw);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].text(), "```yaml");
        assert_eq!(sections[1].text(), "key: value\n```");
    }

    #[test]
    fn test_table_delimiter_row_splits() {
        let sections = split_sections("| a |\n|---|\n| 1 |");
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn test_four_dashes_split_once_and_keep_remainder() {
        let sections = split_sections("a----b");
        assert_eq!(texts(&sections), vec!["a", "-b"]);
    }

    #[test]
    fn test_displayable_sections_drop_blank_fragments() {
        let sections = displayable_sections("\n---\n# A\n---\n   \n---\n# B\n---");
        assert_eq!(texts(&sections), vec!["# A", "# B"]);
        assert_eq!(sections[1].index(), 1);
    }

    #[test]
    fn test_displayable_sections_of_empty_document_is_empty() {
        assert!(displayable_sections("").is_empty());
        assert!(displayable_sections("---\n---\n").is_empty());
    }

    proptest! {
        #[test]
        fn split_count_is_separators_plus_one(parts in prop::collection::vec("[a-z #\\n-]{0,12}", 0..8)) {
            let raw = parts.join(SECTION_SEPARATOR);
            let expected = raw.matches(SECTION_SEPARATOR).count() + 1;
            prop_assert_eq!(split_sections(&raw).len(), expected);
        }

        #[test]
        fn spans_rebuild_source(raw in "[a-z \\n-]{0,64}") {
            let sections = split_sections(&raw);
            let rebuilt = sections
                .iter()
                .map(|section| &raw[section.span()])
                .collect::<Vec<_>>()
                .join(SECTION_SEPARATOR);
            prop_assert_eq!(rebuilt, raw);
        }

        #[test]
        fn fragments_are_trimmed(raw in "[a-z \\t\\n-]{0,64}") {
            for section in split_sections(&raw) {
                prop_assert_eq!(section.text(), section.text().trim());
            }
        }
    }
}
