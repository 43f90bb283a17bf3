//! Section rendering with comrak.
//!
//! Walks the comrak AST and lays every block out as styled terminal lines.
//! Fenced code blocks that name a language are highlighted while the frame is
//! built; everything else is plain.

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue, TableAlignment};
use comrak::{Arena, parse_document};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::sections::Section;
use super::types::{Document, InlineSpan, InlineStyle, LineType, RenderedLine};
use crate::config::ThemeMode;

const CODE_RIGHT_PADDING: usize = 3;
const CODE_TAB_WIDTH: usize = 4;

/// Render one section's Markdown into terminal lines.
///
/// # Example
///
/// ```
/// use cheatdeck::config::ThemeMode;
/// use cheatdeck::document::render_section;
///
/// let doc = render_section("# Hello\n\nWorld", 80, ThemeMode::Dark);
/// assert!(doc.line_count() >= 3);
/// ```
pub fn render_section(text: &str, width: u16, background: ThemeMode) -> Document {
    let arena = Arena::new();
    let options = super::markdown_options(false);
    let root = parse_document(&arena, text, &options);

    let mut ctx = RenderContext {
        lines: Vec::new(),
        wrap_width: usize::from(width.max(1)),
        background,
    };
    ctx.process_node(root, 0, None);
    trim_trailing_empty(&mut ctx.lines);

    Document::from_lines(ctx.lines)
}

/// Render every section in order, separated by a divider line.
///
/// This is the continuous-mode view. Each section's first line is recorded in
/// [`Document::section_starts`].
pub fn render_sections(sections: &[Section], width: u16, background: ThemeMode) -> Document {
    let mut document = Document::empty();
    for (idx, section) in sections.iter().enumerate() {
        if idx > 0 {
            document.push_line(RenderedLine::new(String::new(), LineType::Empty));
            document.push_line(RenderedLine::new(
                "─".repeat(usize::from(width.max(1))),
                LineType::SectionBreak,
            ));
            document.push_line(RenderedLine::new(String::new(), LineType::Empty));
        }
        document.append(render_section(section.text(), width, background));
    }
    tracing::debug!(
        sections = sections.len(),
        lines = document.line_count(),
        "rendered continuous view"
    );
    document
}

struct RenderContext {
    lines: Vec<RenderedLine>,
    wrap_width: usize,
    background: ThemeMode,
}

impl RenderContext {
    fn push_empty(&mut self) {
        self.lines
            .push(RenderedLine::new(String::new(), LineType::Empty));
    }

    fn push_wrapped(&mut self, spans: &[InlineSpan], line_type: LineType, first: &str, next: &str) {
        for line_spans in wrap_spans(spans, self.wrap_width, first, next) {
            let content = spans_to_string(&line_spans);
            self.lines
                .push(RenderedLine::with_spans(content, line_type, line_spans));
        }
    }

    fn process_node<'a>(&mut self, node: &'a AstNode<'a>, depth: usize, marker: Option<String>) {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => {
                let text = extract_text(node);
                if !self.lines.is_empty() {
                    ensure_trailing_empty_lines(&mut self.lines, 1);
                }
                let prefix = "#".repeat(usize::from(heading.level));
                let spans = vec![InlineSpan::new(
                    format!("{prefix} {text}"),
                    InlineStyle::default(),
                )];
                self.push_wrapped(&spans, LineType::Heading(heading.level), "", "");
                self.push_empty();
            }

            NodeValue::Paragraph => {
                let spans = collect_inline_spans(node);
                self.push_wrapped(&spans, LineType::Paragraph, "", "");
                self.push_empty();
            }

            NodeValue::CodeBlock(code_block) => {
                let language = crate::highlight::code_language(&code_block.info);
                self.render_code_block(language, &code_block.literal);
                self.push_empty();
            }

            NodeValue::List(list) => {
                let list_depth = depth + 1;
                let delimiter = match list.delimiter {
                    ListDelimType::Paren => ')',
                    ListDelimType::Period => '.',
                };
                let max_number = list.start + node.children().count().saturating_sub(1);
                let number_width = max_number.to_string().len();

                for (index, child) in node.children().enumerate() {
                    let base = match list.list_type {
                        ListType::Bullet => "•".to_string(),
                        ListType::Ordered => {
                            format!("{:>number_width$}{delimiter}", list.start + index)
                        }
                    };
                    self.process_node(child, list_depth, Some(format!("{base} ")));
                }
                if depth == 0 {
                    self.push_empty();
                }
            }

            NodeValue::Item(_) | NodeValue::TaskItem(_) => {
                self.render_item(node, depth, marker);
            }

            NodeValue::BlockQuote => {
                self.render_blockquote(node, 1);
                self.push_empty();
            }

            NodeValue::ThematicBreak => {
                let rule = "─".repeat(self.wrap_width.min(40));
                self.lines
                    .push(RenderedLine::new(rule, LineType::HorizontalRule));
                self.push_empty();
            }

            NodeValue::Table(_) => {
                for line in render_table(node, self.wrap_width) {
                    self.lines.push(RenderedLine::new(line, LineType::Table));
                }
                self.push_empty();
            }

            NodeValue::HtmlBlock(html) => {
                // Raw HTML is never interpreted in the terminal; show it as text.
                for raw in html.literal.lines() {
                    let spans = vec![InlineSpan::new(raw.to_string(), InlineStyle::default())];
                    self.push_wrapped(&spans, LineType::Paragraph, "", "");
                }
                self.push_empty();
            }

            _ => {
                for child in node.children() {
                    self.process_node(child, depth, marker.clone());
                }
            }
        }
    }

    fn render_item<'a>(&mut self, node: &'a AstNode<'a>, depth: usize, marker: Option<String>) {
        let indent = "  ".repeat(depth.saturating_sub(1));
        let marker = match &node.data.borrow().value {
            NodeValue::TaskItem(symbol) => {
                format!("{} ", if symbol.is_some() { "✓" } else { "□" })
            }
            _ => marker.unwrap_or_else(|| "- ".to_string()),
        };
        let prefix_first = format!("{indent}{marker}");
        let prefix_next = format!("{indent}{}", " ".repeat(display_width(&marker)));
        let mut rendered_paragraphs = 0usize;

        for child in node.children() {
            let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
            if is_paragraph {
                if rendered_paragraphs > 0 {
                    self.lines
                        .push(RenderedLine::new(String::new(), LineType::ListItem(depth)));
                }
                let spans = collect_inline_spans(child);
                let prefix = if rendered_paragraphs == 0 {
                    &prefix_first
                } else {
                    &prefix_next
                };
                self.push_wrapped(&spans, LineType::ListItem(depth), prefix, &prefix_next);
                rendered_paragraphs += 1;
            } else {
                self.process_node(child, depth, None);
            }
        }

        if rendered_paragraphs == 0 {
            self.push_wrapped(&[], LineType::ListItem(depth), &prefix_first, &prefix_next);
        }
    }

    fn render_code_block(&mut self, language: Option<&str>, literal: &str) {
        let literal = expand_code_text(literal);
        let literal = literal.as_str();
        let content_width = literal
            .lines()
            .map(display_width)
            .max()
            .unwrap_or(0)
            .min(self.wrap_width.saturating_sub(4 + CODE_RIGHT_PADDING).max(1));
        let label = format!(" {} ", language.unwrap_or("code"));
        let frame_inner_width = content_width + 2 + CODE_RIGHT_PADDING;
        let visible_label = truncate_text(&label, frame_inner_width);
        let top = format!(
            "┌{}{}┐",
            visible_label,
            "─".repeat(frame_inner_width.saturating_sub(display_width(&visible_label)))
        );
        self.lines.push(RenderedLine::new(top, LineType::CodeBlock));

        let highlighted = crate::highlight::highlight_code(language, literal, self.background);
        for spans in highlighted {
            let trimmed_spans = truncate_spans(&spans, content_width);
            let trimmed_width = display_width(&spans_to_string(&trimmed_spans));
            let padding =
                " ".repeat(content_width.saturating_sub(trimmed_width) + CODE_RIGHT_PADDING);

            let mut line_spans = vec![InlineSpan::new("│ ".to_string(), InlineStyle::default())];
            line_spans.extend(trimmed_spans);
            line_spans.push(InlineSpan::new(
                format!("{padding} │"),
                InlineStyle::default(),
            ));
            let content = spans_to_string(&line_spans);
            self.lines.push(RenderedLine::with_spans(
                content,
                LineType::CodeBlock,
                line_spans,
            ));
        }

        self.lines.push(RenderedLine::new(
            format!("└{}┘", "─".repeat(frame_inner_width)),
            LineType::CodeBlock,
        ));
    }

    fn render_blockquote<'a>(&mut self, node: &'a AstNode<'a>, quote_depth: usize) {
        let prefix = quote_prefix(quote_depth);

        for child in node.children() {
            match &child.data.borrow().value {
                NodeValue::Paragraph => {
                    let spans = collect_inline_spans(child);
                    self.push_wrapped(&spans, LineType::BlockQuote, &prefix, &prefix);
                }
                NodeValue::BlockQuote => {
                    self.render_blockquote(child, quote_depth + 1);
                }
                _ => {
                    let text = extract_text(child);
                    for raw_line in text.lines() {
                        let spans =
                            vec![InlineSpan::new(raw_line.to_string(), InlineStyle::default())];
                        self.push_wrapped(&spans, LineType::BlockQuote, &prefix, &prefix);
                    }
                }
            }
        }
    }
}

fn ensure_trailing_empty_lines(lines: &mut Vec<RenderedLine>, count: usize) {
    let existing = lines
        .iter()
        .rev()
        .take_while(|line| matches!(line.line_type(), LineType::Empty))
        .count();
    for _ in existing..count {
        lines.push(RenderedLine::new(String::new(), LineType::Empty));
    }
}

fn trim_trailing_empty(lines: &mut Vec<RenderedLine>) {
    while lines
        .last()
        .is_some_and(|line| matches!(line.line_type(), LineType::Empty))
    {
        lines.pop();
    }
}

fn quote_prefix(depth: usize) -> String {
    let mut prefix = String::from("  ");
    for _ in 0..depth {
        prefix.push_str("│ ");
    }
    prefix
}

fn render_table<'a>(table_node: &'a AstNode<'a>, wrap_width: usize) -> Vec<String> {
    let (alignments, mut rows, has_header) = collect_table_rows(table_node);
    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return Vec::new();
    }

    for row in &mut rows {
        row.resize(num_cols, String::new());
    }

    let mut col_widths = vec![1_usize; num_cols];
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            col_widths[idx] = col_widths[idx].max(display_width(cell));
        }
    }

    // Row width is 1 + sum(col_width + 3).
    let max_table_width = wrap_width.max(4);
    while 1 + col_widths.iter().sum::<usize>() + (3 * num_cols) > max_table_width {
        let Some((widest, _)) = col_widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
            break;
        };
        if col_widths[widest] <= 1 {
            break;
        }
        col_widths[widest] -= 1;
    }

    let mut lines = vec![render_table_border(&col_widths, '┌', '┬', '┐')];
    for (idx, row) in rows.iter().enumerate() {
        lines.push(render_table_row(row, &col_widths, &alignments));
        if has_header && idx == 0 {
            lines.push(render_table_border(&col_widths, '├', '┼', '┤'));
        }
    }
    lines.push(render_table_border(&col_widths, '└', '┴', '┘'));
    lines
}

fn collect_table_rows<'a>(
    table_node: &'a AstNode<'a>,
) -> (Vec<TableAlignment>, Vec<Vec<String>>, bool) {
    let alignments = match &table_node.data.borrow().value {
        NodeValue::Table(table) => table.alignments.clone(),
        _ => Vec::new(),
    };

    let mut rows = Vec::new();
    let mut has_header = false;
    for row_node in table_node.children() {
        let is_header = match row_node.data.borrow().value {
            NodeValue::TableRow(header) => header,
            _ => continue,
        };
        has_header |= is_header;

        let row_cells = row_node
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| {
                extract_text(cell)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rows.push(row_cells);
    }

    (alignments, rows, has_header)
}

fn render_table_border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let inner = widths
        .iter()
        .map(|width| "─".repeat(width + 2))
        .collect::<Vec<_>>()
        .join(&middle.to_string());
    format!("{left}{inner}{right}")
}

fn render_table_row(cells: &[String], widths: &[usize], alignments: &[TableAlignment]) -> String {
    let mut out = String::from("│");
    for (idx, width) in widths.iter().enumerate() {
        let content = truncate_text(cells.get(idx).map_or("", String::as_str), *width);
        let padding = width.saturating_sub(display_width(&content));

        out.push(' ');
        match alignments.get(idx).copied().unwrap_or(TableAlignment::None) {
            TableAlignment::Right => {
                out.push_str(&" ".repeat(padding));
                out.push_str(&content);
            }
            TableAlignment::Center => {
                let left = padding / 2;
                out.push_str(&" ".repeat(left));
                out.push_str(&content);
                out.push_str(&" ".repeat(padding - left));
            }
            TableAlignment::Left | TableAlignment::None => {
                out.push_str(&content);
                out.push_str(&" ".repeat(padding));
            }
        }
        out.push_str(" │");
    }
    out
}

/// Longest prefix of `text` whose [`display_width`] fits in `max_width`.
///
/// Measured on the whole prefix because a string's width is not always the
/// sum of its characters' widths (emoji sequences, control characters).
fn truncate_text(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if display_width(&out) > max_width {
            out.pop();
            break;
        }
    }
    out
}

/// Expand tabs to the next multiple of [`CODE_TAB_WIDTH`] and replace other
/// control characters with a space, so code measures the way it is drawn.
fn expand_code_text(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut column = 0usize;
    for ch in literal.chars() {
        match ch {
            '\n' => {
                out.push('\n');
                column = 0;
            }
            '\t' => {
                let fill = CODE_TAB_WIDTH - column % CODE_TAB_WIDTH;
                out.extend(std::iter::repeat_n(' ', fill));
                column += fill;
            }
            ch if ch.is_control() => {
                out.push(' ');
                column += 1;
            }
            ch => {
                out.push(ch);
                column += ch.width().unwrap_or(0);
            }
        }
    }
    out
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => {
            text.push('`');
            text.push_str(&c.literal);
            text.push('`');
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push('\n'),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

fn collect_inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    collect_inline_spans_recursive(node, InlineStyle::default(), &mut spans);
    spans
}

fn collect_inline_spans_recursive<'a>(
    node: &'a AstNode<'a>,
    style: InlineStyle,
    spans: &mut Vec<InlineSpan>,
) {
    let mut next = style;
    match &node.data.borrow().value {
        NodeValue::List(_) | NodeValue::Item(_) => return,
        NodeValue::Text(t) => {
            spans.push(InlineSpan::new(t.clone(), style));
            return;
        }
        NodeValue::Code(code) => {
            let code_style = InlineStyle {
                code: true,
                link: style.link,
                ..InlineStyle::default()
            };
            spans.push(InlineSpan::new(code.literal.clone(), code_style));
            return;
        }
        NodeValue::HtmlInline(raw) => {
            spans.push(InlineSpan::new(raw.clone(), style));
            return;
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            spans.push(InlineSpan::new(" ".to_string(), style));
            return;
        }
        NodeValue::Emph => next.emphasis = true,
        NodeValue::Strong => next.strong = true,
        NodeValue::Strikethrough => next.strikethrough = true,
        NodeValue::Link(_) => next.link = true,
        _ => {}
    }
    for child in node.children() {
        collect_inline_spans_recursive(child, next, spans);
    }
}

fn wrap_spans(
    spans: &[InlineSpan],
    width: usize,
    prefix_first: &str,
    prefix_next: &str,
) -> Vec<Vec<InlineSpan>> {
    let tokens = spans.iter().flat_map(split_inline_tokens);

    let mut lines: Vec<Vec<InlineSpan>> = Vec::new();
    let mut current: Vec<InlineSpan> = Vec::new();
    let mut current_len = 0usize;
    let mut has_word = false;

    let start_line = |prefix: &str, current: &mut Vec<InlineSpan>, current_len: &mut usize| {
        current.clear();
        *current_len = display_width(prefix);
        if !prefix.is_empty() {
            current.push(InlineSpan::new(prefix.to_string(), InlineStyle::default()));
        }
    };

    start_line(prefix_first, &mut current, &mut current_len);

    for token in tokens {
        let token_len = display_width(token.text());
        let token_is_ws = token.text().chars().all(char::is_whitespace);

        if current_len + token_len > width && has_word {
            lines.push(std::mem::take(&mut current));
            start_line(prefix_next, &mut current, &mut current_len);
            has_word = false;
        }

        if token_is_ws && !has_word {
            // Drop leading whitespace at wrapped line starts.
            continue;
        }

        current_len += token_len;
        current.push(token);
        has_word = true;
    }

    lines.push(current);
    lines
}

fn split_inline_tokens(span: &InlineSpan) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        if ws_state.is_some_and(|state| state != is_ws) {
            out.push(InlineSpan::new(std::mem::take(&mut buf), span.style()));
        }
        buf.push(ch);
        ws_state = Some(is_ws);
    }

    if !buf.is_empty() {
        out.push(InlineSpan::new(buf, span.style()));
    }

    out
}

fn spans_to_string(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}

/// Keep the leading spans whose joined text fits in `max_width` columns.
fn truncate_spans(spans: &[InlineSpan], max_width: usize) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut joined = String::new();
    for span in spans {
        let mut taken = String::new();
        let mut full = true;
        for ch in span.text().chars() {
            joined.push(ch);
            if display_width(&joined) > max_width {
                full = false;
                break;
            }
            taken.push(ch);
        }
        if !taken.is_empty() {
            out.push(InlineSpan::new(taken, span.style()));
        }
        if !full {
            break;
        }
    }
    out
}
