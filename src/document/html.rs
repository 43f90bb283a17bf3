//! HTML rendering for export.
//!
//! Produces a standalone page: a nav list of documents, one
//! `<section class="card">` per section, and the page theme on
//! `<html data-theme>`.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, format_html, parse_document};

use super::sections::Section;
use crate::config::ThemeMode;
use crate::highlight::{code_language, highlight_html};
use crate::store::DocumentEntry;

/// Switches for HTML output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Pass raw HTML in the Markdown through instead of escaping it.
    pub allow_raw_html: bool,
}

/// Render one section's Markdown to an HTML fragment.
///
/// Raw HTML in the source is escaped unless `options.allow_raw_html` is set.
/// Fenced blocks with a known language become highlighted
/// `<div class="code language-xxx">` blocks.
pub fn render_section_html(text: &str, options: &HtmlOptions) -> String {
    let arena = Arena::new();
    let comrak_options = super::markdown_options(options.allow_raw_html);
    let root = parse_document(&arena, text, &comrak_options);
    let highlighted = highlight_code_blocks(root);

    let mut bytes = Vec::new();
    if let Err(err) = format_html(root, &comrak_options, &mut bytes) {
        tracing::warn!(%err, "html formatting failed");
        return String::new();
    }
    tracing::debug!(highlighted, "rendered section html");
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Build a full HTML page for the document at `selected` in `entries`.
///
/// Only the entry at `selected` is marked current in the nav, even when
/// several entries share a label.
pub fn render_page_html(
    entries: &[DocumentEntry],
    selected: usize,
    sections: &[Section],
    theme: ThemeMode,
    options: &HtmlOptions,
) -> String {
    let mut nav = String::new();
    for (idx, entry) in entries.iter().enumerate() {
        let class = if idx == selected {
            " class=\"current\""
        } else {
            ""
        };
        nav.push_str(&format!(
            "<li{class}>{}</li>\n",
            html_escape(&entry.name)
        ));
    }

    let mut cards = String::new();
    for section in sections {
        cards.push_str(&format!(
            "<section class=\"card\" data-index=\"{}\">\n{}</section>\n",
            section.index(),
            render_section_html(section.text(), options)
        ));
    }

    let title = html_escape(entries.get(selected).map_or("", |entry| entry.name.as_str()));
    format!(
        "<!DOCTYPE html>\n<html data-theme=\"{theme}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{PAGE_CSS}</style>\n</head>\n<body>\n\
         <nav><ul>\n{nav}</ul></nav>\n<main>\n<h1 class=\"doc-title\">{title}</h1>\n\
         {cards}</main>\n</body>\n</html>\n",
        theme = theme.as_str(),
    )
}

const PAGE_CSS: &str = "\
:root { color-scheme: dark; }
html[data-theme=\"dark\"] body { background: #1e1e1e; color: #ddd; }
html[data-theme=\"light\"] { color-scheme: light; }
html[data-theme=\"light\"] body { background: #fafafa; color: #222; }
nav ul { list-style: none; display: flex; gap: 1em; padding: 0; }
nav li.current { font-weight: bold; text-decoration: underline; }
section.card { border: 1px solid #8884; border-radius: 6px; padding: 0 1em; margin: 1em 0; }
div.code pre { padding: 0.5em; overflow-x: auto; }
";

/// Replace fenced blocks that name a known language with highlighted HTML.
fn highlight_code_blocks<'a>(root: &'a AstNode<'a>) -> usize {
    let mut replaced = 0usize;
    for node in root.descendants() {
        let replacement = {
            let data = node.data.borrow();
            match &data.value {
                NodeValue::CodeBlock(block) if block.fenced => code_language(&block.info)
                    .and_then(|lang| {
                        highlight_html(lang, &block.literal).map(|html| {
                            format!(
                                "<div class=\"code language-{}\">{html}</div>\n",
                                html_escape(lang)
                            )
                        })
                    }),
                _ => None,
            }
        };
        if let Some(raw) = replacement {
            node.data.borrow_mut().value = NodeValue::Raw(raw);
            replaced += 1;
        }
    }
    replaced
}

fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
