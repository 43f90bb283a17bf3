//! Cheat-sheet parsing and rendering.
//!
//! This module handles:
//! - Splitting raw text into sections on `---`
//! - Rendering sections to styled terminal lines with comrak
//! - Rendering sections to HTML for export

mod html;
mod parser;
mod sections;
mod types;

use comrak::Options;

pub use html::{HtmlOptions, render_page_html, render_section_html};
pub use parser::{render_section, render_sections};
pub use sections::{SECTION_SEPARATOR, Section, displayable_sections, split_sections};
pub use types::{Document, InlineColor, InlineSpan, InlineStyle, LineType, RenderedLine};

/// comrak options shared by the terminal and HTML renderers.
///
/// GFM tables, strikethrough, task lists and autolinks are on. Raw HTML is
/// escaped unless `allow_raw_html` is set.
fn markdown_options(allow_raw_html: bool) -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.render.unsafe_ = allow_raw_html;
    options.render.escape = !allow_raw_html;
    options
}
