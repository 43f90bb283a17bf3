//! Syntax highlighting for code blocks.
//!
//! Uses syntect with its bundled syntaxes and a fixed dark theme. The page
//! theme only changes how bright foregrounds are toned for a light screen.

use std::sync::{Mutex, OnceLock};

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::config::ThemeMode;
use crate::document::{InlineColor, InlineSpan, InlineStyle};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_rust_produces_colored_spans() {
        let code = "fn main() {\n    let x = 1;\n}\n";
        let lines = highlight_code(Some("rust"), code, ThemeMode::Dark);

        assert_eq!(lines.len(), 3);
        let has_color = lines
            .iter()
            .flatten()
            .any(|span| span.style().fg.is_some());
        assert!(has_color, "Expected at least one colored span for Rust");
    }

    #[test]
    fn test_highlight_js_by_extension_token() {
        let lines = highlight_code(Some("js"), "const x = 1;", ThemeMode::Dark);
        assert!(lines.iter().flatten().any(|s| s.style().fg.is_some()));
    }

    #[test]
    fn test_highlight_unknown_language_falls_back_to_plain() {
        let lines = highlight_code(Some("nope"), "just text", ThemeMode::Dark);

        assert_eq!(lines.len(), 1);
        let has_color = lines
            .iter()
            .flatten()
            .any(|span| span.style().fg.is_some());
        assert!(!has_color, "Unknown language should not colorize");
    }

    #[test]
    fn test_highlight_plain_code_sets_code_style() {
        let lines = highlight_code(None, "plain", ThemeMode::Dark);
        assert!(lines[0].iter().all(|span| span.style().code));
    }

    #[test]
    fn test_code_language_strips_class_prefix() {
        assert_eq!(code_language("language-js"), Some("js"));
        assert_eq!(code_language("rust ignore"), Some("rust"));
        assert_eq!(code_language("   "), None);
        assert_eq!(code_language("language-"), None);
    }

    #[test]
    fn test_highlight_html_wraps_known_language() {
        let html = highlight_html("js", "const x = 1;").expect("js is known");
        assert!(html.starts_with("<pre"));
        assert!(html.contains("style="));
        assert!(highlight_html("nope", "x").is_none());
    }

    #[test]
    fn test_dark_mode_keeps_colors() {
        let color = InlineColor {
            r: 240,
            g: 230,
            b: 120,
        };
        assert_eq!(adjust_fg_for_background(color, ThemeMode::Dark), color);
    }

    #[test]
    fn test_light_mode_darkens_bright_fg() {
        let bright = InlineColor {
            r: 240,
            g: 230,
            b: 120,
        };
        let adjusted = adjust_fg_for_background(bright, ThemeMode::Light);
        assert!(adjusted.r < bright.r);
        assert!(adjusted.g < bright.g);
        assert!(adjusted.b < bright.b);
    }

    #[test]
    fn test_light_mode_caps_luma_for_readability() {
        let bright = InlineColor {
            r: 240,
            g: 230,
            b: 120,
        };
        let adjusted = adjust_fg_for_background(bright, ThemeMode::Light);
        let luma = luma(adjusted);
        assert!(luma < 120.0, "Adjusted color still too bright: {luma}");
    }
}

/// Language named by a fence info string.
///
/// Takes the first word and drops a leading `language-` class prefix.
pub fn code_language(info: &str) -> Option<&str> {
    let word = info.split_whitespace().next()?;
    let lang = word.strip_prefix("language-").unwrap_or(word);
    (!lang.is_empty()).then_some(lang)
}

/// Highlight `code` into styled spans, one vector per source line.
///
/// Unknown or missing languages produce plain code-styled spans.
pub fn highlight_code(
    language: Option<&str>,
    code: &str,
    background: ThemeMode,
) -> Vec<Vec<InlineSpan>> {
    let mut lines = Vec::new();
    let syntax_set = syntax_set();

    let Some(syntax) = language.and_then(find_syntax) else {
        for line in code.lines() {
            let style = InlineStyle {
                code: true,
                ..InlineStyle::default()
            };
            lines.push(vec![InlineSpan::new(line.to_string(), style)]);
        }
        return lines;
    };

    let mut highlighter = HighlightLines::new(syntax, theme());
    for line in code.lines() {
        let ranges = highlighter
            .highlight_line(line, syntax_set)
            .unwrap_or_default();
        let mut spans = Vec::new();
        for (style, text) in ranges {
            let fg = InlineColor {
                r: style.foreground.r,
                g: style.foreground.g,
                b: style.foreground.b,
            };
            let inline_style = InlineStyle {
                code: true,
                fg: Some(adjust_fg_for_background(fg, background)),
                ..InlineStyle::default()
            };
            spans.push(InlineSpan::new(text.to_string(), inline_style));
        }
        lines.push(spans);
    }

    lines
}

/// Highlight `code` as an inline-styled HTML `<pre>` block.
///
/// Returns `None` when the language is unknown or highlighting fails.
pub fn highlight_html(language: &str, code: &str) -> Option<String> {
    let syntax = find_syntax(language)?;
    match highlighted_html_for_string(code, syntax_set(), syntax, theme()) {
        Ok(html) => Some(html),
        Err(err) => {
            tracing::warn!(language, %err, "html highlighting failed");
            None
        }
    }
}

fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
    let syntax_set = syntax_set();
    syntax_set
        .find_syntax_by_token(language)
        .or_else(|| syntax_set.find_syntax_by_name(language))
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        tracing::debug!("loading default syntax set");
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        let theme_set = ThemeSet::load_defaults();
        for name in ["base16-ocean.dark", "base16-eighties.dark", "Solarized (dark)"] {
            if let Some(theme) = theme_set.themes.get(name) {
                return theme.clone();
            }
        }

        theme_set
            .themes
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    })
}

static PAGE_THEME: OnceLock<Mutex<ThemeMode>> = OnceLock::new();

/// Set the process-wide page theme read by terminal styling.
pub fn set_background_mode(mode: ThemeMode) {
    let lock = PAGE_THEME.get_or_init(|| Mutex::new(ThemeMode::default()));
    if let Ok(mut guard) = lock.lock() {
        *guard = mode;
    }
}

/// The current process-wide page theme.
pub fn background_mode() -> ThemeMode {
    let lock = PAGE_THEME.get_or_init(|| Mutex::new(ThemeMode::default()));
    lock.lock().map_or_else(|_| ThemeMode::default(), |guard| *guard)
}

pub fn is_light_background() -> bool {
    background_mode().is_light()
}

fn luma(color: InlineColor) -> f32 {
    0.0722f32.mul_add(
        f32::from(color.b),
        0.2126f32.mul_add(f32::from(color.r), 0.7152 * f32::from(color.g)),
    )
}

fn adjust_fg_for_background(color: InlineColor, mode: ThemeMode) -> InlineColor {
    match mode {
        ThemeMode::Dark => color,
        ThemeMode::Light => {
            if luma(color) < 155.0 {
                return color;
            }
            // Channel values scaled by 0.42 stay within 0..=255.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let darken = |c: u8| (f32::from(c) * 0.42).round() as u8;
            InlineColor {
                r: darken(color.r),
                g: darken(color.g),
                b: darken(color.b),
            }
        }
    }
}

/// Serializes tests that read or write the page theme.
#[cfg(test)]
pub(crate) fn page_theme_guard() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
