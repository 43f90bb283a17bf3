//! Theming and color definitions.
//!
//! Every style here reads the process-wide page theme from
//! [`crate::highlight::is_light_background`], so toggling the theme restyles
//! the whole screen on the next draw.

use ratatui::style::{Color, Modifier, Style};

use crate::document::{InlineColor, InlineStyle, LineType};

/// Base style of the whole page.
pub fn page_style() -> Style {
    if crate::highlight::is_light_background() {
        Style::default().bg(Color::Indexed(255)).fg(Color::Indexed(235))
    } else {
        Style::default().bg(Color::Reset).fg(Color::Reset)
    }
}

/// Get the style for a given line type.
pub fn style_for_line_type(line_type: &LineType) -> Style {
    let light_bg = crate::highlight::is_light_background();
    let pick = |light: u8, dark: Color| {
        if light_bg { Color::Indexed(light) } else { dark }
    };
    match line_type {
        // Headings - bold with distinct colors per level
        LineType::Heading(1) => Style::default()
            .fg(pick(24, Color::Cyan))
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineType::Heading(2) => Style::default()
            .fg(pick(22, Color::Green))
            .add_modifier(Modifier::BOLD),
        LineType::Heading(3) => Style::default()
            .fg(pick(58, Color::Yellow))
            .add_modifier(Modifier::BOLD),
        LineType::Heading(4) => Style::default()
            .fg(pick(24, Color::Blue))
            .add_modifier(Modifier::BOLD),
        LineType::Heading(5) => Style::default()
            .fg(pick(54, Color::Magenta))
            .add_modifier(Modifier::BOLD),
        LineType::Heading(_) => Style::default()
            .fg(pick(24, Color::Cyan))
            .add_modifier(Modifier::BOLD),

        LineType::CodeBlock => Style::default()
            .fg(pick(238, Color::Indexed(245)))
            .add_modifier(Modifier::DIM),

        LineType::BlockQuote => Style::default()
            .fg(pick(24, Color::Blue))
            .add_modifier(Modifier::ITALIC),

        LineType::HorizontalRule => Style::default()
            .fg(pick(241, Color::Indexed(240)))
            .add_modifier(Modifier::DIM),

        LineType::SectionBreak => Style::default().fg(pick(244, Color::Indexed(238))),

        LineType::Table => Style::default().fg(pick(236, Color::Indexed(252))),

        LineType::ListItem(_) | LineType::Paragraph | LineType::Empty => Style::default(),
    }
}

/// Get the style for an inline span, merged with a base line style.
pub fn style_for_inline(base: Style, inline: InlineStyle) -> Style {
    let mut style = base;

    if let Some(fg) = inline.fg {
        style = style
            .fg(fg_color_for_terminal(fg))
            .remove_modifier(Modifier::DIM);
    }
    if inline.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if inline.link {
        style = style.add_modifier(Modifier::UNDERLINED);
        if inline.fg.is_none() {
            let light_bg = crate::highlight::is_light_background();
            style = style.fg(if light_bg {
                Color::Blue
            } else {
                Color::LightBlue
            });
        }
    }
    if inline.code && inline.fg.is_none() {
        let light_bg = crate::highlight::is_light_background();
        style = style
            .fg(if light_bg {
                Color::Indexed(88)
            } else {
                Color::Red
            })
            .add_modifier(Modifier::BOLD);
    }

    style
}

pub fn nav_bar_style() -> Style {
    if crate::highlight::is_light_background() {
        Style::default().bg(Color::Indexed(252)).fg(Color::Indexed(235))
    } else {
        Style::default().bg(Color::Indexed(236)).fg(Color::Indexed(252))
    }
}

pub fn nav_tab_style(selected: bool) -> Style {
    if selected {
        nav_bar_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        nav_bar_style()
    }
}

pub fn nav_separator_style() -> Style {
    nav_bar_style().add_modifier(Modifier::DIM)
}

pub fn card_bar_style() -> Style {
    nav_bar_style()
}

/// Prev/Next button; disabled buttons are dimmed.
pub fn button_style(enabled: bool) -> Style {
    if enabled {
        card_bar_style().add_modifier(Modifier::BOLD)
    } else {
        card_bar_style().fg(Color::DarkGray)
    }
}

pub fn status_style() -> Style {
    if crate::highlight::is_light_background() {
        Style::default().bg(Color::Indexed(252)).fg(Color::Indexed(235))
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

fn fg_color_for_terminal(fg: InlineColor) -> Color {
    if supports_truecolor() {
        Color::Rgb(fg.r, fg.g, fg.b)
    } else {
        Color::Indexed(rgb_to_xterm_256(fg.r, fg.g, fg.b))
    }
}

fn supports_truecolor() -> bool {
    if let Ok(force) = std::env::var("CHEATDECK_TRUECOLOR") {
        let value = force.to_ascii_lowercase();
        return matches!(value.as_str(), "1" | "true" | "yes" | "on");
    }
    supports_truecolor_from_env(
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    if let Some(ct) = colorterm {
        let lower = ct.to_ascii_lowercase();
        if lower.contains("truecolor") || lower.contains("24bit") {
            return true;
        }
    }
    term.is_some_and(|t| {
        let lower = t.to_ascii_lowercase();
        lower.contains("direct") || lower.contains("truecolor")
    })
}

fn rgb_to_xterm_256(r: u8, g: u8, b: u8) -> u8 {
    // Result is always 0-5, fits in u8
    #[allow(clippy::cast_possible_truncation)]
    let to_cube = |v: u8| ((u16::from(v) * 5) / 255) as u8;
    16 + (36 * to_cube(r)) + (6 * to_cube(g)) + to_cube(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_styles_are_bold() {
        for level in 1..=6 {
            let style = style_for_line_type(&LineType::Heading(level));
            assert!(style.add_modifier.contains(Modifier::BOLD));
        }
    }

    #[test]
    fn test_h1_is_underlined() {
        let style = style_for_line_type(&LineType::Heading(1));
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_code_block_style() {
        let style = style_for_line_type(&LineType::CodeBlock);
        assert!(style.fg.is_some());
    }

    #[test]
    fn test_inline_color_removes_dim_modifier() {
        let base = Style::default().add_modifier(Modifier::DIM);
        let inline = InlineStyle {
            fg: Some(InlineColor { r: 255, g: 0, b: 0 }),
            ..InlineStyle::default()
        };

        let styled = style_for_inline(base, inline);
        assert!(!styled.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_disabled_button_differs_from_enabled() {
        assert_ne!(button_style(true), button_style(false));
    }

    #[test]
    fn test_selected_tab_is_reversed() {
        assert!(nav_tab_style(true).add_modifier.contains(Modifier::REVERSED));
        assert!(!nav_tab_style(false).add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_truecolor_detection_without_colorterm() {
        assert!(!supports_truecolor_from_env(None, Some("xterm-256color")));
    }

    #[test]
    fn test_truecolor_detection_with_colorterm() {
        assert!(supports_truecolor_from_env(
            Some("truecolor"),
            Some("xterm-256color")
        ));
    }

    #[test]
    fn test_fallback_indexed_color_when_not_truecolor() {
        assert_eq!(rgb_to_xterm_256(255, 0, 0), 196);
    }
}
