use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::Model;
use crate::paginator::PageState;
use crate::store::DocumentEntry;

use super::{DOCUMENT_LEFT_PADDING, overlays, status, style};

const PREV_LABEL: &str = " ◀ Prev ";
const NEXT_LABEL: &str = " Next ▶ ";
const BUTTON_WIDTH: u16 = 8;

/// Regions of the screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub nav: Rect,
    pub content: Rect,
    pub card_bar: Option<Rect>,
    pub toast: Option<Rect>,
    pub status: Rect,
}

/// Split the frame into nav bar, content, card bar, toast and status rows.
pub fn screen_layout(area: Rect, flashcard: bool, toast: bool) -> ScreenLayout {
    let row = |from_bottom: u16| Rect {
        y: area.y + area.height.saturating_sub(from_bottom),
        height: area.height.min(1),
        ..area
    };
    let footer_rows = 1 + u16::from(toast) + u16::from(flashcard);

    ScreenLayout {
        nav: Rect {
            height: area.height.min(1),
            ..area
        },
        content: Rect {
            y: area.y + area.height.min(1),
            height: area.height.saturating_sub(1 + footer_rows),
            ..area
        },
        card_bar: flashcard.then(|| row(footer_rows)),
        toast: toast.then(|| row(2)),
        status: row(1),
    }
}

/// Rows available to document text for a terminal of `total_height`.
pub const fn content_height(total_height: u16, flashcard: bool) -> u16 {
    total_height.saturating_sub(if flashcard { 3 } else { 2 })
}

pub fn document_content_width(total_width: u16) -> u16 {
    total_width.saturating_sub(DOCUMENT_LEFT_PADDING).max(1)
}

/// One clickable document label in the nav bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTab {
    pub index: usize,
    pub label: String,
    pub x: u16,
    pub width: u16,
}

impl NavTab {
    pub const fn contains(&self, column: u16) -> bool {
        column >= self.x && column < self.x + self.width
    }
}

/// Lay out nav tabs in `width` columns, scrolled so `selected` is visible.
pub fn nav_tabs(entries: &[DocumentEntry], selected: Option<usize>, width: u16) -> Vec<NavTab> {
    if entries.is_empty() {
        return Vec::new();
    }
    let labels: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if i < 9 {
                format!(" {}:{} ", i + 1, entry.name)
            } else {
                format!(" {} ", entry.name)
            }
        })
        .collect();
    let widths: Vec<u16> = labels
        .iter()
        .map(|label| u16::try_from(label.width()).unwrap_or(u16::MAX))
        .collect();

    // Each tab after the first is preceded by a one-column separator.
    let span = |from: usize, to: usize| -> u32 {
        let separators = u32::try_from(to - from).unwrap_or(u32::MAX);
        widths[from..=to].iter().map(|w| u32::from(*w)).sum::<u32>() + separators
    };
    let selected = selected.unwrap_or(0).min(entries.len() - 1);
    let mut first = 0;
    while first < selected && span(first, selected) > u32::from(width) {
        first += 1;
    }

    let mut tabs = Vec::new();
    let mut x: u16 = 0;
    for (index, label) in labels.into_iter().enumerate().skip(first) {
        let tab_width = widths[index];
        if x.saturating_add(tab_width) > width {
            break;
        }
        tabs.push(NavTab {
            index,
            label,
            x,
            width: tab_width,
        });
        x = x.saturating_add(tab_width + 1);
    }
    tabs
}

/// Click targets for the Prev and Next buttons of a card bar.
pub fn card_bar_buttons(area: Rect) -> (Rect, Rect) {
    let width = BUTTON_WIDTH.min(area.width);
    let prev = Rect { width, ..area };
    let next = Rect {
        x: area.x + area.width.saturating_sub(width),
        width,
        ..area
    };
    (prev, next)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = screen_layout(
        area,
        model.mode.is_flashcard(),
        model.active_toast().is_some(),
    );

    frame.render_widget(Block::default().style(style::page_style()), area);
    render_nav_bar(model, frame, layout.nav);
    render_document(model, frame, layout.content);
    if let Some(card_bar) = layout.card_bar {
        render_card_bar(model, frame, card_bar);
    }
    if let Some(toast) = layout.toast {
        status::render_toast_bar(model, frame, toast);
    }
    status::render_status_bar(model, frame, layout.status);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_nav_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let tabs = nav_tabs(model.store.entries(), model.selected, area.width);
    let mut spans = Vec::new();
    for (i, tab) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("│", style::nav_separator_style()));
        }
        spans.push(Span::styled(
            tab.label.clone(),
            style::nav_tab_style(model.selected == Some(tab.index)),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(style::nav_bar_style()),
        area,
    );
}

fn render_document(model: &Model, frame: &mut Frame, area: Rect) {
    let visible_lines = model
        .document
        .visible_lines(model.viewport.offset(), area.height as usize);

    let content: Vec<Line> = visible_lines
        .iter()
        .map(|line| {
            let line_style = style::style_for_line_type(line.line_type());
            line.spans().map_or_else(
                || Line::from(Span::styled(line.content().to_string(), line_style)),
                |spans| {
                    Line::from(
                        spans
                            .iter()
                            .map(|span| {
                                Span::styled(
                                    span.text().to_string(),
                                    style::style_for_inline(line_style, span.style()),
                                )
                            })
                            .collect::<Vec<_>>(),
                    )
                },
            )
        })
        .collect();

    let doc_block = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::left(DOCUMENT_LEFT_PADDING));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content)
            .block(doc_block)
            .style(style::page_style()),
        area,
    );
}

fn render_card_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let (can_prev, can_next) = match model.paginator.state() {
        PageState::NoSections => (false, false),
        PageState::AtStart => (false, !model.paginator.is_at_end()),
        PageState::Middle => (true, true),
        PageState::AtEnd => (true, false),
    };

    let counter = model.paginator.current().map_or_else(
        || "No cards".to_string(),
        |index| format!("Card {} / {}", index + 1, model.paginator.len()),
    );

    frame.render_widget(
        Paragraph::new(counter)
            .alignment(Alignment::Center)
            .style(style::card_bar_style()),
        area,
    );
    let (prev, next) = card_bar_buttons(area);
    frame.render_widget(
        Paragraph::new(PREV_LABEL).style(style::button_style(can_prev)),
        prev,
    );
    frame.render_widget(
        Paragraph::new(NEXT_LABEL).style(style::button_style(can_next)),
        next,
    );
}
