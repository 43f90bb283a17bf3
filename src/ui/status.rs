use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let name = model
        .selected_entry()
        .map_or("no documents", |entry| entry.name.as_str());

    let position = if model.mode.is_flashcard() {
        model.paginator.current().map_or_else(
            || "no cards".to_string(),
            |index| format!("card {}/{}", index + 1, model.paginator.len()),
        )
    } else {
        let starts = model.document.section_starts();
        model.document.section_at(model.viewport.offset()).map_or_else(
            || "no sections".to_string(),
            |index| {
                format!(
                    "section {}/{}  [{}%]",
                    index + 1,
                    starts.len(),
                    model.viewport.scroll_percent()
                )
            },
        )
    };

    let loading = if model.loading { " [loading]" } else { "" };
    let watch_indicator = if model.watch_enabled {
        " [watching]"
    } else {
        ""
    };

    let status = format!(
        " {name}  [{}]  [{}]  {position}{loading}{watch_indicator}  ?:help",
        model.mode.label(),
        model.theme.as_str(),
    );

    frame.render_widget(
        Paragraph::new(status).style(super::style::status_style()),
        area,
    );
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
