use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Resize(w, h) => {
                resize_debouncer.queue(w, h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Message::Quit);
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        match key.code {
            // Cards: only while the flashcard listener is installed
            KeyCode::Right if model.arrows_live() => Some(Message::NextCard),
            KeyCode::Left if model.arrows_live() => Some(Message::PrevCard),

            // Documents
            KeyCode::Tab | KeyCode::Char(']') => Some(Message::NextDocument),
            KeyCode::BackTab | KeyCode::Char('[') => Some(Message::PrevDocument),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c.to_digit(10).map_or(0, |d| d as usize - 1);
                (index < model.store.len()).then_some(Message::SelectDocument(index))
            }

            // View
            KeyCode::Char('f') => Some(Message::ToggleMode),
            KeyCode::Char('t') => Some(Message::ToggleTheme),

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => model
                .viewport
                .can_scroll_down()
                .then_some(Message::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => model
                .viewport
                .can_scroll_up()
                .then_some(Message::ScrollUp(1)),
            KeyCode::Char(' ') | KeyCode::PageDown => model
                .viewport
                .can_scroll_down()
                .then_some(Message::PageDown),
            KeyCode::PageUp => model.viewport.can_scroll_up().then_some(Message::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            KeyCode::Char('r') => Some(Message::ForceReload),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }

        let area = Rect::new(0, 0, model.viewport.width(), model.terminal_height());
        let layout = crate::ui::screen_layout(
            area,
            model.mode.is_flashcard(),
            model.active_toast().is_some(),
        );

        match mouse.kind {
            MouseEventKind::Up(MouseButton::Left) => {
                if point_in_rect(mouse.column, mouse.row, layout.nav) {
                    return crate::ui::nav_tabs(model.store.entries(), model.selected, area.width)
                        .iter()
                        .find(|tab| tab.contains(mouse.column))
                        .map(|tab| Message::SelectDocument(tab.index));
                }
                let card_bar = layout.card_bar?;
                if !point_in_rect(mouse.column, mouse.row, card_bar) {
                    return None;
                }
                let (prev, next) = crate::ui::card_bar_buttons(card_bar);
                if point_in_rect(mouse.column, mouse.row, prev) {
                    Some(Message::PrevCard)
                } else if point_in_rect(mouse.column, mouse.row, next) {
                    Some(Message::NextCard)
                } else {
                    None
                }
            }
            MouseEventKind::ScrollDown => model
                .viewport
                .can_scroll_down()
                .then_some(Message::ScrollDown(3)),
            MouseEventKind::ScrollUp => model
                .viewport
                .can_scroll_up()
                .then_some(Message::ScrollUp(3)),
            _ => None,
        }
    }
}

const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
