use super::*;
use crate::app::{Message, Model, update};
use crate::config::ThemeMode;
use crate::store::{DocumentEntry, DocumentStore};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::style::Color;
use std::path::PathBuf;

const CARDS: &str = "# Alpha\n\nfirst card\n\n---\n\n# Beta\n\nsecond card\n\n---\n\n# Gamma\n\nthird card\n";

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn store(names: &[&str]) -> DocumentStore {
    DocumentStore::from_entries(
        names
            .iter()
            .map(|name| DocumentEntry::from_path(PathBuf::from(format!("{name}.md"))))
            .collect(),
    )
}

fn loaded_model(raw: &str) -> Model {
    let mut model = Model::new(store(&["git-basics", "vim", "docker"]), (80, 24));
    model.set_raw(raw.to_string());
    model
}

fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|col| buffer[(col, row)].symbol())
        .collect()
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|row| row_text(terminal, row))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_nav_bar_lists_every_document() {
    let model = loaded_model(CARDS);
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let nav = row_text(&terminal, 0);
    assert!(nav.contains("1:Git Basics"), "nav was: {nav}");
    assert!(nav.contains("2:Vim"));
    assert!(nav.contains("3:Docker"));
}

#[test]
fn test_continuous_mode_shows_all_sections_in_order() {
    let model = loaded_model(CARDS);
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let text = screen_text(&terminal);
    let alpha = text.find("Alpha").expect("alpha shown");
    let beta = text.find("Beta").expect("beta shown");
    let gamma = text.find("Gamma").expect("gamma shown");
    assert!(alpha < beta && beta < gamma);
    assert!(!text.contains("Card 1 / 3"));
}

#[test]
fn test_flashcard_mode_shows_one_card_and_card_bar() {
    let model = update(loaded_model(CARDS), Message::ToggleMode);
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let text = screen_text(&terminal);
    assert!(text.contains("Alpha"));
    assert!(!text.contains("Beta"));

    let card_bar = row_text(&terminal, 22);
    assert!(card_bar.contains("Card 1 / 3"), "card bar was: {card_bar}");
    assert!(card_bar.contains("Prev"));
    assert!(card_bar.contains("Next"));
}

#[test]
fn test_flashcard_mode_without_sections_says_no_cards() {
    let model = update(loaded_model("---\n\n---\n"), Message::ToggleMode);
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    assert!(row_text(&terminal, 22).contains("No cards"));
}

#[test]
fn test_status_bar_shows_document_and_mode() {
    let model = loaded_model(CARDS);
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let status = row_text(&terminal, 23);
    assert!(status.contains("Git Basics"), "status was: {status}");
    assert!(status.contains("[continuous]"));
    assert!(status.contains("[dark]"));
    assert!(status.contains("section 1/3"));
}

#[test]
fn test_status_bar_follows_scrolled_section_in_continuous_mode() {
    let body = (1..=15)
        .map(|n| format!("line {n}"))
        .collect::<Vec<_>>()
        .join("\n\n");
    let raw = format!("# Alpha\n\n{body}\n\n---\n\n# Beta\n\n{body}\n\n---\n\n# Gamma\n\n{body}\n");
    let model = loaded_model(&raw);
    let second = model.document.section_starts()[1];
    let model = update(model, Message::ScrollDown(second));
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let status = row_text(&terminal, 23);
    assert!(status.contains("section 2/3"), "status was: {status}");
}

#[test]
fn test_status_bar_shows_card_position_in_flashcards() {
    let model = update(loaded_model(CARDS), Message::ToggleMode);
    let model = update(model, Message::NextCard);
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let status = row_text(&terminal, 23);
    assert!(status.contains("card 2/3"), "status was: {status}");
    assert!(status.contains("[flashcards]"));
}

#[test]
fn test_help_overlay_lists_mode_and_theme_keys() {
    let mut model = loaded_model(CARDS);
    model.help_visible = true;
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let text = screen_text(&terminal);
    assert!(text.contains("Help"));
    assert!(text.contains("Continuous / flashcards"));
    assert!(text.contains("Dark / light theme"));
}

#[test]
fn test_light_theme_paints_page_background() {
    let _guard = crate::highlight::page_theme_guard();
    crate::highlight::set_background_mode(ThemeMode::Light);

    let model = loaded_model(CARDS).with_theme(ThemeMode::Light);
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let light_bg = terminal.backend().buffer()[(40, 12)].bg;

    crate::highlight::set_background_mode(ThemeMode::Dark);
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let dark_bg = terminal.backend().buffer()[(40, 12)].bg;

    assert_eq!(light_bg, Color::Indexed(255));
    assert_eq!(dark_bg, Color::Reset);
}

#[test]
fn test_render_with_empty_store() {
    let model = Model::new(DocumentStore::default(), (80, 24));
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    assert!(row_text(&terminal, 23).contains("no documents"));
}

#[test]
fn test_screen_layout_continuous() {
    let layout = screen_layout(Rect::new(0, 0, 80, 24), false, false);
    assert_eq!(layout.nav, Rect::new(0, 0, 80, 1));
    assert_eq!(layout.content, Rect::new(0, 1, 80, 22));
    assert_eq!(layout.card_bar, None);
    assert_eq!(layout.status, Rect::new(0, 23, 80, 1));
    assert_eq!(layout.content.height, content_height(24, false));
}

#[test]
fn test_screen_layout_flashcard_with_toast() {
    let layout = screen_layout(Rect::new(0, 0, 80, 24), true, true);
    assert_eq!(layout.content, Rect::new(0, 1, 80, 20));
    assert_eq!(layout.card_bar, Some(Rect::new(0, 21, 80, 1)));
    assert_eq!(layout.toast, Some(Rect::new(0, 22, 80, 1)));
    assert_eq!(layout.status, Rect::new(0, 23, 80, 1));
}

#[test]
fn test_nav_tabs_are_adjacent_with_separators() {
    let tabs = nav_tabs(store(&["git", "vim"]).entries(), Some(0), 80);
    assert_eq!(tabs.len(), 2);
    assert_eq!(tabs[0].label, " 1:Git ");
    assert_eq!(tabs[0].x, 0);
    assert_eq!(tabs[1].x, tabs[0].width + 1);
    assert!(tabs[1].contains(tabs[1].x));
    assert!(!tabs[1].contains(tabs[0].x));
}

#[test]
fn test_nav_tabs_scroll_to_keep_selection_visible() {
    let names = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];
    let entries = store(&names);
    let tabs = nav_tabs(entries.entries(), Some(5), 30);

    assert!(tabs.iter().any(|tab| tab.index == 5));
    assert!(tabs.iter().all(|tab| tab.x + tab.width <= 30));
    assert_ne!(tabs[0].index, 0);
}

#[test]
fn test_card_bar_buttons_sit_at_both_ends() {
    let (prev, next) = card_bar_buttons(Rect::new(0, 22, 80, 1));
    assert_eq!(prev.x, 0);
    assert_eq!(next.x + next.width, 80);
    assert_eq!(prev.width, next.width);
}

#[test]
fn test_document_content_width_has_minimum() {
    assert_eq!(document_content_width(80), 78);
    assert_eq!(document_content_width(1), 1);
}
