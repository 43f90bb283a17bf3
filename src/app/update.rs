use crate::app::Model;
use crate::fetch::FetchOutcome;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Documents
    /// Select a document by store index
    SelectDocument(usize),
    /// Select the next document, wrapping around
    NextDocument,
    /// Select the previous document, wrapping around
    PrevDocument,

    // View
    /// Switch between continuous and flashcard mode
    ToggleMode,
    /// Switch between dark and light theme
    ToggleTheme,
    /// Show the next card
    NextCard,
    /// Show the previous card
    PrevCard,

    // Navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Go to beginning of document
    GoToTop,
    /// Go to end of document
    GoToBottom,

    // Content
    /// A fetch finished
    ContentLoaded(FetchOutcome),
    /// The content directory changed on disk
    ContentChanged,
    /// Fetch the selected document again
    ForceReload,

    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Fetches, the page theme attribute and key bindings are handled by
/// the effects layer afterwards.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::SelectDocument(index) => {
            model.select(index);
        }
        Message::NextDocument => {
            let len = model.store.len();
            if len > 0 {
                let next = model.selected.map_or(0, |current| (current + 1) % len);
                model.select(next);
            }
        }
        Message::PrevDocument => {
            let len = model.store.len();
            if len > 0 {
                let prev = model
                    .selected
                    .map_or(0, |current| (current + len - 1) % len);
                model.select(prev);
            }
        }

        Message::ToggleMode => {
            model.mode = model.mode.toggled();
            if model.mode.is_flashcard() {
                model.paginator.reset(model.sections.len());
            }
            model.fit_viewport();
            model.rerender();
            model.viewport.go_to_top();
        }
        Message::ToggleTheme => {
            model.theme = model.theme.toggled();
            model.rerender();
        }
        Message::NextCard => {
            if model.mode.is_flashcard() && !model.paginator.is_at_end() {
                model.paginator.next();
                model.rerender();
                model.viewport.go_to_top();
            }
        }
        Message::PrevCard => {
            if model.mode.is_flashcard() && !model.paginator.is_at_start() {
                model.paginator.prev();
                model.rerender();
                model.viewport.go_to_top();
            }
        }

        // Navigation
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),

        Message::ContentLoaded(outcome) => model.apply_fetch(outcome),
        Message::ContentChanged | Message::ForceReload => model.request_fetch(),

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        Message::Resize(width, height) => model.resize(width, height),
        // Redraw: no state change needed
        Message::Redraw => {}

        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}
