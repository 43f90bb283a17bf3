use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::ThemeMode;
use crate::document::{Document, Section, displayable_sections, render_section, render_sections};
use crate::fetch::{FetchOutcome, RequestId};
use crate::input::ArrowBinding;
use crate::paginator::Paginator;
use crate::store::{DocumentEntry, DocumentStore};
use crate::ui::viewport::Viewport;

/// How the selected document is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Every section stacked in one scrollable column.
    #[default]
    Continuous,
    /// One section at a time.
    Flashcard,
}

impl ViewMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Continuous => Self::Flashcard,
            Self::Flashcard => Self::Continuous,
        }
    }

    pub const fn is_flashcard(self) -> bool {
        matches!(self, Self::Flashcard)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::Flashcard => "flashcards",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state, apart from the page
/// theme attribute which effects mirror from `theme`.
#[derive(Debug)]
pub struct Model {
    /// Documents available for selection
    pub store: DocumentStore,
    /// Index of the selected document in `store`
    pub selected: Option<usize>,
    pub mode: ViewMode,
    pub theme: ThemeMode,
    /// Raw text of the last accepted fetch
    pub raw: Option<String>,
    /// Displayable sections derived from `raw`
    pub sections: Vec<Section>,
    /// Bumped every time `sections` is re-derived
    pub sections_generation: u64,
    pub paginator: Paginator,
    /// Rendered lines for the current view
    pub document: Document,
    pub viewport: Viewport,
    /// Token of the only fetch whose outcome will be applied
    pub latest_request: Option<RequestId>,
    /// True while `latest_request` has not come back yet
    pub loading: bool,
    /// Arrow-key listener held while flashcard mode is active
    pub arrow_keys: Option<ArrowBinding>,
    pub watch_enabled: bool,
    pub help_visible: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    pub should_quit: bool,
    fetch_wanted: bool,
    terminal_height: u16,
    toast: Option<Toast>,
}

impl Model {
    /// Create a model with the first document selected.
    pub fn new(store: DocumentStore, terminal_size: (u16, u16)) -> Self {
        let selected = (!store.is_empty()).then_some(0);
        Self {
            store,
            selected,
            fetch_wanted: selected.is_some(),
            viewport: Viewport::new(
                terminal_size.0,
                crate::ui::content_height(terminal_size.1, false),
                0,
            ),
            terminal_height: terminal_size.1,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self.fit_viewport();
        self
    }

    #[must_use]
    pub const fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    pub fn selected_entry(&self) -> Option<&DocumentEntry> {
        self.selected.and_then(|index| self.store.get(index))
    }

    pub const fn terminal_height(&self) -> u16 {
        self.terminal_height
    }

    /// Section shown in flashcard mode.
    pub fn current_card(&self) -> Option<&Section> {
        self.paginator
            .current()
            .and_then(|index| self.sections.get(index))
    }

    /// Whether Left/Right should page through cards right now.
    pub fn arrows_live(&self) -> bool {
        self.mode.is_flashcard()
            && self
                .arrow_keys
                .as_ref()
                .is_some_and(|binding| binding.is_live_for(self.sections_generation))
    }

    /// Select document `index`. Returns false when nothing changed.
    pub(super) fn select(&mut self, index: usize) -> bool {
        if index >= self.store.len() || self.selected == Some(index) {
            return false;
        }
        self.selected = Some(index);
        self.fetch_wanted = true;
        true
    }

    /// Ask effects to fetch the selected document again.
    pub(super) const fn request_fetch(&mut self) {
        self.fetch_wanted = true;
    }

    pub(super) const fn take_fetch_wanted(&mut self) -> bool {
        let wanted = self.fetch_wanted;
        self.fetch_wanted = false;
        wanted
    }

    /// Apply a finished fetch if it answers the latest request.
    pub(super) fn apply_fetch(&mut self, outcome: FetchOutcome) {
        if self.latest_request != Some(outcome.request) {
            tracing::debug!(
                request = outcome.request.value(),
                path = %outcome.path.display(),
                "discarding stale fetch"
            );
            return;
        }
        self.loading = false;

        match outcome.result {
            Ok(raw) => {
                self.set_raw(raw);
            }
            Err(err) => {
                tracing::warn!(%err, "fetch failed, keeping previous content");
                self.show_toast(ToastLevel::Warning, format!("Load failed: {err}"));
            }
        }
    }

    /// Replace the raw content and re-derive sections.
    pub(crate) fn set_raw(&mut self, raw: String) {
        self.sections = displayable_sections(&raw);
        self.raw = Some(raw);
        self.sections_generation += 1;
        self.paginator.reset(self.sections.len());
        self.rerender();
        self.viewport.go_to_top();
        tracing::debug!(
            sections = self.sections.len(),
            generation = self.sections_generation,
            "sections derived"
        );
    }

    pub(super) fn layout_width(&self) -> u16 {
        crate::ui::document_content_width(self.viewport.width())
    }

    /// Rebuild rendered lines for the current mode, theme and width.
    pub(super) fn rerender(&mut self) {
        let width = self.layout_width();
        self.document = match self.mode {
            ViewMode::Continuous => render_sections(&self.sections, width, self.theme),
            ViewMode::Flashcard => self.current_card().map_or_else(Document::empty, |card| {
                render_section(card.text(), width, self.theme)
            }),
        };
        self.viewport.set_total_lines(self.document.line_count());
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.terminal_height = height;
        self.viewport.resize(
            width,
            crate::ui::content_height(height, self.mode.is_flashcard()),
        );
        self.rerender();
    }

    /// Match the viewport height to the chrome of the current mode.
    pub(super) fn fit_viewport(&mut self) {
        let width = self.viewport.width();
        self.viewport.resize(
            width,
            crate::ui::content_height(self.terminal_height, self.mode.is_flashcard()),
        );
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            store: DocumentStore::default(),
            selected: None,
            mode: ViewMode::default(),
            theme: ThemeMode::default(),
            raw: None,
            sections: Vec::new(),
            sections_generation: 0,
            paginator: Paginator::default(),
            document: Document::empty(),
            viewport: Viewport::new(80, 22, 0),
            latest_request: None,
            loading: false,
            arrow_keys: None,
            watch_enabled: false,
            help_visible: false,
            config_global_path: None,
            config_local_path: None,
            should_quit: false,
            fetch_wanted: false,
            terminal_height: 24,
            toast: None,
        }
    }
}
