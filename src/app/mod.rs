//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel, ViewMode};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::ThemeMode;
use crate::fetch::ContentFetcher;
use crate::input::KeyBindings;
use crate::store::DocumentStore;

/// Main application struct that owns the fetcher, the key bindings and the
/// terminal session.
pub struct App {
    content_dir: PathBuf,
    store: DocumentStore,
    initial_document: Option<usize>,
    mode: ViewMode,
    theme: ThemeMode,
    watch_enabled: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
    fetcher: ContentFetcher,
    key_bindings: KeyBindings,
}

impl App {
    /// Create an application over a discovered store.
    pub fn new(content_dir: PathBuf, store: DocumentStore) -> Self {
        Self {
            content_dir,
            store,
            initial_document: None,
            mode: ViewMode::Continuous,
            theme: ThemeMode::Dark,
            watch_enabled: false,
            config_global_path: None,
            config_local_path: None,
            fetcher: ContentFetcher::new(),
            key_bindings: KeyBindings::new(),
        }
    }

    /// Start on a specific document instead of the first one.
    #[must_use]
    pub const fn with_initial_document(mut self, index: Option<usize>) -> Self {
        self.initial_document = index;
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    /// Enable or disable live reload of the content directory.
    #[must_use]
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// Build the starting model: select a document, apply the page theme,
    /// issue the first fetch and bind arrows if starting in flashcards.
    pub fn initial_model(&mut self, terminal_size: (u16, u16)) -> Model {
        let mut model = Model::new(self.store.clone(), terminal_size)
            .with_mode(self.mode)
            .with_theme(self.theme);
        if let Some(index) = self.initial_document {
            model.select(index);
        }
        model.watch_enabled = self.watch_enabled;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        crate::highlight::set_background_mode(model.theme);
        if model.take_fetch_wanted() {
            self.fetch_selected(&mut model);
        }
        self.sync_arrow_binding(&mut model);
        model
    }
}
