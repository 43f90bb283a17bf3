// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. store::DocumentStore)
    clippy::module_name_repetitions
)]

//! # cheatdeck
//!
//! A terminal viewer for Markdown cheat sheets.
//!
//! Each document is split on `---` into sections, which are shown either
//! stacked in one scrollable column or one at a time as flashcards.
//!
//! ## Architecture
//!
//! cheatdeck uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! Reads run on worker threads and are tagged with a [`fetch::RequestId`];
//! only the outcome of the latest request is applied.
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`store`]: Document discovery
//! - [`fetch`]: Background reads with request tokens
//! - [`document`]: Section splitting, terminal and HTML rendering
//! - [`paginator`]: Flashcard position
//! - [`input`]: Scoped arrow-key bindings
//! - [`ui`]: Terminal UI components
//! - [`highlight`]: Syntax highlighting and the page theme
//! - [`watcher`]: Content directory watching
//! - [`config`]: rc-file defaults

pub mod app;
pub mod config;
pub mod document;
pub mod fetch;
pub mod highlight;
pub mod input;
pub mod paginator;
pub mod store;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, ViewMode};
    pub use crate::document::{Document, Section, displayable_sections, split_sections};
    pub use crate::paginator::Paginator;
    pub use crate::store::{DocumentEntry, DocumentStore};
    pub use crate::ui::viewport::Viewport;
}
