//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors
//! - Screen layout shared by drawing and mouse hit-testing

pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use render::{
    NavTab, ScreenLayout, card_bar_buttons, content_height, document_content_width, nav_tabs,
    render, screen_layout,
};

pub const DOCUMENT_LEFT_PADDING: u16 = 2;

#[cfg(test)]
mod tests;
