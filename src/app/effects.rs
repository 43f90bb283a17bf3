use std::time::Duration;

use crate::app::{App, Message, Model, ToastLevel};
use crate::watcher::FileWatcher;

impl App {
    pub(super) fn make_file_watcher(&self) -> notify::Result<FileWatcher> {
        FileWatcher::new(&self.content_dir, Duration::from_millis(200))
    }

    pub(super) fn handle_message_side_effects(&mut self, model: &mut Model, msg: &Message) {
        if model.take_fetch_wanted() {
            self.fetch_selected(model);
        }

        match msg {
            Message::ToggleTheme => {
                crate::highlight::set_background_mode(model.theme);
                tracing::info!(theme = model.theme.as_str(), "page theme changed");
            }
            Message::ForceReload => {
                model.show_toast(ToastLevel::Info, "Reloading");
            }
            _ => {}
        }

        self.sync_arrow_binding(model);
    }

    /// Issue a fetch for the selected document and make it the only one
    /// whose outcome will be accepted.
    pub(super) fn fetch_selected(&mut self, model: &mut Model) {
        let Some(entry) = model.selected_entry() else {
            return;
        };
        let request = self.fetcher.fetch(&entry.path);
        model.latest_request = Some(request);
        model.loading = true;
    }

    /// Hold exactly one arrow listener while flashcard mode is active.
    ///
    /// A listener bound to an older section list is replaced; leaving
    /// flashcard mode drops it.
    pub(super) fn sync_arrow_binding(&self, model: &mut Model) {
        if model.mode.is_flashcard() {
            let stale = model
                .arrow_keys
                .as_ref()
                .is_none_or(|binding| !binding.is_live_for(model.sections_generation));
            if stale {
                model.arrow_keys = None;
                model.arrow_keys = Some(self.key_bindings.bind_arrows(model.sections_generation));
            }
        } else {
            model.arrow_keys = None;
        }
    }
}
