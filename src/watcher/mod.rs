//! Live reload of the content directory.
//!
//! Events from `notify` are filtered down to cheat-sheet files and the
//! manifest, then debounced so an editor's burst of writes becomes one change.
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::store::MANIFEST_FILE;

/// Watches one content directory and reports debounced changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    root: PathBuf,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl FileWatcher {
    /// Start watching `dir` (not recursively).
    ///
    /// # Errors
    /// Returns an error if the platform watcher cannot be created or the
    /// directory cannot be watched.
    pub fn new(dir: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Backends report canonical paths.
        let root = dir
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| dir.as_ref().to_path_buf());

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&root, RecursiveMode::NonRecursive)?;
        tracing::debug!(root = %root.display(), "watching content directory");

        Ok(Self {
            _watcher: watcher,
            rx,
            root,
            debounce,
            pending_since: None,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns true once a debounced change is ready.
    pub fn take_change_ready(&mut self) -> bool {
        let mut relevant = 0u32;
        let mut ignored = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => relevant += 1,
                Ok(ev) => {
                    ignored += 1;
                    tracing::trace!(kind = ?ev.kind, paths = ?ev.paths, "ignored fs event");
                }
                Err(err) => tracing::warn!(%err, "watch error"),
            }
        }

        if relevant > 0 {
            tracing::debug!(relevant, ignored, "content change pending");
            self.pending_since = Some(Instant::now());
        }

        let Some(pending_since) = self.pending_since else {
            return false;
        };
        if pending_since.elapsed() >= self.debounce {
            self.pending_since = None;
            return true;
        }
        false
    }

    fn is_relevant(&self, event: &Event) -> bool {
        if matches!(event.kind, EventKind::Access(_)) {
            return false;
        }
        event
            .paths
            .iter()
            .any(|path| path == &self.root || is_content_file(path))
    }
}

fn is_content_file(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == MANIFEST_FILE) || crate::store::is_markdown(path)
}
