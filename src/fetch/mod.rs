//! Background retrieval of document text.
//!
//! Every call to [`ContentFetcher::fetch`] gets a fresh [`RequestId`]. Workers
//! send their [`FetchOutcome`] back over a channel; the UI thread decides
//! whether the outcome is still wanted.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Monotonic token identifying one fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub const fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("{} not found", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
    #[error("{} is not valid UTF-8", path.display())]
    Decode { path: PathBuf },
}

/// Result of one fetch, tagged with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub request: RequestId,
    pub path: PathBuf,
    pub result: Result<String, FetchError>,
}

/// Issues reads on worker threads and collects their outcomes.
#[derive(Debug)]
pub struct ContentFetcher {
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    next_id: u64,
}

impl Default for ContentFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentFetcher {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx, next_id: 0 }
    }

    /// Start reading `path` in the background.
    pub fn fetch(&mut self, path: &Path) -> RequestId {
        self.next_id += 1;
        let request = RequestId(self.next_id);
        let path = path.to_path_buf();
        let tx = self.tx.clone();
        tracing::debug!(request = request.value(), path = %path.display(), "fetch issued");

        std::thread::spawn(move || {
            let result = fetch_blocking(&path);
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(FetchOutcome {
                request,
                path,
                result,
            });
        });
        request
    }

    /// Next finished outcome, if any, without blocking.
    pub fn try_recv(&self) -> Option<FetchOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next outcome.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

/// Read `path` as UTF-8 text on the calling thread.
///
/// # Errors
/// Returns [`FetchError`] when the file is missing, unreadable or not UTF-8.
pub fn fetch_blocking(path: &Path) -> Result<String, FetchError> {
    let bytes = std::fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => FetchError::NotFound {
            path: path.to_path_buf(),
        },
        _ => FetchError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        },
    })?;
    String::from_utf8(bytes).map_err(|_| FetchError::Decode {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_fetch_blocking_reads_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.md");
        std::fs::write(&path, "# A").unwrap();
        assert_eq!(fetch_blocking(&path).unwrap(), "# A");
    }

    #[test]
    fn test_fetch_blocking_missing_file() {
        let dir = tempdir().unwrap();
        let err = fetch_blocking(&dir.path().join("nope.md")).unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }

    #[test]
    fn test_fetch_blocking_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bin.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            fetch_blocking(&path).unwrap_err(),
            FetchError::Decode { .. }
        ));
    }

    #[test]
    fn test_fetch_reading_a_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let err = fetch_blocking(dir.path()).unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[test]
    fn test_request_ids_increase() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.md");
        std::fs::write(&path, "x").unwrap();

        let mut fetcher = ContentFetcher::new();
        let first = fetcher.fetch(&path);
        let second = fetcher.fetch(&path);
        assert!(second > first);

        let mut seen = vec![
            fetcher.recv_timeout(WAIT).unwrap().request,
            fetcher.recv_timeout(WAIT).unwrap().request,
        ];
        seen.sort();
        assert_eq!(seen, vec![first, second]);
    }

    #[test]
    fn test_fetch_delivers_outcome_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.md");
        std::fs::write(&path, "body").unwrap();

        let mut fetcher = ContentFetcher::new();
        let request = fetcher.fetch(&path);
        let outcome = fetcher.recv_timeout(WAIT).unwrap();
        assert_eq!(outcome.request, request);
        assert_eq!(outcome.path, path);
        assert_eq!(outcome.result, Ok("body".to_string()));
        assert!(fetcher.try_recv().is_none());
    }
}
