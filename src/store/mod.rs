//! The fixed list of cheat sheets.
//!
//! Entries come from an `index.json` manifest when the content root has one,
//! and otherwise from a sorted scan of Markdown files in the root.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Manifest filename looked up in the content root.
pub const MANIFEST_FILE: &str = "index.json";

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// One selectable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    /// Display label, e.g. `Git Basics`.
    pub name: String,
    /// Location the fetcher reads.
    pub path: PathBuf,
}

impl DocumentEntry {
    /// Build an entry whose label is derived from the file name.
    pub fn from_path(path: PathBuf) -> Self {
        let name = display_name(&path);
        Self { name, path }
    }

    fn matches(&self, query: &str) -> bool {
        self.name.eq_ignore_ascii_case(query)
            || self
                .path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| stem.eq_ignore_ascii_case(query))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("content directory {0} does not exist")]
    MissingRoot(PathBuf),
    #[error("failed to read content directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read manifest {path}")]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed manifest {path}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestItem {
    File(String),
    Labeled { name: String, file: String },
}

/// Ordered, immutable set of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStore {
    entries: Vec<DocumentEntry>,
}

impl DocumentStore {
    pub const fn from_entries(entries: Vec<DocumentEntry>) -> Self {
        Self { entries }
    }

    /// Build the store for a content root.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the root is missing or unreadable, or when
    /// its manifest cannot be parsed.
    pub fn discover(root: &Path) -> Result<Self, StoreError> {
        if !root.is_dir() {
            return Err(StoreError::MissingRoot(root.to_path_buf()));
        }

        let manifest = root.join(MANIFEST_FILE);
        let entries = if manifest.is_file() {
            read_manifest(root, &manifest)?
        } else {
            scan_dir(root)?
        };
        tracing::info!(root = %root.display(), count = entries.len(), "discovered documents");
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&DocumentEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry whose display name or file stem matches `query`,
    /// ignoring ASCII case.
    pub fn position(&self, query: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.matches(query))
    }
}

fn read_manifest(root: &Path, manifest: &Path) -> Result<Vec<DocumentEntry>, StoreError> {
    let text = fs::read_to_string(manifest).map_err(|source| StoreError::ReadManifest {
        path: manifest.to_path_buf(),
        source,
    })?;
    let items: Vec<ManifestItem> =
        serde_json::from_str(&text).map_err(|source| StoreError::Manifest {
            path: manifest.to_path_buf(),
            source,
        })?;

    Ok(items
        .into_iter()
        .map(|item| match item {
            ManifestItem::File(file) => DocumentEntry::from_path(root.join(file)),
            ManifestItem::Labeled { name, file } => DocumentEntry {
                name,
                path: root.join(file),
            },
        })
        .collect())
}

fn scan_dir(root: &Path) -> Result<Vec<DocumentEntry>, StoreError> {
    let read_err = |source| StoreError::ReadDir {
        path: root.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for item in fs::read_dir(root).map_err(read_err)? {
        let path = item.map_err(read_err)?.path();
        if path.is_file() && is_markdown(&path) && !is_hidden(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths.into_iter().map(DocumentEntry::from_path).collect())
}

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Title-cased label for a document file: `git-basics.md` → `Git Basics`.
pub fn display_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "# x").unwrap();
    }

    #[test]
    fn test_display_name_title_cases_words() {
        assert_eq!(display_name(Path::new("git-basics.md")), "Git Basics");
        assert_eq!(display_name(Path::new("md/docker_cli.md")), "Docker Cli");
        assert_eq!(display_name(Path::new("vim.markdown")), "Vim");
        assert_eq!(display_name(Path::new("a--b__c.md")), "A B C");
    }

    #[test]
    fn test_discover_scans_markdown_sorted() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "vim.md");
        touch(dir.path(), "git-basics.md");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), ".hidden.md");
        fs::create_dir(dir.path().join("sub.md")).unwrap();

        let store = DocumentStore::discover(dir.path()).unwrap();
        let names: Vec<_> = store.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Git Basics", "Vim"]);
        assert_eq!(store.get(1).unwrap().path, dir.path().join("vim.md"));
    }

    #[test]
    fn test_discover_uses_manifest_order() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"["vim.md", {"name": "Git", "file": "git-basics.md"}, "missing.md"]"#,
        )
        .unwrap();

        let store = DocumentStore::discover(dir.path()).unwrap();
        let names: Vec<_> = store.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Vim", "Git", "Missing"]);
    }

    #[test]
    fn test_discover_rejects_malformed_manifest() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "{not json").unwrap();
        let err = DocumentStore::discover(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::Manifest { .. }));
    }

    #[test]
    fn test_discover_missing_root_fails() {
        let dir = tempdir().unwrap();
        let err = DocumentStore::discover(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, StoreError::MissingRoot(_)));
    }

    #[test]
    fn test_empty_root_is_valid() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::discover(dir.path()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.get(0).is_none());
    }

    #[test]
    fn test_position_matches_name_or_stem() {
        let store = DocumentStore::from_entries(vec![
            DocumentEntry::from_path(PathBuf::from("git-basics.md")),
            DocumentEntry::from_path(PathBuf::from("vim.md")),
        ]);
        assert_eq!(store.position("git basics"), Some(0));
        assert_eq!(store.position("git-basics"), Some(0));
        assert_eq!(store.position("VIM"), Some(1));
        assert_eq!(store.position("emacs"), None);
    }
}
