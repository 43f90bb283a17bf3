//! cheatdeck - browse Markdown cheat sheets in the terminal.
//!
//! # Usage
//!
//! ```bash
//! cheatdeck                      # sheets from ./md
//! cheatdeck ~/notes --flashcards
//! cheatdeck --document git --export-html git.html
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cheatdeck::app::{App, ViewMode};
use cheatdeck::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use cheatdeck::document::{HtmlOptions, displayable_sections, render_page_html};
use cheatdeck::fetch::fetch_blocking;
use cheatdeck::store::DocumentStore;

const DEFAULT_CONTENT_DIR: &str = "md";

/// A terminal cheat-sheet viewer with continuous and flashcard modes
#[derive(Parser, Debug)]
#[command(name = "cheatdeck", version, about, long_about = None)]
struct Cli {
    /// Directory of Markdown cheat sheets [default: ./md]
    #[arg(value_name = "CONTENT_DIR")]
    content_dir: Option<PathBuf>,

    /// Start on this document (display name or file stem)
    #[arg(short, long, value_name = "NAME")]
    document: Option<String>,

    /// Start in flashcard mode
    #[arg(long)]
    flashcards: bool,

    /// Page theme
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Watch the content directory and reload on change
    #[arg(short, long)]
    watch: bool,

    /// Pass raw HTML through when exporting
    #[arg(long)]
    unsafe_html: bool,

    /// Write the selected document as a standalone HTML page and exit
    #[arg(long, value_name = "PATH")]
    export_html: Option<PathBuf>,

    /// Print every document as `name<TAB>path` and exit
    #[arg(long)]
    list: bool,

    /// Write logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|err| anyhow::anyhow!(err))?;
    } else {
        builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow::anyhow!(err))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();

    let mut cli_flags = parse_flag_tokens(&raw_args);
    if let Some(dir) = &cli.content_dir {
        cli_flags.content_dir = Some(dir.clone());
    }

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;

    let content_dir = effective
        .content_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR));
    let store = DocumentStore::discover(&content_dir)
        .with_context(|| format!("Failed to load documents from {}", content_dir.display()))?;

    if cli.list {
        for entry in store.entries() {
            println!("{}\t{}", entry.name, entry.path.display());
        }
        return Ok(());
    }

    let initial_document = match &cli.document {
        Some(name) => Some(
            store
                .position(name)
                .with_context(|| format!("No document named {name:?}"))?,
        ),
        None => None,
    };
    let theme = effective.theme.unwrap_or_default();

    if let Some(out) = &cli.export_html {
        let options = HtmlOptions {
            allow_raw_html: effective.unsafe_html,
        };
        return export_html(&store, initial_document.unwrap_or(0), theme, &options, out);
    }

    let mode = if effective.flashcards {
        ViewMode::Flashcard
    } else {
        ViewMode::Continuous
    };
    let mut app = App::new(content_dir, store)
        .with_initial_document(initial_document)
        .with_mode(mode)
        .with_theme(theme)
        .with_watch(effective.watch)
        .with_config_paths(
            Some(global_path),
            local_path.exists().then_some(local_path),
        );

    app.run().context("Application error")
}

fn export_html(
    store: &DocumentStore,
    index: usize,
    theme: ThemeMode,
    options: &HtmlOptions,
    out: &Path,
) -> Result<()> {
    let entry = store
        .get(index)
        .context("Content directory has no documents to export")?;
    let raw = fetch_blocking(&entry.path)
        .with_context(|| format!("Failed to read {}", entry.path.display()))?;
    let sections = displayable_sections(&raw);
    let page = render_page_html(store.entries(), index, &sections, theme, options);
    std::fs::write(out, page).with_context(|| format!("Failed to write {}", out.display()))?;
    tracing::info!(
        document = %entry.name,
        sections = sections.len(),
        out = %out.display(),
        "exported html"
    );
    Ok(())
}
