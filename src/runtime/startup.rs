use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::audio::AudioEngine;
use crate::config::{self, default_state_dir};
use crate::session::{KeyValueStore, TomlStore};

/// Log events to a file; the terminal belongs to the UI. Returns the log path
/// when logging could be set up.
pub fn init_logging(settings: &config::Settings) -> Option<PathBuf> {
    let path = settings
        .logging
        .file
        .clone()
        .or_else(|| default_state_dir().map(|d| d.join("cadenza.log")))?;

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("cadenza: failed to open log file {}: {e}", path.display());
            return None;
        }
    };

    let filter = EnvFilter::try_from_env("CADENZA_LOG")
        .or_else(|_| EnvFilter::try_new(&settings.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}

/// Open the session file, or a memory-only store when persistence is off or
/// the file cannot be used.
pub fn open_session_store(settings: &config::Settings) -> TomlStore {
    if !settings.session.enabled {
        return TomlStore::in_memory();
    }

    let Some(path) = settings
        .session
        .path
        .clone()
        .or_else(|| default_state_dir().map(|d| d.join("session.toml")))
    else {
        tracing::warn!("no state directory; session will not be saved");
        return TomlStore::in_memory();
    };

    match TomlStore::open(&path) {
        Ok(store) => {
            tracing::info!(path = ?store.path(), "session store opened");
            store
        }
        Err(e) => {
            tracing::warn!(error = %e, "session store unavailable; session will not be saved");
            TomlStore::in_memory()
        }
    }
}

/// Paths from the command line are handled like dropped files; without any,
/// the previous session is restored.
pub fn apply_launch_args<E: AudioEngine, S: KeyValueStore>(
    app: &mut App<E, S>,
    args: Vec<PathBuf>,
) {
    if args.is_empty() {
        app.restore_session();
    } else {
        app.add_paths(&args);
    }
}
