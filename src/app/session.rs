//! When the session snapshot is written and how it is replayed at startup.

use std::time::Duration;

use crate::audio::{AudioEngine, EngineStatus};
use crate::session::{KeyValueStore, SessionSnapshot};

use super::model::App;

impl<E: AudioEngine, S: KeyValueStore> App<E, S> {
    /// Write the snapshot and flush the store. Unforced saves only happen
    /// while audio is playing; nothing is saved before a folder was loaded.
    pub fn save_session(&mut self, force: bool) {
        let Some(folder) = &self.last_folder else {
            return;
        };
        let status = self.status();
        if !force && status != EngineStatus::Playing {
            return;
        }

        let snapshot = SessionSnapshot {
            folder: folder.clone(),
            index: self
                .playlist
                .current()
                .and_then(|row| i64::try_from(row).ok())
                .unwrap_or(-1),
            offset_seconds: if self.loaded {
                self.engine.offset().as_secs_f64()
            } else {
                0.0
            },
            was_playing: status == EngineStatus::Playing,
        };
        snapshot.write(&mut self.store);

        if let Err(e) = self.store.sync() {
            tracing::warn!(error = %e, "failed to save session");
        }
    }

    /// Reopen the last folder and track, at the saved position and state.
    pub fn restore_session(&mut self) {
        let snapshot = SessionSnapshot::read(&self.store);
        if snapshot.folder.as_os_str().is_empty() || !snapshot.folder.is_dir() {
            tracing::debug!(folder = %snapshot.folder.display(), "no session to restore");
            return;
        }

        tracing::info!(
            folder = %snapshot.folder.display(),
            index = snapshot.index,
            offset = snapshot.offset_seconds,
            playing = snapshot.was_playing,
            "restoring session"
        );
        self.load_folder(&snapshot.folder);

        let Some(row) = snapshot.row().filter(|&row| row < self.playlist.len()) else {
            return;
        };
        if !self.load_index(row) {
            return;
        }

        let offset = Duration::try_from_secs_f64(snapshot.offset_seconds).unwrap_or_default();
        self.engine.set_offset(offset);
        if snapshot.was_playing {
            self.stopped_by_user = false;
            self.engine.play();
        } else {
            self.engine.pause();
        }
        self.refresh_time();
    }
}
