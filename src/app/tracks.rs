//! Playlist mutations: folder loads, adds, removal, reordering, search.

use std::path::{Path, PathBuf};

use crate::audio::AudioEngine;
use crate::error::PlayerError;
use crate::library::{Track, TrackFilter, file_name_of, is_supported_audio, list_folder};
use crate::session::KeyValueStore;

use super::model::App;

impl<E: AudioEngine, S: KeyValueStore> App<E, S> {
    /// Replace the playlist with the playable files directly inside `dir`.
    pub fn load_folder(&mut self, dir: &Path) {
        tracing::info!(dir = %dir.display(), "loading folder");

        self.last_folder = Some(dir.to_path_buf());
        self.stopped_by_user = true;
        self.was_playing = false;
        self.engine.stop();
        self.loaded = false;
        self.playlist.clear();
        self.selected = None;
        self.set_filter("");
        self.reset_now_playing();
        self.refresh_time();

        let listing = list_folder(dir, &self.settings.library);
        if listing.supported.is_empty() {
            self.report(PlayerError::NoSupportedFiles {
                folder: dir.to_path_buf(),
                supported: self.settings.library.supported_label(),
            });
            return;
        }

        self.add_files(&listing.supported);

        if !listing.unsupported.is_empty() {
            self.report(PlayerError::SomeFilesIgnored {
                names: listing.unsupported,
                supported: self.settings.library.supported_label(),
            });
        }

        if !self.playlist.is_empty() {
            self.playlist.set_current(Some(0));
            self.selected = Some(0);
            self.refresh_now_playing();
        }
        tracing::info!(tracks = self.playlist.len(), "folder loaded");
    }

    /// Append playable files that are not already in the playlist.
    pub fn add_files(&mut self, paths: &[PathBuf]) {
        let mut missing = Vec::new();
        let mut added = 0usize;

        for path in paths {
            if !is_supported_audio(path, &self.settings.library) || self.playlist.contains(path) {
                continue;
            }
            if !path.exists() {
                missing.push(file_name_of(path));
                continue;
            }
            if self.playlist.push(Track::from_path(path)) {
                added += 1;
            }
        }

        tracing::debug!(added, missing = missing.len(), "added files");
        if self.selected.is_none() && !self.playlist.is_empty() {
            self.selected = self.visible_rows().first().copied();
        }
        if !missing.is_empty() {
            self.report(PlayerError::FilesNotAdded { names: missing });
        }
    }

    /// Handle paths handed over from outside (command line, prompt): the last
    /// directory replaces the playlist, otherwise playable files are added.
    pub fn add_paths(&mut self, paths: &[PathBuf]) {
        let mut folder = None;
        let mut files = Vec::new();
        let mut unsupported = Vec::new();

        for path in paths {
            if path.is_dir() {
                folder = Some(path.clone());
            } else if is_supported_audio(path, &self.settings.library) {
                files.push(path.clone());
            } else {
                unsupported.push(file_name_of(path));
            }
        }

        if !unsupported.is_empty() {
            self.report(PlayerError::UnsupportedDropped {
                names: unsupported,
                supported: self.settings.library.supported_label(),
            });
        }

        if let Some(dir) = folder {
            self.load_folder(&dir);
        } else if !files.is_empty() {
            self.add_files(&files);
        }
    }

    /// Drop `row` from the playlist, stopping playback if it is the cursor.
    pub fn remove_row(&mut self, row: usize) {
        if row >= self.playlist.len() {
            return;
        }

        if self.playlist.current() == Some(row) {
            self.playlist.set_current(None);
            self.loaded = false;
            self.reset_now_playing();
            self.stop();
        }

        if let Some(track) = self.playlist.remove(row) {
            tracing::debug!(path = %track.path.display(), "removed from playlist");
        }

        self.selected = match self.selected {
            Some(sel) if sel > row => Some(sel - 1),
            Some(sel) if sel == row && sel >= self.playlist.len() => self.playlist.len().checked_sub(1),
            other => other,
        };
    }

    /// Move `row` so it plays right after the cursor track.
    pub fn play_next(&mut self, row: usize) {
        let selected_path = self.selected_path();
        if self.playlist.move_to_play_next(row) {
            self.select_path(selected_path.as_deref());
        }
    }

    /// Open the folder containing `row` in the desktop file manager.
    pub fn reveal_row(&mut self, row: usize) {
        let Some(track) = self.playlist.get(row) else {
            return;
        };
        let dir = track
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        tracing::debug!(dir = %dir.display(), "revealing in file manager");
        if let Err(source) = open::that_detached(&dir) {
            self.report(PlayerError::RevealFailed { dir, source });
        }
    }

    /// Narrow the visible rows to tracks matching `query`.
    pub fn set_filter(&mut self, query: &str) {
        self.filter_query = query.to_string();
        self.filter = TrackFilter::new(query);

        let visible = self.visible_rows();
        if !self.selected.is_some_and(|sel| visible.contains(&sel)) {
            self.selected = visible.first().copied();
        }
    }

    /// Playlist rows shown in the table, in playlist order.
    pub fn visible_rows(&self) -> Vec<usize> {
        self.playlist.visible_rows(&self.filter)
    }

    pub fn count_label(&self) -> String {
        format!(
            "Showing {} of {}",
            self.visible_rows().len(),
            self.playlist.len()
        )
    }

    /// Move the highlight `delta` visible rows up or down, clamped.
    pub fn move_selection(&mut self, delta: isize) {
        let visible = self.visible_rows();
        if visible.is_empty() {
            self.selected = None;
            return;
        }

        let pos = self
            .selected
            .and_then(|sel| visible.iter().position(|&r| r == sel))
            .unwrap_or(0);
        let target = pos.saturating_add_signed(delta).min(visible.len() - 1);
        self.selected = Some(visible[target]);
    }

    pub fn select_first(&mut self) {
        self.selected = self.visible_rows().first().copied();
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_rows().last().copied();
    }

    fn selected_path(&self) -> Option<PathBuf> {
        self.selected
            .and_then(|row| self.playlist.get(row))
            .map(|t| t.path.clone())
    }

    fn select_path(&mut self, path: Option<&Path>) {
        self.selected =
            path.and_then(|p| self.playlist.tracks().iter().position(|t| t.path == p));
    }
}
