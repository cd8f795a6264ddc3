//! Transport controls: loading a row into the engine, play/pause, stop,
//! next/prev, seeking and volume.

use std::time::Duration;

use crate::audio::{AudioEngine, EngineStatus};
use crate::error::PlayerError;
use crate::session::KeyValueStore;

use super::model::{App, SEEK_SCALE, position_of};

impl<E: AudioEngine, S: KeyValueStore> App<E, S> {
    /// Open `row` in the engine and make it the cursor. Returns whether the
    /// track is now loaded.
    pub(crate) fn load_index(&mut self, row: usize) -> bool {
        let Some(track) = self.playlist.get(row) else {
            return false;
        };
        let path = track.path.clone();

        if !path.exists() {
            self.report(PlayerError::FileMissing { path });
            return false;
        }

        self.engine.stop();
        self.playlist.set_current(Some(row));
        self.loaded = false;

        if let Err(e) = self.engine.open(&path) {
            self.report(PlayerError::PlaybackFailed {
                path,
                reason: e.to_string(),
            });
            self.refresh_time();
            return false;
        }

        tracing::info!(row, path = %path.display(), "track loaded");
        self.loaded = true;
        self.engine.set_volume(self.volume);
        self.selected = Some(row);
        self.refresh_now_playing();
        self.refresh_time();
        true
    }

    /// Load `row` and start it.
    pub fn play_row(&mut self, row: usize) {
        if self.load_index(row) {
            self.stopped_by_user = false;
            self.engine.play();
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if self.playlist.is_empty() {
            self.report(PlayerError::NoSongs);
            return;
        }

        if !self.loaded {
            let row = self.playlist.current().unwrap_or(0);
            if !self.load_index(row) {
                return;
            }
        }

        if self.engine.status() == EngineStatus::Playing {
            self.engine.pause();
        } else {
            self.stopped_by_user = false;
            self.engine.play();
        }
        self.save_session(true);
    }

    pub fn stop(&mut self) {
        self.engine.stop();
        self.stopped_by_user = true;
        self.was_playing = false;
        self.refresh_time();
        self.save_session(true);
    }

    pub fn next(&mut self) {
        let Some(last) = self.playlist.len().checked_sub(1) else {
            return;
        };
        let row = self.playlist.current().map_or(0, |cur| (cur + 1).min(last));
        self.play_row(row);
        self.save_session(true);
    }

    pub fn prev(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        let row = self.playlist.current().map_or(0, |cur| cur.saturating_sub(1));
        self.play_row(row);
        self.save_session(true);
    }

    pub fn begin_seek(&mut self) {
        self.user_seeking = true;
    }

    /// Move the seek position without touching the engine.
    pub fn preview_seek(&mut self, position: u16) {
        self.user_seeking = true;
        self.seek_position = position.min(SEEK_SCALE);
    }

    /// Seek the engine to the previewed position.
    pub fn end_seek(&mut self) {
        self.user_seeking = false;

        let duration = if self.loaded {
            self.engine.duration()
        } else {
            Duration::ZERO
        };
        if duration.is_zero() {
            return;
        }

        let target = duration.mul_f64(f64::from(self.seek_position) / f64::from(SEEK_SCALE));
        tracing::debug!(target = ?target, "seeking");
        self.engine.set_offset(target);
        self.refresh_time();
        self.save_session(true);
    }

    /// Scrub by `seconds` (negative rewinds), clamped to the track.
    pub fn seek_by(&mut self, seconds: i64) {
        if !self.loaded {
            return;
        }
        let duration = self.engine.duration();
        if duration.is_zero() {
            return;
        }

        let now = self.engine.offset();
        let step = Duration::from_secs(seconds.unsigned_abs());
        let target = if seconds >= 0 {
            now.saturating_add(step).min(duration)
        } else {
            now.saturating_sub(step)
        };

        self.begin_seek();
        self.preview_seek(position_of(target, duration));
        self.end_seek();
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        self.engine.set_volume(self.volume);
    }

    /// Change the volume by `delta` percent, clamped to 0-100.
    pub fn adjust_volume(&mut self, delta: i16) {
        let volume = (i16::from(self.volume) + delta).clamp(0, 100);
        self.set_volume(volume as u8);
    }
}
