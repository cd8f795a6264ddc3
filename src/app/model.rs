//! Controller state: `App`, `NowPlaying` and the read side used by the UI.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::RgbImage;

use crate::audio::{AudioEngine, EngineStatus};
use crate::config::{Settings, UiSettings, parse_hex_color};
use crate::error::{Notice, PlayerError};
use crate::library::artwork::{resolve_artwork, thumbnail};
use crate::library::{Playlist, TrackFilter};
use crate::session::KeyValueStore;

/// Resolution of the seek position (`0..=SEEK_SCALE`).
pub const SEEK_SCALE: u16 = 1000;

pub const NO_SONG_TITLE: &str = "No song selected";
pub const NO_SONG_ARTIST: &str = "—";
pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

const FALLBACK_PLACEHOLDER: [u8; 3] = [0x2b, 0x37, 0x54];

/// What the now-playing panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub artwork: RgbImage,
}

impl NowPlaying {
    pub(super) fn placeholder(ui: &UiSettings) -> Self {
        Self {
            title: NO_SONG_TITLE.to_string(),
            artist: NO_SONG_ARTIST.to_string(),
            artwork: thumbnail(None, ui.artwork_size, placeholder_color(ui)),
        }
    }
}

fn placeholder_color(ui: &UiSettings) -> [u8; 3] {
    ui.placeholder_rgb()
        .or_else(|| parse_hex_color(&UiSettings::default().placeholder_color))
        .unwrap_or(FALLBACK_PLACEHOLDER)
}

/// The playlist & session controller.
pub struct App<E, S> {
    pub(super) engine: E,
    pub(super) store: S,
    pub(super) settings: Settings,

    pub(super) playlist: Playlist,
    /// The cursor track was opened successfully by the engine.
    pub(super) loaded: bool,
    pub(super) now_playing: NowPlaying,
    /// Highlighted playlist row in the table.
    pub(super) selected: Option<usize>,

    pub(super) filter_query: String,
    pub(super) filter: TrackFilter,

    pub(super) seek_position: u16,
    pub(super) user_seeking: bool,
    pub(super) stopped_by_user: bool,
    pub(super) was_playing: bool,
    pub(super) elapsed: Duration,
    pub(super) duration: Duration,
    pub(super) volume: u8,

    pub(super) last_folder: Option<PathBuf>,
    pub(super) tick_count: u32,
    pub(super) notices: VecDeque<Notice>,
}

impl<E: AudioEngine, S: KeyValueStore> App<E, S> {
    pub fn new(mut engine: E, store: S, settings: Settings) -> Self {
        let volume = settings.playback.default_volume.min(100);
        engine.set_volume(volume);

        Self {
            now_playing: NowPlaying::placeholder(&settings.ui),
            engine,
            store,
            settings,

            playlist: Playlist::new(),
            loaded: false,
            selected: None,

            filter_query: String::new(),
            filter: TrackFilter::default(),

            seek_position: 0,
            user_seeking: false,
            stopped_by_user: false,
            was_playing: false,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            volume,

            last_folder: None,
            tick_count: 0,
            notices: VecDeque::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn status(&self) -> EngineStatus {
        if self.loaded {
            self.engine.status()
        } else {
            EngineStatus::Stopped
        }
    }

    pub fn now_playing(&self) -> &NowPlaying {
        &self.now_playing
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn filter_query(&self) -> &str {
        &self.filter_query
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Seek position in `0..=SEEK_SCALE`, the preview value while seeking.
    pub fn seek_position(&self) -> u16 {
        self.seek_position
    }

    pub fn last_folder(&self) -> Option<&Path> {
        self.last_folder.as_deref()
    }

    /// `elapsed / duration`, e.g. `1:05 / 3:20`.
    pub fn time_label(&self) -> String {
        format!(
            "{} / {}",
            format_clock(self.elapsed),
            format_clock(self.duration)
        )
    }

    /// The oldest notice not yet dismissed.
    pub fn pending_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[cfg(test)]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[cfg(test)]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub(super) fn report(&mut self, err: PlayerError) {
        tracing::warn!(title = err.title(), "{err}");
        self.notices.push_back(Notice::from(err));
    }

    pub(super) fn reset_now_playing(&mut self) {
        self.now_playing = NowPlaying::placeholder(&self.settings.ui);
    }

    /// Show the cursor track in the now-playing panel.
    pub(super) fn refresh_now_playing(&mut self) {
        let Some(track) = self.playlist.current_track() else {
            self.reset_now_playing();
            return;
        };

        let title = if track.title.is_empty() {
            UNKNOWN_TITLE.to_string()
        } else {
            track.title.clone()
        };
        let artist = if track.artist.is_empty() {
            UNKNOWN_ARTIST.to_string()
        } else {
            track.artist.clone()
        };
        let art = resolve_artwork(&track.path);
        let artwork = thumbnail(
            art.as_ref(),
            self.settings.ui.artwork_size,
            placeholder_color(&self.settings.ui),
        );

        self.now_playing = NowPlaying {
            title,
            artist,
            artwork,
        };
    }

    /// Pull elapsed/duration from the engine and move the seek position
    /// unless the user is dragging it.
    pub(super) fn refresh_time(&mut self) {
        if self.loaded {
            self.duration = self.engine.duration();
            self.elapsed = self.engine.offset().min(self.duration);
        } else {
            self.duration = Duration::ZERO;
            self.elapsed = Duration::ZERO;
        }

        if !self.user_seeking {
            self.seek_position = position_of(self.elapsed, self.duration);
        }
    }
}

/// `elapsed` as a fraction of `duration`, scaled to `0..=SEEK_SCALE`.
pub(super) fn position_of(elapsed: Duration, duration: Duration) -> u16 {
    if duration.is_zero() {
        return 0;
    }
    let ratio = (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0);
    (ratio * f64::from(SEEK_SCALE)).round() as u16
}

/// Format a duration as `m:ss`, rounded to the nearest second.
pub fn format_clock(d: Duration) -> String {
    let total = d.as_secs_f64().round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
