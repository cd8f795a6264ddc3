use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cadenza/config.toml` or `~/.config/cadenza/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CADENZA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Period of the position/auto-advance timer (milliseconds).
    pub tick_ms: u64,
    /// Save the session every N ticks while audio is playing.
    pub save_every_ticks: u32,
    /// Volume applied at startup (0-100).
    pub default_volume: u8,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            save_every_ticks: 5,
            default_volume: 70,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change per `+` / `-` press.
    pub volume_step: u8,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as playable audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks when listing a folder.
    pub follow_links: bool,
    /// Whether to include hidden files (dotfiles).
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "wav".into(),
                "ogg".into(),
                "flac".into(),
                "aiff".into(),
                "au".into(),
            ],
            follow_links: true,
            include_hidden: false,
        }
    }
}

impl LibrarySettings {
    /// Normalized extension list: lowercase, no leading dot, no empties.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect()
    }

    /// Human readable list used in notices, e.g. `.wav .ogg .flac`.
    pub fn supported_label(&self) -> String {
        self.normalized_extensions()
            .iter()
            .map(|e| format!(".{e}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Side of the square artwork thumbnail, in pixels (two pixels per terminal row).
    pub artwork_size: u32,
    /// Fill colour of the artwork placeholder, as `#rrggbb`.
    pub placeholder_color: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " cadenza ".to_string(),
            artwork_size: 16,
            placeholder_color: "#2b3754".to_string(),
        }
    }
}

impl UiSettings {
    pub fn placeholder_rgb(&self) -> Option<[u8; 3]> {
        parse_hex_color(&self.placeholder_color)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Persist folder/track/position between runs.
    pub enabled: bool,
    /// Override for the session file location.
    pub path: Option<PathBuf>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive; `CADENZA_LOG` wins when set.
    pub filter: String,
    /// Override for the log file location.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
