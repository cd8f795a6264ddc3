use std::path::PathBuf;

use toml::Value;

use super::store::KeyValueStore;

pub const KEY_FOLDER: &str = "player/lastFolder";
pub const KEY_INDEX: &str = "player/lastIndex";
pub const KEY_OFFSET: &str = "player/lastOffsetSeconds";
pub const KEY_WAS_PLAYING: &str = "player/wasPlaying";

/// What the player was doing when it last saved.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Empty when no folder was ever saved.
    pub folder: PathBuf,
    /// Playlist row of the loaded track, -1 for none.
    pub index: i64,
    pub offset_seconds: f64,
    pub was_playing: bool,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            folder: PathBuf::new(),
            index: -1,
            offset_seconds: 0.0,
            was_playing: false,
        }
    }
}

impl SessionSnapshot {
    /// Read the four fields; absent or mistyped keys fall back to defaults.
    pub fn read(store: &impl KeyValueStore) -> Self {
        let defaults = Self::default();
        Self {
            folder: store
                .value(KEY_FOLDER)
                .and_then(Value::as_str)
                .map(PathBuf::from)
                .unwrap_or(defaults.folder),
            index: store
                .value(KEY_INDEX)
                .and_then(Value::as_integer)
                .unwrap_or(defaults.index),
            offset_seconds: store
                .value(KEY_OFFSET)
                .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
                .unwrap_or(defaults.offset_seconds),
            was_playing: store
                .value(KEY_WAS_PLAYING)
                .and_then(Value::as_bool)
                .unwrap_or(defaults.was_playing),
        }
    }

    /// Stage all four fields in `store`; the caller decides when to sync.
    pub fn write(&self, store: &mut impl KeyValueStore) {
        store.set_value(
            KEY_FOLDER,
            Value::String(self.folder.to_string_lossy().into_owned()),
        );
        store.set_value(KEY_INDEX, Value::Integer(self.index));
        store.set_value(KEY_OFFSET, Value::Float(self.offset_seconds));
        store.set_value(KEY_WAS_PLAYING, Value::Boolean(self.was_playing));
    }

    /// The stored row, if it is a valid index.
    pub fn row(&self) -> Option<usize> {
        usize::try_from(self.index).ok()
    }
}
