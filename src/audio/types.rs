//! Audio engine contract shared by the controller and its backends.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// What the engine is doing right now.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EngineStatus {
    #[default]
    Stopped,
    Paused,
    Playing,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no audio output device: {0}")]
    NoOutput(String),

    #[error("could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },
}

/// A single-track audio player.
///
/// Only one file is loaded at a time; `open` replaces whatever was loaded.
/// After `open` the engine is `Stopped` at offset zero until `play`.
pub trait AudioEngine {
    fn open(&mut self, path: &Path) -> Result<(), EngineError>;
    fn play(&mut self);
    fn pause(&mut self);
    /// Stop and rewind; a later `play` starts the loaded file from the top.
    fn stop(&mut self);
    fn status(&self) -> EngineStatus;
    /// Volume in percent, 0-100.
    fn set_volume(&mut self, volume: u8);
    /// Length of the loaded file, zero when unknown or nothing is loaded.
    fn duration(&self) -> Duration;
    /// Playing position, zero when stopped.
    fn offset(&self) -> Duration;
    fn set_offset(&mut self, offset: Duration);
}
