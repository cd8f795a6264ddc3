//! Audio playback: the engine contract and its rodio implementation.

mod player;
mod sink;
mod types;

pub use player::RodioEngine;
pub use types::{AudioEngine, EngineError, EngineStatus};
