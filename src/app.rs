//! Application module: the playlist & session controller.
//!
//! `App` is the only thing the runtime mutates. It owns the playlist, the
//! playback cursor, the position tracker state and the session policy, and
//! drives an `AudioEngine` and a `KeyValueStore` handed to it at startup.
//! Failures are queued as notices for the UI instead of being returned.

mod model;
mod session;
mod tracker;
mod tracks;
mod transport;

pub use model::*;
