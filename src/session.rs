//! Session persistence: the last folder, track, position and play state.
//!
//! The snapshot is plain data; `App` decides when to read and write it.

mod snapshot;
mod store;

pub use snapshot::SessionSnapshot;
pub use store::{KeyValueStore, StoreError, TomlStore};
