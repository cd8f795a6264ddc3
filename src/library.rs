//! Library side of the player: turning files on disk into playlist rows.
//!
//! Display metadata comes only from the file name and sidecar files; no tags
//! are read.

pub mod artwork;
mod filename;
mod filter;
pub mod lyrics;
mod model;
mod playlist;
mod scan;

pub use filter::TrackFilter;
pub use model::{Track, file_name_of};
pub use playlist::Playlist;
pub use scan::{is_supported_audio, list_folder};
