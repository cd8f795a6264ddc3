use std::path::{Path, PathBuf};

use super::filename::parse_artist_title;
use super::lyrics::load_sidecar;

/// A playlist entry. The path is its identity; the rest is derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub lyrics: String,
}

impl Track {
    /// Build a track from disk: artist/title from the file stem, lyrics from
    /// an adjacent sidecar.
    pub fn from_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (artist, title) = parse_artist_title(&stem);

        Self {
            path: path.to_path_buf(),
            title,
            artist,
            lyrics: load_sidecar(path),
        }
    }

    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

/// Last path component as a display string (falls back to the full path).
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
