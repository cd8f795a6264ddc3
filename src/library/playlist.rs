//! The ordered, duplicate-free list of tracks plus the playback cursor.
//!
//! Rows are indices into the underlying order. Filtering never touches this
//! order; it only produces the list of rows that are currently visible.

use std::path::Path;

use super::filter::TrackFilter;
use super::model::Track;

#[derive(Debug, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, row: usize) -> Option<&Track> {
        self.tracks.get(row)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.tracks.iter().any(|t| t.path == path)
    }

    /// Index of the loaded track, if any.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Point the cursor at `row`; out-of-range rows clear it.
    pub fn set_current(&mut self, row: Option<usize>) {
        self.current = row.filter(|&r| r < self.tracks.len());
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
    }

    /// Append `track` unless its path is already present.
    pub fn push(&mut self, track: Track) -> bool {
        if self.contains(&track.path) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Remove `row`, keeping the cursor on the same logical track. Removing
    /// the current track clears the cursor.
    pub fn remove(&mut self, row: usize) -> Option<Track> {
        if row >= self.tracks.len() {
            return None;
        }

        match self.current {
            Some(cur) if cur == row => self.current = None,
            Some(cur) if row < cur => self.current = Some(cur - 1),
            _ => {}
        }

        Some(self.tracks.remove(row))
    }

    /// Move `row` so that it plays right after the current track.
    ///
    /// Returns `false` (and changes nothing) when there is no current track,
    /// `row` is out of range, or `row` already is / already follows it.
    pub fn move_to_play_next(&mut self, row: usize) -> bool {
        let Some(cur) = self.current else {
            return false;
        };
        if row >= self.tracks.len() || row == cur || row == cur + 1 {
            return false;
        }

        let track = self.tracks.remove(row);
        let cur = if row < cur { cur - 1 } else { cur };
        self.current = Some(cur);

        let insert_at = (cur + 1).min(self.tracks.len());
        self.tracks.insert(insert_at, track);
        true
    }

    /// Rows accepted by `filter`, in playlist order.
    pub fn visible_rows(&self, filter: &TrackFilter) -> Vec<usize> {
        self.tracks
            .iter()
            .enumerate()
            .filter(|(_, t)| filter.matches(t))
            .map(|(i, _)| i)
            .collect()
    }
}
