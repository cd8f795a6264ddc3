//! User-facing failures and how they are reported.

use std::path::PathBuf;

use thiserror::Error;

/// At most this many ignored file names are listed after a folder load.
const IGNORED_LIST_LIMIT: usize = 12;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error(
        "These files are not supported and were ignored:\n- {}\n\nSupported: {supported}",
        .names.join("\n- ")
    )]
    UnsupportedDropped { names: Vec<String>, supported: String },

    #[error(
        "No supported audio files found in:\n{}\n\nSupported: {supported}",
        .folder.display()
    )]
    NoSupportedFiles { folder: PathBuf, supported: String },

    #[error(
        "Ignored unsupported files in this folder (examples):\n- {}\n\nSupported: {supported}",
        truncated_list(.names)
    )]
    SomeFilesIgnored { names: Vec<String>, supported: String },

    #[error("These files were missing or inaccessible:\n- {}", .names.join("\n- "))]
    FilesNotAdded { names: Vec<String> },

    #[error(
        "This file no longer exists:\n{}\n\nRemove it from playlist or reload folder.",
        .path.display()
    )]
    FileMissing { path: PathBuf },

    #[error(
        "Could not open this file:\n{}\n\n{reason}\n\nPossible reasons:\n- File is corrupted\n- Unsupported codec inside the container\n- Permission issues\n\nTry converting it to WAV/OGG/FLAC again.",
        .path.display()
    )]
    PlaybackFailed { path: PathBuf, reason: String },

    #[error("Load a folder or add audio files first.")]
    NoSongs,

    #[error("Could not open {} in the file manager: {source}", .dir.display())]
    RevealFailed {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn truncated_list(names: &[String]) -> String {
    let mut text = names
        .iter()
        .take(IGNORED_LIST_LIMIT)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n- ");
    if names.len() > IGNORED_LIST_LIMIT {
        text.push_str("\n...");
    }
    text
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A message waiting to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub message: String,
}

impl PlayerError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::UnsupportedDropped { .. } => "Unsupported files dropped",
            Self::NoSupportedFiles { .. } => "No supported audio files",
            Self::SomeFilesIgnored { .. } => "Some files ignored",
            Self::FilesNotAdded { .. } => "Some files couldn't be added",
            Self::FileMissing { .. } => "File missing",
            Self::PlaybackFailed { .. } => "Playback failed",
            Self::NoSongs => "No songs",
            Self::RevealFailed { .. } => "Couldn't open file manager",
        }
    }

    pub fn level(&self) -> NoticeLevel {
        match self {
            Self::SomeFilesIgnored { .. } => NoticeLevel::Info,
            _ => NoticeLevel::Warning,
        }
    }
}

impl From<PlayerError> for Notice {
    fn from(err: PlayerError) -> Self {
        Self {
            level: err.level(),
            title: err.title(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignored_list_is_truncated() {
        let names: Vec<String> = (0..15).map(|i| format!("f{i}.mp3")).collect();
        let notice = Notice::from(PlayerError::SomeFilesIgnored {
            names,
            supported: ".wav".into(),
        });
        assert_eq!(notice.level, NoticeLevel::Info);
        assert!(notice.message.contains("f11.mp3"));
        assert!(!notice.message.contains("f12.mp3"));
        assert!(notice.message.contains("\n..."));
    }

    #[test]
    fn dropped_files_are_listed() {
        let notice = Notice::from(PlayerError::UnsupportedDropped {
            names: vec!["a.mp3".into(), "b.m4a".into()],
            supported: ".wav .ogg".into(),
        });
        assert_eq!(notice.title, "Unsupported files dropped");
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(
            notice.message,
            "These files are not supported and were ignored:\n- a.mp3\n- b.m4a\n\nSupported: .wav .ogg"
        );
    }
}
