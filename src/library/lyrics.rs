//! Sidecar lyrics: `<stem>.lrc` / `<stem>.txt` next to the audio file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

const SIDECAR_EXTENSIONS: [&str; 2] = ["lrc", "txt"];

static TIMESTAMP_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\d{1,2}:\d{2}(\.\d{1,2})?\]").expect("timestamp pattern is valid")
});

/// Remove `[m:ss]` / `[m:ss.cc]` tags, leaving everything else untouched.
pub fn clean_lyrics(text: &str) -> String {
    TIMESTAMP_TAG.replace_all(text, "").into_owned()
}

/// Candidate sidecar paths for `audio_path`, in lookup order.
pub fn sidecar_candidates(audio_path: &Path) -> Vec<PathBuf> {
    SIDECAR_EXTENSIONS
        .iter()
        .map(|ext| audio_path.with_extension(ext))
        .collect()
}

/// Load and clean the first sidecar that can be read, or an empty string.
/// Invalid UTF-8 sequences become U+FFFD.
pub fn load_sidecar(audio_path: &Path) -> String {
    for candidate in sidecar_candidates(audio_path) {
        if let Ok(bytes) = fs::read(&candidate) {
            tracing::debug!(path = %candidate.display(), "loaded lyrics sidecar");
            return clean_lyrics(&String::from_utf8_lossy(&bytes));
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn clean_strips_tags_and_keeps_lines() {
        assert_eq!(clean_lyrics("[01:23.45]Hello\n[2:00]World"), "Hello\nWorld");
    }

    #[test]
    fn clean_keeps_non_timestamp_brackets() {
        assert_eq!(clean_lyrics("[ar:Someone]\n[chorus] la"), "[ar:Someone]\n[chorus] la");
        // Three-digit minutes and three-digit fractions are not tags.
        assert_eq!(clean_lyrics("[100:00]x[1:00.123]y"), "[100:00]x[1:00.123]y");
    }

    #[test]
    fn clean_removes_multiple_tags_per_line() {
        assert_eq!(clean_lyrics("[00:01][00:05.5]echo"), "echo");
    }

    #[test]
    fn candidates_replace_only_last_extension() {
        let c = sidecar_candidates(Path::new("/music/Live. Vol 2 - Song.flac"));
        assert_eq!(
            c,
            vec![
                PathBuf::from("/music/Live. Vol 2 - Song.lrc"),
                PathBuf::from("/music/Live. Vol 2 - Song.txt"),
            ]
        );
    }

    #[test]
    fn prefers_lrc_over_txt() {
        let dir = tempdir().unwrap();
        let audio = dir.path().join("song.wav");
        fs::write(dir.path().join("song.lrc"), "[00:01.00]from lrc").unwrap();
        fs::write(dir.path().join("song.txt"), "from txt").unwrap();

        assert_eq!(load_sidecar(&audio), "from lrc");
    }

    #[test]
    fn falls_back_to_txt_then_empty() {
        let dir = tempdir().unwrap();
        let audio = dir.path().join("song.wav");
        assert_eq!(load_sidecar(&audio), "");

        fs::write(dir.path().join("song.txt"), "plain words").unwrap();
        assert_eq!(load_sidecar(&audio), "plain words");
    }

    #[test]
    fn latin1_lrc_is_decoded_lossily_and_still_wins() {
        let dir = tempdir().unwrap();
        let audio = dir.path().join("song.wav");
        fs::write(dir.path().join("song.lrc"), b"[00:01]Caf\xe9").unwrap();
        fs::write(dir.path().join("song.txt"), "from txt").unwrap();

        assert_eq!(load_sidecar(&audio), "Caf\u{fffd}");
    }
}
