//! Cover art lookup beside the audio file.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};

const FOLDER_ART: [&str; 5] = [
    "cover.jpg",
    "cover.jpeg",
    "cover.png",
    "folder.jpg",
    "folder.png",
];
const TRACK_ART_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Candidate image paths for `audio_path`, in lookup order.
pub fn artwork_candidates(audio_path: &Path) -> Vec<PathBuf> {
    let dir = audio_path.parent().unwrap_or_else(|| Path::new(""));
    let mut candidates: Vec<PathBuf> = FOLDER_ART.iter().map(|name| dir.join(name)).collect();
    candidates.extend(
        TRACK_ART_EXTENSIONS
            .iter()
            .map(|ext| audio_path.with_extension(ext)),
    );
    candidates
}

/// The first candidate that exists and decodes. `None` means "no artwork".
pub fn resolve_artwork(audio_path: &Path) -> Option<DynamicImage> {
    for candidate in artwork_candidates(audio_path) {
        if !candidate.is_file() {
            continue;
        }
        match image::open(&candidate) {
            Ok(img) => {
                tracing::debug!(path = %candidate.display(), "using artwork");
                return Some(img);
            }
            Err(e) => {
                tracing::debug!(path = %candidate.display(), error = %e, "skipping undecodable artwork");
            }
        }
    }
    None
}

/// Square `size`×`size` thumbnail: the art scaled to fill (cropping the
/// overflow), or a solid placeholder when there is none.
pub fn thumbnail(art: Option<&DynamicImage>, size: u32, placeholder: [u8; 3]) -> RgbImage {
    let size = size.max(1);
    match art {
        Some(img) => img
            .resize_to_fill(size, size, FilterType::Triangle)
            .to_rgb8(),
        None => RgbImage::from_pixel(size, size, Rgb(placeholder)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_png(path: &Path, w: u32, h: u32, color: [u8; 3]) {
        RgbImage::from_pixel(w, h, Rgb(color)).save(path).unwrap();
    }

    #[test]
    fn candidates_follow_priority_order() {
        let c = artwork_candidates(Path::new("/m/a/Song.flac"));
        let names: Vec<String> = c
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "cover.jpg",
                "cover.jpeg",
                "cover.png",
                "folder.jpg",
                "folder.png",
                "Song.jpg",
                "Song.jpeg",
                "Song.png",
            ]
        );
    }

    #[test]
    fn folder_cover_beats_track_image() {
        let dir = tempdir().unwrap();
        let audio = dir.path().join("Song.wav");
        write_png(&dir.path().join("folder.png"), 2, 2, [255, 0, 0]);
        write_png(&dir.path().join("Song.png"), 2, 2, [0, 255, 0]);

        let art = resolve_artwork(&audio).unwrap().to_rgb8();
        assert_eq!(art.get_pixel(0, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn undecodable_cover_is_skipped() {
        let dir = tempdir().unwrap();
        let audio = dir.path().join("Song.wav");
        fs::write(dir.path().join("cover.jpg"), b"not an image").unwrap();
        write_png(&dir.path().join("Song.png"), 2, 2, [0, 0, 255]);

        let art = resolve_artwork(&audio).unwrap().to_rgb8();
        assert_eq!(art.get_pixel(1, 1), &Rgb([0, 0, 255]));
    }

    #[test]
    fn nothing_found_is_none() {
        let dir = tempdir().unwrap();
        assert!(resolve_artwork(&dir.path().join("Song.wav")).is_none());
    }

    #[test]
    fn placeholder_is_solid_square() {
        let t = thumbnail(None, 4, [0x2b, 0x37, 0x54]);
        assert_eq!(t.dimensions(), (4, 4));
        assert!(t.pixels().all(|p| *p == Rgb([0x2b, 0x37, 0x54])));
    }

    #[test]
    fn wide_art_is_cropped_to_square() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 10, Rgb([9, 9, 9])));
        let t = thumbnail(Some(&img), 6, [0, 0, 0]);
        assert_eq!(t.dimensions(), (6, 6));
        assert_eq!(t.get_pixel(3, 3), &Rgb([9, 9, 9]));
    }
}
