use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::file_name_of;

/// Files found directly inside a folder, split by whether they can be played.
#[derive(Debug, Default)]
pub struct FolderListing {
    /// Playable paths, sorted case-insensitively by full path.
    pub supported: Vec<PathBuf>,
    /// File names of everything else, in directory order.
    pub unsupported: Vec<String>,
}

pub fn is_supported_audio(path: &Path, settings: &LibrarySettings) -> bool {
    let exts = settings.normalized_extensions();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Sort paths the way the playlist shows a freshly opened folder.
pub fn sort_case_insensitive(paths: &mut [PathBuf]) {
    paths.sort_by_cached_key(|p| p.to_string_lossy().to_lowercase());
}

/// List regular files directly under `dir` (no recursion).
pub fn list_folder(dir: &Path, settings: &LibrarySettings) -> FolderListing {
    let mut listing = FolderListing::default();

    let walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .min_depth(1)
        .max_depth(1);

    for entry in walker.into_iter() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read folder entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || (!settings.include_hidden && is_hidden(path)) {
            continue;
        }

        if is_supported_audio(path, settings) {
            listing.supported.push(path.to_path_buf());
        } else {
            listing.unsupported.push(file_name_of(path));
        }
    }

    sort_case_insensitive(&mut listing.supported);
    listing
}
