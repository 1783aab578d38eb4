//! Directory enumeration.
//!
//! Lists the regular files directly inside a directory and keeps the ones
//! whose extension is on an allow-list. Enumeration is forgiving:
//! a path that does not exist or is not a directory yields an empty list, not
//! an error, so a batch over a bad path is simply an empty batch.
//!
//! ## Ordering
//!
//! Results follow the order the operating system returns directory entries
//! in. That order is unspecified and differs between filesystems; callers that
//! need a stable order must sort.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions recognized as images by default.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];

/// List the files directly inside `dir` (non-recursive).
///
/// Symlinks that point at files are included. Subdirectories and entries that
/// cannot be read are skipped.
pub fn list_files_in_directory(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}

/// Keep only the paths whose extension is in `extensions`.
///
/// Extensions may be given with or without a leading dot; comparison is
/// case-insensitive on both sides.
pub fn filter_files_by_extension<S: AsRef<str>>(
    paths: Vec<PathBuf>,
    extensions: &[S],
) -> Vec<PathBuf> {
    let normalized: Vec<String> = extensions
        .iter()
        .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
        .collect();

    paths
        .into_iter()
        .filter(|path| {
            path.extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .is_some_and(|ext| normalized.contains(&ext))
        })
        .collect()
}

/// Image files directly inside `dir`, using the given extension allow-list.
pub fn image_files_in_directory<S: AsRef<str>>(dir: &Path, extensions: &[S]) -> Vec<PathBuf> {
    filter_files_by_extension(list_files_in_directory(dir), extensions)
}
