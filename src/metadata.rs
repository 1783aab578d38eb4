//! Per-file metadata extraction.
//!
//! [`extract_full_metadata`] turns one path into one [`ImageMetadata`] record by
//! composing three sources:
//!
//! - **File stats**: size, created and modified timestamps from `fs::metadata`
//! - **Filename**: description, identifier and extension via [`crate::naming`]
//! - **Image header**: format, color mode, dimensions and EXIF tags from the
//!   [`ImageBackend`]
//!
//! ## Success and failure records
//!
//! A record is either a success record (no `error`; dimensions, format,
//! color mode and EXIF all present) or a failure record (`error` present, no
//! image-derived fields). The two constructors on [`ImageMetadata`] are the only
//! places that fill the image fields, so a mixed record cannot be built here.
//!
//! | Step fails | Record contains |
//! |---|---|
//! | stat | filename, path, error |
//! | open | filename, path, size, timestamps, error |
//! | nothing | everything except `error` and `image_data` |
//!
//! Absent fields are omitted from the JSON form rather than written as `null`.

use crate::imaging::{Dimensions, ImageBackend, ImageInfo};
use crate::naming::parse_filename;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

/// Timestamp layout: local time, no offset, microsecond precision.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Flat metadata record for one image file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub filename: String,
    /// Absolute path of the file.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exif_data: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Base64 of the raw file bytes, only when explicitly requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

/// Filesystem facts about one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub size_bytes: u64,
    pub created_time: String,
    pub modified_time: String,
}

impl ImageMetadata {
    /// Record for a file whose stats could not be read.
    fn stat_failure(path: &Path, error: String) -> Self {
        Self {
            filename: file_name(path),
            path: absolute_path(path),
            error: Some(error),
            ..Default::default()
        }
    }

    /// Record for a file that exists but could not be opened as an image.
    fn open_failure(path: &Path, stats: FileStats, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::with_stats(path, stats)
        }
    }

    /// Record for a successfully identified image.
    fn success(path: &Path, stats: FileStats, info: ImageInfo) -> Self {
        let name = parse_filename(&file_name(path));
        Self {
            description: Some(name.description),
            uuid: name.uuid,
            extension: name.extension,
            dimensions: Some(info.dimensions),
            format: Some(info.format),
            color_mode: Some(info.color_mode),
            exif_data: Some(info.exif),
            ..Self::with_stats(path, stats)
        }
    }

    fn with_stats(path: &Path, stats: FileStats) -> Self {
        Self {
            filename: file_name(path),
            path: absolute_path(path),
            size_bytes: Some(stats.size_bytes),
            created_time: Some(stats.created_time),
            modified_time: Some(stats.modified_time),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn absolute_path(path: &Path) -> String {
    lexical_absolute(path).to_string_lossy().into_owned()
}

/// Absolute form of `path` with `.` and `..` folded away as text.
///
/// Symlinks are never followed, so `latest/../x` is `x` next to `latest`
/// even when `latest` points elsewhere. `..` at the root stays at the root.
pub fn lexical_absolute(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

/// Render a filesystem time as a local ISO-8601 timestamp.
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .naive_local()
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Read size and timestamps for `path`.
///
/// Platforms without a creation time report the modification time for both.
pub fn file_stats(path: &Path) -> std::io::Result<FileStats> {
    let meta = fs::metadata(path)?;
    let modified = meta.modified()?;
    let created = meta.created().unwrap_or(modified);
    Ok(FileStats {
        size_bytes: meta.len(),
        created_time: format_timestamp(created),
        modified_time: format_timestamp(modified),
    })
}

/// Extract every available metadata field for one file.
///
/// Never fails: problems are recorded in the returned record's `error`.
pub fn extract_full_metadata<B: ImageBackend + ?Sized>(backend: &B, path: &Path) -> ImageMetadata {
    let stats = match file_stats(path) {
        Ok(stats) => stats,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot stat file");
            return ImageMetadata::stat_failure(path, format!("File metadata error: {e}"));
        }
    };

    match backend.open(path) {
        Ok(info) => ImageMetadata::success(path, stats, info),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot open image");
            ImageMetadata::open_failure(path, stats, e.to_string())
        }
    }
}
