//! High-level API composed from enumeration, extraction and batch processing.
//!
//! [`ImageProcessor`] is the entry point the CLI and the display program use.
//! Every method re-reads the filesystem; nothing is cached between calls.
//!
//! ```text
//! image_files_in_directory ──► process_files(extract_full_metadata) ──► Vec<ImageMetadata>
//!                                                                      │
//!                                            gallery envelope ◄────────┤
//!                                            JSON export     ◄─────────┘
//! ```
//!
//! Failures at this layer follow two policies. Per-file problems live inside
//! the records. Whole-operation problems (export, import) collapse to `false`
//! or `None` after the typed error is logged.

use crate::config::Config;
use crate::export::{load_json, save_json};
use crate::imaging::{ImageBackend, ImageTransform, RustBackend};
use crate::metadata::{ImageMetadata, extract_full_metadata, lexical_absolute};
use crate::process::{TransformReport, process_files, transform_images};
use crate::scan::image_files_in_directory;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A directory's records plus its display name and count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gallery {
    pub gallery_name: String,
    pub image_count: usize,
    pub items: Vec<ImageMetadata>,
}

/// Base64 (standard alphabet, padded) of the raw file bytes.
pub fn encode_image_to_base64(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(STANDARD.encode(bytes)),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot read file for encoding");
            None
        }
    }
}

/// Base name of the directory's absolute path. A symlinked directory keeps
/// the link's own name.
fn directory_display_name(dir: &Path) -> String {
    lexical_absolute(dir)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub struct ImageProcessor<B: ImageBackend = RustBackend> {
    backend: B,
    extensions: Vec<String>,
    suffix: String,
}

impl ImageProcessor<RustBackend> {
    /// Processor with the pure Rust backend and stock settings.
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_backend(RustBackend::new(), config)
    }
}

impl Default for ImageProcessor<RustBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ImageBackend> ImageProcessor<B> {
    pub fn with_backend(backend: B, config: &Config) -> Self {
        Self {
            backend,
            extensions: config.scan.extensions.clone(),
            suffix: config.transform.suffix.clone(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Recognized image files directly inside `dir`.
    pub fn image_files(&self, dir: &Path) -> Vec<PathBuf> {
        image_files_in_directory(dir, &self.extensions)
    }

    pub fn metadata_for_file(&self, path: &Path) -> ImageMetadata {
        extract_full_metadata(&self.backend, path)
    }

    /// Metadata plus the file's bytes as base64 in `image_data`.
    pub fn image_with_metadata(&self, path: &Path) -> ImageMetadata {
        ImageMetadata {
            image_data: encode_image_to_base64(path),
            ..self.metadata_for_file(path)
        }
    }

    pub fn metadata_for_directory(&self, dir: &Path) -> Vec<ImageMetadata> {
        process_files(&self.image_files(dir), |path| self.metadata_for_file(path))
    }

    pub fn gallery(&self, dir: &Path, include_image_data: bool) -> Gallery {
        let files = self.image_files(dir);
        let items = if include_image_data {
            process_files(&files, |path| self.image_with_metadata(path))
        } else {
            process_files(&files, |path| self.metadata_for_file(path))
        };
        Gallery {
            gallery_name: directory_display_name(dir),
            image_count: items.len(),
            items,
        }
    }

    /// Extract the directory's metadata and write it as a JSON array.
    pub fn export_metadata_to_json(&self, dir: &Path, output: &Path) -> bool {
        let records = self.metadata_for_directory(dir);
        match save_json(&records, output) {
            Ok(()) => {
                tracing::info!(count = records.len(), output = %output.display(), "exported metadata");
                true
            }
            Err(e) => {
                tracing::warn!(output = %output.display(), error = %e, "metadata export failed");
                false
            }
        }
    }

    /// Read a previously exported JSON array back.
    pub fn load_metadata_from_json(&self, path: &Path) -> Option<Vec<ImageMetadata>> {
        load_json(path)
            .inspect_err(|e| {
                tracing::warn!(path = %path.display(), error = %e, "metadata import failed");
            })
            .ok()
    }

    /// Apply `transform` to every image in `dir` and save with a suffix.
    ///
    /// `output_dir` defaults to `dir` and `suffix` to the configured one.
    pub fn transform_images<T: ImageTransform + ?Sized>(
        &self,
        dir: &Path,
        transform: &T,
        output_dir: Option<&Path>,
        suffix: Option<&str>,
    ) -> std::io::Result<TransformReport> {
        let files = self.image_files(dir);
        transform_images(
            &self.backend,
            &files,
            transform,
            output_dir.unwrap_or(dir),
            suffix.unwrap_or(&self.suffix),
        )
    }
}
