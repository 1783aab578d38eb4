//! Image decoding backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the boundary to the image library. It covers
//! the three things the rest of the crate needs from a decoder:
//!
//! - **open**: identify a file and report format, color mode, dimensions and
//!   EXIF tags without decoding the pixel data
//! - **load**: fully decode the pixels (for transforms)
//! - **save**: encode a decoded image, format inferred from the extension
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests substitute
//! [`tests::MockBackend`] to exercise extraction logic without real files.

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Encode(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// What an `open` reports about an image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Upper-case codec name, e.g. `PNG`, `JPEG`.
    pub format: String,
    /// Short pixel layout name, e.g. `RGB`, `RGBA`, `L`.
    pub color_mode: String,
    pub dimensions: Dimensions,
    /// EXIF tag name → display value. Empty when the file carries none.
    pub exif: BTreeMap<String, String>,
}

/// Trait for image decoding backends.
pub trait ImageBackend {
    /// Identify an image and read its header-level facts and EXIF tags.
    fn open(&self, path: &Path) -> Result<ImageInfo, BackendError>;

    /// Decode the full image.
    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Encode `image` to `path`; the output format follows the extension.
    fn save(&self, image: &DynamicImage, path: &Path) -> Result<(), BackendError>;
}
