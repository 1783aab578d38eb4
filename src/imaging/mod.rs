//! Image decoding, EXIF extraction and pixel transforms in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader` header decode |
//! | **EXIF tags** | `kamadak-exif` container reader |
//! | **Transform** | `image::DynamicImage` ops behind [`ImageTransform`] |
//! | **Save** | `image` encoders, format from extension |
//!
//! The module is split into:
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **EXIF**: tag flattening for the primary image
//! - **Transform**: [`ImageTransform`] trait + [`BuiltinTransform`]

pub mod backend;
mod exif_tags;
pub mod rust_backend;
pub mod transform;

pub use backend::{BackendError, Dimensions, ImageBackend, ImageInfo};
pub use rust_backend::RustBackend;
pub use transform::{BuiltinTransform, ImageTransform};
