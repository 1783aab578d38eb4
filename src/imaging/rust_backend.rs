//! Pure Rust image backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify (format, color type, size) | `image::ImageReader::into_decoder` (header only) |
//! | EXIF tags | `kamadak-exif` via [`super::exif_tags`] |
//! | Decode | `image::ImageReader::decode` |
//! | Encode | `image::DynamicImage::save_with_format`, format from extension |
//!
//! Format is sniffed from the file's magic bytes first and the extension
//! second, so a PNG named `photo.jpg` still identifies as PNG.

use super::backend::{BackendError, Dimensions, ImageBackend, ImageInfo};
use image::{ColorType, DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn open_reader(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>, BackendError> {
    Ok(ImageReader::open(path)?.with_guessed_format()?)
}

fn decode_error(path: &Path, error: impl std::fmt::Display) -> BackendError {
    BackendError::Decode(format!("Failed to decode {}: {}", path.display(), error))
}

/// Conventional upper-case codec name.
pub fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Png => "PNG".to_string(),
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::Gif => "GIF".to_string(),
        ImageFormat::Bmp => "BMP".to_string(),
        ImageFormat::Tiff => "TIFF".to_string(),
        ImageFormat::WebP => "WEBP".to_string(),
        other => format!("{other:?}").to_uppercase(),
    }
}

/// Conventional short name for a pixel layout (`L`, `RGB`, `RGBA;16`, ...).
pub fn color_mode_name(color: ColorType) -> String {
    match color {
        ColorType::L8 => "L".to_string(),
        ColorType::La8 => "LA".to_string(),
        ColorType::Rgb8 => "RGB".to_string(),
        ColorType::Rgba8 => "RGBA".to_string(),
        ColorType::L16 => "I;16".to_string(),
        ColorType::La16 => "LA;16".to_string(),
        ColorType::Rgb16 => "RGB;16".to_string(),
        ColorType::Rgba16 => "RGBA;16".to_string(),
        ColorType::Rgb32F => "RGB;F32".to_string(),
        ColorType::Rgba32F => "RGBA;F32".to_string(),
        other => format!("{other:?}").to_uppercase(),
    }
}

/// Convert `image` to a pixel layout the target encoder accepts.
fn encodable(image: &DynamicImage, format: ImageFormat) -> Cow<'_, DynamicImage> {
    let color = image.color();
    let unsupported = |allowed: &[ColorType]| !allowed.contains(&color);
    match format {
        ImageFormat::Jpeg if unsupported(&[ColorType::L8, ColorType::Rgb8]) => {
            Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8()))
        }
        ImageFormat::Gif if unsupported(&[ColorType::Rgb8, ColorType::Rgba8]) => {
            Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
        }
        ImageFormat::Bmp | ImageFormat::WebP
            if unsupported(&[
                ColorType::L8,
                ColorType::La8,
                ColorType::Rgb8,
                ColorType::Rgba8,
            ]) =>
        {
            if color.has_alpha() {
                Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
            } else {
                Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8()))
            }
        }
        _ => Cow::Borrowed(image),
    }
}

impl ImageBackend for RustBackend {
    fn open(&self, path: &Path) -> Result<ImageInfo, BackendError> {
        let reader = open_reader(path)?;
        let format = reader.format().ok_or_else(|| {
            BackendError::Decode(format!("cannot identify image file {}", path.display()))
        })?;

        // The decoder owns the file handle; it is released at the end of
        // this block on every path.
        let (dimensions, color) = {
            let decoder = reader
                .into_decoder()
                .map_err(|e| decode_error(path, e))?;
            let (width, height) = decoder.dimensions();
            (Dimensions { width, height }, decoder.color_type())
        };

        Ok(ImageInfo {
            format: format_name(format),
            color_mode: color_mode_name(color),
            dimensions,
            exif: super::exif_tags::read_exif_tags(path),
        })
    }

    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        open_reader(path)?
            .decode()
            .map_err(|e| decode_error(path, e))
    }

    fn save(&self, image: &DynamicImage, path: &Path) -> Result<(), BackendError> {
        let format = ImageFormat::from_path(path).map_err(|e| {
            BackendError::Encode(format!("Unsupported output format {}: {}", path.display(), e))
        })?;
        encodable(image, format)
            .save_with_format(path, format)
            .map_err(|e| BackendError::Encode(format!("Failed to write {}: {}", path.display(), e)))
    }
}
