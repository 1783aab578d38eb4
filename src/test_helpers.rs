//! Shared test utilities for the imgmeta test suite.
//!
//! Fixture images are synthesized on the fly instead of checked in, so each
//! test controls exact dimensions, pixel layout, and EXIF content.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let path = tmp.path().join("photo.png");
//! create_test_png(&path, 200, 150);
//! ```

use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

// =========================================================================
// Image fixtures
// =========================================================================

fn gradient_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Write a small valid RGB PNG, whatever the path's extension says.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    gradient_rgb(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Write a small valid RGBA PNG.
pub fn create_test_rgba_png(path: &Path, width: u32, height: u32) {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 64, 200])
    })
    .save_with_format(path, image::ImageFormat::Png)
    .unwrap();
}

fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = gradient_rgb(width, height);
    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut bytes)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    bytes
}

/// Write a small valid JPEG without EXIF.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, encode_jpeg(width, height)).unwrap();
}

/// Write a JPEG carrying an APP1 EXIF segment with a single `Make` tag.
pub fn create_test_jpeg_with_exif(path: &Path, width: u32, height: u32, make: &str) {
    let jpeg = encode_jpeg(width, height);
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "encoder must start with SOI");

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend(make_only_tiff(make));

    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend(payload);
    out.extend_from_slice(&jpeg[2..]);
    std::fs::write(path, out).unwrap();
}

/// Little-endian TIFF structure: header, IFD0 with one ASCII `Make` entry.
fn make_only_tiff(make: &str) -> Vec<u8> {
    const IFD0_OFFSET: u32 = 8;
    // header (8) + entry count (2) + one entry (12) + next-IFD offset (4)
    const DATA_OFFSET: u32 = 26;

    let mut value = make.as_bytes().to_vec();
    value.push(0);
    let count = value.len() as u32;

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&IFD0_OFFSET.to_le_bytes());
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x010Fu16.to_le_bytes()); // Make
    tiff.extend_from_slice(&2u16.to_le_bytes()); // ASCII
    tiff.extend_from_slice(&count.to_le_bytes());
    if count <= 4 {
        let mut inline = value.clone();
        inline.resize(4, 0);
        tiff.extend(inline);
        tiff.extend_from_slice(&0u32.to_le_bytes());
    } else {
        tiff.extend_from_slice(&DATA_OFFSET.to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());
        tiff.extend(value);
    }
    tiff
}

/// Write a file with an image extension but no decodable content.
pub fn write_corrupt_file(path: &Path) {
    std::fs::write(path, b"this is not an image, just some text").unwrap();
}
