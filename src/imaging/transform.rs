//! Pixel transforms for the bulk transform operation.
//!
//! [`ImageTransform`] is the single capability the bulk operation needs: map
//! one decoded image to another. Any `Fn(DynamicImage) -> DynamicImage`
//! closure is a transform, and [`BuiltinTransform`] names the common ones so
//! the CLI can select them by name.

use image::DynamicImage;
use std::fmt;
use std::str::FromStr;

/// Map one decoded image to another.
pub trait ImageTransform {
    fn apply(&self, image: DynamicImage) -> DynamicImage;
}

impl<F> ImageTransform for F
where
    F: Fn(DynamicImage) -> DynamicImage,
{
    fn apply(&self, image: DynamicImage) -> DynamicImage {
        self(image)
    }
}

/// Gaussian blur strength used by [`BuiltinTransform::Blur`].
const BLUR_SIGMA: f32 = 2.0;

/// Named transforms selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTransform {
    Grayscale,
    Invert,
    Rotate90,
    Rotate180,
    FlipHorizontal,
    FlipVertical,
    Blur,
}

impl BuiltinTransform {
    pub const ALL: [BuiltinTransform; 7] = [
        Self::Grayscale,
        Self::Invert,
        Self::Rotate90,
        Self::Rotate180,
        Self::FlipHorizontal,
        Self::FlipVertical,
        Self::Blur,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::Invert => "invert",
            Self::Rotate90 => "rotate90",
            Self::Rotate180 => "rotate180",
            Self::FlipHorizontal => "flip-horizontal",
            Self::FlipVertical => "flip-vertical",
            Self::Blur => "blur",
        }
    }
}

impl ImageTransform for BuiltinTransform {
    fn apply(&self, image: DynamicImage) -> DynamicImage {
        match self {
            Self::Grayscale => image.grayscale(),
            Self::Invert => {
                let mut image = image;
                image.invert();
                image
            }
            Self::Rotate90 => image.rotate90(),
            Self::Rotate180 => image.rotate180(),
            Self::FlipHorizontal => image.fliph(),
            Self::FlipVertical => image.flipv(),
            Self::Blur => image.blur(BLUR_SIGMA),
        }
    }
}

impl fmt::Display for BuiltinTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinTransform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|t| t.name()).collect();
                format!("unknown transform '{s}' (expected one of: {})", names.join(", "))
            })
    }
}
