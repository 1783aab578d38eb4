//! Centralized filename parsing for the `description_uuid.ext` convention.
//!
//! Generated images are commonly named with a free-text description followed
//! by an identifier, joined with underscores:
//!
//! ```text
//! sunset_over_lake_3fa85f64-5717-4562-b3fc-2c963f66afa6.png
//! └──────┬───────┘ └────────────────┬─────────────────┘ └┬┘
//!   description              uuid                     extension
//! ```
//!
//! ## Identifier detection
//!
//! The last underscore-delimited segment of the stem is treated as an
//! identifier only when it is exactly 36 characters long and contains exactly
//! four hyphens. There is no fuzzy matching: a 36-character segment with a
//! different hyphen count is ordinary description text, and a name without
//! any underscore is all description.

/// Length of a canonical hyphenated UUID (`8-4-4-4-12`).
const UUID_LEN: usize = 36;
const UUID_HYPHENS: usize = 4;

/// Result of parsing a filename like `sunset_over_lake_<uuid>.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameComponents {
    /// Stem with the identifier segment removed, or the whole stem if there
    /// was no identifier.
    pub description: String,
    /// Trailing identifier segment, if the stem ends in one.
    pub uuid: Option<String>,
    /// Lowercased text after the last dot. `None` for names without a dot.
    pub extension: Option<String>,
}

/// Parse a filename (not a path) into description, identifier and extension.
///
/// - `"sunset_over_lake_3fa85f64-5717-4562-b3fc-2c963f66afa6.png"` → description="sunset_over_lake", uuid=Some(..), extension=Some("png")
/// - `"vacation_photo.jpg"` → description="vacation_photo", uuid=None
/// - `"IMG.JPEG"` → description="IMG", extension=Some("jpeg")
/// - `"README"` → description="README", extension=None
pub fn parse_filename(filename: &str) -> FilenameComponents {
    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext.to_lowercase())),
        None => (filename, None),
    };

    if let Some((description, last)) = stem.rsplit_once('_') {
        if is_uuid_shaped(last) {
            return FilenameComponents {
                description: description.to_string(),
                uuid: Some(last.to_string()),
                extension,
            };
        }
    }

    FilenameComponents {
        description: stem.to_string(),
        uuid: None,
        extension,
    }
}

fn is_uuid_shaped(segment: &str) -> bool {
    segment.chars().count() == UUID_LEN
        && segment.chars().filter(|&c| c == '-').count() == UUID_HYPHENS
}
