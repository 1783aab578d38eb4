//! # imgmeta
//!
//! Extracts metadata from image files: pixel dimensions, format, color mode,
//! EXIF tags, filesystem attributes, and a description plus identifier parsed
//! out of the filename.
//!
//! # Data Flow
//!
//! Data moves one way through the crate:
//!
//! ```text
//! scan        directory  →  image paths           (non-recursive, extension allow-list)
//! metadata    path       →  ImageMetadata         (stat + backend open + filename parse)
//! process     paths      →  Vec<ImageMetadata>    (ordered, per-file failures embedded)
//! gallery     directory  →  Gallery / JSON export (composition of the above)
//! output      records    →  JSON or colorized text
//! ```
//!
//! A bad file never aborts a batch. Its record carries an `error` field and
//! no image-derived fields; every other record is unaffected.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists files in a directory and filters them by extension |
//! | [`naming`] | `description_<uuid>.ext` filename parser |
//! | [`imaging`] | Decode boundary: [`imaging::ImageBackend`] trait, pure-Rust backend, EXIF tags, transforms |
//! | [`metadata`] | [`metadata::ImageMetadata`] record and the per-file extractor |
//! | [`process`] | Ordered batch application and bulk transform-and-save |
//! | [`export`] | JSON snapshots on disk |
//! | [`gallery`] | [`gallery::ImageProcessor`], the high-level API the binaries use |
//! | [`output`] | JSON and colorized text rendering |
//! | [`config`] | Optional `imgmeta.toml` loading, merging and validation |
//! | [`items`] | In-memory item CRUD behind an injected store |
//!
//! # Binaries
//!
//! - `imgmeta`: subcommands `file`, `directory`, `gallery`, `base64`,
//!   `transform`, `gen-config`. JSON on stdout, logs on stderr.
//! - `imgmeta-show`: walks a file or directory and prints each record as
//!   colorized text, optionally pausing between records.

pub mod config;
pub mod export;
pub mod gallery;
pub mod imaging;
pub mod items;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;

/// Install the stderr log subscriber shared by both binaries.
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
