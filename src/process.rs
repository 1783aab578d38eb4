//! Batch processing over lists of files.
//!
//! Two operations live here:
//!
//! - [`process_files`]: apply any per-file function to every path and collect
//!   the results in input order. Per-file failures are the function's business
//!   (extraction embeds them in the record), so nothing here short-circuits.
//! - [`transform_images`]: decode each image, apply an [`ImageTransform`], and
//!   save the result next to the original name with a suffix.
//!
//! ## Transform output naming
//!
//! ```text
//! photos/beach.jpg  --(suffix "_transformed")-->  out/beach_transformed.jpg
//! photos/README     --(suffix "_x")-->            out/README_x
//! ```
//!
//! The output directory is created when missing. A file that fails to decode
//! or encode is skipped; the skip is logged at `warn` and reported back in
//! [`TransformReport::skipped`] so callers can tell partial success from full
//! success.

use crate::imaging::{BackendError, ImageBackend, ImageTransform};
use std::path::{Path, PathBuf};

/// Apply `f` to each path, preserving order.
pub fn process_files<T, F>(paths: &[PathBuf], mut f: F) -> Vec<T>
where
    F: FnMut(&Path) -> T,
{
    paths.iter().map(|path| f(path)).collect()
}

/// Outcome of a bulk transform.
#[derive(Debug, Default)]
pub struct TransformReport {
    /// Output files written, in input order.
    pub written: Vec<PathBuf>,
    /// Input files that could not be transformed, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

impl TransformReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Output filename for `source`: stem + `suffix` + original extension.
pub fn transformed_file_name(source: &Path, suffix: &str) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match source.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    }
}

fn transform_one<B, T>(
    backend: &B,
    source: &Path,
    transform: &T,
    output_dir: &Path,
    suffix: &str,
) -> Result<PathBuf, BackendError>
where
    B: ImageBackend + ?Sized,
    T: ImageTransform + ?Sized,
{
    let image = backend.load(source)?;
    let transformed = transform.apply(image);
    let output = output_dir.join(transformed_file_name(source, suffix));
    backend.save(&transformed, &output)?;
    Ok(output)
}

/// Transform every file in `files`, writing results into `output_dir`.
///
/// Fails only if `output_dir` cannot be created; per-file failures are
/// collected in the report.
pub fn transform_images<B, T>(
    backend: &B,
    files: &[PathBuf],
    transform: &T,
    output_dir: &Path,
    suffix: &str,
) -> std::io::Result<TransformReport>
where
    B: ImageBackend + ?Sized,
    T: ImageTransform + ?Sized,
{
    std::fs::create_dir_all(output_dir)?;

    let mut report = TransformReport::default();
    for source in files {
        match transform_one(backend, source, transform, output_dir, suffix) {
            Ok(output) => {
                tracing::debug!(source = %source.display(), output = %output.display(), "transformed");
                report.written.push(output);
            }
            Err(e) => {
                tracing::warn!(source = %source.display(), error = %e, "skipping image");
                report.skipped.push((source.clone(), e.to_string()));
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp, sample_info};
    use crate::imaging::{BuiltinTransform, RustBackend};
    use crate::metadata::extract_full_metadata;
    use crate::test_helpers::{create_test_jpeg, create_test_png, write_corrupt_file};
    use image::{DynamicImage, GenericImageView};
    use tempfile::TempDir;

    #[test]
    fn process_files_preserves_order() {
        let paths: Vec<PathBuf> = ["c.png", "a.png", "b.png"].iter().map(PathBuf::from).collect();
        let names = process_files(&paths, |p| p.to_string_lossy().into_owned());
        assert_eq!(names, vec!["c.png", "a.png", "b.png"]);
    }

    #[test]
    fn process_files_empty_input() {
        let out: Vec<u8> = process_files(&[], |_| 0);
        assert!(out.is_empty());
    }

    #[test]
    fn batch_with_one_corrupt_file_keeps_every_record() {
        let tmp = TempDir::new().unwrap();
        let mut paths = Vec::new();
        for (i, name) in ["one.png", "two.png", "three.png", "four.png"].iter().enumerate() {
            let path = tmp.path().join(name);
            if i == 2 {
                write_corrupt_file(&path);
            } else {
                create_test_png(&path, 8 + i as u32, 8);
            }
            paths.push(path);
        }

        let backend = RustBackend::new();
        let records = process_files(&paths, |p| extract_full_metadata(&backend, p));

        assert_eq!(records.len(), 4);
        let names: Vec<&str> = records.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["one.png", "two.png", "three.png", "four.png"]);
        assert_eq!(records.iter().filter(|r| r.error.is_some()).count(), 1);
        assert!(records[2].error.is_some());
        for (i, record) in records.iter().enumerate().filter(|(i, _)| *i != 2) {
            assert!(record.is_success());
            assert_eq!(record.dimensions.unwrap().width, 8 + i as u32);
        }
    }

    #[test]
    fn transformed_file_names() {
        assert_eq!(
            transformed_file_name(Path::new("/a/beach.jpg"), "_transformed"),
            "beach_transformed.jpg"
        );
        assert_eq!(
            transformed_file_name(Path::new("archive.tar.gz"), "_x"),
            "archive.tar_x.gz"
        );
        assert_eq!(transformed_file_name(Path::new("README"), "_x"), "README_x");
    }

    #[test]
    fn transform_with_mock_records_load_and_save() {
        let backend = MockBackend::new()
            .with_image("/in/a.png", sample_info(1, 1))
            .with_image("/in/b.jpg", sample_info(1, 1));
        let files = vec![PathBuf::from("/in/a.png"), PathBuf::from("/in/b.jpg")];
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");

        let report =
            transform_images(&backend, &files, &BuiltinTransform::Grayscale, &out, "_g").unwrap();

        assert!(report.is_complete());
        assert_eq!(report.written, vec![out.join("a_g.png"), out.join("b_g.jpg")]);
        assert!(out.is_dir());
        assert_eq!(
            backend.get_operations(),
            vec![
                RecordedOp::Load("/in/a.png".to_string()),
                RecordedOp::Save(out.join("a_g.png").to_string_lossy().to_string()),
                RecordedOp::Load("/in/b.jpg".to_string()),
                RecordedOp::Save(out.join("b_g.jpg").to_string_lossy().to_string()),
            ]
        );
    }

    #[test]
    fn transform_skips_and_reports_failures() {
        let backend = MockBackend::new().with_image("/in/good.png", sample_info(1, 1));
        let files = vec![PathBuf::from("/in/bad.png"), PathBuf::from("/in/good.png")];
        let tmp = TempDir::new().unwrap();

        let report =
            transform_images(&backend, &files, &BuiltinTransform::Invert, tmp.path(), "_t").unwrap();

        assert_eq!(report.written, vec![tmp.path().join("good_t.png")]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, PathBuf::from("/in/bad.png"));
        assert!(report.skipped[0].1.contains("cannot identify image file"));
        assert!(!report.is_complete());
    }

    #[test]
    fn transform_real_files_with_closure() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("wide.png");
        let jpg = tmp.path().join("photo.jpg");
        create_test_png(&src, 20, 10);
        create_test_jpeg(&jpg, 30, 12);

        let rotate = |img: DynamicImage| img.rotate90();
        let files = vec![src, jpg];
        let report =
            transform_images(&RustBackend::new(), &files, &rotate, tmp.path(), "_rot").unwrap();

        assert!(report.is_complete());
        let rotated = image::open(tmp.path().join("wide_rot.png")).unwrap();
        assert_eq!(rotated.dimensions(), (10, 20));
        let rotated = image::open(tmp.path().join("photo_rot.jpg")).unwrap();
        assert_eq!(rotated.dimensions(), (12, 30));
    }
}
