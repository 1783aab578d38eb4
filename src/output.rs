//! Human-readable and JSON output for the binaries.
//!
//! # Record display
//!
//! ```text
//! ================================================================================
//! sunset_over_lake_3fa85f64-5717-4562-b3fc-2c963f66afa6.png
//! ================================================================================
//! Description: sunset_over_lake
//! Image Information:
//!   Dimensions: 1920 x 1080 pixels
//!   Format: JPEG
//!   Color Mode: RGB
//!   Size: 1.43 MB (1,499,136 bytes)
//!
//! File Information:
//!   Path: /photos/sunset_over_lake_3fa85f64-5717-4562-b3fc-2c963f66afa6.png
//!   Created: 2024-05-01T09:30:12.123456
//!   Modified: 2024-05-01T09:30:12.123456
//!
//! UUID: 3fa85f64-5717-4562-b3fc-2c963f66afa6
//!
//! EXIF Data:
//!   Make: Canon
//!
//! ================================================================================
//! ```
//!
//! Colors come from `console::style`, which drops the escape codes by itself
//! when stdout is not a terminal or `NO_COLOR` is set.
//!
//! # Architecture
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::metadata::ImageMetadata;
use crate::process::TransformReport;
use console::style;
use serde::Serialize;
use std::path::Path;

const RULE_WIDTH: usize = 80;

// ============================================================================
// Number formatting
// ============================================================================

/// Insert `,` between groups of three digits: `1499136` -> `1,499,136`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Size in KB, or MB above 1024 KB, followed by the exact byte count.
pub fn format_size(bytes: u64) -> String {
    let kb = bytes as f64 / 1024.0;
    if kb > 1024.0 {
        format!("{:.2} MB ({} bytes)", kb / 1024.0, group_thousands(bytes))
    } else {
        format!("{:.2} KB ({} bytes)", kb, group_thousands(bytes))
    }
}

// ============================================================================
// Record display
// ============================================================================

fn rule() -> String {
    style("=".repeat(RULE_WIDTH)).blue().to_string()
}

fn section(title: &str) -> String {
    style(title).yellow().bold().to_string()
}

/// Colorized multi-line rendering of one record.
pub fn format_metadata_for_display(meta: &ImageMetadata) -> Vec<String> {
    let mut lines = Vec::new();

    let filename = if meta.filename.is_empty() {
        "Unknown file"
    } else {
        meta.filename.as_str()
    };
    lines.push(rule());
    lines.push(style(filename).magenta().bold().to_string());
    lines.push(rule());

    if let Some(description) = &meta.description {
        lines.push(style(format!("Description: {description}")).green().to_string());
    }

    lines.push(section("Image Information:"));
    if let Some(dims) = meta.dimensions {
        lines.push(format!("  Dimensions: {} x {} pixels", dims.width, dims.height));
    }
    if let Some(format) = &meta.format {
        lines.push(format!("  Format: {format}"));
    }
    if let Some(mode) = &meta.color_mode {
        lines.push(format!("  Color Mode: {mode}"));
    }
    if let Some(size) = meta.size_bytes {
        lines.push(format!("  Size: {}", format_size(size)));
    }

    lines.push(String::new());
    lines.push(section("File Information:"));
    lines.push(format!("  Path: {}", meta.path));
    if let Some(created) = &meta.created_time {
        lines.push(format!("  Created: {created}"));
    }
    if let Some(modified) = &meta.modified_time {
        lines.push(format!("  Modified: {modified}"));
    }

    if let Some(uuid) = &meta.uuid {
        lines.push(String::new());
        lines.push(style(format!("UUID: {uuid}")).cyan().to_string());
    }

    if let Some(exif) = meta.exif_data.as_ref().filter(|tags| !tags.is_empty()) {
        lines.push(String::new());
        lines.push(section("EXIF Data:"));
        for (tag, value) in exif {
            lines.push(format!("  {tag}: {value}"));
        }
    }

    if let Some(error) = &meta.error {
        lines.push(String::new());
        lines.push(style(format!("Error: {error}")).red().to_string());
    }

    lines.push(String::new());
    lines.push(rule());
    lines
}

/// Opening lines for a directory walk, or the "nothing found" line.
pub fn format_directory_banner(dir: &Path, count: usize) -> Vec<String> {
    if count == 0 {
        return vec![
            style(format!("No images found in {}", dir.display()))
                .red()
                .to_string(),
        ];
    }
    vec![
        style(format!("Found {count} images in {}", dir.display()))
            .green()
            .to_string(),
        style("Displaying information for each image...").green().to_string(),
        String::new(),
    ]
}

/// `Image 3 of 10`, 1-based.
pub fn format_progress(position: usize, total: usize) -> String {
    style(format!("Image {position} of {total}")).bold().to_string()
}

/// Summary of a bulk transform.
///
/// ```text
/// Transformed 2 of 3 images with grayscale
///     photos/a_transformed.png
///     photos/b_transformed.jpg
/// Skipped 1
///     photos/broken.png: Failed to decode ...
/// ```
pub fn format_transform_report(report: &TransformReport, operation: &str) -> Vec<String> {
    let total = report.written.len() + report.skipped.len();
    let mut lines = vec![format!(
        "Transformed {} of {} images with {}",
        report.written.len(),
        total,
        operation
    )];
    for path in &report.written {
        lines.push(format!("    {}", path.display()));
    }
    if !report.skipped.is_empty() {
        lines.push(format!("Skipped {}", report.skipped.len()));
        for (path, reason) in &report.skipped {
            lines.push(format!("    {}: {}", path.display(), reason));
        }
    }
    lines
}

// ============================================================================
// Print wrappers
// ============================================================================

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

pub fn print_metadata(meta: &ImageMetadata) {
    print_lines(&format_metadata_for_display(meta));
}

pub fn print_directory_banner(dir: &Path, count: usize) {
    print_lines(&format_directory_banner(dir, count));
}

pub fn print_transform_report(report: &TransformReport, operation: &str) {
    print_lines(&format_transform_report(report, operation));
}

/// Write `value` to stdout as JSON with 2-space indentation.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use console::strip_ansi_codes;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn plain(lines: Vec<String>) -> Vec<String> {
        lines
            .iter()
            .map(|l| strip_ansi_codes(l).into_owned())
            .collect()
    }

    fn success_record() -> ImageMetadata {
        let mut exif = BTreeMap::new();
        exif.insert("Make".to_string(), "Canon".to_string());
        ImageMetadata {
            filename: "sunset_3fa85f64-5717-4562-b3fc-2c963f66afa6.jpg".into(),
            path: "/photos/sunset_3fa85f64-5717-4562-b3fc-2c963f66afa6.jpg".into(),
            size_bytes: Some(1_499_136),
            created_time: Some("2024-05-01T09:30:12.123456".into()),
            modified_time: Some("2024-05-02T10:00:00.000000".into()),
            description: Some("sunset".into()),
            uuid: Some("3fa85f64-5717-4562-b3fc-2c963f66afa6".into()),
            extension: Some("jpg".into()),
            dimensions: Some(Dimensions { width: 1920, height: 1080 }),
            format: Some("JPEG".into()),
            color_mode: Some("RGB".into()),
            exif_data: Some(exif),
            error: None,
            image_data: None,
        }
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_499_136), "1,499,136");
        assert_eq!(group_thousands(12_345_678_901), "12,345,678,901");
    }

    #[test]
    fn size_switches_to_mb_above_1024_kb() {
        assert_eq!(format_size(512), "0.50 KB (512 bytes)");
        assert_eq!(format_size(1024 * 1024), "1024.00 KB (1,048,576 bytes)");
        assert_eq!(format_size(1_499_136), "1.43 MB (1,499,136 bytes)");
    }

    #[test]
    fn success_record_display() {
        let lines = plain(format_metadata_for_display(&success_record()));

        assert_eq!(lines[0], "=".repeat(80));
        assert_eq!(lines[1], "sunset_3fa85f64-5717-4562-b3fc-2c963f66afa6.jpg");
        assert!(lines.contains(&"Description: sunset".to_string()));
        assert!(lines.contains(&"  Dimensions: 1920 x 1080 pixels".to_string()));
        assert!(lines.contains(&"  Format: JPEG".to_string()));
        assert!(lines.contains(&"  Color Mode: RGB".to_string()));
        assert!(lines.contains(&"  Size: 1.43 MB (1,499,136 bytes)".to_string()));
        assert!(lines.contains(&"  Created: 2024-05-01T09:30:12.123456".to_string()));
        assert!(lines.contains(&"UUID: 3fa85f64-5717-4562-b3fc-2c963f66afa6".to_string()));
        assert!(lines.contains(&"EXIF Data:".to_string()));
        assert!(lines.contains(&"  Make: Canon".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Error:")));
        assert_eq!(lines.last().unwrap(), &"=".repeat(80));
    }

    #[test]
    fn failure_record_display() {
        let record = ImageMetadata {
            filename: "broken.png".into(),
            path: "/tmp/broken.png".into(),
            error: Some("cannot identify image file".into()),
            ..Default::default()
        };
        let lines = plain(format_metadata_for_display(&record));

        assert!(lines.contains(&"Error: cannot identify image file".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Dimensions")));
        assert!(!lines.iter().any(|l| l.contains("EXIF")));
        assert!(!lines.iter().any(|l| l.contains("UUID")));
    }

    #[test]
    fn empty_exif_is_not_shown() {
        let mut record = success_record();
        record.exif_data = Some(BTreeMap::new());
        let lines = plain(format_metadata_for_display(&record));
        assert!(!lines.contains(&"EXIF Data:".to_string()));
    }

    #[test]
    fn directory_banner() {
        let found = plain(format_directory_banner(Path::new("/pics"), 3));
        assert_eq!(found[0], "Found 3 images in /pics");

        let none = plain(format_directory_banner(Path::new("/pics"), 0));
        assert_eq!(none, vec!["No images found in /pics"]);
    }

    #[test]
    fn progress_line() {
        assert_eq!(strip_ansi_codes(&format_progress(2, 5)), "Image 2 of 5");
    }

    #[test]
    fn transform_report_summary() {
        let report = TransformReport {
            written: vec![PathBuf::from("out/a_t.png")],
            skipped: vec![(PathBuf::from("in/b.png"), "bad data".to_string())],
        };
        let lines = format_transform_report(&report, "invert");
        assert_eq!(
            lines,
            vec![
                "Transformed 1 of 2 images with invert",
                "    out/a_t.png",
                "Skipped 1",
                "    in/b.png: bad data",
            ]
        );
    }

    #[test]
    fn complete_transform_has_no_skipped_section() {
        let report = TransformReport {
            written: vec![PathBuf::from("x_t.gif")],
            skipped: vec![],
        };
        let lines = format_transform_report(&report, "blur");
        assert_eq!(lines.len(), 2);
    }
}
