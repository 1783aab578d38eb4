//! EXIF tag extraction via `kamadak-exif`.
//!
//! Reads the EXIF container out of JPEG, PNG (`eXIf`) and WebP files and
//! flattens the primary image's tags into `name → value` strings. Thumbnail
//! IFD tags and tags without a registered name are dropped. Formats that
//! cannot carry EXIF, and files that simply have none, yield an empty map.
//!
//! TIFF files also yield an empty map: a TIFF's primary IFD is the image's
//! own structure (`ImageWidth`, `Compression`, strip offsets), not an
//! embedded EXIF block.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Byte-order marks that open a bare TIFF file.
const TIFF_MAGIC: [&[u8]; 2] = [b"II*\0", b"MM\0*"];

fn is_tiff(reader: &mut impl BufRead) -> bool {
    reader
        .fill_buf()
        .is_ok_and(|head| TIFF_MAGIC.iter().any(|magic| head.starts_with(magic)))
}

/// Read the named EXIF tags of the primary image.
pub fn read_exif_tags(path: &Path) -> BTreeMap<String, String> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return BTreeMap::new(),
    };
    let mut reader = BufReader::new(file);
    if is_tiff(&mut reader) {
        return BTreeMap::new();
    }
    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(e) => e,
        Err(error) => {
            tracing::trace!(path = %path.display(), %error, "no EXIF data");
            return BTreeMap::new();
        }
    };

    exif.fields()
        .filter(|field| field.ifd_num == exif::In::PRIMARY)
        .filter(|field| field.tag.description().is_some())
        .map(|field| (field.tag.to_string(), field_value(field, &exif)))
        .collect()
}

/// ASCII tags are reported as their raw text; everything else uses the
/// library's human-readable rendering, units included.
fn field_value(field: &exif::Field, exif: &exif::Exif) -> String {
    match &field.value {
        exif::Value::Ascii(parts) => parts
            .iter()
            .map(|part| {
                String::from_utf8_lossy(part)
                    .trim_end_matches('\0')
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => field.display_value().with_unit(exif).to_string(),
    }
}
