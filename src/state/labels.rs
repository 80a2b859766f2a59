//! YOLO label file loading and saving.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::classes::ClassTable;
use crate::codec::{self, CodecError};
use crate::error::{Error, Result};
use crate::state::types::{AnnotationSet, DEFAULT_MIN_SIZE};

/// Load the label file for one image.
///
/// A missing file is an empty set. Any bad line fails the whole load, so a
/// later save can never silently drop records that were on disk. Class ids
/// outside `classes` are kept as they are.
pub fn load(
    path: &Path,
    classes: &ClassTable,
    image_width: f64,
    image_height: f64,
) -> Result<AnnotationSet> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AnnotationSet::default()),
        Err(e) => return Err(Error::io(path, e)),
    };

    let mut boxes = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let malformed = |message: String| Error::MalformedRecord {
            path: path.to_path_buf(),
            line: idx + 1,
            message,
        };

        let record = codec::parse_record(line).map_err(|e| malformed(e.to_string()))?;
        if !classes.contains(record.class_id) {
            log::warn!(
                "{}:{}: class id {} is not in the class table ({} classes)",
                path.display(),
                idx + 1,
                record.class_id,
                classes.len()
            );
        }

        let bbox = codec::decode(&record, image_width, image_height).map_err(|e| match e {
            CodecError::InvalidGeometry(message) => Error::InvalidGeometry(message),
            CodecError::MalformedRecord(message) => malformed(message),
        })?;
        if bbox.width() <= 0.0 || bbox.height() <= 0.0 {
            return Err(malformed("box has zero area".to_string()));
        }
        boxes.push(bbox);
    }

    Ok(AnnotationSet::from_boxes(boxes, DEFAULT_MIN_SIZE))
}

/// Write every box of `set`, in order, one LF-terminated record per line.
///
/// The file is always written. An empty set produces a zero-byte file.
pub fn save(set: &AnnotationSet, path: &Path, image_width: f64, image_height: f64) -> Result<()> {
    let mut out = String::new();
    for bbox in set {
        let record = codec::encode(bbox, image_width, image_height).map_err(|e| match e {
            CodecError::InvalidGeometry(message) | CodecError::MalformedRecord(message) => {
                Error::InvalidGeometry(message)
            }
        })?;
        out.push_str(&codec::format_record(&record));
        out.push('\n');
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, out).map_err(|e| Error::io(path, e))
}

/// Number of records in a label file without decoding them. Missing files count as zero.
pub fn count_records(path: &Path) -> Result<usize> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text.lines().filter(|l| !l.trim().is_empty()).count()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
        Err(e) => Err(Error::io(path, e)),
    }
}
