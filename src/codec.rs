//! Conversion between pixel-space boxes and normalized YOLO records.
//!
//! A record is `class_id x_center y_center width height`, the last four as
//! fractions of the image size.

use thiserror::Error;

use crate::state::BoundingBox;

/// One label record in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedBox {
    pub class_id: usize,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("{0}")]
    MalformedRecord(String),
}

fn check_dimensions(image_width: f64, image_height: f64) -> Result<(), CodecError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(image_width) && valid(image_height) {
        Ok(())
    } else {
        Err(CodecError::InvalidGeometry(format!(
            "image dimensions {image_width}x{image_height} must be positive"
        )))
    }
}

/// Normalize a pixel box against the image size.
pub fn encode(
    bbox: &BoundingBox,
    image_width: f64,
    image_height: f64,
) -> Result<NormalizedBox, CodecError> {
    check_dimensions(image_width, image_height)?;

    if bbox.x_min < 0.0
        || bbox.y_min < 0.0
        || bbox.x_max > image_width
        || bbox.y_max > image_height
        || bbox.x_min > bbox.x_max
        || bbox.y_min > bbox.y_max
    {
        return Err(CodecError::InvalidGeometry(format!(
            "box ({:.1}, {:.1})-({:.1}, {:.1}) lies outside the {image_width}x{image_height} image",
            bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max
        )));
    }

    Ok(NormalizedBox {
        class_id: bbox.class_id,
        x_center: (bbox.x_min + bbox.x_max) / (2.0 * image_width),
        y_center: (bbox.y_min + bbox.y_max) / (2.0 * image_height),
        width: (bbox.x_max - bbox.x_min) / image_width,
        height: (bbox.y_max - bbox.y_min) / image_height,
    })
}

/// Inverse of [`encode`]. The result is clamped into the image.
pub fn decode(
    record: &NormalizedBox,
    image_width: f64,
    image_height: f64,
) -> Result<BoundingBox, CodecError> {
    check_dimensions(image_width, image_height)?;

    let fields = [
        ("x_center", record.x_center),
        ("y_center", record.y_center),
        ("width", record.width),
        ("height", record.height),
    ];
    for (name, value) in fields {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(CodecError::MalformedRecord(format!(
                "{name} {value} is outside [0, 1]"
            )));
        }
    }

    let cx = record.x_center * image_width;
    let cy = record.y_center * image_height;
    let half_w = record.width * image_width / 2.0;
    let half_h = record.height * image_height / 2.0;

    Ok(BoundingBox {
        class_id: record.class_id,
        x_min: (cx - half_w).clamp(0.0, image_width),
        y_min: (cy - half_h).clamp(0.0, image_height),
        x_max: (cx + half_w).clamp(0.0, image_width),
        y_max: (cy + half_h).clamp(0.0, image_height),
    })
}

/// Parse one whitespace-separated label line.
pub fn parse_record(line: &str) -> Result<NormalizedBox, CodecError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(CodecError::MalformedRecord(format!(
            "expected 5 fields, found {}",
            fields.len()
        )));
    }

    let class_id = fields[0].parse::<usize>().map_err(|_| {
        CodecError::MalformedRecord(format!(
            "class id '{}' is not a non-negative integer",
            fields[0]
        ))
    })?;

    let number = |index: usize| -> Result<f64, CodecError> {
        fields[index].parse::<f64>().map_err(|_| {
            CodecError::MalformedRecord(format!("'{}' is not a number", fields[index]))
        })
    };

    Ok(NormalizedBox {
        class_id,
        x_center: number(1)?,
        y_center: number(2)?,
        width: number(3)?,
        height: number(4)?,
    })
}

/// Format a record the way label files store it, without the line terminator.
pub fn format_record(record: &NormalizedBox) -> String {
    format!(
        "{} {:.6} {:.6} {:.6} {:.6}",
        record.class_id, record.x_center, record.y_center, record.width, record.height
    )
}
