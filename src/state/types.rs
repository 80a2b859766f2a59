//! Core annotation types.

use crate::error::{Error, Result};

/// Minimum box side length, in pixels, when none is configured.
pub const DEFAULT_MIN_SIZE: f64 = 10.0;

/// A position in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp into `[0, width] x [0, height]`.
    pub fn clamped(self, width: f64, height: f64) -> Self {
        Self {
            x: self.x.clamp(0.0, width.max(0.0)),
            y: self.y.clamp(0.0, height.max(0.0)),
        }
    }

    pub fn is_within(&self, width: f64, height: f64) -> bool {
        (0.0..=width).contains(&self.x) && (0.0..=height).contains(&self.y)
    }
}

/// An axis-aligned labeled rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub class_id: usize,
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn new(class_id: usize, x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            class_id,
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Build a box from two opposite corners given in any order.
    pub fn from_corners(class_id: usize, a: Point, b: Point) -> Self {
        Self {
            class_id,
            x_min: a.x.min(b.x),
            y_min: a.y.min(b.y),
            x_max: a.x.max(b.x),
            y_max: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Inclusive hit-test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x_min && point.x <= self.x_max && point.y >= self.y_min && point.y <= self.y_max
    }

    pub fn meets_min_size(&self, min_size: f64) -> bool {
        self.x_min < self.x_max
            && self.y_min < self.y_max
            && self.width() >= min_size
            && self.height() >= min_size
    }
}

/// The ordered boxes of one image. Order is draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSet {
    boxes: Vec<BoundingBox>,
    min_size: f64,
}

impl Default for AnnotationSet {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SIZE)
    }
}

impl AnnotationSet {
    pub fn new(min_size: f64) -> Self {
        Self {
            boxes: Vec::new(),
            min_size,
        }
    }

    /// Wrap boxes read from disk. They are not re-checked against `min_size`.
    pub fn from_boxes(boxes: Vec<BoundingBox>, min_size: f64) -> Self {
        Self { boxes, min_size }
    }

    pub fn with_min_size(mut self, min_size: f64) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    /// Change the threshold for later draws. Existing boxes are kept.
    pub fn set_min_size(&mut self, min_size: f64) {
        self.min_size = min_size;
    }

    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoundingBox> {
        self.boxes.iter()
    }

    /// Append a box, returning its index. Boxes below `min_size` are rejected
    /// and leave the set unchanged.
    pub fn add(&mut self, bbox: BoundingBox) -> Result<usize> {
        if !bbox.meets_min_size(self.min_size) {
            return Err(Error::BelowMinimumSize {
                width: bbox.width(),
                height: bbox.height(),
                min_size: self.min_size,
            });
        }
        self.boxes.push(bbox);
        Ok(self.boxes.len() - 1)
    }

    /// Index of the most recently added box containing `point`.
    pub fn topmost_at(&self, point: Point) -> Option<usize> {
        self.boxes.iter().rposition(|b| b.contains(point))
    }

    pub fn remove_at(&mut self, point: Point) -> Option<BoundingBox> {
        let index = self.topmost_at(point)?;
        Some(self.boxes.remove(index))
    }

    pub fn reclassify_at(&mut self, point: Point, new_class_id: usize) -> Option<usize> {
        let index = self.topmost_at(point)?;
        self.boxes[index].class_id = new_class_id;
        Some(index)
    }

    /// Remove every box, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.boxes.len();
        self.boxes.clear();
        removed
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a BoundingBox;
    type IntoIter = std::slice::Iter<'a, BoundingBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}
