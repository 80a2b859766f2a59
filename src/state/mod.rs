//! Annotation state for the image currently being edited.
//!
//! - `types` - points, boxes, and the per-image annotation set
//! - `labels` - reading and writing YOLO label files

mod types;
mod labels;

pub use types::*;
pub use labels::*;
