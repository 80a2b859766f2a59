//! Bounding-box annotation over a folder of images, saved as YOLO labels.
//!
//! The GUI lives in the binary; everything here runs headless.

pub mod classes;
pub mod codec;
pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod state;

pub use classes::ClassTable;
pub use controller::{Editor, Event, InteractionController, KeyCommand, PointerButton, Response};
pub use error::{Error, Result};
pub use session::{Session, SessionOptions, Transition};
pub use state::{AnnotationSet, BoundingBox, Point};
