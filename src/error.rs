//! Error taxonomy shared by the store, the session, and the settings layer.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Bad image dimensions or a box outside the image.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A label line that could not be turned into a box. Aborts the whole load.
    #[error("{}:{line}: malformed record: {message}", .path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A drawn box smaller than the configured threshold.
    #[error("box {width:.1}x{height:.1} is below the minimum size of {min_size}")]
    BelowMinimumSize {
        width: f64,
        height: f64,
        min_size: f64,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Save refused because the labels on disk for this image could not be read.
    #[error("{} was not loaded cleanly; not overwriting it", .0.display())]
    ReadOnly(PathBuf),

    #[error("no images found in {}", .0.display())]
    NoImages(PathBuf),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
