//! Walks a dataset folder image by image.
//!
//! The session owns the only live [`AnnotationSet`]. Moving to another image
//! first saves the current set to `<dataset>/annotation/<stem>.txt`, then
//! decodes the target image and parses its labels. If the image cannot be
//! decoded the session stays where it was. If only its labels fail to parse,
//! the session still moves there but the image is read-only: nothing is
//! saved over its label file and editing is disabled.

use std::fs;
use std::path::{Path, PathBuf};

use crate::classes::ClassTable;
use crate::controller::{Editor, ImageBounds};
use crate::error::{Error, Result};
use crate::state::{self, AnnotationSet, DEFAULT_MIN_SIZE};

/// Folder, relative to the dataset, that receives label files.
pub const LABEL_DIR_NAME: &str = "annotation";

pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "tif", "tiff"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    pub min_size: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
        }
    }
}

/// Decoded pixels of the image on screen.
pub struct ImageFrame {
    pub path: PathBuf,
    pub pixels: image::RgbaImage,
}

impl ImageFrame {
    pub fn load(path: &Path) -> Result<Self> {
        let pixels = image::open(path)
            .map_err(|source| Error::Image {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();
        Ok(Self {
            path: path.to_path_buf(),
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn bounds(&self) -> ImageBounds {
        ImageBounds {
            width: self.width() as f64,
            height: self.height() as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Target outside the image list; nothing happened.
    Stayed,
    Moved { from: usize, to: usize },
}

/// Image files directly inside `dir`, sorted by file name.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut images: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    images.sort();
    Ok(images)
}

/// `<label_dir>/<image stem>.txt`
pub fn label_path_for(label_dir: &Path, image_path: &Path) -> PathBuf {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    label_dir.join(format!("{stem}.txt"))
}

pub struct Session {
    dataset_dir: PathBuf,
    label_dir: PathBuf,
    images: Vec<PathBuf>,
    index: usize,
    frame: ImageFrame,
    annotations: AnnotationSet,
    classes: ClassTable,
    min_size: f64,
    /// Why the current image's labels could not be loaded, if they could not.
    label_error: Option<Error>,
}

impl Session {
    /// Open a dataset folder and load its first image.
    pub fn open(dataset_dir: impl Into<PathBuf>, options: SessionOptions) -> Result<Self> {
        let dataset_dir = dataset_dir.into();
        let classes = ClassTable::load(&dataset_dir)?;
        let images = list_images(&dataset_dir)?;
        if images.is_empty() {
            return Err(Error::NoImages(dataset_dir));
        }

        let label_dir = dataset_dir.join(LABEL_DIR_NAME);
        let frame = ImageFrame::load(&images[0])?;
        let (annotations, label_error) =
            load_labels(&frame, &label_dir, &classes, options.min_size);
        log::info!(
            "Opened {} with {} images and {} classes",
            dataset_dir.display(),
            images.len(),
            classes.len()
        );

        Ok(Self {
            dataset_dir,
            label_dir,
            images,
            index: 0,
            frame,
            annotations,
            classes,
            min_size: options.min_size,
            label_error,
        })
    }

    /// Move to image `target`. Out-of-range targets are a no-op.
    pub fn goto(&mut self, target: usize) -> Result<Transition> {
        if target >= self.images.len() {
            return Ok(Transition::Stayed);
        }

        if self.label_error.is_none() {
            self.save_current()?;
        } else {
            log::warn!(
                "Leaving {} without saving; its labels were not loaded",
                self.current_image_name()
            );
        }
        let frame = ImageFrame::load(&self.images[target])?;
        let (annotations, label_error) =
            load_labels(&frame, &self.label_dir, &self.classes, self.min_size);

        let from = self.index;
        self.index = target;
        self.frame = frame;
        self.annotations = annotations;
        self.label_error = label_error;
        log::info!(
            "Image {}/{}: {}",
            target + 1,
            self.images.len(),
            self.current_image_name()
        );
        Ok(Transition::Moved { from, to: target })
    }

    pub fn next(&mut self) -> Result<Transition> {
        self.goto(self.index + 1)
    }

    pub fn prev(&mut self) -> Result<Transition> {
        match self.index.checked_sub(1) {
            Some(target) => self.goto(target),
            None => Ok(Transition::Stayed),
        }
    }

    /// Write the current image's labels, returning the file written.
    ///
    /// Fails with [`Error::ReadOnly`] when the labels on disk were not loaded.
    pub fn save_current(&self) -> Result<PathBuf> {
        let path = self.current_label_path();
        if self.label_error.is_some() {
            return Err(Error::ReadOnly(path));
        }
        let bounds = self.frame.bounds();
        state::save(&self.annotations, &path, bounds.width, bounds.height)?;
        log::debug!("Saved {} boxes to {}", self.annotations.len(), path.display());
        Ok(path)
    }

    /// Save before the session ends. Returns the file written, or `None` when
    /// the current image is read-only.
    pub fn terminate(&mut self) -> Result<Option<PathBuf>> {
        let path = if self.label_error.is_some() {
            log::warn!(
                "Not saving {} on exit; its labels were not loaded",
                self.current_image_name()
            );
            None
        } else {
            Some(self.save_current()?)
        };
        log::info!("Session closed at image {}/{}", self.index + 1, self.images.len());
        Ok(path)
    }

    /// Borrow the current image's state for one controller event.
    pub fn editor(&mut self) -> Editor<'_> {
        Editor {
            bounds: self.frame.bounds(),
            annotations: &mut self.annotations,
            classes: &self.classes,
            read_only: self.label_error.is_some(),
        }
    }

    /// The label load failure for the current image, if any.
    pub fn label_error(&self) -> Option<&Error> {
        self.label_error.as_ref()
    }

    pub fn is_read_only(&self) -> bool {
        self.label_error.is_some()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn dataset_dir(&self) -> &Path {
        &self.dataset_dir
    }

    pub fn label_dir(&self) -> &Path {
        &self.label_dir
    }

    pub fn label_path(&self, index: usize) -> Option<PathBuf> {
        self.images
            .get(index)
            .map(|image| label_path_for(&self.label_dir, image))
    }

    pub fn current_label_path(&self) -> PathBuf {
        label_path_for(&self.label_dir, &self.images[self.index])
    }

    pub fn current_image_name(&self) -> String {
        self.images[self.index]
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn frame(&self) -> &ImageFrame {
        &self.frame
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn classes(&self) -> &ClassTable {
        &self.classes
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    /// Change the minimum box size for this and every later image.
    pub fn set_min_size(&mut self, min_size: f64) {
        self.min_size = min_size;
        self.annotations.set_min_size(min_size);
    }

    /// Position through the image list as a whole percentage.
    pub fn progress_percent(&self) -> u32 {
        ((self.index + 1) * 100 / self.images.len()) as u32
    }

    /// Boxes in the current set plus the records on disk for every other image.
    pub fn total_annotations(&self) -> usize {
        let on_disk: usize = self
            .images
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != self.index)
            .map(|(_, image)| {
                let path = label_path_for(&self.label_dir, image);
                state::count_records(&path).unwrap_or_else(|e| {
                    log::warn!("Skipping {} in totals: {e}", path.display());
                    0
                })
            })
            .sum();
        on_disk + self.annotations.len()
    }
}

/// Labels for a decoded frame. A failed load yields an empty set and the error.
fn load_labels(
    frame: &ImageFrame,
    label_dir: &Path,
    classes: &ClassTable,
    min_size: f64,
) -> (AnnotationSet, Option<Error>) {
    let bounds = frame.bounds();
    let label_path = label_path_for(label_dir, &frame.path);
    match state::load(&label_path, classes, bounds.width, bounds.height) {
        Ok(set) => (set.with_min_size(min_size), None),
        Err(e) => {
            log::error!("Labels for {} not loaded: {e}", frame.path.display());
            (AnnotationSet::new(min_size), Some(e))
        }
    }
}
