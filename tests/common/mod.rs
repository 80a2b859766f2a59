// Shared fixtures: scratch datasets with generated images
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Write a solid-color image; the format follows the file extension.
pub fn write_image(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([90, 120, 150]));
    img.save(path).expect("failed to write fixture image");
}

/// Create a dataset folder with the given images and, if non-empty, a classes.txt.
pub fn create_dataset(images: &[(&str, u32, u32)], classes: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (name, width, height) in images {
        write_image(&dir.path().join(name), *width, *height);
    }
    if !classes.is_empty() {
        fs::write(dir.path().join("classes.txt"), classes.join("\n") + "\n")
            .expect("failed to write classes.txt");
    }
    dir
}

pub fn label_path(dataset: &Path, stem: &str) -> PathBuf {
    dataset.join("annotation").join(format!("{stem}.txt"))
}

pub fn write_label(dataset: &Path, stem: &str, content: &str) {
    let path = label_path(dataset, stem);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub fn read_label(dataset: &Path, stem: &str) -> String {
    fs::read_to_string(label_path(dataset, stem)).expect("label file missing")
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}
