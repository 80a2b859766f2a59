use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

/// Name of the class list inside a dataset folder.
pub const CLASS_FILE_NAME: &str = "classes.txt";

/// Class used when the dataset ships no class list.
pub const DEFAULT_CLASS_NAME: &str = "object";

const PALETTE: [&str; 10] = [
    "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#42d4f4", "#f032e6", "#bfef45",
    "#fabed4", "#469990",
];

/// Ordered class names. The index of a name is its class id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTable {
    names: Vec<String>,
}

impl Default for ClassTable {
    fn default() -> Self {
        Self {
            names: vec![DEFAULT_CLASS_NAME.to_string()],
        }
    }
}

impl ClassTable {
    /// Build a table from names. An empty list falls back to the default class.
    pub fn new(names: Vec<String>) -> Self {
        if names.is_empty() {
            Self::default()
        } else {
            Self { names }
        }
    }

    /// Parse `classes.txt` content: one name per line, trimmed, blank lines skipped.
    pub fn parse(content: &str) -> Self {
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Load `classes.txt` from a dataset folder.
    pub fn load(dataset_dir: &Path) -> Result<Self> {
        let path = dataset_dir.join(CLASS_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let table = Self::parse(&content);
                if content.trim().is_empty() {
                    log::warn!(
                        "{} is empty; using the single class '{DEFAULT_CLASS_NAME}'",
                        path.display()
                    );
                } else {
                    log::info!("Loaded {} classes from {}", table.len(), path.display());
                }
                Ok(table)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!(
                    "No {} in {}; using the single class '{DEFAULT_CLASS_NAME}'",
                    CLASS_FILE_NAME,
                    dataset_dir.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, class_id: usize) -> bool {
        class_id < self.names.len()
    }

    pub fn name(&self, class_id: usize) -> Option<&str> {
        self.names.get(class_id).map(String::as_str)
    }

    /// Class name, or a placeholder for ids outside the table.
    pub fn display_name(&self, class_id: usize) -> String {
        self.name(class_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Class {class_id}"))
    }

    /// Step `class_id` by `step` positions, wrapping at either end of the table.
    pub fn cycle(&self, class_id: usize, step: isize) -> usize {
        let len = self.names.len() as isize;
        if len == 0 {
            return 0;
        }
        (class_id as isize + step).rem_euclid(len) as usize
    }

    /// Display color as a `#rrggbb` string. Colors repeat after ten classes.
    pub fn color(&self, class_id: usize) -> &'static str {
        PALETTE[class_id % PALETTE.len()]
    }
}
