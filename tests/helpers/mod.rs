pub mod factories;
pub mod factory;
pub mod log_capture;

use std::fs;
use std::path::Path;

use crate::engine::nbt::{Compound, tag::compound_at};

/// Names under `path` in `tree`, in stored order. Missing paths read as empty.
pub fn names_at(tree: &Compound, path: &[&str]) -> Vec<String> {
    compound_at(tree, path)
        .map(|c| c.keys().cloned().collect())
        .unwrap_or_default()
}

/// Sorted file names in `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
