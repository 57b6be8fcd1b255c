//! Collision-safe output path resolution.
//!
//! The persistence contract is "never overwrite an existing file; return the
//! path actually written". Collisions are resolved by appending a numeric
//! disambiguator to the filename stem (`photo.jpg` → `photo-1.jpg` →
//! `photo-2.jpg` …) until an unused path is found. The counter is
//! deterministic, so rapid repeated saves within the same second still get
//! distinct files.

use std::path::{Path, PathBuf};

/// Resolve `path` to a path that does not yet exist.
///
/// Returns `path` unchanged when it is free; otherwise the first
/// `stem-N.ext` variant that is.
pub fn available_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let extension = path.extension().map(|e| e.to_string_lossy().into_owned());

    let mut n = 1u32;
    loop {
        let name = match &extension {
            Some(ext) => format!("{stem}-{n}.{ext}"),
            None => format!("{stem}-{n}"),
        };
        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
