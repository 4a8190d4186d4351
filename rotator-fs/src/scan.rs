//! Reconstruction of rotation state from file names.

use std::path::PathBuf;

use rotator_slots::RotationId;

use crate::error::RotationError;
use crate::filesystem::{Filesystem, FsError};
use crate::naming::RotatedNameMatcher;
use crate::paths::PathSpec;

/// A rotated archive found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatedFile {
    pub path: PathBuf,
    pub rotation_id: RotationId,
}

/// List the rotated archives of `paths` in its output directory.
///
/// Files that do not follow the naming convention are skipped. The result is
/// sorted by rotation id (oldest first).
pub fn scan_rotated_files<F>(fs: &F, paths: &PathSpec) -> Result<Vec<RotatedFile>, RotationError>
where
    F: Filesystem + ?Sized,
{
    let dir = paths.output_dir();
    let scan_error = |source: FsError| RotationError::Scan {
        dir: dir.to_path_buf(),
        source,
    };

    let matcher = RotatedNameMatcher::new(paths.base_name())
        .map_err(|e| scan_error(FsError::Path(e.to_string())))?;

    let mut files = Vec::new();
    for path in fs.list_files(dir).map_err(scan_error)? {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(rotation_id) = matcher.rotation_id(name) {
            files.push(RotatedFile { path, rotation_id });
        }
    }

    files.sort_by(|a, b| {
        a.rotation_id
            .cmp(&b.rotation_id)
            .then_with(|| a.path.cmp(&b.path))
    });
    Ok(files)
}

/// Id for the next rotation: one past the highest id seen, or 0.
pub fn next_rotation_id(files: &[RotatedFile]) -> Result<RotationId, RotationError> {
    match files.iter().map(|f| f.rotation_id).max() {
        None => Ok(0),
        Some(max) => max.checked_add(1).ok_or(RotationError::IdsExhausted(max)),
    }
}
