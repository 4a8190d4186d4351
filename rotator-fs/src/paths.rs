//! Decomposition of the caller's input path.

use std::path::{Path, PathBuf};

use rotator_slots::RotationId;

use crate::error::RotationError;
use crate::naming::rotated_file_name;

/// Where the input archive lives and where its rotated copies go.
///
/// A preserved extension is only ever taken from the caller; it is never
/// guessed from the file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSpec {
    input_dir: PathBuf,
    base_name: String,
    extension: String,
    output_dir: PathBuf,
}

impl PathSpec {
    /// Split `path` into directory, base name and preserved extension.
    ///
    /// `extension` must start with `.` and end the file name; it is trimmed
    /// from the base name and re-appended to every rotated name. Rotated
    /// archives go to `destination_dir` when given, otherwise next to the
    /// input. No filesystem access happens here.
    pub fn resolve(
        path: &Path,
        extension: Option<&str>,
        destination_dir: Option<&Path>,
    ) -> Result<Self, RotationError> {
        let extension = extension.unwrap_or_default();
        if !extension.is_empty() && !extension.starts_with('.') {
            return Err(RotationError::InvalidExtension(extension.to_string()));
        }

        let file_name = path.file_name().ok_or_else(|| RotationError::InvalidPath {
            path: path.to_path_buf(),
            reason: "has no file name",
        })?;
        let file_name = file_name.to_str().ok_or_else(|| RotationError::InvalidPath {
            path: path.to_path_buf(),
            reason: "file name is not valid UTF-8",
        })?;

        let base_name = file_name.strip_suffix(extension).ok_or_else(|| {
            RotationError::ExtensionMismatch {
                path: path.to_path_buf(),
                ext: extension.to_string(),
            }
        })?;
        if base_name.is_empty() {
            return Err(RotationError::InvalidPath {
                path: path.to_path_buf(),
                reason: "nothing is left once the extension is removed",
            });
        }

        let input_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let output_dir = destination_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| input_dir.clone());

        Ok(Self {
            input_dir,
            base_name: base_name.to_string(),
            extension: extension.to_string(),
            output_dir,
        })
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// File name with the preserved extension removed.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Preserved extension, empty when none was configured.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Directory that holds (and is scanned for) rotated archives.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Full path of the archive to rotate in.
    pub fn input_path(&self) -> PathBuf {
        self.input_dir
            .join(format!("{}{}", self.base_name, self.extension))
    }

    /// Output directory joined with the base name; rotated archives are this
    /// path plus the rotation suffix.
    pub fn output_stem(&self) -> PathBuf {
        self.output_dir.join(&self.base_name)
    }

    /// Path the input will be renamed to for `rotation_id` at `ts_unix`.
    pub fn output_path(&self, rotation_id: RotationId, ts_unix: u64) -> PathBuf {
        self.output_dir.join(rotated_file_name(
            &self.base_name,
            ts_unix,
            rotation_id,
            &self.extension,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1355999800 = 2012-12-20 10:36:40 UTC
    const TS: u64 = 1_355_999_800;

    #[test]
    fn test_resolve_without_extension() {
        let spec = PathSpec::resolve(Path::new("/path/to/foo/mydump.tgz"), None, None).unwrap();

        assert_eq!(spec.input_dir(), Path::new("/path/to/foo"));
        assert_eq!(spec.base_name(), "mydump.tgz");
        assert_eq!(spec.extension(), "");
        assert_eq!(spec.output_dir(), Path::new("/path/to/foo"));
        assert_eq!(spec.input_path(), PathBuf::from("/path/to/foo/mydump.tgz"));
        assert_eq!(
            spec.output_path(0, TS),
            PathBuf::from("/path/to/foo/mydump.tgz.2012-12-20-103640.backup-0")
        );
    }

    #[test]
    fn test_resolve_with_extension() {
        let spec = PathSpec::resolve(Path::new("a/b.tar.gz"), Some(".tar.gz"), None).unwrap();

        assert_eq!(spec.input_dir(), Path::new("a"));
        assert_eq!(spec.base_name(), "b");
        assert_eq!(spec.extension(), ".tar.gz");
        assert_eq!(spec.input_path(), PathBuf::from("a/b.tar.gz"));
        assert_eq!(spec.output_stem(), PathBuf::from("a/b"));
        assert_eq!(
            spec.output_path(3, TS),
            PathBuf::from("a/b.2012-12-20-103640.backup-3.tar.gz")
        );
    }

    #[test]
    fn test_resolve_empty_extension_is_none() {
        let spec = PathSpec::resolve(Path::new("/b/dump"), Some(""), None).unwrap();
        assert_eq!(spec.base_name(), "dump");
        assert_eq!(spec.extension(), "");
    }

    #[test]
    fn test_resolve_with_destination_dir() {
        let spec = PathSpec::resolve(
            Path::new("/tmp/in/dump.tar.gz"),
            Some(".tar.gz"),
            Some(Path::new("/srv/archive")),
        )
        .unwrap();

        assert_eq!(spec.input_path(), PathBuf::from("/tmp/in/dump.tar.gz"));
        assert_eq!(spec.output_dir(), Path::new("/srv/archive"));
        assert_eq!(
            spec.output_path(0, TS),
            PathBuf::from("/srv/archive/dump.2012-12-20-103640.backup-0.tar.gz")
        );
    }

    #[test]
    fn test_resolve_bare_file_name() {
        let spec = PathSpec::resolve(Path::new("dump.tgz"), None, None).unwrap();
        assert_eq!(spec.input_dir(), Path::new(""));
        assert_eq!(spec.input_path(), PathBuf::from("dump.tgz"));
    }

    #[test]
    fn test_resolve_extension_must_start_with_dot() {
        let err = PathSpec::resolve(Path::new("/b/dump.tgz"), Some("tgz"), None).unwrap_err();
        assert!(matches!(err, RotationError::InvalidExtension(ext) if ext == "tgz"));
    }

    #[test]
    fn test_resolve_extension_must_match() {
        let err = PathSpec::resolve(Path::new("/b/dump.tgz"), Some(".tar.gz"), None).unwrap_err();
        assert!(matches!(err, RotationError::ExtensionMismatch { .. }));
    }

    #[test]
    fn test_resolve_extension_only_name() {
        let err = PathSpec::resolve(Path::new("/b/.tar.gz"), Some(".tar.gz"), None).unwrap_err();
        assert!(matches!(err, RotationError::InvalidPath { .. }));
    }

    #[test]
    fn test_resolve_path_without_file_name() {
        let err = PathSpec::resolve(Path::new("/"), None, None).unwrap_err();
        assert!(matches!(err, RotationError::InvalidPath { reason: "has no file name", .. }));
    }
}
