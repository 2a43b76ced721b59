//! Validation of the source video chosen by the user.

use crate::config::VIDEO_EXTENSION;
use crate::error::{CoreError, CoreResult};

use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A video file that exists, can be opened, and carries the `.mp4` extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub parent_dir: PathBuf,
    pub file_name: String,
    pub extension: String,
}

impl SourceFile {
    /// Validates `path` and derives its parent directory, name, and extension.
    ///
    /// The extension check is case-sensitive: `clip.MP4` is rejected.
    pub fn from_path(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(CoreError::InvalidArgument("no file path given".to_string()));
        }

        let metadata = path.metadata().map_err(|e| {
            CoreError::PathError(format!("cannot access '{}': {}", path.display(), e))
        })?;
        if !metadata.is_file() {
            return Err(CoreError::PathError(format!(
                "'{}' is not a file",
                path.display()
            )));
        }

        // Readability check; the handle is dropped immediately.
        File::open(path).map_err(|e| {
            CoreError::PathError(format!("cannot read '{}': {}", path.display(), e))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();
        if extension != VIDEO_EXTENSION {
            return Err(CoreError::InvalidArgument(format!(
                "'{}' is not a .{} file",
                path.display(),
                VIDEO_EXTENSION
            )));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| CoreError::PathError(format!("'{}' has no file name", path.display())))?;

        let parent_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            path: path.to_path_buf(),
            parent_dir,
            file_name,
            extension,
        })
    }

    /// Pretty JSON rendering used in debug logs.
    pub fn describe(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.path.display().to_string())
    }
}
