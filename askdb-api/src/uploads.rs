use crate::error::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// On-disk store for uploaded database files.
///
/// Files are keyed by their client-supplied name, reduced to its final path
/// component, so a crafted filename cannot escape the upload root.
/// Re-uploading the same name overwrites silently; nothing expires.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reduce a client-supplied filename to a safe single component.
    pub fn sanitize(name: &str) -> AppResult<String> {
        let file_name = Path::new(name)
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .filter(|n| !n.is_empty() && n != "." && n != "..");

        file_name.ok_or_else(|| AppError::InvalidRequest(format!("Invalid filename: {name:?}")))
    }

    /// Persist uploaded bytes; returns the stored name and its path.
    pub fn save(&self, name: &str, bytes: &[u8]) -> AppResult<(String, PathBuf)> {
        let name = Self::sanitize(name)?;
        let path = self.root.join(&name);
        std::fs::write(&path, bytes)?;
        Ok((name, path))
    }

    /// Path of a previously uploaded file; errors if it does not exist.
    pub fn resolve(&self, name: &str) -> AppResult<PathBuf> {
        let name = Self::sanitize(name)?;
        let path = self.root.join(&name);
        if !path.is_file() {
            return Err(AppError::NotFound(format!(
                "No uploaded database named {name}"
            )));
        }
        Ok(path)
    }
}
