use std::path::{Path, PathBuf};

/// Where a definition is written, and whether an existing file may be replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    dir: PathBuf,
    overwrite: bool,
}

impl Output {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_overwrite(dir, false)
    }

    pub fn with_overwrite(dir: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            dir: dir.into(),
            overwrite,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }
}
