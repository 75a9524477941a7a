//! Filesystem capability used by the emitter.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::errors::{Error, Result};

/// Operations the emitter needs from a filesystem.
pub trait Filesystem {
    fn mkdir_all(&self, path: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_writable(&self, path: &Path) -> bool;

    /// Replace `path` with `contents` so readers never observe a partial file.
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<()>;

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn mkdir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(Error::io("create directory", path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Checked by creating (and dropping) a temporary file in `path`, so ownership and ACLs count.
    fn is_writable(&self, path: &Path) -> bool {
        path.is_dir()
            && tempfile::Builder::new()
                .prefix(".classforge-probe-")
                .tempfile_in(path)
                .is_ok()
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut builder = tempfile::Builder::new();
        builder.prefix(".classforge-").suffix(".tmp");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(classforge_core::conventions::FILE_MODE));
        }

        let mut file = builder
            .tempfile_in(dir)
            .map_err(Error::io("create temporary file in", dir))?;
        file.write_all(contents)
            .map_err(Error::io("write temporary file for", path))?;
        file.persist(path)
            .map_err(|err| Error::io("rename temporary file onto", path)(err.error))?;
        Ok(())
    }

    #[cfg(unix)]
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let current = fs::metadata(path)
            .map_err(Error::io("read metadata of", path))?
            .permissions()
            .mode();
        // Only narrow: the bits granted at creation already reflect the umask.
        let narrowed = current & mode & 0o777;
        if narrowed != current & 0o777 {
            fs::set_permissions(path, fs::Permissions::from_mode(narrowed))
                .map_err(Error::io("set permissions of", path))?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn set_permissions(&self, _path: &Path, _mode: u32) -> Result<()> {
        Ok(())
    }
}
