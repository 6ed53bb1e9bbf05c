//! Reading sources and writing artifacts
//!
//! [`FileProcessor`] is the only component that touches the filesystem on
//! behalf of jobs. Artifacts are written to a temporary sibling first and
//! renamed into place, so a reader never sees a half-written file.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::naming::ArtifactNaming;
use crate::infra::{FileSystem, RealFileSystem};

/// Text I/O for sources and artifacts.
#[derive(Debug, Clone, Default)]
pub struct FileProcessor<FS: FileSystem = RealFileSystem> {
    fs: FS,
    naming: ArtifactNaming,
}

impl FileProcessor<RealFileSystem> {
    /// Processor on the real filesystem with the default naming.
    pub fn new() -> Self {
        Self::with_fs(RealFileSystem)
    }
}

impl<FS: FileSystem> FileProcessor<FS> {
    /// Processor on a custom filesystem implementation.
    pub fn with_fs(fs: FS) -> Self {
        Self {
            fs,
            naming: ArtifactNaming::default(),
        }
    }

    /// Replace the naming convention.
    pub fn with_naming(mut self, naming: ArtifactNaming) -> Self {
        self.naming = naming;
        self
    }

    /// The naming convention in use.
    pub fn naming(&self) -> &ArtifactNaming {
        &self.naming
    }

    /// The underlying filesystem.
    pub fn fs(&self) -> &FS {
        &self.fs
    }

    /// Artifact path for `source`.
    pub fn output_path_for(&self, source: &Path) -> PathBuf {
        self.naming.output_path_for(source)
    }

    /// Read a file as UTF-8 text.
    pub fn read(&self, path: &Path) -> io::Result<String> {
        self.fs.read_to_string(path)
    }

    /// True if `path` exists.
    pub fn exists(&self, path: &Path) -> bool {
        self.fs.exists(path)
    }

    /// Write `contents` to `path` atomically.
    ///
    /// The data goes to `.<name>.<uuid>.tmp` in the same directory and is
    /// then renamed over `path`. On failure the temporary file is removed
    /// and `path` is left as it was.
    pub fn write_atomic(&self, path: &Path, contents: &str) -> io::Result<()> {
        let temp = Self::temp_path_for(path)?;
        if let Err(e) = self.fs.write(&temp, contents) {
            self.discard(&temp);
            return Err(e);
        }
        if let Err(e) = self.fs.rename(&temp, path) {
            self.discard(&temp);
            return Err(e);
        }
        Ok(())
    }

    /// Delete a file.
    pub fn remove(&self, path: &Path) -> io::Result<()> {
        self.fs.remove_file(path)
    }

    fn temp_path_for(path: &Path) -> io::Result<PathBuf> {
        let name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file path: {}", path.display()),
            )
        })?;
        let uuid = Uuid::new_v4().simple().to_string();
        Ok(path.with_file_name(format!(".{}.{}.tmp", name.to_string_lossy(), uuid)))
    }

    fn discard(&self, temp: &Path) {
        if self.fs.exists(temp) {
            if let Err(e) = self.fs.remove_file(temp) {
                log::warn!("could not remove temporary file {}: {}", temp.display(), e);
            }
        }
    }
}
