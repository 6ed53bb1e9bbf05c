//! Infrastructure traits for abstracting I/O operations.
//!
//! The minifier never touches `std::fs` directly: every read, write, rename
//! and directory walk goes through [`FileSystem`], so jobs and batches can run
//! against [`RealFileSystem`] in production and [`MemoryFileSystem`] in tests.

use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

/// Trait for abstracting filesystem operations.
///
/// Implementations must be shareable across the worker threads of a batch,
/// hence the `Sync` bound.
pub trait FileSystem: Sync {
    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a slice of bytes to a file, replacing any previous contents.
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()>;

    /// Rename a file, replacing the destination if it exists.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Returns true if a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Recursively list every regular file under `root`, sorted.
    ///
    /// Directories whose name is in `skip_dirs` are not entered.
    fn list_files(&self, root: &Path, skip_dirs: &[String]) -> io::Result<Vec<PathBuf>>;
}

fn is_skipped(dir_name: &OsStr, skip_dirs: &[String]) -> bool {
    skip_dirs.iter().any(|skip| OsStr::new(skip) == dir_name)
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl RealFileSystem {
    /// Only a failure to read `dir` itself is returned. Anything unreadable
    /// further down is logged and left out of the listing.
    fn walk(dir: &Path, skip_dirs: &[String], files: &mut Vec<PathBuf>) -> io::Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            // file_type() does not follow symlinks, so linked directories are not entered
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    log::warn!("skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            if file_type.is_dir() {
                if is_skipped(&entry.file_name(), skip_dirs) {
                    continue;
                }
                if let Err(e) = Self::walk(&path, skip_dirs, files) {
                    log::warn!("skipping unreadable directory {}: {}", path.display(), e);
                }
            } else if file_type.is_file() {
                files.push(path);
            }
        }
        Ok(())
    }
}

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list_files(&self, root: &Path, skip_dirs: &[String]) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        Self::walk(root, skip_dirs, &mut files)?;
        files.sort();
        Ok(files)
    }
}

/// In-memory filesystem, used by tests and by callers that minify text
/// without touching disk.
///
/// Reads and writes of individual paths can be made to fail with
/// [`deny_read`](Self::deny_read) and [`deny_write`](Self::deny_write), and
/// whole directories hidden from listings with [`deny_list`](Self::deny_list).
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<BTreeMap<PathBuf, String>>,
    denied_reads: RwLock<BTreeSet<PathBuf>>,
    denied_writes: RwLock<BTreeSet<PathBuf>>,
    denied_dirs: RwLock<BTreeSet<PathBuf>>,
}

impl MemoryFileSystem {
    /// Create an empty in-memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add or replace a file.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.write().insert(path.into(), contents.into());
    }

    /// Current contents of a file, if present.
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.read().get(path).cloned()
    }

    /// All stored paths, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.read().keys().cloned().collect()
    }

    /// Make every read of `path` fail with `PermissionDenied`.
    pub fn deny_read(&self, path: impl Into<PathBuf>) {
        self.denied_reads.write().insert(path.into());
    }

    /// Make every write (and rename onto) `path` fail with `PermissionDenied`.
    pub fn deny_write(&self, path: impl Into<PathBuf>) {
        self.denied_writes.write().insert(path.into());
    }

    /// Make the directory `dir` unreadable when listing. Listing it as the
    /// root fails; below the root its files are left out.
    pub fn deny_list(&self, dir: impl Into<PathBuf>) {
        self.denied_dirs.write().insert(dir.into());
    }

    fn denied(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("access denied: {}", path.display()),
        )
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such file: {}", path.display()),
        )
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        if self.denied_reads.read().contains(path) {
            return Err(Self::denied(path));
        }
        self.get(path).ok_or_else(|| Self::not_found(path))
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        if self.denied_writes.read().contains(path) {
            return Err(Self::denied(path));
        }
        let text = String::from_utf8(contents.as_ref().to_vec())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.insert(path, text);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.denied_writes.read().contains(to) {
            return Err(Self::denied(to));
        }
        let mut files = self.files.write();
        let contents = files.remove(from).ok_or_else(|| Self::not_found(from))?;
        files.insert(to.to_path_buf(), contents);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        if self.denied_writes.read().contains(path) {
            return Err(Self::denied(path));
        }
        self.files
            .write()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().contains_key(path)
    }

    fn list_files(&self, root: &Path, skip_dirs: &[String]) -> io::Result<Vec<PathBuf>> {
        let denied_dirs = self.denied_dirs.read();
        if denied_dirs.contains(root) {
            return Err(Self::denied(root));
        }
        let files = self.files.read();
        let mut under_root = files.keys().filter(|p| p.starts_with(root)).peekable();
        if under_root.peek().is_none() && !root.as_os_str().is_empty() {
            return Err(Self::not_found(root));
        }
        for dir in denied_dirs.iter().filter(|dir| dir.starts_with(root)) {
            log::warn!("skipping unreadable directory {}", dir.display());
        }
        Ok(under_root
            .filter(|path| {
                let relative = path.strip_prefix(root).unwrap_or(path.as_path());
                let mut dirs = relative.parent().into_iter().flat_map(Path::components);
                !dirs.any(|dir| is_skipped(dir.as_os_str(), skip_dirs))
            })
            .filter(|path| !denied_dirs.iter().any(|dir| path.starts_with(dir)))
            .cloned()
            .collect())
    }
}
