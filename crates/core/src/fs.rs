//! File access used by the patchers.
//!
//! Every patch call reads the current text through a [`FileSystem`] and writes
//! at most once. Nothing is cached between calls, so the file system stays the
//! single source of truth. [`MemoryFs`] lets callers and tests run the same
//! patchers without touching disk.

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// The narrow set of file operations the patchers depend on.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the whole file with `contents`.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// The real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

impl FileSystem for DiskFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

/// An in-memory file tree.
///
/// Inserting a file registers all of its ancestors as directories.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RefCell<BTreeMap<PathBuf, String>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert_file(path, contents);
        self
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.insert_dir(path);
        self
    }

    pub fn insert_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.insert_dir(parent);
        }
        self.files.borrow_mut().insert(path, contents.into());
    }

    pub fn insert_dir(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Current contents of a file, if present.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.contents(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !self.is_dir(parent)
        {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", parent.display()),
            ));
        }
        self.files.borrow_mut().insert(path.to_path_buf(), contents.to_owned());
        Ok(())
    }
}

/// A text file handle bound to a file system.
#[derive(Debug, Clone)]
pub struct TextFile<'a, F: FileSystem> {
    fs: &'a F,
    path: PathBuf,
}

impl<'a, F: FileSystem> TextFile<'a, F> {
    pub fn new(fs: &'a F, path: impl Into<PathBuf>) -> Self {
        Self { fs, path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.fs.exists(&self.path)
    }

    /// Read the file, reporting a missing file as [`Error::FileNotFound`].
    pub fn read(&self) -> Result<String> {
        if !self.exists() {
            return Err(Error::FileNotFound(self.path.clone()));
        }
        self.fs.read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))
    }

    pub fn write(&self, contents: &str) -> Result<()> {
        self.fs.write(&self.path, contents).map_err(|e| Error::io(&self.path, e))
    }
}
