//! Abstract "open a byte stream for a named resource" capability.
//!
//! A `StreamSource` identifies some resource and can open a fresh reader
//! for it on demand, or for another resource named relative to it (a
//! sibling file next to a project file, say). It does not participate in
//! any container machinery; it is a seam for callers that defer opening.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

pub trait StreamSource {
    /// Opens a fresh reader for this resource.
    fn open_stream(&self) -> io::Result<Box<dyn Read>>;

    /// Opens a fresh reader for a resource named relative to this one.
    fn open_related_stream(&self, related_path: &str) -> io::Result<Box<dyn Read>>;
}

/// A `StreamSource` backed by a filesystem path. Related names resolve
/// against the parent directory.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, related_path: &str) -> PathBuf {
        match self.path.parent() {
            Some(parent) => parent.join(related_path),
            None => PathBuf::from(related_path),
        }
    }
}

impl StreamSource for FileSource {
    fn open_stream(&self) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(File::open(&self.path)?))
    }

    fn open_related_stream(&self, related_path: &str) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(File::open(self.sibling(related_path))?))
    }
}
