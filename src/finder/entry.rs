//! Visited entries
//!
//! A `VisitedEntry` is built by the walker right before an entry is
//! evaluated and dropped right after the report decision.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::DirEntry;

/// Entry type classification, as seen without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Symbolic link
    Symlink,
    /// Named pipe
    Fifo,
    /// Unix domain socket
    Socket,
    /// Block device
    BlockDevice,
    /// Character device
    CharDevice,
    /// Anything else
    Other,
}

impl EntryKind {
    /// Classify a file type obtained without following links
    pub fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            return EntryKind::Symlink;
        }
        if file_type.is_dir() {
            return EntryKind::Directory;
        }
        if file_type.is_file() {
            return EntryKind::File;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            if file_type.is_fifo() {
                return EntryKind::Fifo;
            }
            if file_type.is_socket() {
                return EntryKind::Socket;
            }
            if file_type.is_block_device() {
                return EntryKind::BlockDevice;
            }
            if file_type.is_char_device() {
                return EntryKind::CharDevice;
            }
        }

        EntryKind::Other
    }
}

/// One filesystem object under evaluation
#[derive(Debug, Clone)]
pub struct VisitedEntry {
    path: PathBuf,
    name: String,
    kind: EntryKind,
    depth: usize,
}

impl VisitedEntry {
    pub fn new<P: Into<PathBuf>>(path: P, name: &str, kind: EntryKind, depth: usize) -> Self {
        Self {
            path: path.into(),
            name: name.to_string(),
            kind,
            depth,
        }
    }

    /// Build from a walkdir entry; `depth` is relative to the start path.
    pub fn from_dir_entry(entry: &DirEntry, depth: usize) -> Self {
        Self {
            path: entry.path().to_path_buf(),
            name: entry.file_name().to_string_lossy().into_owned(),
            kind: EntryKind::from_file_type(entry.file_type()),
            depth,
        }
    }

    /// Reported path, keeping the start path prefix as typed
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reported path as text, the projection `-path` and `-regex` match against
    pub fn path_str(&self) -> Cow<'_, str> {
        self.path.to_string_lossy()
    }

    /// Final path component (the whole start path when it has none, e.g. `.`)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}
