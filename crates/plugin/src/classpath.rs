//! Classpath model and access traits.
//!
//! A classpath is an ordered list of entries, each a source-root
//! directory or a packed archive (jar). Ordering is authoritative:
//! name resolution takes the first matching candidate.

use crate::BoxError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Storage shape of a classpath entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Directory,
    Archive,
}

/// One element of the runtime's classpath.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClasspathEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl ClasspathEntry {
    pub fn new(path: PathBuf, kind: EntryKind) -> Self {
        Self { path, kind }
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self::new(path.into(), EntryKind::Directory)
    }

    pub fn archive(path: impl Into<PathBuf>) -> Self {
        Self::new(path.into(), EntryKind::Archive)
    }

    /// Infer the kind from the path: known archive extensions are
    /// archives, everything else is treated as a directory.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = match path.extension().and_then(|e| e.to_str()) {
            Some("jar") | Some("zip") => EntryKind::Archive,
            _ => EntryKind::Directory,
        };
        Self::new(path, kind)
    }

    pub fn is_archive(&self) -> bool {
        self.kind == EntryKind::Archive
    }

    /// Membership test against the project root. `case_insensitive`
    /// selects the host path-case policy.
    pub fn is_under(&self, root: &Path, case_insensitive: bool) -> bool {
        path_is_under(&self.path, root, case_insensitive)
    }
}

/// Component-wise prefix test between an absolute path and a root.
///
/// Comparing whole components avoids false positives between sibling
/// directories that share a name prefix (`/proj` vs `/project`).
pub fn path_is_under(path: &Path, root: &Path, case_insensitive: bool) -> bool {
    let mut parts = path.components();
    for root_part in root.components() {
        let Some(part) = parts.next() else {
            return false;
        };
        let a = part.as_os_str().to_string_lossy();
        let b = root_part.as_os_str().to_string_lossy();
        let same = if case_insensitive {
            a.to_lowercase() == b.to_lowercase()
        } else {
            a == b
        };
        if !same {
            return false;
        }
    }
    true
}

/// A reference to one unit of module-declaring content: a loose file
/// under a classpath directory, or a named entry inside an archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateSource {
    File(PathBuf),
    ArchiveEntry { archive: PathBuf, entry: String },
}

impl CandidateSource {
    /// Virtual path form: the plain path for files,
    /// `archive:<archive-path>!/<entry-path>` for archive entries.
    pub fn url(&self) -> String {
        match self {
            CandidateSource::File(path) => path.display().to_string(),
            CandidateSource::ArchiveEntry { archive, entry } => {
                format!("archive:{}!/{}", archive.display(), entry)
            }
        }
    }
}

/// Supplies the ordered classpath of the current process.
pub trait ClasspathProvider: Send + Sync {
    /// Ordered entries; ordering is preserved end to end.
    fn entries(&self) -> Vec<ClasspathEntry>;

    /// The archive-backed subset, in classpath order.
    fn archives(&self) -> Vec<ClasspathEntry> {
        self.entries().into_iter().filter(|e| e.is_archive()).collect()
    }
}

/// Opens packed archives and reads their entries.
pub trait ArchiveReader: Send + Sync {
    /// Names of all file entries in the archive, in archive order.
    fn entry_names(&self, archive: &Path) -> Result<Vec<String>, BoxError>;

    /// Content of one entry, decoded as text.
    fn read_entry(&self, archive: &Path, entry: &str) -> Result<String, BoxError>;
}
