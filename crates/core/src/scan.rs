//! Classpath scanner.
//!
//! Streams candidate sources over the classpath in entry order: loose
//! source files under directory entries (recursive) and source-bearing
//! entries inside archives. The stream is pull-based; directories are
//! walked and archives opened only when the stream reaches them, so at
//! most one candidate is in flight. Unreadable entries surface as `Err`
//! items in the stream and the caller chooses to skip or abort.

use crate::error::{Result, ScopeError};
use cljscope_plugin::{ArchiveReader, CandidateSource, ClasspathEntry, EntryKind};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File extensions recognized as module sources.
pub const SOURCE_EXTENSIONS: &[&str] = &["clj", "cljc"];

/// Which part of the classpath a scan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanScope {
    /// Directory entries under the project root only; archives excluded.
    Project,
    /// Every entry, directories and archives alike.
    All,
}

pub fn is_source_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Streams candidate sources in classpath order.
pub struct ClasspathScanner<'a> {
    entries: Vec<ClasspathEntry>,
    archives: &'a dyn ArchiveReader,
    project_root: PathBuf,
    case_insensitive: bool,
}

impl<'a> ClasspathScanner<'a> {
    pub fn new(
        entries: Vec<ClasspathEntry>,
        archives: &'a dyn ArchiveReader,
        project_root: PathBuf,
        case_insensitive: bool,
    ) -> Self {
        Self {
            entries,
            archives,
            project_root,
            case_insensitive,
        }
    }

    /// Lazy candidate stream over the classpath.
    pub fn scan(&'a self, scope: ScanScope) -> impl Iterator<Item = Result<CandidateSource>> + 'a {
        self.entries
            .iter()
            .flat_map(move |entry| self.scan_entry(entry, scope))
    }

    fn scan_entry(
        &'a self,
        entry: &ClasspathEntry,
        scope: ScanScope,
    ) -> Box<dyn Iterator<Item = Result<CandidateSource>> + 'a> {
        match entry.kind {
            EntryKind::Directory => {
                if scope == ScanScope::Project
                    && !entry.is_under(&self.project_root, self.case_insensitive)
                {
                    debug!("Directory {:?} outside project root, skipped", entry.path);
                    return Box::new(std::iter::empty());
                }
                // An absent directory is not an error: stale classpath
                // entries are routine.
                if !entry.path.exists() {
                    debug!("Classpath directory {:?} does not exist, skipped", entry.path);
                    return Box::new(std::iter::empty());
                }
                Box::new(
                    WalkDir::new(&entry.path)
                        .into_iter()
                        .filter_map(|walked| match walked {
                            Ok(e) if e.file_type().is_file() && is_source_path(e.path()) => {
                                Some(Ok(CandidateSource::File(e.into_path())))
                            }
                            Ok(_) => None,
                            Err(err) => Some(Err(ScopeError::Io(err.into()))),
                        }),
                )
            }
            EntryKind::Archive => {
                if scope == ScanScope::Project {
                    return Box::new(std::iter::empty());
                }
                match self.archives.entry_names(&entry.path) {
                    Ok(names) => {
                        let archive = entry.path.clone();
                        Box::new(
                            names
                                .into_iter()
                                .filter(|name| is_source_path(Path::new(name)))
                                .map(move |name| {
                                    Ok(CandidateSource::ArchiveEntry {
                                        archive: archive.clone(),
                                        entry: name,
                                    })
                                }),
                        )
                    }
                    Err(err) => Box::new(std::iter::once(Err(ScopeError::Archive(format!(
                        "{}: {}",
                        entry.path.display(),
                        err
                    ))))),
                }
            }
        }
    }
}
