//! Zip-backed archive reader.

use cljscope_plugin::{ArchiveReader, BoxError};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Reads jar/zip archives. Handles are opened per call and released
/// before returning, so a scan holds at most one open archive.
pub struct ZipArchiveReader;

impl ZipArchiveReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ZipArchiveReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveReader for ZipArchiveReader {
    fn entry_names(&self, archive: &Path) -> Result<Vec<String>, BoxError> {
        let file = File::open(archive)?;
        let mut zip = ZipArchive::new(file)?;
        let mut names = Vec::with_capacity(zip.len());
        for i in 0..zip.len() {
            let entry = zip.by_index(i)?;
            if !entry.is_dir() {
                names.push(entry.name().to_string());
            }
        }
        Ok(names)
    }

    fn read_entry(&self, archive: &Path, entry: &str) -> Result<String, BoxError> {
        let file = File::open(archive)?;
        let mut zip = ZipArchive::new(file)?;
        let mut entry = zip.by_name(entry)?;
        let mut buf = Vec::new();
        entry.read_to_end(&mut buf)?;
        // Lossy decode: corrupt or non-UTF-8 entries fall through to the
        // declaration parser, which degrades them to "no declaration".
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
