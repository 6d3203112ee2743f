//! Read access to a presentation's zip container.

use ppt_audio_core::{Error, Result};
use std::io::{Cursor, Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

/// Directory holding embedded media parts.
pub const MEDIA_PREFIX: &str = "ppt/media/";

/// Extensions (case-insensitive) treated as audio.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "wma", "aac", "flac", "ogg"];

/// An opened presentation package.
///
/// Entry names are captured once at open time in container order; content is
/// only decompressed when an entry is read.
pub struct PresentationArchive<R> {
    archive: ZipArchive<R>,
    entries: Vec<String>,
}

impl<'a> PresentationArchive<Cursor<&'a [u8]>> {
    /// Open a package held in memory.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        Self::open(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> PresentationArchive<R> {
    /// Open a package from a reader.
    pub fn open(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::MalformedArchive(format!("Failed to open ZIP: {}", e)))?;

        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let file = archive.by_index_raw(index).map_err(|e| {
                Error::MalformedArchive(format!("Unreadable entry #{}: {}", index, e))
            })?;
            if !file.is_dir() {
                entries.push(file.name().to_string());
            }
        }

        log::debug!("Opened archive with {} entries", entries.len());

        Ok(Self { archive, entries })
    }

    /// All file entry paths, in container order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Whether an entry exists at exactly this path.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e == path)
    }

    /// Entry paths under `prefix` whose extension is in `extensions`.
    ///
    /// Extensions compare case-insensitively. An empty list accepts any
    /// extension. Order is container order.
    pub fn list_entries(&self, prefix: &str, extensions: &[&str]) -> Vec<String> {
        self.entries
            .iter()
            .filter(|path| path.starts_with(prefix))
            .filter(|path| extensions.is_empty() || has_extension(path, extensions))
            .cloned()
            .collect()
    }

    /// Audio entries in the media directory.
    pub fn audio_entries(&self) -> Vec<String> {
        self.list_entries(MEDIA_PREFIX, AUDIO_EXTENSIONS)
    }

    /// Read an entry as UTF-8 text, dropping a leading byte-order mark.
    pub fn read_text(&mut self, path: &str) -> Result<String> {
        let mut file = self.archive.by_name(path).map_err(|e| lookup_error(path, e))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        match content.strip_prefix('\u{feff}') {
            Some(stripped) => Ok(stripped.to_string()),
            None => Ok(content),
        }
    }

    /// Read an entry's raw bytes.
    pub fn read_binary(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut file = self.archive.by_name(path).map_err(|e| lookup_error(path, e))?;

        // The declared size comes from the archive header and is not trusted
        // for preallocation.
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

fn lookup_error(path: &str, err: ZipError) -> Error {
    match err {
        ZipError::FileNotFound => Error::EntryNotFound(path.to_string()),
        other => Error::ZipError(format!("Failed to open '{}': {}", path, other)),
    }
}

fn has_extension(path: &str, extensions: &[&str]) -> bool {
    match path.rsplit_once('.') {
        Some((_, ext)) => extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)),
        None => false,
    }
}
