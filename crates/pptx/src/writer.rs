//! Packaging of renamed audio into an output zip.

use ppt_audio_core::{Error, OutputEntry, Result};
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Compression applied to entries in the output bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputCompression {
    /// Store payloads as-is. Audio codecs are already compressed.
    #[default]
    Stored,
    /// Deflate every payload.
    Deflated,
}

impl OutputCompression {
    fn method(self) -> CompressionMethod {
        match self {
            OutputCompression::Stored => CompressionMethod::Stored,
            OutputCompression::Deflated => CompressionMethod::Deflated,
        }
    }
}

/// Builds an in-memory zip archive, one entry at a time.
///
/// Every entry carries the same fixed timestamp so identical inputs give
/// byte-identical archives.
pub struct ArchiveWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: FileOptions,
    entry_count: usize,
}

impl ArchiveWriter {
    /// Create an empty archive using stored entries.
    pub fn new() -> Self {
        Self::with_compression(OutputCompression::default())
    }

    /// Create an empty archive using the given compression.
    pub fn with_compression(compression: OutputCompression) -> Self {
        let options = FileOptions::default()
            .compression_method(compression.method())
            .last_modified_time(DateTime::default());

        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options,
            entry_count: 0,
        }
    }

    /// Append an entry.
    pub fn add_entry(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.zip
            .start_file(name, self.options)
            .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", name, e)))?;
        self.zip
            .write_all(bytes)
            .map_err(|e| Error::ZipError(format!("Failed to write '{}': {}", name, e)))?;

        self.entry_count += 1;
        Ok(())
    }

    /// Number of entries added so far.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Finish the archive and return its bytes.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let cursor = self
            .zip
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finalize archive: {}", e)))?;

        log::debug!("Packaged {} entries", self.entry_count);

        Ok(cursor.into_inner())
    }

    /// Package output entries in the order given.
    pub fn bundle(entries: &[OutputEntry], compression: OutputCompression) -> Result<Vec<u8>> {
        let mut writer = Self::with_compression(compression);
        for entry in entries {
            writer.add_entry(&entry.name, &entry.payload)?;
        }
        writer.finish()
    }
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}
