//! Error types for PowerPoint audio extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during PowerPoint audio extraction.
///
/// Only [`Error::NoAudioFound`] is a named, expected outcome. Every other
/// variant aborts the extraction and carries a descriptive message.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The input is not a zip-format presentation package.
    #[error("Malformed presentation archive: {0}")]
    MalformedArchive(String),

    /// The presentation manifest or its relationship document is unreadable.
    #[error("Missing presentation manifest: {0}")]
    MissingManifest(String),

    /// An exact-path lookup found no entry in the archive.
    #[error("Entry not found in archive: {0}")]
    EntryNotFound(String),

    /// The package holds no qualifying audio entries.
    #[error("No audio files found in the PowerPoint.")]
    NoAudioFound,

    /// ZIP archive error while reading an entry or writing the bundle.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error in a required package document.
    #[error("XML parsing error: {0}")]
    XmlError(String),
}

impl Error {
    /// Whether this is the "no audio" outcome rather than a fault.
    pub fn is_no_audio(&self) -> bool {
        matches!(self, Error::NoAudioFound)
    }
}
