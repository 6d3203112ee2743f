//! PPTX (Office Open XML) backend for PowerPoint audio extraction.
//!
//! Opens the zip package, resolves slide display order from the
//! relationship graph, matches embedded audio to the slides that reference
//! it, and repackages the audio under slide-ordered names.

pub mod archive;
pub mod assembler;
pub mod extractor;
pub mod matcher;
pub mod relationships;
pub mod writer;

#[cfg(test)]
pub(crate) mod fixtures;

pub use archive::{PresentationArchive, AUDIO_EXTENSIONS, MEDIA_PREFIX};
pub use extractor::AudioExtractor;
pub use matcher::{SlideAudioMatcher, SlideRelationships};
pub use relationships::{MediaFamily, Relationship, RelationshipKind};
pub use writer::{ArchiveWriter, OutputCompression};
