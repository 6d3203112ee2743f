//! Domain types for representing extracted presentation audio.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The container format of a source presentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationFormat {
    /// Modern PPTX (Office Open XML zip package).
    Pptx,
    /// Legacy PPT (OLE/CFB binary). Recognized only to be rejected.
    Ppt,
}

impl PresentationFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pptx" => Some(Self::Pptx),
            "ppt" => Some(Self::Ppt),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        // PPT is an OLE/CFB file (D0 CF 11 E0 A1 B1 1A E1)
        if bytes.len() >= 8
            && bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        {
            return Some(Self::Ppt);
        }

        None
    }
}

/// Strip any directory prefix from a container path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// An audio file discovered in the package, with the slides that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioAsset {
    /// Filename without directory prefix. This is the identity key.
    pub normalized_name: String,

    /// Full path inside the input archive.
    pub original_path: String,

    /// Slide numbers referencing this asset, in append order.
    /// Repeats are kept: a slide referencing the asset twice appears twice.
    pub slide_references: Vec<usize>,
}

impl AudioAsset {
    /// Create an asset with no slide references yet.
    pub fn new(original_path: impl Into<String>) -> Self {
        let original_path = original_path.into();
        Self {
            normalized_name: basename(&original_path).to_string(),
            original_path,
            slide_references: Vec::new(),
        }
    }

    /// Record another reference from the given slide.
    pub fn add_reference(&mut self, slide: usize) {
        self.slide_references.push(slide);
    }

    /// The first slide number appended, if any.
    pub fn first_slide(&self) -> Option<usize> {
        self.slide_references.first().copied()
    }
}

/// Mapping from slide-part filename (e.g. `slide3.xml`) to 1-based display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideOrder {
    entries: HashMap<String, usize>,
}

impl SlideOrder {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a display order to a slide-part filename.
    pub fn insert(&mut self, slide_part: impl Into<String>, display_order: usize) {
        self.entries.insert(slide_part.into(), display_order);
    }

    /// Look up the display order of a slide-part filename.
    pub fn display_order(&self, slide_part: &str) -> Option<usize> {
        self.entries.get(slide_part).copied()
    }

    /// Number of slides placed in display order.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no slide could be placed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by display order.
    pub fn ordered(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .entries
            .iter()
            .map(|(name, order)| (name.as_str(), *order))
            .collect();
        entries.sort_by_key(|&(_, order)| order);
        entries
    }
}

/// One renamed audio file in the output bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputEntry {
    /// Computed output filename.
    pub name: String,

    /// Raw audio bytes, identical to the source entry.
    #[serde(skip)]
    pub payload: Vec<u8>,

    /// Slide numbers the asset was matched to.
    pub slides: Vec<usize>,
}

/// The complete output of one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Entries in output order.
    pub files: Vec<OutputEntry>,

    /// Zip archive holding every entry under its computed name.
    #[serde(skip)]
    pub archive: Vec<u8>,
}

impl ExtractionResult {
    /// All slide numbers across entries, flattened in output order.
    pub fn slide_numbers(&self) -> Vec<usize> {
        self.files
            .iter()
            .flat_map(|f| f.slides.iter().copied())
            .collect()
    }

    /// Whether any slide number is claimed more than once.
    ///
    /// When true, the relative order of the audio files on that slide may
    /// not match what the presentation plays.
    pub fn has_slides_with_multiple_audio(&self) -> bool {
        let numbers = self.slide_numbers();
        let unique: HashSet<usize> = numbers.iter().copied().collect();
        unique.len() != numbers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_magic() {
        assert_eq!(
            PresentationFormat::from_magic(b"PK\x03\x04rest"),
            Some(PresentationFormat::Pptx)
        );
        assert_eq!(
            PresentationFormat::from_magic(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
            Some(PresentationFormat::Ppt)
        );
        assert_eq!(PresentationFormat::from_magic(b"PK"), None);
        assert_eq!(PresentationFormat::from_magic(b"hello world"), None);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            PresentationFormat::from_extension("PPTX"),
            Some(PresentationFormat::Pptx)
        );
        assert_eq!(
            PresentationFormat::from_extension("ppt"),
            Some(PresentationFormat::Ppt)
        );
        assert_eq!(PresentationFormat::from_extension("key"), None);
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("ppt/media/media1.mp3"), "media1.mp3");
        assert_eq!(basename("media1.mp3"), "media1.mp3");
        assert_eq!(basename("ppt/slides/_rels/"), "");
    }

    #[test]
    fn test_audio_asset_keeps_repeated_references() {
        let mut asset = AudioAsset::new("ppt/media/media2.wav");
        assert_eq!(asset.normalized_name, "media2.wav");
        assert_eq!(asset.first_slide(), None);

        asset.add_reference(2);
        asset.add_reference(2);
        asset.add_reference(4);
        assert_eq!(asset.slide_references, vec![2, 2, 4]);
        assert_eq!(asset.first_slide(), Some(2));
    }

    #[test]
    fn test_slide_order_ordered() {
        let mut order = SlideOrder::new();
        order.insert("slide3.xml", 1);
        order.insert("slide1.xml", 2);
        assert_eq!(order.len(), 2);
        assert_eq!(order.display_order("slide1.xml"), Some(2));
        assert_eq!(order.display_order("slide9.xml"), None);
        assert_eq!(order.ordered(), vec![("slide3.xml", 1), ("slide1.xml", 2)]);
    }

    #[test]
    fn test_multiple_audio_detection() {
        let entry = |slides: Vec<usize>| OutputEntry {
            name: String::new(),
            payload: Vec::new(),
            slides,
        };

        let single = ExtractionResult {
            files: vec![entry(vec![1]), entry(vec![2, 3])],
            archive: Vec::new(),
        };
        assert!(!single.has_slides_with_multiple_audio());

        let shared = ExtractionResult {
            files: vec![entry(vec![1]), entry(vec![3, 1])],
            archive: Vec::new(),
        };
        assert!(shared.has_slides_with_multiple_audio());
        assert_eq!(shared.slide_numbers(), vec![1, 3, 1]);
    }
}
