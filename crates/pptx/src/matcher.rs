//! Matching of slide media relationships to audio entries.
//!
//! A relationship target matches an audio entry when the target contains the
//! entry's basename. Targets are relative (`../media/media1.mp3`) and their
//! prefix varies between producers, so containment is used instead of path
//! resolution. A basename that is a substring of another basename can match
//! the wrong entry; the first entry in container order wins.

use crate::relationships::{MediaFamily, Relationship};
use ppt_audio_core::{basename, AudioAsset, SlideOrder};
use std::collections::HashMap;

/// The parsed relationship document of one slide.
#[derive(Debug, Clone)]
pub struct SlideRelationships {
    /// Path of the relationship document inside the archive.
    pub source_path: String,
    /// Slide part the document belongs to, e.g. `slide2.xml`.
    pub slide_part: String,
    /// Relationships in document order.
    pub relationships: Vec<Relationship>,
}

/// Attributes audio entries to the slides that reference them.
///
/// References are not counted one per relationship: an audio/video
/// relationship and a media relationship to the same entry on one slide are
/// paired and count as a single reference (see [`Self::references_in`]).
pub struct SlideAudioMatcher<'a> {
    audio_paths: &'a [String],
}

impl<'a> SlideAudioMatcher<'a> {
    /// Create a matcher over audio entry paths in container order.
    pub fn new(audio_paths: &'a [String]) -> Self {
        Self { audio_paths }
    }

    /// Index of the first audio entry whose basename occurs in `target`.
    pub fn match_target(&self, target: &str) -> Option<usize> {
        self.audio_paths
            .iter()
            .position(|path| target.contains(basename(path)))
    }

    /// Audio entry indices referenced by one slide, in relationship order.
    ///
    /// An audio/video relationship and a media relationship pointing at the
    /// same entry describe one embedded clip and count once. Two
    /// relationships of the same family count twice.
    pub fn references_in(&self, relationships: &[Relationship]) -> Vec<usize> {
        let mut counts: HashMap<usize, (usize, usize)> = HashMap::new();
        let mut references = Vec::new();

        for rel in relationships {
            let Some(family) = rel.media_family() else {
                continue;
            };

            let Some(index) = self.match_target(&rel.target) else {
                log::trace!("Media target '{}' matches no audio entry", rel.target);
                continue;
            };

            let (clips, media) = counts.entry(index).or_default();
            let before = (*clips).max(*media);
            match family {
                MediaFamily::Clip => *clips += 1,
                MediaFamily::Media => *media += 1,
            }
            if (*clips).max(*media) > before {
                references.push(index);
            }
        }

        references
    }

    /// Match every slide document and collect the referenced assets.
    ///
    /// Documents are processed in display order and each one's references are
    /// folded into the result sequentially, so the order of slide numbers on
    /// an asset is deterministic. Documents whose slide has no display order
    /// are skipped. Assets that no slide references are left out.
    pub fn match_slides(
        &self,
        documents: &[SlideRelationships],
        order: &SlideOrder,
    ) -> Vec<AudioAsset> {
        let mut placed: Vec<(usize, &SlideRelationships)> = Vec::new();
        for doc in documents {
            match order.display_order(&doc.slide_part) {
                Some(slide) => placed.push((slide, doc)),
                None => log::warn!(
                    "No display order for '{}', dropping relationships from {}",
                    doc.slide_part,
                    doc.source_path
                ),
            }
        }
        placed.sort_by_key(|&(slide, _)| slide);

        let partials: Vec<(usize, Vec<usize>)> = placed
            .into_iter()
            .map(|(slide, doc)| (slide, self.references_in(&doc.relationships)))
            .collect();

        let mut assets: HashMap<&str, AudioAsset> = HashMap::new();
        for (slide, references) in partials {
            for index in references {
                let path = &self.audio_paths[index];
                assets
                    .entry(basename(path))
                    .or_insert_with(|| AudioAsset::new(path.as_str()))
                    .add_reference(slide);
            }
        }

        let matched: Vec<AudioAsset> = self
            .audio_paths
            .iter()
            .filter_map(|path| assets.remove(basename(path)))
            .collect();

        log::debug!(
            "Matched {} of {} audio entries to slides",
            matched.len(),
            self.audio_paths.len()
        );

        matched
    }
}
