//! Audio extraction pipeline for PPTX packages.

use crate::archive::PresentationArchive;
use crate::assembler::assemble;
use crate::matcher::{SlideAudioMatcher, SlideRelationships};
use crate::relationships::{
    build_slide_order, parse_relationships, slide_part_for_rels_path, PRESENTATION_PATH,
    PRESENTATION_RELS_PATH, RELS_SUFFIX, SLIDE_RELS_PREFIX,
};
use crate::writer::{ArchiveWriter, OutputCompression};
use ppt_audio_core::{
    Error, ExtractionResult, OutputNamer, PresentationFormat, Result, SlideOrder,
};
use std::io::{Cursor, Read, Seek, SeekFrom};

/// Extracts embedded audio from PPTX files and maps it to slides.
#[derive(Debug, Clone, Default)]
pub struct AudioExtractor {
    namer: OutputNamer,
    compression: OutputCompression,
}

impl AudioExtractor {
    /// Create an extractor with default naming and stored output entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom output namer.
    pub fn with_namer(mut self, namer: OutputNamer) -> Self {
        self.namer = namer;
        self
    }

    /// Use a custom compression for the output bundle.
    pub fn with_compression(mut self, compression: OutputCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Extract audio from a package held in memory.
    pub fn extract(&self, bytes: &[u8]) -> Result<ExtractionResult> {
        self.extract_from_reader(Cursor::new(bytes))
    }

    /// Extract audio from a package reader.
    ///
    /// Fails with [`Error::NoAudioFound`] before any relationship document is
    /// read when the package holds no audio entries.
    pub fn extract_from_reader<R: Read + Seek>(&self, mut reader: R) -> Result<ExtractionResult> {
        reject_legacy_format(&mut reader)?;

        let mut archive = PresentationArchive::open(reader)?;

        let audio_paths = archive.audio_entries();
        if audio_paths.is_empty() {
            return Err(Error::NoAudioFound);
        }
        log::debug!("Found {} audio entries", audio_paths.len());

        let order = self.read_slide_order(&mut archive)?;
        let documents = self.read_slide_relationships(&mut archive)?;

        let assets = SlideAudioMatcher::new(&audio_paths).match_slides(&documents, &order);
        if assets.is_empty() {
            log::warn!(
                "{} audio entries found but none is referenced by a slide",
                audio_paths.len()
            );
        }

        let files = assemble(&mut archive, assets, &self.namer)?;
        let bundle = ArchiveWriter::bundle(&files, self.compression)?;

        Ok(ExtractionResult {
            files,
            archive: bundle,
        })
    }

    /// Resolve slide display order from the manifest.
    fn read_slide_order<R: Read + Seek>(
        &self,
        archive: &mut PresentationArchive<R>,
    ) -> Result<SlideOrder> {
        let manifest = archive
            .read_text(PRESENTATION_PATH)
            .map_err(|e| Error::MissingManifest(format!("{}: {}", PRESENTATION_PATH, e)))?;
        let rels = archive
            .read_text(PRESENTATION_RELS_PATH)
            .map_err(|e| Error::MissingManifest(format!("{}: {}", PRESENTATION_RELS_PATH, e)))?;

        build_slide_order(&manifest, &rels)
    }

    /// Read and parse every slide relationship document.
    ///
    /// A document that cannot be read or is not well-formed XML contributes
    /// nothing.
    fn read_slide_relationships<R: Read + Seek>(
        &self,
        archive: &mut PresentationArchive<R>,
    ) -> Result<Vec<SlideRelationships>> {
        let paths: Vec<String> = archive
            .list_entries(SLIDE_RELS_PREFIX, &[])
            .into_iter()
            .filter(|path| path.ends_with(RELS_SUFFIX))
            .collect();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(slide_part) = slide_part_for_rels_path(&path).map(str::to_string) else {
                continue;
            };

            match archive
                .read_text(&path)
                .and_then(|xml| parse_relationships(&xml))
            {
                Ok(relationships) => documents.push(SlideRelationships {
                    source_path: path,
                    slide_part,
                    relationships,
                }),
                Err(e) => log::warn!("Skipping {}: {}", path, e),
            }
        }

        Ok(documents)
    }
}

/// Fail early, with a clear message, on a legacy binary presentation.
fn reject_legacy_format<R: Read + Seek>(reader: &mut R) -> Result<()> {
    let mut magic = Vec::with_capacity(8);
    reader.by_ref().take(8).read_to_end(&mut magic)?;
    reader.seek(SeekFrom::Start(0))?;

    if PresentationFormat::from_magic(&magic) == Some(PresentationFormat::Ppt) {
        return Err(Error::MalformedArchive(
            "legacy binary PowerPoint (.ppt) files are not supported; save as .pptx".to_string(),
        ));
    }

    Ok(())
}
