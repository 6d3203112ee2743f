//! In-memory PPTX packages for tests.

use crate::relationships::{AUDIO_REL_TYPE, MEDIA_REL_TYPE, SLIDE_REL_TYPE};
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

/// Zip the given entries in order.
pub(crate) fn zip_of(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();
    for (name, bytes) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(bytes).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// A relationship document. Targets are written verbatim.
pub(crate) fn rels_xml(rels: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    );
    for (id, type_uri, target) in rels {
        xml.push_str(&format!(
            "<Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>",
            id, type_uri, target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// A presentation manifest listing slide ids in order.
/// `None` writes an entry without a relationship id.
pub(crate) fn manifest_xml(rel_ids: &[Option<&str>]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <p:presentation xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
         xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">\
         <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
         <p:sldIdLst>",
    );
    for (i, rel_id) in rel_ids.iter().enumerate() {
        match rel_id {
            Some(id) => xml.push_str(&format!("<p:sldId id=\"{}\" r:id=\"{}\"/>", 256 + i, id)),
            None => xml.push_str(&format!("<p:sldId id=\"{}\"/>", 256 + i)),
        }
    }
    xml.push_str("</p:sldIdLst><p:sldSz cx=\"12192000\" cy=\"6858000\"/></p:presentation>");
    xml
}

/// Builder for a minimal presentation package.
///
/// Slides are listed in the manifest in the order they are added. Relationship
/// ids are deliberately unrelated to slide filenames.
#[derive(Default)]
pub(crate) struct PackageBuilder {
    slides: Vec<String>,
    slide_rels: Vec<(String, Vec<(String, String)>)>,
    media: Vec<(String, Vec<u8>)>,
    extra: Vec<(String, Vec<u8>)>,
    omit_manifest: bool,
    omit_presentation_rels: bool,
}

impl PackageBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a slide part (e.g. `slide3.xml`) to the manifest.
    pub(crate) fn slide(mut self, part: &str) -> Self {
        self.slides.push(part.to_string());
        self
    }

    /// Add a relationship from a slide part to a target.
    pub(crate) fn slide_rel(mut self, part: &str, type_uri: &str, target: &str) -> Self {
        let rel = (type_uri.to_string(), target.to_string());
        match self.slide_rels.iter_mut().find(|(p, _)| p == part) {
            Some((_, rels)) => rels.push(rel),
            None => self.slide_rels.push((part.to_string(), vec![rel])),
        }
        self
    }

    /// Reference an embedded audio file the way PowerPoint does:
    /// one audio relationship plus one media relationship.
    pub(crate) fn embed_audio(self, part: &str, media_name: &str) -> Self {
        let target = format!("../media/{}", media_name);
        self.slide_rel(part, AUDIO_REL_TYPE, &target)
            .slide_rel(part, MEDIA_REL_TYPE, &target)
    }

    /// Add a media file under `ppt/media/`.
    pub(crate) fn media(mut self, name: &str, bytes: &[u8]) -> Self {
        self.media
            .push((format!("ppt/media/{}", name), bytes.to_vec()));
        self
    }

    /// Add an arbitrary entry.
    pub(crate) fn entry(mut self, path: &str, bytes: &[u8]) -> Self {
        self.extra.push((path.to_string(), bytes.to_vec()));
        self
    }

    pub(crate) fn without_manifest(mut self) -> Self {
        self.omit_manifest = true;
        self
    }

    pub(crate) fn without_presentation_rels(mut self) -> Self {
        self.omit_presentation_rels = true;
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let mut entries: Vec<(String, Vec<u8>)> = Vec::new();

        // rId1 is the slide master; slides start at rId100 and count down so
        // relationship ids never agree with manifest order.
        let rel_ids: Vec<String> = (0..self.slides.len())
            .map(|i| format!("rId{}", 100 - i))
            .collect();

        if !self.omit_manifest {
            let ids: Vec<Option<&str>> = rel_ids.iter().map(|id| Some(id.as_str())).collect();
            entries.push((
                "ppt/presentation.xml".to_string(),
                manifest_xml(&ids).into_bytes(),
            ));
        }

        if !self.omit_presentation_rels {
            let mut rels: Vec<(String, String, String)> = vec![(
                "rId1".to_string(),
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster"
                    .to_string(),
                "slideMasters/slideMaster1.xml".to_string(),
            )];
            for (id, part) in rel_ids.iter().zip(&self.slides) {
                rels.push((
                    id.clone(),
                    SLIDE_REL_TYPE.to_string(),
                    format!("slides/{}", part),
                ));
            }
            let borrowed: Vec<(&str, &str, &str)> = rels
                .iter()
                .map(|(a, b, c)| (a.as_str(), b.as_str(), c.as_str()))
                .collect();
            entries.push((
                "ppt/_rels/presentation.xml.rels".to_string(),
                rels_xml(&borrowed).into_bytes(),
            ));
        }

        for (part, rels) in &self.slide_rels {
            let numbered: Vec<(String, &str, &str)> = rels
                .iter()
                .enumerate()
                .map(|(i, (t, target))| (format!("rId{}", i + 1), t.as_str(), target.as_str()))
                .collect();
            let borrowed: Vec<(&str, &str, &str)> = numbered
                .iter()
                .map(|(id, t, target)| (id.as_str(), *t, *target))
                .collect();
            entries.push((
                format!("ppt/slides/_rels/{}.rels", part),
                rels_xml(&borrowed).into_bytes(),
            ));
        }

        entries.extend(self.media);
        entries.extend(self.extra);

        let borrowed: Vec<(&str, &[u8])> = entries
            .iter()
            .map(|(name, bytes)| (name.as_str(), bytes.as_slice()))
            .collect();
        zip_of(&borrowed)
    }
}
