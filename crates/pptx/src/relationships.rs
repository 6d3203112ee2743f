//! Package relationship graph: typed relationship records and slide order.
//!
//! Slide numbering comes from the `<p:sldIdLst>` in `ppt/presentation.xml`.
//! Each `<p:sldId r:id="..."/>` is resolved through
//! `ppt/_rels/presentation.xml.rels` to a slide part, and its position in the
//! list (not the part's filename) is its display order.

use ppt_audio_core::{basename, Error, Result, SlideOrder};
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// The presentation manifest.
pub const PRESENTATION_PATH: &str = "ppt/presentation.xml";

/// Package-level relationships of the manifest.
pub const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";

/// Directory holding per-slide relationship documents.
pub const SLIDE_RELS_PREFIX: &str = "ppt/slides/_rels/";

/// Suffix of every relationship document.
pub const RELS_SUFFIX: &str = ".rels";

/// Substring identifying a slide-part target (`slides/slide3.xml`).
const SLIDE_PART_TOKEN: &str = "slides/slide";

/// Relationship type of a slide part.
pub const SLIDE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

/// Relationship type of an embedded audio clip.
pub const AUDIO_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/audio";

/// Relationship type of an embedded video clip.
pub const VIDEO_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/video";

/// Relationship type PowerPoint 2010+ writes alongside audio/video.
pub const MEDIA_REL_TYPE: &str = "http://schemas.microsoft.com/office/2007/relationships/media";

/// How a relationship's target is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    /// Target is a slide part.
    SlidePart,
    /// Target is an embedded media asset.
    Media(MediaFamily),
    /// Anything else (layouts, images, notes, ...).
    Other,
}

/// The two relationship families PowerPoint uses to point at one media clip.
///
/// A single embedded clip is usually referenced once from each family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFamily {
    /// `.../relationships/audio` or `.../relationships/video`.
    Clip,
    /// `.../2007/relationships/media`.
    Media,
}

impl RelationshipKind {
    /// Classify a relationship type URI by its final path segment.
    ///
    /// Works for both transitional and strict OOXML namespaces.
    pub fn from_type_uri(type_uri: &str) -> Self {
        match basename(type_uri) {
            "slide" => RelationshipKind::SlidePart,
            "audio" | "video" => RelationshipKind::Media(MediaFamily::Clip),
            "media" => RelationshipKind::Media(MediaFamily::Media),
            _ => RelationshipKind::Other,
        }
    }
}

/// One `<Relationship>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship id, e.g. `rId2`.
    pub id: String,
    /// Classified type.
    pub kind: RelationshipKind,
    /// Target path as written, possibly with `../` segments.
    pub target: String,
}

impl Relationship {
    /// The media family, if this is a media relationship.
    pub fn media_family(&self) -> Option<MediaFamily> {
        match self.kind {
            RelationshipKind::Media(family) => Some(family),
            _ => None,
        }
    }
}

/// Parse a relationship document into records, in document order.
pub fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut relationships = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let mut id = String::new();
                let mut type_uri = String::new();
                let mut target = String::new();

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = attr_value(&attr),
                        b"Type" => type_uri = attr_value(&attr),
                        b"Target" => target = attr_value(&attr),
                        _ => {}
                    }
                }

                relationships.push(Relationship {
                    id,
                    kind: RelationshipKind::from_type_uri(&type_uri),
                    target,
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(relationships)
}

/// Read the manifest's slide-id list in document order.
///
/// Each item is the entry's relationship id, or `None` when the entry has no
/// namespaced `id` attribute.
pub fn parse_slide_id_list(xml: &str) -> Result<Vec<Option<String>>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut slide_ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                slide_ids.push(relationship_id(e));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation manifest at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(slide_ids)
}

/// Build the slide-part → display-order mapping.
///
/// Manifest entries that do not resolve to a slide part are skipped, but
/// still occupy their position: numbering never shifts.
pub fn build_slide_order(manifest_xml: &str, presentation_rels_xml: &str) -> Result<SlideOrder> {
    let slide_parts: HashMap<String, String> = parse_relationships(presentation_rels_xml)?
        .into_iter()
        .filter(|rel| rel.target.contains(SLIDE_PART_TOKEN))
        .map(|rel| {
            let part = basename(&rel.target).to_string();
            (rel.id, part)
        })
        .collect();

    let mut order = SlideOrder::new();

    for (position, rel_id) in parse_slide_id_list(manifest_xml)?.iter().enumerate() {
        let display_order = position + 1;
        match rel_id.as_deref().and_then(|id| slide_parts.get(id)) {
            Some(part) => order.insert(part.clone(), display_order),
            None => log::warn!(
                "Slide #{} ({}) does not resolve to a slide part, skipping",
                display_order,
                rel_id.as_deref().unwrap_or("no relationship id")
            ),
        }
    }

    log::debug!("Resolved display order for {} slides", order.len());

    Ok(order)
}

/// The slide part owning a slide relationship document.
///
/// `ppt/slides/_rels/slide4.xml.rels` belongs to `slide4.xml`.
pub fn slide_part_for_rels_path(rels_path: &str) -> Option<&str> {
    basename(rels_path)
        .strip_suffix(RELS_SUFFIX)
        .filter(|part| !part.is_empty())
}

/// The relationship id of a manifest entry.
///
/// The manifest writes it as `r:id`, with whatever prefix the document binds
/// to the relationships namespace. The unprefixed `id` on the same element is
/// the numeric slide id and is ignored.
fn relationship_id(e: &BytesStart) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        let key = attr.key.as_ref();
        let is_prefixed = key.contains(&b':') && !key.starts_with(b"xmlns");
        if is_prefixed && local_name(key) == b"id" {
            Some(attr_value(&attr))
        } else {
            None
        }
    })
}

/// Decode an attribute value, falling back to lossy UTF-8 on bad escapes.
fn attr_value(attr: &Attribute) -> String {
    match attr.unescape_value() {
        Ok(value) => value.into_owned(),
        Err(_) => String::from_utf8_lossy(&attr.value).to_string(),
    }
}

/// Extract the local name from a potentially namespaced XML name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
