//! Ordering, naming, and payload extraction for matched audio.

use crate::archive::PresentationArchive;
use ppt_audio_core::{sort_assets, AudioAsset, OutputEntry, OutputNamer, Result};
use std::io::{Read, Seek};

/// Turn matched assets into named output entries.
///
/// Assets without slide references are dropped. The rest are sorted into
/// output order, named by their 1-based position, and their bytes are read
/// from the source archive.
pub fn assemble<R: Read + Seek>(
    archive: &mut PresentationArchive<R>,
    mut assets: Vec<AudioAsset>,
    namer: &OutputNamer,
) -> Result<Vec<OutputEntry>> {
    assets.retain(|asset| !asset.slide_references.is_empty());
    sort_assets(&mut assets);

    let mut entries = Vec::with_capacity(assets.len());
    for (position, asset) in assets.into_iter().enumerate() {
        let name = namer.file_name(position + 1, &asset.slide_references, &asset.normalized_name);
        let payload = archive.read_binary(&asset.original_path)?;

        log::debug!("{} -> {} ({} bytes)", asset.original_path, name, payload.len());

        entries.push(OutputEntry {
            name,
            payload,
            slides: asset.slide_references,
        });
    }

    Ok(entries)
}
