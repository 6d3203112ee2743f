//! WASM-compatible wrapper for PowerPoint audio extraction.
//!
//! This crate exposes audio extraction to JavaScript so a page or worker can
//! process presentations locally, without uploading them anywhere.

use ppt_audio_core::{archive_file_name, ExtractionResult};
use ppt_audio_pptx::AudioExtractor;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Metadata of one extracted audio file.
#[derive(Debug, Serialize, Deserialize)]
pub struct EntryInfo {
    /// Output filename.
    pub name: String,
    /// Slide numbers the audio plays on.
    pub slides: Vec<usize>,
    /// Payload size in bytes.
    pub size: usize,
}

/// Extracted audio, held on the Rust side until JavaScript asks for it.
#[wasm_bindgen]
pub struct AudioBundle {
    result: ExtractionResult,
    download_name: String,
}

#[wasm_bindgen]
impl AudioBundle {
    /// Number of audio files.
    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.result.files.len()
    }

    /// Output filename of the file at `index`.
    pub fn name(&self, index: usize) -> Option<String> {
        self.result.files.get(index).map(|f| f.name.clone())
    }

    /// Slide numbers of the file at `index` (empty when out of range).
    pub fn slides(&self, index: usize) -> Vec<u32> {
        self.result
            .files
            .get(index)
            .map(|f| f.slides.iter().map(|&s| s as u32).collect())
            .unwrap_or_default()
    }

    /// Audio bytes of the file at `index` (empty when out of range).
    pub fn payload(&self, index: usize) -> Vec<u8> {
        self.result
            .files
            .get(index)
            .map(|f| f.payload.clone())
            .unwrap_or_default()
    }

    /// The zip archive holding every file.
    pub fn archive(&self) -> Vec<u8> {
        self.result.archive.clone()
    }

    /// Suggested filename for downloading the archive.
    #[wasm_bindgen(getter, js_name = downloadName)]
    pub fn download_name(&self) -> String {
        self.download_name.clone()
    }

    /// Whether some slide holds more than one audio file, in which case their
    /// relative order may not match the presentation.
    #[wasm_bindgen(js_name = hasSlidesWithMultipleAudio)]
    pub fn has_slides_with_multiple_audio(&self) -> bool {
        self.result.has_slides_with_multiple_audio()
    }

    /// Metadata for every file, as an array of `{ name, slides, size }`.
    pub fn entries(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.entry_infos())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

impl AudioBundle {
    fn entry_infos(&self) -> Vec<EntryInfo> {
        self.result
            .files
            .iter()
            .map(|f| EntryInfo {
                name: f.name.clone(),
                slides: f.slides.clone(),
                size: f.payload.len(),
            })
            .collect()
    }
}

/// Extract the audio from a PowerPoint file.
///
/// # Arguments
/// * `data` - The raw bytes of the PPTX file
/// * `filename` - The original filename (used for the download name)
///
/// # Returns
/// An `AudioBundle`, or throws with a readable message. A presentation
/// without audio throws `No audio files found in the PowerPoint.`
#[wasm_bindgen]
pub fn extract_audio(data: &[u8], filename: &str) -> Result<AudioBundle, JsValue> {
    extract_audio_impl(data, filename).map_err(|e| JsValue::from_str(&e))
}

fn extract_audio_impl(data: &[u8], filename: &str) -> Result<AudioBundle, String> {
    // Need at least the 4-byte zip signature
    if data.len() < 4 {
        return Err("File too small to be a valid presentation".to_string());
    }

    let result = AudioExtractor::new()
        .extract(data)
        .map_err(|e| e.to_string())?;

    Ok(AudioBundle {
        result,
        download_name: archive_file_name(filename),
    })
}
