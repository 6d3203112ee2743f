//! Output filenames for extracted audio.
//!
//! Each entry is named `{index}{sep}slide_{slides}{sep}{original}`, where
//! `index` is the 1-based output position zero-padded to three digits and
//! `slides` joins the slide numbers with `-`. With the default separator:
//!
//! ```text
//! 001-slide_3-media1.mp3
//! 002-slide_5-7-media2.m4a
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// Regex matching a PowerPoint extension anywhere in a source filename.
static PRESENTATION_EXTENSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.pptx?").unwrap());

/// Prefix placed in front of the joined slide numbers.
const SLIDE_TAG: &str = "slide_";

/// Builds deterministic output filenames for matched audio assets.
#[derive(Debug, Clone)]
pub struct OutputNamer {
    /// Separator between index, slide tag, and original name.
    separator: String,

    /// Zero-pad width of the index.
    index_width: usize,
}

impl Default for OutputNamer {
    fn default() -> Self {
        Self {
            separator: "-".to_string(),
            index_width: 3,
        }
    }
}

impl OutputNamer {
    /// Create a namer with the default `-` separator and 3-digit index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom separator, e.g. `" - "`.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Use a custom index width.
    pub fn with_index_width(mut self, width: usize) -> Self {
        self.index_width = width.max(1);
        self
    }

    /// Compute the output filename for the asset at 1-based `index`.
    ///
    /// Slide numbers are joined as given; repeats are kept.
    pub fn file_name(&self, index: usize, slides: &[usize], original_name: &str) -> String {
        let slides = slides
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("-");

        format!(
            "{:0width$}{sep}{}{}{sep}{}",
            index,
            SLIDE_TAG,
            slides,
            original_name,
            width = self.index_width,
            sep = self.separator,
        )
    }
}

/// Name of the downloadable bundle for a source presentation.
///
/// `Sunday Service.pptx` becomes `Sunday Service audio.zip`. Only the first
/// `.ppt`/`.pptx` occurrence is removed, wherever it sits in the name.
pub fn archive_file_name(source_filename: &str) -> String {
    let stem = PRESENTATION_EXTENSION_REGEX.replace(source_filename, "");
    format!("{} audio.zip", stem)
}
