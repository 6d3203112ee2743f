//! Core domain types, asset ordering, and output naming
//! for PowerPoint audio extraction.

pub mod error;
pub mod naming;
pub mod ordering;
pub mod types;

pub use error::{Error, Result};
pub use naming::{archive_file_name, OutputNamer};
pub use ordering::{compare_assets, sort_assets};
pub use types::{
    basename, AudioAsset, ExtractionResult, OutputEntry, PresentationFormat, SlideOrder,
};
