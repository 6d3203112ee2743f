//! CLI tool for extracting slide-ordered audio from PowerPoint files.

use anyhow::{Context, Result};
use clap::Parser;
use ppt_audio_core::{archive_file_name, ExtractionResult, OutputEntry, OutputNamer};
use ppt_audio_pptx::{AudioExtractor, OutputCompression};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Extract embedded audio from PowerPoint files, named by slide.
#[derive(Parser, Debug)]
#[command(name = "ppt-audio-extract")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file(s) (.pptx)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the audio files into a folder instead of a zip archive
    #[arg(short, long)]
    unpack: bool,

    /// Only list the output names, write nothing
    #[arg(short, long, conflicts_with = "unpack")]
    list: bool,

    /// Print a JSON summary to stdout
    #[arg(long)]
    json: bool,

    /// Separator between index, slide tag, and original name
    #[arg(short, long, default_value = "-")]
    separator: String,

    /// Deflate entries in the output archive
    #[arg(long)]
    deflate: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Machine-readable summary of one processed file.
#[derive(Serialize)]
struct Summary<'a> {
    source: String,
    output: Option<String>,
    multiple_audio_per_slide: bool,
    files: &'a [OutputEntry],
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let compression = if args.deflate {
        OutputCompression::Deflated
    } else {
        OutputCompression::Stored
    };
    let extractor = AudioExtractor::new()
        .with_namer(OutputNamer::new().with_separator(args.separator.as_str()))
        .with_compression(compression);

    let mut failures = 0;

    for input_path in &args.input {
        log::info!("Processing: {}", input_path.display());

        match process_file(input_path, &args, &extractor) {
            Ok(()) => {}
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} file(s) failed", failures, args.input.len());
    }

    Ok(())
}

/// Process a single PowerPoint file.
fn process_file(input_path: &Path, args: &Args, extractor: &AudioExtractor) -> Result<()> {
    let data = fs::read(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;

    let result = extractor.extract(&data)?;

    log::debug!("Extracted {} audio files", result.files.len());

    if result.has_slides_with_multiple_audio() {
        eprintln!(
            "Warning: {} has slides with multiple audio files; their order may not match the presentation",
            input_path.display()
        );
    }

    let output = if args.list {
        if !args.json {
            for file in &result.files {
                println!("{}", file.name);
            }
        }
        None
    } else if args.unpack {
        Some(write_unpacked(input_path, args.output.as_ref(), &result)?)
    } else {
        Some(write_archive(input_path, args.output.as_ref(), &result)?)
    };

    if let Some(path) = &output {
        log::info!("Written to: {}", path.display());
    }

    if args.json {
        let summary = Summary {
            source: input_path.display().to_string(),
            output: output.map(|p| p.display().to_string()),
            multiple_audio_per_slide: result.has_slides_with_multiple_audio(),
            files: &result.files,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

/// Determine the directory outputs for an input go to.
fn output_dir(input_path: &Path, output_dir: Option<&PathBuf>) -> Result<PathBuf> {
    match output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            Ok(dir.clone())
        }
        None => Ok(input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()),
    }
}

fn source_name(input_path: &Path) -> &str {
    input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("presentation")
}

/// Write the packaged archive as `<name> audio.zip`.
fn write_archive(
    input_path: &Path,
    output: Option<&PathBuf>,
    result: &ExtractionResult,
) -> Result<PathBuf> {
    let path = output_dir(input_path, output)?.join(archive_file_name(source_name(input_path)));

    fs::write(&path, &result.archive)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

/// Write each audio file into a `<name> audio` folder.
fn write_unpacked(
    input_path: &Path,
    output: Option<&PathBuf>,
    result: &ExtractionResult,
) -> Result<PathBuf> {
    let archive_name = archive_file_name(source_name(input_path));
    let folder_name = archive_name.trim_end_matches(".zip");
    let dir = output_dir(input_path, output)?.join(folder_name);

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    for file in &result.files {
        let path = dir.join(&file.name);
        fs::write(&path, &file.payload)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(dir)
}
