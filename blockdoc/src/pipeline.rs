//! File-level conversion pipeline
//!
//! Wraps the pure converters with reading, writing, configuration lookup and
//! batch conversion of whole directory trees.

use crate::block_model::{BlockDocument, DocumentJsonError};
use crate::converter_config::{ConverterConfig, ConverterConfigError, CONFIG_FILE_NAME};
use crate::html_exporter::blocks_to_html_with;
use crate::html_parser::html_to_blocks;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Path that stands for stdin / stdout
pub const STDIO_PATH: &str = "-";

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// HTML in, block JSON out
    ToBlocks,
    /// Block JSON in, HTML out
    ToHtml,
}

impl Direction {
    /// Extension given to converted files
    pub fn output_extension(self) -> &'static str {
        match self {
            Direction::ToBlocks => "json",
            Direction::ToHtml => "html",
        }
    }

    /// Input format name, for messages
    fn input_name(self) -> &'static str {
        match self {
            Direction::ToBlocks => "HTML",
            Direction::ToHtml => "block JSON",
        }
    }

    /// Whether a file is an input for this direction
    fn accepts(self, path: &Path, config: &ConverterConfig) -> bool {
        let Some(extension) = path.extension().and_then(|s| s.to_str()) else {
            return false;
        };
        match self {
            Direction::ToBlocks => config.is_html_extension(extension),
            Direction::ToHtml => extension.eq_ignore_ascii_case("json"),
        }
    }
}

/// Load the configuration for a run
///
/// # Parameters
/// * `explicit` - Path given on the command line, which must exist
/// * `dir` - Directory searched for blockdoc.toml when no path is given
///
/// # Returns
/// * `Ok(ConverterConfig)` - Loaded configuration, or defaults when no file is found
/// * `Err(ConvertError)` - The file exists but could not be read or parsed
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<ConverterConfig, ConvertError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                log::debug!("No {} found, using defaults", candidate.display());
                return Ok(ConverterConfig::default());
            }
            candidate
        }
    };

    log::info!("Loading configuration from {}", path.display());
    ConverterConfig::load(&path).map_err(|e| ConvertError::ConfigError(path, Box::new(e)))
}

/// Read an input file, or stdin for `-`
pub fn read_input(path: &Path) -> Result<String, ConvertError> {
    if path == Path::new(STDIO_PATH) {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| ConvertError::ReadError(path.to_path_buf(), e))?;
        return Ok(content);
    }
    fs::read_to_string(path).map_err(|e| ConvertError::ReadError(path.to_path_buf(), e))
}

/// Write output to a file (creating parent directories), or stdout for `None` / `-`
pub fn write_output(path: Option<&Path>, content: &str) -> Result<(), ConvertError> {
    match path {
        Some(path) if path != Path::new(STDIO_PATH) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| ConvertError::WriteError(parent.to_path_buf(), e))?;
            }
            fs::write(path, content).map_err(|e| ConvertError::WriteError(path.to_path_buf(), e))
        }
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| ConvertError::WriteError(PathBuf::from(STDIO_PATH), e))
        }
    }
}

/// Convert HTML text to block JSON text
pub fn html_to_json(html: &str, config: &ConverterConfig) -> String {
    html_to_blocks(html).to_json(config.pretty_json)
}

/// Convert block JSON text to HTML text
///
/// # Parameters
/// * `json` - Block document JSON
/// * `source` - Where the JSON came from, for error reporting
/// * `config` - Converter configuration
pub fn json_to_html(
    json: &str,
    source: &Path,
    config: &ConverterConfig,
) -> Result<String, ConvertError> {
    let doc = BlockDocument::from_json(json)
        .map_err(|e| ConvertError::JsonError(source.to_path_buf(), e))?;
    Ok(blocks_to_html_with(&doc, &config.html_options()))
}

/// Read a document from HTML or JSON, chosen by file extension
///
/// `.json` files are read as block JSON; anything else, stdin included, as HTML.
pub fn read_document(path: &Path) -> Result<BlockDocument, ConvertError> {
    let content = read_input(path)?;
    let is_json = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        BlockDocument::from_json(&content)
            .map_err(|e| ConvertError::JsonError(path.to_path_buf(), e))
    } else {
        Ok(html_to_blocks(&content))
    }
}

/// Convert a single file, returning the converted text
pub fn convert_file(
    path: &Path,
    direction: Direction,
    config: &ConverterConfig,
) -> Result<String, ConvertError> {
    let content = read_input(path)?;
    match direction {
        Direction::ToBlocks => Ok(html_to_json(&content, config)),
        Direction::ToHtml => json_to_html(&content, path, config),
    }
}

/// Outcome of a batch conversion
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successfully converted files as (input, output) pairs
    pub converted: Vec<(PathBuf, PathBuf)>,
    /// Files that failed, with the error
    pub failed: Vec<(PathBuf, ConvertError)>,
}

impl BatchReport {
    /// Check if every discovered file was converted
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Find all inputs for a direction under a directory, sorted by path
pub fn discover_inputs(root: &Path, direction: Direction, config: &ConverterConfig) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let accepted = direction.accepts(e.path(), config);
            if !accepted {
                log::warn!(
                    "Skipping {}: not a {} input",
                    e.path().display(),
                    direction.input_name()
                );
            }
            accepted
        })
        .map(|e| e.path().to_path_buf())
        .collect()
}

/// Output path for a batch input
///
/// Without an output directory the converted file sits next to its input;
/// with one, the input's path relative to `root` is mirrored under it.
pub fn output_path_for(
    input: &Path,
    root: &Path,
    out_dir: Option<&Path>,
    direction: Direction,
) -> PathBuf {
    let target = match out_dir {
        Some(out_dir) => out_dir.join(input.strip_prefix(root).unwrap_or(input)),
        None => input.to_path_buf(),
    };
    target.with_extension(direction.output_extension())
}

/// Convert every matching file under a directory
///
/// Per-file failures are collected in the report rather than aborting the
/// run. Files are converted in parallel when the `parallel` feature is on.
///
/// # Returns
/// * `Ok(BatchReport)` - Converted and failed files
/// * `Err(ConvertError)` - `root` is not a directory
pub fn convert_directory(
    root: &Path,
    out_dir: Option<&Path>,
    direction: Direction,
    config: &ConverterConfig,
) -> Result<BatchReport, ConvertError> {
    if !root.is_dir() {
        return Err(ConvertError::NotADirectory(root.to_path_buf()));
    }

    let inputs = discover_inputs(root, direction, config);
    log::info!("Found {} input files under {}", inputs.len(), root.display());

    let convert_one = |input: &PathBuf| -> (PathBuf, Result<PathBuf, ConvertError>) {
        let output = output_path_for(input, root, out_dir, direction);
        let result = convert_file(input, direction, config)
            .and_then(|content| write_output(Some(output.as_path()), &content))
            .map(|()| output);
        (input.clone(), result)
    };

    #[cfg(feature = "parallel")]
    let results: Vec<_> = inputs.par_iter().map(convert_one).collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = inputs.iter().map(convert_one).collect();

    let mut report = BatchReport::default();
    for (input, result) in results {
        match result {
            Ok(output) => {
                log::info!("Converted {} -> {}", input.display(), output.display());
                report.converted.push((input, output));
            }
            Err(e) => {
                log::warn!("Failed to convert {}: {}", input.display(), e);
                report.failed.push((input, e));
            }
        }
    }

    Ok(report)
}

/// Pipeline errors
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Reading an input failed
    #[error("IO error reading {path}: {source}", path = .0.display(), source = .1)]
    ReadError(PathBuf, #[source] std::io::Error),

    /// Writing an output failed
    #[error("IO error writing {path}: {source}", path = .0.display(), source = .1)]
    WriteError(PathBuf, #[source] std::io::Error),

    /// An input is not a block document
    #[error("Invalid block JSON in {path}: {source}", path = .0.display(), source = .1)]
    JsonError(PathBuf, #[source] DocumentJsonError),

    /// The configuration file could not be loaded
    #[error("Config error loading {path}: {source}", path = .0.display(), source = .1)]
    ConfigError(PathBuf, #[source] Box<ConverterConfigError>),

    /// Batch input is not a directory
    #[error("Not a directory: {path}", path = .0.display())]
    NotADirectory(PathBuf),
}
