//! Document loading functionality.
//!
//! This module provides functions to load JSON or YAML documents from files or
//! stdin, parsing them into [`Node`] trees that queries and walkers run over.

use crate::document::node::Node;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Document syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Determines the format from a file name, looking through a `.gz` suffix.
    ///
    /// Examples:
    /// - `data.json` → Json
    /// - `data.yml.gz` → Yaml
    /// - `data.txt` → None
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        let path_str = path.as_ref().to_string_lossy();
        let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

        if base.ends_with(".json") {
            Some(Format::Json)
        } else if base.ends_with(".yaml") || base.ends_with(".yml") {
            Some(Format::Yaml)
        } else {
            None
        }
    }
}

/// Loads and parses a JSON or YAML file from the filesystem.
///
/// The format comes from the file extension (`.json`, `.yaml`, `.yml`, each
/// optionally followed by `.gz`). Files with any other extension are tried as
/// JSON first, then as YAML.
///
/// # Examples
///
/// ```no_run
/// use treequery::file::loader::load_file;
///
/// let tree = load_file("config.yaml").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - The file is gzipped but corrupted
/// - The contents are not valid in the detected format
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Node> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    let format = Format::from_path(path_ref);
    debug!(
        path = %path_ref.display(),
        gzipped = is_gzipped,
        ?format,
        "Loaded document"
    );

    match format {
        Some(format) => parse_content(&content, format),
        None => parse_any(&content),
    }
}

/// Loads and parses a document from standard input.
///
/// Gzip-compressed input is detected by its magic bytes. The content is
/// tried as JSON first, then as YAML.
pub fn load_from_stdin() -> Result<Node> {
    load_from_reader(std::io::stdin().lock()).context("Failed to load document from stdin")
}

/// Loads a document from any reader, with the same detection as
/// [`load_from_stdin`].
pub fn load_from_reader<R: Read>(mut reader: R) -> Result<Node> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .context("Failed to read input")?;

    let content = if buffer.starts_with(&GZIP_MAGIC) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")?
    };

    parse_any(&content)
}

/// Parses document text in the given format.
pub fn parse_content(content: &str, format: Format) -> Result<Node> {
    match format {
        Format::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).context("Failed to parse JSON")?;
            Ok(Node::from(value))
        }
        Format::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).context("Failed to parse YAML")?;
            Ok(Node::from(value))
        }
    }
}

/// Parses document text as JSON, falling back to YAML.
fn parse_any(content: &str) -> Result<Node> {
    if let Ok(node) = parse_content(content, Format::Json) {
        return Ok(node);
    }
    parse_content(content, Format::Yaml).context("Input is neither valid JSON nor valid YAML")
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}
