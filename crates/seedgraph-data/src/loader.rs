//! Document loading: locates a schema document, decodes it, builds it.
//!
//! Provides format detection (YAML/JSON/RON/TOML), file discovery, and
//! deserialization helpers used by [`crate::load_configuration`].

use seedgraph_core::{ConfigError, Configuration, SchemaDocument, build_configuration};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::settings::LoaderSettings;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a configuration document.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The document could not be read.
    #[error("cannot read {file}: {source}")]
    Unreadable {
        file: PathBuf,
        source: std::io::Error,
    },

    /// No document with the given base name exists in the directory.
    #[error("no document named '{name}' found in {dir}")]
    MissingDocument { name: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// The document does not decode into the schema shape.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The document decoded but references something that does not exist.
    #[error(transparent)]
    Build(#[from] ConfigError),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
    Ron,
    Toml,
}

impl Format {
    /// Extensions probed by [`find_document`], in order.
    pub const EXTENSIONS: [&'static str; 5] = ["yml", "yaml", "json", "ron", "toml"];
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yml" | "yaml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a document with the given base name (no extension).
///
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// more than one extension exists for the same base name.
pub fn find_document(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in &Format::EXTENSIONS {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_document`], but returns an error if no file is found.
pub fn require_document(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_document(dir, base_name)?.ok_or_else(|| DataLoadError::MissingDocument {
        name: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

/// Resolve a document reference against the settings' base directory.
///
/// A name with an extension is taken as a file name; a bare name is looked
/// up with [`require_document`]. Absolute paths are used unchanged.
pub fn resolve_document_path(
    settings: &LoaderSettings,
    name: &str,
) -> Result<PathBuf, DataLoadError> {
    let path = Path::new(name);
    if path.extension().is_some() {
        Ok(settings.base_dir.join(path))
    } else {
        require_document(&settings.base_dir, name)
    }
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Decode document text in the given format. `file` is used for error
/// reporting only.
pub fn parse_document(
    content: &str,
    format: Format,
    file: &Path,
) -> Result<SchemaDocument, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse {
        file: file.to_path_buf(),
        detail,
    };

    match format {
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}

/// Read a file and decode it according to its format (detected from extension).
pub fn load_document(path: &Path) -> Result<SchemaDocument, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| DataLoadError::Unreadable {
        file: path.to_path_buf(),
        source,
    })?;
    debug!(file = %path.display(), ?format, bytes = content.len(), "read document");
    parse_document(&content, format, path)
}

/// Read, decode, and build the configuration stored at `path`.
pub fn load_configuration_file(path: &Path) -> Result<Configuration, DataLoadError> {
    let document = load_document(path)?;
    let configuration = build_configuration(&document)?;
    info!(file = %path.display(), name = configuration.name(), "loaded configuration");
    Ok(configuration)
}

// ===========================================================================
// Tests
// ===========================================================================
