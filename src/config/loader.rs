// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{JobDocument, RawJobDocument};
use crate::config::xml::parse_xml;
use crate::errors::Result;

/// On-disk encoding of a job document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
    /// Liquid-style `<renderscript>` job script.
    Xml,
}

impl DocumentFormat {
    /// Pick the format from the file extension; anything but `.json` or
    /// `.xml` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            Some(ext) if ext.eq_ignore_ascii_case("xml") => DocumentFormat::Xml,
            _ => DocumentFormat::Toml,
        }
    }
}

/// Deserialize a raw document from a string. No semantic validation.
pub fn parse_document(contents: &str, format: DocumentFormat) -> Result<RawJobDocument> {
    let raw = match format {
        DocumentFormat::Toml => toml::from_str(contents)?,
        DocumentFormat::Json => serde_json::from_str(contents)?,
        DocumentFormat::Xml => parse_xml(contents)?,
    };
    Ok(raw)
}

/// Load a raw document from a path.
///
/// This only performs deserialization; use [`load_and_validate`] to get a
/// task tree.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawJobDocument> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    parse_document(&contents, DocumentFormat::from_path(path))
}

/// Load a document from path and validate it into a [`JobDocument`].
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<JobDocument> {
    let raw = load_from_path(&path)?;
    JobDocument::try_from(raw)
}
