// src/config/mod.rs

//! Job document loading and validation.
//!
//! - [`model`] holds the serde-backed raw document and the validated task tree.
//! - [`loader`] reads a document from disk (TOML, JSON or XML).
//! - [`xml`] maps Liquid-style XML job scripts onto the raw document.
//! - [`validate`] turns the raw document into a tree with a guaranteed shape.

pub mod loader;
pub mod model;
pub mod validate;
pub mod xml;

pub use loader::{load_and_validate, load_from_path, parse_document, DocumentFormat};
pub use model::{
    ConfigSection, JobDocument, RawJobDocument, RawSubtaskBlock, RawTask, Task,
};
