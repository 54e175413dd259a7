// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DojobError {
    /// A node of the job document is missing a required piece.
    ///
    /// `path` locates the node, e.g. `task[1].subtasks[0].task[2]`.
    #[error("Invalid job document at {path}: {message}")]
    Document { path: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid frame bound: {0}")]
    InvalidFrameBound(String),

    #[error("Duplicate job id generated: {0}")]
    DuplicateJobId(String),

    #[error("Hold order violated: {0}")]
    HoldOrder(String),

    #[error("Job '{job}' failed with exit code {code}")]
    SubmitFailed { job: String, code: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DojobError {
    pub(crate) fn document(path: impl Into<String>, message: impl Into<String>) -> Self {
        DojobError::Document {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DojobError>;
