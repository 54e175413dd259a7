// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// How rendered jobs reach the machines that run them.
///
/// - `Direct`: every command runs on this host, one after another. Ordering is
///   given by the call sequence, so hold-sets are computed but not encoded.
/// - `Distributed`: every job is handed to the farm submission tool, which
///   receives the hold-set on its command line and enforces it itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitMode {
    #[default]
    Direct,
    Distributed,
}

impl SubmitMode {
    pub fn is_distributed(self) -> bool {
        matches!(self, SubmitMode::Distributed)
    }
}

impl fmt::Display for SubmitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitMode::Direct => f.write_str("direct"),
            SubmitMode::Distributed => f.write_str("distributed"),
        }
    }
}

impl FromStr for SubmitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(SubmitMode::Direct),
            "distributed" | "sge" => Ok(SubmitMode::Distributed),
            other => Err(format!(
                "invalid mode: {other} (expected \"direct\" or \"distributed\")"
            )),
        }
    }
}
