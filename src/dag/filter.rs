// src/dag/filter.rs

//! Frame-range scoping of top-level tasks.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{DojobError, Result};

static FRAME_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Frame([0-9]+)$").expect("frame suffix regex is valid"));

/// Inclusive frame range tested against a trailing `Frame<digits>` in task names.
///
/// Names without that suffix always pass. With both bounds unset the filter is
/// a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameFilter {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl FrameFilter {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    /// Filter that lets every task through.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_disabled(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether the range can match any frame at all.
    pub fn is_empty_range(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s > e)
    }

    pub fn matches(&self, task_name: &str) -> bool {
        if self.is_disabled() {
            return true;
        }
        let Some(frame) = frame_number(task_name) else {
            return true;
        };
        self.start.is_none_or(|s| frame >= s) && self.end.is_none_or(|e| frame <= e)
    }
}

/// Frame number carried by a task name, if it ends in `Frame<digits>`.
///
/// A digit run beyond `i64` saturates to `i64::MAX`.
pub fn frame_number(task_name: &str) -> Option<i64> {
    let caps = FRAME_SUFFIX.captures(task_name)?;
    let digits = caps.get(1)?.as_str();
    Some(digits.parse::<i64>().unwrap_or(i64::MAX))
}

/// Parse a textual frame bound (CLI or caller input).
pub fn parse_frame_bound(s: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| DojobError::InvalidFrameBound(format!("'{s}' is not an integer frame number")))
}
