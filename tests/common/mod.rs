#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub use dojob_test_utils::builders;
pub use dojob_test_utils::fake_submitter;
pub use dojob_test_utils::{init_tracing, with_timeout};

/// Write `contents` to a temp file with the given extension (e.g. ".toml").
pub fn write_document(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("jobfile")
        .suffix(suffix)
        .tempfile()
        .expect("create temp job document");
    file.write_all(contents.as_bytes())
        .expect("write temp job document");
    file
}
