// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::dag::filter::parse_frame_bound;

/// Command-line arguments for `dojob`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dojob",
    version,
    about = "Resolve a hierarchical job document into held jobs and run or submit them.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the job document (TOML, or JSON / XML by `.json` / `.xml` extension).
    #[arg(value_name = "JOBFILE")]
    pub jobfile: String,

    /// First frame to run (inclusive). Only applies to top-level tasks.
    #[arg(
        short = 's',
        long,
        visible_alias = "startframe",
        value_name = "FRAME",
        allow_negative_numbers = true,
        value_parser = frame_arg
    )]
    pub start: Option<i64>,

    /// Last frame to run (inclusive). Only applies to top-level tasks.
    #[arg(
        short = 'e',
        long,
        visible_alias = "endframe",
        value_name = "FRAME",
        allow_negative_numbers = true,
        value_parser = frame_arg
    )]
    pub end: Option<i64>,

    /// Submit to the farm scheduler instead of running commands locally.
    ///
    /// Overrides `mode` in the document's `[config]` section.
    #[arg(long)]
    pub sge: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DOJOB_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load, validate and resolve the document, print the jobs, run nothing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn frame_arg(s: &str) -> Result<i64, String> {
    parse_frame_bound(s).map_err(|e| e.to_string())
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_frame_range_and_aliases() {
        let args =
            CliArgs::try_parse_from(["dojob", "--startframe", "5", "-e", "20", "--sge", "job.toml"])
                .unwrap();
        assert_eq!(args.jobfile, "job.toml");
        assert_eq!(args.start, Some(5));
        assert_eq!(args.end, Some(20));
        assert!(args.sge);
        assert!(!args.dry_run);
    }

    #[test]
    fn rejects_non_numeric_frame() {
        let err = CliArgs::try_parse_from(["dojob", "--start", "ten", "job.toml"]).unwrap_err();
        assert!(err.to_string().contains("ten"));
    }
}
