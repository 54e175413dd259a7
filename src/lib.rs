// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::JobDocument;
use crate::dag::{FrameFilter, JobPlan, resolve_document};
use crate::exec::{CommandBuilder, ProcessSubmitter, submit_plan};
use crate::types::SubmitMode;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - job document loading and validation
/// - frame filter and command rendering mode
/// - dependency resolution
/// - sequential submission (or the dry-run listing)
pub async fn run(args: CliArgs) -> Result<()> {
    let path = PathBuf::from(&args.jobfile);
    let doc = load_and_validate(&path)?;
    info!(title = %doc.title, "running commands for job document");

    let filter = FrameFilter::new(args.start, args.end);
    if filter.is_empty_range() {
        warn!(
            start = ?filter.start,
            end = ?filter.end,
            "frame range is empty; every framed top-level task will be skipped"
        );
    }

    let mode = effective_mode(&doc, args.sge);
    let builder = CommandBuilder::new(mode, doc.config.clone());
    let plan = resolve_document(&doc, &filter, &builder)?;

    if args.dry_run {
        print_dry_run(&doc, mode, &filter, &plan);
        return Ok(());
    }

    if plan.is_empty() {
        warn!("no jobs to submit");
        return Ok(());
    }

    let mut submitter = ProcessSubmitter::new();
    submit_plan(&plan, &mut submitter).await?;
    Ok(())
}

/// `--sge` forces distributed mode; otherwise the document decides.
pub fn effective_mode(doc: &JobDocument, force_distributed: bool) -> SubmitMode {
    if force_distributed {
        SubmitMode::Distributed
    } else {
        doc.config.mode
    }
}

/// Dry-run output: every job with its holds and rendered command.
fn print_dry_run(doc: &JobDocument, mode: SubmitMode, filter: &FrameFilter, plan: &JobPlan) {
    println!("dojob dry-run: {}", doc.title);
    println!("  mode = {mode}");
    println!(
        "  frames = {}..{}",
        filter.start.map_or_else(|| "*".to_string(), |s| s.to_string()),
        filter.end.map_or_else(|| "*".to_string(), |e| e.to_string())
    );
    println!();

    let dependents = plan.dependents();
    println!("jobs ({}):", plan.len());
    for job in plan {
        println!("  - {} (task {})", job.id, job.task);
        println!("      cmd: {}", job.command_line);
        if !job.holds.is_empty() {
            let holds: Vec<&str> = job.holds.iter().map(|h| h.as_str()).collect();
            println!("      holds: {}", holds.join(", "));
        }
        let released = dependents
            .get(job.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default();
        if !released.is_empty() {
            println!("      releases: {}", released.join(", "));
        }
    }

    debug!("dry-run complete (no execution)");
}
