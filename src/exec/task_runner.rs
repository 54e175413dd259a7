// src/exec/task_runner.rs

//! Runs one rendered command line as a child process.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{info, warn};

use crate::dag::JobDescriptor;

/// Run the job's command line through the platform shell and wait for it.
///
/// Child stdout is inherited so renderer progress reaches the terminal;
/// stderr is forwarded line by line into the log. Returns the exit code
/// (`-1` when the process was terminated by a signal).
pub async fn run_job(job: &JobDescriptor) -> Result<i32> {
    info!(job = %job.id, cmd = %job.command_line, "starting job process");

    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&job.command_line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&job.command_line);
        c
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process for job '{}'", job.id))?;

    let stderr_pump = child.stderr.take().map(|stderr| {
        let job_id = job.id.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                warn!(job = %job_id, "stderr: {}", line);
            }
        })
    });

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of job '{}'", job.id))?;

    if let Some(pump) = stderr_pump {
        let _ = pump.await;
    }

    let code = status.code().unwrap_or(-1);
    info!(
        job = %job.id,
        exit_code = code,
        success = status.success(),
        "job process exited"
    );
    Ok(code)
}
