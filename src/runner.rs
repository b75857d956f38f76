use std::collections::VecDeque;
use std::process::Command;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use owo_colors::{OwoColorize, Stream};

use crate::errors::SweeprunError;
use crate::results::ResultsLog;
use crate::types::{Task, shell_escape_single_quote};

/// Outcome of a `run` invocation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub skipped: usize,
}

/// Shell out for one task and record its stdout.
///
/// The executable path is single-quote escaped; the task's argument string is
/// passed through the shell verbatim. Exit status is deliberately ignored:
/// whatever the subprocess printed (possibly nothing) is the result. Invalid
/// UTF-8 is replaced rather than rejected, and trailing whitespace is trimmed
/// so a final newline from the executable cannot split the record.
pub fn run_task(task: &Task, executable: &str, log: &ResultsLog) -> Result<(), SweeprunError> {
    println!(
        "{} {}",
        "now running:".if_supports_color(Stream::Stdout, |s| s.cyan()),
        task.name
    );

    let shell_line = format!("{} {}", shell_escape_single_quote(executable), task.command);
    let output = Command::new("sh")
        .arg("-c")
        .arg(&shell_line)
        .output()
        .map_err(|e| SweeprunError::SpawnError {
            name: task.name.clone(),
            source: e,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    log.append(&task.name, stdout.trim_end())?;

    println!(
        "task {} {}",
        task.name,
        "done!".if_supports_color(Stream::Stdout, |s| s.green())
    );
    Ok(())
}

/// Execute every task not already present in the results file.
///
/// `jobs == 0` reproduces the historical behavior: one thread per pending
/// task, all spawned immediately. A positive `jobs` bounds concurrency with
/// that many workers draining a shared queue. Either way all workers are
/// joined before returning; there is no cancellation or timeout, so a hung
/// subprocess hangs its worker indefinitely.
pub fn run_pending(
    tasks: &[Task],
    executable: &str,
    log: Arc<ResultsLog>,
    jobs: usize,
) -> Result<RunSummary, SweeprunError> {
    let completed = log.completed_names()?;
    let pending: Vec<Task> = tasks
        .iter()
        .filter(|t| !completed.contains(&t.name))
        .cloned()
        .collect();

    let summary = RunSummary {
        executed: pending.len(),
        skipped: tasks.len() - pending.len(),
    };

    let executable: Arc<str> = Arc::from(executable);
    if jobs == 0 {
        spawn_unbounded(pending, executable, log);
    } else {
        spawn_pool(pending, executable, log, jobs);
    }

    Ok(summary)
}

fn spawn_unbounded(pending: Vec<Task>, executable: Arc<str>, log: Arc<ResultsLog>) {
    let mut handles = Vec::with_capacity(pending.len());
    for task in pending {
        let executable = Arc::clone(&executable);
        let log = Arc::clone(&log);
        handles.push(thread::spawn(move || {
            if let Err(err) = run_task(&task, &executable, &log) {
                eprintln!("task {} failed: {}", task.name, err);
            }
        }));
    }
    for handle in handles {
        let _ = handle.join();
    }
}

fn spawn_pool(pending: Vec<Task>, executable: Arc<str>, log: Arc<ResultsLog>, jobs: usize) {
    let queue: Arc<Mutex<VecDeque<Task>>> = Arc::new(Mutex::new(pending.into()));
    let mut handles = Vec::with_capacity(jobs);
    for _ in 0..jobs {
        let queue = Arc::clone(&queue);
        let executable = Arc::clone(&executable);
        let log = Arc::clone(&log);
        handles.push(thread::spawn(move || {
            loop {
                let task = queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();
                let Some(task) = task else { break };
                if let Err(err) = run_task(&task, &executable, &log) {
                    eprintln!("task {} failed: {}", task.name, err);
                }
            }
        }));
    }
    for handle in handles {
        let _ = handle.join();
    }
}
