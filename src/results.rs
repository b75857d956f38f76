use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::errors::SweeprunError;

/// Append-only log of completed task results, shared across worker threads.
///
/// Each completed task contributes exactly one line `"<name>: <stdout>"`. The
/// mutex is held across the whole open-write sequence so sibling workers never
/// interleave partial lines.
pub struct ResultsLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ResultsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Task names already recorded: the prefix before the first colon of every
    /// line that has one. A missing file reads as an empty set (first run).
    pub fn completed_names(&self) -> Result<HashSet<String>, SweeprunError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => {
                return Err(SweeprunError::ResultsReadError {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        Ok(completed_names_in(&contents))
    }

    /// Append one result line under the shared lock.
    pub fn append(&self, name: &str, output: &str) -> Result<(), SweeprunError> {
        // A poisoned lock only means another worker panicked mid-task; the
        // file itself is still append-safe, so keep writing.
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let write = |path: &Path| -> std::io::Result<()> {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.write_all(format!("{}: {}\n", name, output).as_bytes())
        };

        write(&self.path).map_err(|e| SweeprunError::ResultsWriteError {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Extract the completion set from results-file contents. Lines without a
/// colon are ignored.
pub fn completed_names_in(contents: &str) -> HashSet<String> {
    contents
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(name, _)| name.to_string())
        .collect()
}
