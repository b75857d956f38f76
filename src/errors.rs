use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum SweeprunError {
    #[error(
        "No benchmark executable configured. Pass --executable or set `executable` in sweeprun.toml"
    )]
    ExecutableNotConfigured,

    #[error("Failed to read config file {path}: {source}")]
    ConfigReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {detail}")]
    ConfigParseError { path: PathBuf, detail: String },

    #[error("Failed to read results file {path}: {source}")]
    ResultsReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to append to results file {path}: {source}")]
    ResultsWriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to spawn shell for task {name}: {source}")]
    SpawnError {
        name: String,
        source: std::io::Error,
    },
}
