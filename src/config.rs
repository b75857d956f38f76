use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::SweeprunError;

pub const DEFAULT_RESULTS_FILE: &str = "results.txt";
const CONFIG_FILE_NAME: &str = "sweeprun.toml";

/// On-disk config; every key is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub executable: Option<String>,
    pub results_file: Option<PathBuf>,
}

/// Effective settings after layering CLI flags over the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub executable: Option<String>,
    pub results_file: PathBuf,
}

impl Settings {
    /// CLI flags win over config-file keys; the results file falls back to
    /// `results.txt` in the working directory.
    pub fn merge(
        cli_executable: Option<String>,
        cli_results: Option<PathBuf>,
        file: ConfigFile,
    ) -> Self {
        Self {
            executable: cli_executable.or(file.executable),
            results_file: cli_results
                .or(file.results_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_FILE)),
        }
    }

    pub fn executable(&self) -> Result<&str, SweeprunError> {
        self.executable
            .as_deref()
            .ok_or(SweeprunError::ExecutableNotConfigured)
    }
}

/// Locate the config file: `sweeprun.toml` in the working directory wins,
/// else `<user config dir>/sweeprun/config.toml`. `None` when neither exists.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    let user = dirs::config_dir()?.join("sweeprun").join("config.toml");
    user.is_file().then_some(user)
}

pub fn load_config_file(path: &Path) -> Result<ConfigFile, SweeprunError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SweeprunError::ConfigReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&contents).map_err(|e| SweeprunError::ConfigParseError {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

/// Resolve effective settings for this invocation.
pub fn resolve(
    cli_executable: Option<String>,
    cli_results: Option<PathBuf>,
) -> Result<Settings, SweeprunError> {
    let file = match find_config_file() {
        Some(path) => load_config_file(&path)?,
        None => ConfigFile::default(),
    };
    Ok(Settings::merge(cli_executable, cli_results, file))
}
