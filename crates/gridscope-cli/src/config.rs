//! Configuration file.
//!
//! Settings are read from YAML. Every key is optional:
//!
//! ```yaml
//! page_size: 20
//! log_level: info
//! locale:
//!   yes: "はい"
//!   no: "いいえ"
//!   datetime_format: "%Y-%m-%d %H:%M"
//!   time_zone: "+09:00"
//! ```
//!
//! An explicitly named file (`--config` or `GRIDSCOPE_CONFIG`) must exist.
//! Otherwise `gridscope.yaml` in the working directory is used when
//! present, and built-in defaults when not.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use gridscope_host::SESSION_PAGE_SIZE;
use gridscope_seeker::Locale;
use serde::{Deserialize, Serialize};

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "gridscope.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Records per page of `table` output.
    pub page_size: usize,
    pub locale: Locale,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            page_size: SESSION_PAGE_SIZE,
            locale: Locale::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration, searching the process working directory.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Config> {
        let cwd = std::env::current_dir().context("cannot determine working directory")?;
        Config::load_from(explicit, &cwd)
    }

    /// Loads the configuration, searching `dir` when no file is named.
    pub fn load_from(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Config> {
        match config_path(explicit, dir) {
            Some(path) => Config::read(&path),
            None => Ok(Config::default()),
        }
    }

    /// Parses a YAML document. An empty document yields the defaults.
    pub fn parse(text: &str) -> anyhow::Result<Config> {
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(text)?;
        if config.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        Ok(config)
    }

    fn read(path: &Path) -> anyhow::Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config = Config::parse(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

/// Resolves which file to read, if any.
///
/// A named file is returned even when missing so reading it reports the
/// error; the working-directory file only when it exists.
pub fn config_path(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = dir.join(CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}
