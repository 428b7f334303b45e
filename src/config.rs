//! arctraj configuration.
//!
//! Loaded from `~/.arctraj/config.toml`, or from the path given with
//! `--config`. A missing default file means defaults; a missing explicit
//! file is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::layout::LayoutParams;

/// Where ARC task definitions are published.
pub const ARC_TRAINING_URL: &str =
    "https://raw.githubusercontent.com/fchollet/ARC-AGI/master/data/training";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no trajectory sources configured")]
    NoSources,

    #[error("invalid [layout]: {0}")]
    Layout(String),
}

/// arctraj configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// CSV files of recorded sessions: local paths or `http(s)://` URLs.
    pub sources: Vec<String>,

    /// Base location of `<task-id>.json` puzzle definitions: a directory
    /// or a URL. `None` disables puzzle previews.
    pub puzzles: Option<String>,

    /// Newline-separated task ids replacing the built-in training list.
    pub task_ids: Option<PathBuf>,

    /// Fixed seed for random selection.
    pub seed: Option<u64>,

    /// Grid cell sizing in the terminal.
    pub layout: Option<LayoutParams>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: (1..=3)
                .map(|n| format!("data/ARCTraj_with_scores_{n:02}.csv"))
                .collect(),
            puzzles: Some(ARC_TRAINING_URL.to_string()),
            task_ids: None,
            seed: None,
            layout: None,
        }
    }
}

impl Config {
    /// Load config from `explicit`, or from the default path if it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        match Self::path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    /// The default config file path: `~/.arctraj/config.toml`.
    pub fn path() -> Option<PathBuf> {
        home_dir().map(|h| h.join("config.toml"))
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replace configured values with command-line overrides.
    pub fn with_overrides(mut self, sources: Vec<String>, seed: Option<u64>) -> Self {
        if !sources.is_empty() {
            self.sources = sources;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Ensure there is something to load.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.iter().all(|s| s.trim().is_empty()) {
            return Err(ConfigError::NoSources);
        }
        if let Some(layout) = self.layout {
            validate_layout(layout)?;
        }
        Ok(())
    }

    pub fn layout(&self) -> LayoutParams {
        self.layout.unwrap_or_else(LayoutParams::terminal)
    }
}

/// Cell sizes are drawn in terminal rows, so every value must fit in a `u16`.
fn validate_layout(layout: LayoutParams) -> Result<(), ConfigError> {
    let limit = u32::from(u16::MAX);
    for (key, value) in [
        ("gap", layout.gap),
        ("min-cell", layout.min_cell),
        ("max-cell", layout.max_cell),
    ] {
        if value > limit {
            return Err(ConfigError::Layout(format!(
                "{key} = {value} exceeds {limit}"
            )));
        }
    }
    if layout.min_cell > layout.max_cell {
        return Err(ConfigError::Layout(format!(
            "min-cell = {} is larger than max-cell = {}",
            layout.min_cell, layout.max_cell
        )));
    }
    Ok(())
}

/// The arctraj home directory: `~/.arctraj/`.
pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".arctraj"))
}
