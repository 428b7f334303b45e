//! Loading: fetch raw sources, parse them, and build the index.
//!
//! A source location is either a local path or an `http(s)://` URL.
//! Loads are all-or-nothing: the caller gets a complete [`Loaded`] or an
//! error, never a partial index.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::index::Index;
use crate::model::Puzzle;
use crate::parse::{LoadReport, parse_payloads};
use crate::tasks::TaskIds;

/// Errors that can occur while loading sources.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to set up HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

pub type Result<T> = core::result::Result<T, LoadError>;

/// Where a resource lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location<'a> {
    Url(&'a str),
    Path(&'a Path),
}

impl<'a> Location<'a> {
    pub fn parse(location: &'a str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location)
        } else {
            Self::Path(Path::new(location))
        }
    }
}

/// Reads text from paths and URLs.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(LoadError::Client)?;
        Ok(Self { client })
    }

    /// The full text at `location`. Non-success HTTP statuses are errors.
    pub fn text(&self, location: &str) -> Result<String> {
        match Location::parse(location) {
            Location::Path(path) => fs::read_to_string(path).map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            }),
            Location::Url(url) => {
                let http = |source| LoadError::Http {
                    url: url.to_string(),
                    source,
                };
                self.client
                    .get(url)
                    .send()
                    .and_then(reqwest::blocking::Response::error_for_status)
                    .and_then(reqwest::blocking::Response::text)
                    .map_err(http)
            }
        }
    }
}

/// A freshly built index and what happened to the rows behind it.
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub index: Index,
    pub report: LoadReport,
}

/// The canonical task ids: the configured file, or the training list.
pub fn task_ids(config: &Config) -> Result<TaskIds> {
    match &config.task_ids {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
                path: path.clone(),
                source,
            })?;
            Ok(TaskIds::parse(&text))
        }
        None => Ok(TaskIds::training()),
    }
}

/// Fetches every configured source in order and builds the index.
pub fn load(config: &Config, fetcher: &Fetcher) -> Result<Loaded> {
    let task_ids = task_ids(config)?;

    let payloads = config
        .sources
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|source| {
            debug!(%source, "fetching");
            fetcher.text(source.trim())
        })
        .collect::<Result<Vec<_>>>()?;

    let (records, report) = parse_payloads(&payloads, &task_ids);
    let index = Index::build(records, &task_ids);

    info!(
        sources = payloads.len(),
        rows = report.rows,
        admitted = report.admitted,
        dropped = report.dropped_total(),
        tasks = index.tasks().len(),
        "loaded trajectories"
    );

    Ok(Loaded { index, report })
}

/// Where puzzle definitions are fetched from, by task id.
#[derive(Debug, Clone)]
pub struct PuzzleSource {
    base: String,
    fetcher: Fetcher,
}

impl PuzzleSource {
    pub fn new(base: impl Into<String>, fetcher: Fetcher) -> Self {
        Self {
            base: base.into(),
            fetcher,
        }
    }

    /// The location of one task's definition.
    pub fn location(&self, task_id: &str) -> String {
        match Location::parse(&self.base) {
            Location::Url(url) => format!("{}/{task_id}.json", url.trim_end_matches('/')),
            Location::Path(dir) => dir.join(format!("{task_id}.json")).display().to_string(),
        }
    }

    /// The task's puzzle definition, or `None` if it can't be had.
    ///
    /// Failures are logged and never retried.
    pub fn fetch(&self, task_id: &str) -> Option<Puzzle> {
        let location = self.location(task_id);
        let text = match self.fetcher.text(&location) {
            Ok(text) => text,
            Err(e) => {
                warn!("puzzle definition unavailable: {e}");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(puzzle) => Some(puzzle),
            Err(e) => {
                warn!(task_id, "invalid puzzle definition: {e}");
                None
            }
        }
    }
}
