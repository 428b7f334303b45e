//! Record parsing: delimited-text rows into validated trajectory records.
//!
//! Every row becomes a `Result<Record, ParseError>`. Nothing is dropped here;
//! [`admit`] is the single place where failed rows are discarded and counted.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::model::{Log, RecordedStep, Trajectory};
use crate::tasks::TaskIds;

/// Why a row was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("row {row}: unreadable: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("row {row}: missing {field}")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: unknown task {task_id:?}")]
    UnknownTask { row: usize, task_id: String },

    #[error("row {row}: {field} is not an integer: {value:?}")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("row {row}: bad action sequence: {source}")]
    ActionSequence {
        row: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("row {row}: action sequence is empty")]
    EmptyTrajectory { row: usize },
}

/// Rejection reasons without row details, for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DropReason {
    Unreadable,
    MissingField,
    UnknownTask,
    InvalidNumber,
    ActionSequence,
    EmptyTrajectory,
}

impl ParseError {
    pub fn reason(&self) -> DropReason {
        match self {
            Self::Csv { .. } => DropReason::Unreadable,
            Self::MissingField { .. } => DropReason::MissingField,
            Self::UnknownTask { .. } => DropReason::UnknownTask,
            Self::InvalidNumber { .. } => DropReason::InvalidNumber,
            Self::ActionSequence { .. } => DropReason::ActionSequence,
            Self::EmptyTrajectory { .. } => DropReason::EmptyTrajectory,
        }
    }
}

/// A validated row: which task it belongs to and the recorded session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub task_id: String,
    pub log: Log,
}

/// A row as it appears in the source file. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "taskId", default)]
    task_id: Option<String>,

    #[serde(rename = "logId", default)]
    log_id: Option<String>,

    #[serde(default)]
    score: Option<String>,

    #[serde(rename = "actionSequence", default)]
    action_sequence: Option<String>,
}

/// Parses one CSV payload with a header row.
///
/// Rows are numbered from 1, not counting the header.
pub fn parse_rows<'a>(
    text: &'a str,
    task_ids: &'a TaskIds,
) -> impl Iterator<Item = Result<Record, ParseError>> + 'a {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes())
        .into_deserialize::<RawRow>()
        .enumerate()
        .map(move |(i, raw)| {
            let row = i + 1;
            let raw = raw.map_err(|source| ParseError::Csv { row, source })?;
            validate_row(row, raw, task_ids)
        })
}

fn validate_row(row: usize, raw: RawRow, task_ids: &TaskIds) -> Result<Record, ParseError> {
    let task_id = required(row, "taskId", raw.task_id)?;
    let log_id = required(row, "logId", raw.log_id)?;
    let score = required(row, "score", raw.score)?;
    let action_sequence = required(row, "actionSequence", raw.action_sequence)?;

    let task_id = task_id.trim();
    if !task_ids.contains(task_id) {
        return Err(ParseError::UnknownTask {
            row,
            task_id: task_id.to_string(),
        });
    }

    let log_id = integer(row, "logId", &log_id)?;
    let score = integer(row, "score", &score)?;

    let recorded: Vec<RecordedStep> = serde_json::from_str(&action_sequence)
        .map_err(|source| ParseError::ActionSequence { row, source })?;
    let trajectory =
        Trajectory::from_recorded(recorded).ok_or(ParseError::EmptyTrajectory { row })?;

    Ok(Record {
        task_id: task_id.to_string(),
        log: Log {
            log_id,
            score,
            trajectory,
        },
    })
}

fn required(row: usize, field: &'static str, value: Option<String>) -> Result<String, ParseError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ParseError::MissingField { row, field }),
    }
}

fn integer<T: FromStr>(row: usize, field: &'static str, value: &str) -> Result<T, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidNumber {
        row,
        field,
        value: value.to_string(),
    })
}

/// What happened to the rows of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows: usize,
    pub admitted: usize,
    pub dropped: BTreeMap<DropReason, usize>,
}

impl LoadReport {
    pub fn dropped_total(&self) -> usize {
        self.dropped.values().sum()
    }
}

/// Keeps the valid records and discards the rest, counting each reason.
pub fn admit(
    rows: impl IntoIterator<Item = Result<Record, ParseError>>,
    report: &mut LoadReport,
) -> Vec<Record> {
    let mut records = Vec::new();
    for row in rows {
        report.rows += 1;
        match row {
            Ok(record) => {
                report.admitted += 1;
                records.push(record);
            }
            Err(e) => {
                debug!("dropping {e}");
                *report.dropped.entry(e.reason()).or_default() += 1;
            }
        }
    }
    records
}

/// Parses several payloads in order and concatenates their valid records.
///
/// Duplicate `(taskId, logId)` pairs across payloads are all kept.
pub fn parse_payloads<S: AsRef<str>>(
    payloads: &[S],
    task_ids: &TaskIds,
) -> (Vec<Record>, LoadReport) {
    let mut report = LoadReport::default();
    let mut records = Vec::new();
    for payload in payloads {
        records.extend(admit(parse_rows(payload.as_ref(), task_ids), &mut report));
    }
    (records, report)
}
