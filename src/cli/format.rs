//! Output formatting for CLI display.

use std::fmt::Write;

use crate::index::{Index, Task};
use crate::model::Log;
use crate::parse::{DropReason, LoadReport};
use crate::playback::RenderedCell;
use crate::select::ScoreBand;

pub(super) fn format_task(task: &Task) -> String {
    match task.logs.first() {
        Some(best) => format!(
            "{}  {:>4} logs  best {}",
            task.id,
            task.logs.len(),
            best.score
        ),
        None => format!("{}  {:>4} logs", task.id, 0),
    }
}

pub(super) fn format_log(log: &Log) -> String {
    let steps = log.trajectory.len();
    let plural = if steps == 1 { "" } else { "s" };
    format!(
        "#{:<8} score {:>6}  {steps} step{plural}",
        log.log_id, log.score
    )
}

/// A grid as rows of digits. Selected cells are bracketed.
pub(super) fn format_grid(cells: &[Vec<RenderedCell>]) -> String {
    let mut out = String::new();
    for row in cells {
        let line: Vec<String> = row
            .iter()
            .map(|c| {
                if c.selected {
                    format!("[{}]", c.color)
                } else {
                    format!(" {} ", c.color)
                }
            })
            .collect();
        out.push_str(line.join("").trim_end());
        out.push('\n');
    }
    out
}

fn reason_label(reason: DropReason) -> &'static str {
    match reason {
        DropReason::Unreadable => "unreadable row",
        DropReason::MissingField => "missing field",
        DropReason::UnknownTask => "unknown task",
        DropReason::InvalidNumber => "invalid number",
        DropReason::ActionSequence => "bad action sequence",
        DropReason::EmptyTrajectory => "empty action sequence",
    }
}

pub(super) fn format_report(
    report: &LoadReport,
    index: &Index,
    bands: &[(ScoreBand, usize)],
) -> String {
    let with_logs = index.tasks().iter().filter(|t| !t.logs.is_empty()).count();

    let mut out = String::new();
    let _ = writeln!(out, "rows      {}", report.rows);
    let _ = writeln!(out, "admitted  {}", report.admitted);
    let _ = writeln!(out, "dropped   {}", report.dropped_total());
    for (reason, n) in &report.dropped {
        let _ = writeln!(out, "  {:<22}{n}", reason_label(*reason));
    }
    let _ = writeln!(
        out,
        "tasks     {} ({with_logs} with logs)",
        index.tasks().len()
    );
    for (band, n) in bands {
        let _ = writeln!(out, "  {:<22}{n}", format!("{band} band"));
    }
    out
}
