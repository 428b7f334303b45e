//! Task index: logs grouped by task, in canonical task order.

use std::collections::HashMap;

use crate::model::Log;
use crate::parse::Record;
use crate::tasks::TaskIds;

/// A task and its recorded sessions, best score first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub logs: Vec<Log>,
}

impl Task {
    /// Finds a log by id. With duplicate ids, the first in sorted order wins.
    pub fn log(&self, log_id: u64) -> Option<&Log> {
        self.logs.iter().find(|l| l.log_id == log_id)
    }

    /// Position of a log in `logs`, by the same rule as [`Task::log`].
    pub fn position(&self, log_id: u64) -> Option<usize> {
        self.logs.iter().position(|l| l.log_id == log_id)
    }
}

/// Every canonical task, in canonical order, including tasks with no logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    tasks: Vec<Task>,
}

impl Index {
    /// Groups records by task and sorts each group by descending score.
    ///
    /// Ties keep arrival order. Records for ids outside `task_ids` are ignored;
    /// the parser has already rejected them.
    pub fn build(records: Vec<Record>, task_ids: &TaskIds) -> Self {
        let mut grouped: HashMap<String, Vec<Log>> = HashMap::new();
        for record in records {
            grouped.entry(record.task_id).or_default().push(record.log);
        }

        let tasks = task_ids
            .iter()
            .map(|id| {
                let mut logs = grouped.remove(id).unwrap_or_default();
                // `sort_by` is stable.
                logs.sort_by(|a, b| b.score.cmp(&a.score));
                Task {
                    id: id.to_string(),
                    logs,
                }
            })
            .collect();

        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn log(&self, task_id: &str, log_id: u64) -> Option<&Log> {
        self.task(task_id)?.log(log_id)
    }

    /// Every log paired with its task id, in index order.
    pub fn logs(&self) -> impl Iterator<Item = (&str, &Log)> {
        self.tasks
            .iter()
            .flat_map(|t| t.logs.iter().map(move |l| (t.id.as_str(), l)))
    }

    pub fn log_count(&self) -> usize {
        self.tasks.iter().map(|t| t.logs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.log_count() == 0
    }
}
