//! Trajectory types: the recorded steps of one solving session.

use serde::Deserialize;

use super::grid::Grid;

/// A highlighted cell: grid coordinates plus the color shown over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SelectedCell {
    pub x: usize,
    pub y: usize,
    pub color: u8,
}

/// One snapshot in a trajectory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionStep {
    /// Position in the trajectory, starting at 0.
    pub time: usize,
    pub grid: Grid,
    /// Cells selected at this point. May be empty.
    pub objects: Vec<SelectedCell>,
    /// The operation that produced this state.
    pub action: String,
}

/// One entry of a recorded action sequence, as stored in the source files.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedStep {
    pub grid: Grid,

    /// Absent and `null` both mean no selection.
    #[serde(default)]
    pub object: Option<Vec<SelectedCell>>,

    /// Absent and `null` both become an empty label.
    #[serde(default)]
    pub operation: Option<String>,
}

/// An ordered, non-empty sequence of action steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trajectory {
    steps: Vec<ActionStep>,
}

impl Trajectory {
    /// Builds a trajectory from recorded steps, numbering them by position.
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_recorded(recorded: Vec<RecordedStep>) -> Option<Self> {
        if recorded.is_empty() {
            return None;
        }
        let steps = recorded
            .into_iter()
            .enumerate()
            .map(|(time, step)| ActionStep {
                time,
                grid: step.grid,
                objects: step.object.unwrap_or_default(),
                action: step.operation.unwrap_or_default(),
            })
            .collect();
        Some(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Index of the final (submitted) step.
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn get(&self, step: usize) -> Option<&ActionStep> {
        self.steps.get(step)
    }
}

/// One recorded session for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Log {
    pub log_id: u64,
    /// 0 for failed attempts; higher is more efficient.
    pub score: i64,
    pub trajectory: Trajectory,
}
