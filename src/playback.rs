//! Playback: which log is on screen and which step of it.
//!
//! A [`PlaybackSession`] is a plain value. Every input becomes a
//! [`PlaybackEvent`], and [`PlaybackSession::apply`] returns the next session
//! without touching the index.

use crate::index::{Index, Task};
use crate::model::{ActionStep, Log, Trajectory};
use crate::select::Selection;

/// Something the user (or the selector) asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Show a selector result from its first step.
    Select(Selection),
    /// Pick a task. Picking the selected task again deselects it.
    PickTask(String),
    /// Pick a log within the selected task by id. With duplicate ids, the
    /// first in sorted order is picked.
    PickLog(u64),
    /// Pick a log by its position in the selected task.
    PickLogAt(usize),
    StepForward,
    StepBackward,
    JumpToStart,
    JumpToEnd,
    /// Go to a step, clamped to the trajectory.
    Seek(usize),
}

/// The current selection and step cursor.
///
/// The cursor only means something while both a task and a log are selected.
/// The log is held by position so that duplicate ids stay distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackSession {
    task_id: Option<String>,
    log_id: Option<u64>,
    log_pos: Option<usize>,
    step: usize,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn log_id(&self) -> Option<u64> {
        self.log_id
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Position of the selected log within its task.
    pub fn log_position(&self) -> Option<usize> {
        self.log_pos
    }

    /// Nothing selected.
    pub fn is_empty(&self) -> bool {
        self.task_id.is_none() && self.log_id.is_none()
    }

    /// The next session after `event`.
    #[must_use]
    pub fn apply(self, event: PlaybackEvent, index: &Index) -> Self {
        match event {
            PlaybackEvent::Select(selection) => {
                let log_pos = index
                    .task(&selection.task_id)
                    .and_then(|t| t.position(selection.log_id));
                Self {
                    task_id: Some(selection.task_id),
                    log_id: Some(selection.log_id),
                    log_pos,
                    step: 0,
                }
            }
            PlaybackEvent::PickTask(id) => {
                if self.task_id.as_deref() == Some(id.as_str()) {
                    Self::default()
                } else {
                    Self {
                        task_id: Some(id),
                        ..Self::default()
                    }
                }
            }
            PlaybackEvent::PickLog(log_id) => {
                if self.task_id.is_none() {
                    return self;
                }
                let log_pos = self.task(index).and_then(|t| t.position(log_id));
                Self {
                    log_id: Some(log_id),
                    log_pos,
                    step: 0,
                    ..self
                }
            }
            PlaybackEvent::PickLogAt(pos) => {
                let Some(log) = self.task(index).and_then(|t| t.logs.get(pos)) else {
                    return self;
                };
                Self {
                    log_id: Some(log.log_id),
                    log_pos: Some(pos),
                    step: 0,
                    ..self
                }
            }
            PlaybackEvent::StepForward => self.move_to(index, |step, last| (step + 1).min(last)),
            PlaybackEvent::StepBackward => self.move_to(index, |step, _| step.saturating_sub(1)),
            PlaybackEvent::JumpToStart => self.move_to(index, |_, _| 0),
            PlaybackEvent::JumpToEnd => self.move_to(index, |_, last| last),
            PlaybackEvent::Seek(step) => self.move_to(index, |_, _| step),
        }
    }

    /// Moves the cursor within the visible trajectory. No-op when none is visible.
    fn move_to(self, index: &Index, next: impl FnOnce(usize, usize) -> usize) -> Self {
        let Some(last) = self.trajectory(index).map(Trajectory::last_index) else {
            return self;
        };
        let step = next(self.step, last).min(last);
        Self { step, ..self }
    }

    pub fn task<'a>(&self, index: &'a Index) -> Option<&'a Task> {
        index.task(self.task_id.as_deref()?)
    }

    pub fn log<'a>(&self, index: &'a Index) -> Option<&'a Log> {
        self.task(index)?
            .logs
            .get(self.log_pos?)
            .filter(|log| Some(log.log_id) == self.log_id)
    }

    pub fn trajectory<'a>(&self, index: &'a Index) -> Option<&'a Trajectory> {
        self.log(index).map(|l| &l.trajectory)
    }

    /// The step on screen, if a trajectory is visible.
    pub fn current<'a>(&self, index: &'a Index) -> Option<&'a ActionStep> {
        self.trajectory(index)?.get(self.step)
    }

    /// Whether the last step of a multi-step trajectory is showing.
    ///
    /// Single-step trajectories never report completion.
    pub fn is_complete(&self, index: &Index) -> bool {
        self.trajectory(index)
            .is_some_and(|t| t.len() > 1 && self.step == t.last_index())
    }

    /// Position of the log before or after the selected one in its task,
    /// wrapping around.
    ///
    /// With no log selected, `offset > 0` picks the first and `offset < 0` the last.
    pub fn neighbor_log(&self, index: &Index, offset: isize) -> Option<usize> {
        let n = self.task(index)?.logs.len();
        if n == 0 {
            return None;
        }
        let pos = match self.log(index).and(self.log_pos) {
            Some(pos) => (pos.cast_signed() + offset).rem_euclid(n.cast_signed()).cast_unsigned(),
            None if offset < 0 => n - 1,
            None => 0,
        };
        Some(pos)
    }
}

/// A cell as drawn: its color and whether an object selection covers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedCell {
    pub color: u8,
    pub selected: bool,
}

/// A step's grid with its selected objects painted over it.
///
/// For each object, its color replaces the grid color at its coordinates.
/// When several objects share a cell the first one wins; objects outside the
/// grid are ignored.
pub fn overlay(step: &ActionStep) -> Vec<Vec<RenderedCell>> {
    let mut cells: Vec<Vec<RenderedCell>> = step
        .grid
        .iter_rows()
        .map(|row| {
            row.iter()
                .map(|&color| RenderedCell {
                    color,
                    selected: false,
                })
                .collect()
        })
        .collect();

    for object in step.objects.iter().rev() {
        if let Some(cell) = cells.get_mut(object.y).and_then(|r| r.get_mut(object.x)) {
            *cell = RenderedCell {
                color: object.color,
                selected: true,
            };
        }
    }
    cells
}

/// Maps a horizontal drag to a step.
///
/// Dragging left past `threshold` advances; dragging right goes back.
pub fn swipe(delta: i32, threshold: i32) -> Option<PlaybackEvent> {
    if delta < -threshold {
        Some(PlaybackEvent::StepForward)
    } else if delta > threshold {
        Some(PlaybackEvent::StepBackward)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use crate::index::tests::trajectory;
    use crate::model::RecordedStep;
    use crate::parse::Record;
    use crate::select::ScoreBand;
    use crate::tasks::TaskIds;

    /// Task "a" has logs 1 (3 steps) and 2 (1 step); task "b" has log 3 (5 steps).
    fn fixture() -> Index {
        let rec = |task: &str, log_id, score, len| Record {
            task_id: task.to_string(),
            log: Log {
                log_id,
                score,
                trajectory: trajectory(len),
            },
        };
        Index::build(
            vec![rec("a", 1, 90, 3), rec("a", 2, 80, 1), rec("b", 3, 70, 5)],
            &TaskIds::new(["a", "b", "c"]),
        )
    }

    fn selection(task: &str, log_id: u64) -> Selection {
        Selection {
            task_id: task.to_string(),
            log_id,
            score: 0,
            band: ScoreBand::All,
        }
    }

    fn run(index: &Index, events: impl IntoIterator<Item = PlaybackEvent>) -> PlaybackSession {
        events
            .into_iter()
            .fold(PlaybackSession::new(), |s, e| s.apply(e, index))
    }

    #[test]
    fn select_loads_at_first_step() {
        let index = fixture();
        let s = run(&index, [PlaybackEvent::Select(selection("b", 3))]);

        assert_eq!(s.task_id(), Some("b"));
        assert_eq!(s.log_id(), Some(3));
        assert_eq!(s.step(), 0);
        assert_eq!(s.current(&index).unwrap().time, 0);
    }

    #[test]
    fn step_forward_clamps_at_last_step() {
        let index = fixture();
        let mut s = run(&index, [PlaybackEvent::Select(selection("b", 3))]);
        for _ in 0..10 {
            s = s.apply(PlaybackEvent::StepForward, &index);
        }
        assert_eq!(s.step(), 4);
    }

    #[test]
    fn step_backward_stays_at_zero() {
        let index = fixture();
        let s = run(
            &index,
            [
                PlaybackEvent::Select(selection("b", 3)),
                PlaybackEvent::StepBackward,
            ],
        );
        assert_eq!(s.step(), 0);
    }

    #[test]
    fn stepping_without_trajectory_is_noop() {
        let index = fixture();
        let s = run(&index, [PlaybackEvent::StepForward]);
        assert_eq!(s, PlaybackSession::new());

        let s = run(
            &index,
            [PlaybackEvent::PickTask("a".into()), PlaybackEvent::StepForward],
        );
        assert_eq!(s.step(), 0);
        assert!(s.current(&index).is_none());
    }

    #[test]
    fn picking_selected_task_deselects() {
        let index = fixture();
        let s = run(
            &index,
            [
                PlaybackEvent::Select(selection("a", 1)),
                PlaybackEvent::StepForward,
                PlaybackEvent::PickTask("a".into()),
            ],
        );
        assert!(s.is_empty());
        assert_eq!(s.step(), 0);
    }

    #[test]
    fn switching_task_clears_log_and_cursor() {
        let index = fixture();
        let s = run(
            &index,
            [
                PlaybackEvent::Select(selection("a", 1)),
                PlaybackEvent::StepForward,
                PlaybackEvent::PickTask("b".into()),
            ],
        );
        assert_eq!(s.task_id(), Some("b"));
        assert_eq!(s.log_id(), None);
        assert_eq!(s.step(), 0);
        assert!(s.trajectory(&index).is_none());

        let s = s.apply(PlaybackEvent::PickLog(3), &index);
        assert_eq!(s.trajectory(&index).unwrap().len(), 5);
    }

    #[test]
    fn switching_log_resets_cursor() {
        let index = fixture();
        let s = run(
            &index,
            [
                PlaybackEvent::Select(selection("a", 1)),
                PlaybackEvent::StepForward,
                PlaybackEvent::StepForward,
                PlaybackEvent::PickLog(2),
            ],
        );
        assert_eq!(s.log_id(), Some(2));
        assert_eq!(s.step(), 0);
    }

    #[test]
    fn picking_log_without_task_is_ignored() {
        let index = fixture();
        let s = run(&index, [PlaybackEvent::PickLog(1)]);
        assert!(s.is_empty());
    }

    #[test]
    fn jumps() {
        let index = fixture();
        let s = run(
            &index,
            [PlaybackEvent::Select(selection("b", 3)), PlaybackEvent::JumpToEnd],
        );
        assert_eq!(s.step(), 4);
        assert_eq!(s.apply(PlaybackEvent::JumpToStart, &index).step(), 0);
    }

    #[test]
    fn seek_is_clamped() {
        let index = fixture();
        let s = run(&index, [PlaybackEvent::Select(selection("b", 3))]);
        assert_eq!(s.clone().apply(PlaybackEvent::Seek(2), &index).step(), 2);
        assert_eq!(s.apply(PlaybackEvent::Seek(99), &index).step(), 4);
    }

    #[test]
    fn completion_on_last_step_of_multi_step_trajectory() {
        let index = fixture();
        let s = run(&index, [PlaybackEvent::Select(selection("a", 1))]);
        assert!(!s.is_complete(&index));

        let s = s
            .apply(PlaybackEvent::StepForward, &index)
            .apply(PlaybackEvent::StepForward, &index);
        assert!(s.is_complete(&index));
    }

    #[test]
    fn single_step_trajectory_never_completes() {
        let index = fixture();
        let s = run(&index, [PlaybackEvent::Select(selection("a", 2))]);
        assert_eq!(s.step(), 0);
        assert!(!s.is_complete(&index));
        assert!(!s.apply(PlaybackEvent::StepForward, &index).is_complete(&index));
    }

    #[test]
    fn stale_selection_shows_nothing() {
        let index = fixture();
        let s = run(&index, [PlaybackEvent::Select(selection("c", 99))]);
        assert!(s.current(&index).is_none());
        assert!(!s.is_complete(&index));
    }

    #[test]
    fn neighbor_log_wraps() {
        let index = fixture();
        let s = run(&index, [PlaybackEvent::Select(selection("a", 1))]);
        assert_eq!(s.log_position(), Some(0));
        assert_eq!(s.neighbor_log(&index, 1), Some(1));
        assert_eq!(s.neighbor_log(&index, -1), Some(1));

        let s = run(&index, [PlaybackEvent::PickTask("a".into())]);
        assert_eq!(s.neighbor_log(&index, 1), Some(0));
        assert_eq!(s.neighbor_log(&index, -1), Some(1));

        let s = run(&index, [PlaybackEvent::PickTask("c".into())]);
        assert_eq!(s.neighbor_log(&index, 1), None);
    }

    #[test]
    fn cycling_visits_every_copy_of_a_duplicate_id() {
        let rec = |log_id, score| Record {
            task_id: "t".to_string(),
            log: Log {
                log_id,
                score,
                trajectory: trajectory(2),
            },
        };
        let index = Index::build(
            vec![rec(7, 90), rec(7, 80), rec(9, 70)],
            &TaskIds::new(["t"]),
        );

        let mut s = run(&index, [PlaybackEvent::Select(selection("t", 7))]);
        let mut seen = vec![(s.log_id(), s.log(&index).map(|l| l.score))];
        for _ in 0..3 {
            let pos = s.neighbor_log(&index, 1).unwrap();
            s = s.apply(PlaybackEvent::PickLogAt(pos), &index);
            seen.push((s.log_id(), s.log(&index).map(|l| l.score)));
        }
        assert_eq!(
            seen,
            [
                (Some(7), Some(90)),
                (Some(7), Some(80)),
                (Some(9), Some(70)),
                (Some(7), Some(90)),
            ]
        );

        let back = s.neighbor_log(&index, -1).unwrap();
        let s = s.apply(PlaybackEvent::PickLogAt(back), &index);
        assert_eq!(s.log(&index).map(|l| (l.log_id, l.score)), Some((9, 70)));
    }

    #[test]
    fn pick_log_at_out_of_range_is_ignored() {
        let index = fixture();
        let s = run(&index, [PlaybackEvent::PickTask("a".into())]);
        assert_eq!(s.clone().apply(PlaybackEvent::PickLogAt(5), &index), s);
        assert!(run(&index, [PlaybackEvent::PickLogAt(0)]).is_empty());
    }

    #[test]
    fn overlay_replaces_colors_at_object_cells() {
        let recorded: Vec<RecordedStep> = serde_json::from_str(
            r#"[{
                "grid": [[0, 0], [0, 5]],
                "object": [
                    {"x": 1, "y": 0, "color": 3},
                    {"x": 1, "y": 0, "color": 7},
                    {"x": 9, "y": 9, "color": 2}
                ],
                "operation": "Move"
            }]"#,
        )
        .unwrap();
        let trajectory = Trajectory::from_recorded(recorded).unwrap();
        let cells = overlay(trajectory.get(0).unwrap());

        assert_eq!(cells[0][0], RenderedCell { color: 0, selected: false });
        assert_eq!(cells[0][1], RenderedCell { color: 3, selected: true });
        assert_eq!(cells[1][1], RenderedCell { color: 5, selected: false });
    }

    #[test]
    fn swipe_thresholds() {
        assert_eq!(swipe(-51, 50), Some(PlaybackEvent::StepForward));
        assert_eq!(swipe(51, 50), Some(PlaybackEvent::StepBackward));
        assert_eq!(swipe(-50, 50), None);
        assert_eq!(swipe(50, 50), None);
    }

    proptest! {
        #[test]
        fn cursor_never_leaves_trajectory(forward in proptest::collection::vec(any::<bool>(), 0..40)) {
            let index = fixture();
            let mut s = run(&index, [PlaybackEvent::Select(selection("b", 3))]);
            for f in forward {
                let event = if f { PlaybackEvent::StepForward } else { PlaybackEvent::StepBackward };
                s = s.apply(event, &index);
                prop_assert!(s.step() <= 4);
            }
        }
    }
}
