//! Sidebar: every task, with the selected one expanded to its logs.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::index::Index;
use crate::model::Puzzle;
use crate::playback::{PlaybackEvent, PlaybackSession};
use crate::tui::grid::{self, ACCENT, GridView};

/// Largest edge of the sidebar puzzle preview, in layout units.
const THUMBNAIL_MAX: u32 = 6;

/// One line of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Task(usize),
    Log { task: usize, log: usize },
}

/// The rows on display: tasks in canonical order, with the selected task's
/// logs listed under it.
pub fn rows(index: &Index, session: &PlaybackSession) -> Vec<Row> {
    let mut rows = Vec::new();
    for (t, task) in index.tasks().iter().enumerate() {
        rows.push(Row::Task(t));
        if session.task_id() == Some(task.id.as_str()) {
            rows.extend((0..task.logs.len()).map(|log| Row::Log { task: t, log }));
        }
    }
    rows
}

#[derive(Default)]
pub struct Sidebar {
    list: ListState,
}

impl Sidebar {
    pub fn cursor(&self) -> usize {
        self.list.selected().unwrap_or(0)
    }

    pub fn move_up(&mut self) {
        let cursor = self.cursor();
        self.list.select(Some(cursor.saturating_sub(1)));
    }

    pub fn move_down(&mut self, len: usize) {
        let cursor = self.cursor();
        if cursor + 1 < len {
            self.list.select(Some(cursor + 1));
        }
    }

    /// Puts the cursor on the session's log, or on its task without one.
    pub fn focus(&mut self, rows: &[Row], index: &Index, session: &PlaybackSession) {
        let Some(task_id) = session.task_id() else {
            return;
        };
        let position = rows.iter().position(|row| match *row {
            Row::Task(t) => session.log_id().is_none() && index.tasks()[t].id == task_id,
            Row::Log { task, log } => {
                index.tasks()[task].id == task_id && session.log_position() == Some(log)
            }
        });
        if let Some(position) = position {
            self.list.select(Some(position));
        }
    }

    pub fn reset(&mut self) {
        self.list = ListState::default();
    }

    /// What Enter on the current row means.
    pub fn pick(&self, rows: &[Row], index: &Index) -> Option<PlaybackEvent> {
        match *rows.get(self.cursor())? {
            Row::Task(t) => Some(PlaybackEvent::PickTask(index.tasks()[t].id.clone())),
            Row::Log { log, .. } => Some(PlaybackEvent::PickLogAt(log)),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        index: &Index,
        session: &PlaybackSession,
        puzzle: Option<&Puzzle>,
    ) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                format!(" Tasks ({}) ", index.tasks().len()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let preview = puzzle.and_then(|p| p.train.first()).map(|pair| {
            let (cells, size) = grid::thumbnail(&pair.input, THUMBNAIL_MAX);
            let (w, h) = grid::footprint(pair.input.cols(), pair.input.rows(), size, 0);
            (cells, size, w, h)
        });
        let preview_height = preview.as_ref().map_or(0, |p| p.3 + 2);

        let chunks = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(preview_height),
        ])
        .split(inner);

        let rows = rows(index, session);
        let muted = Style::default().fg(Color::DarkGray);
        let normal = Style::default().fg(Color::Gray);
        let chosen = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);

        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| match *row {
                Row::Task(t) => {
                    let task = &index.tasks()[t];
                    let selected = session.task_id() == Some(task.id.as_str());
                    let style = if selected {
                        chosen
                    } else if task.logs.is_empty() {
                        muted
                    } else {
                        normal
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(task.id.clone(), style),
                        Span::styled(format!(" ({})", task.logs.len()), muted),
                    ]))
                }
                Row::Log { task, log: pos } => {
                    let log = &index.tasks()[task].logs[pos];
                    let style = if session.log_position() == Some(pos) {
                        chosen
                    } else {
                        normal
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("  log #{}", log.log_id), style),
                        Span::styled(format!(" (score: {})", log.score), muted),
                    ]))
                }
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::Rgb(0x2A, 0x2F, 0x2E)))
            .highlight_symbol("› ");
        frame.render_stateful_widget(list, chunks[0], &mut self.list);

        if let Some((cells, size, w, h)) = preview {
            let area = chunks[1];
            frame.render_widget(
                Paragraph::new(Span::styled("first train input", muted)),
                Rect { height: 1, ..area },
            );
            let grid_area = Rect {
                x: area.x,
                y: area.y + 1,
                width: w.min(area.width),
                height: h.min(area.height.saturating_sub(1)),
            };
            frame.render_widget(GridView::new(&cells, size, 0), grid_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::index::tests::record;
    use crate::tasks::TaskIds;

    fn index() -> Index {
        let ids = TaskIds::new(["a", "b", "c"]);
        Index::build(
            vec![record("b", 1, 10), record("b", 2, 20), record("c", 3, 30)],
            &ids,
        )
    }

    #[test]
    fn selected_task_expands() {
        let index = index();
        let collapsed = rows(&index, &PlaybackSession::new());
        assert_eq!(collapsed, vec![Row::Task(0), Row::Task(1), Row::Task(2)]);

        let session =
            PlaybackSession::new().apply(PlaybackEvent::PickTask("b".to_string()), &index);
        assert_eq!(
            rows(&index, &session),
            vec![
                Row::Task(0),
                Row::Task(1),
                Row::Log { task: 1, log: 0 },
                Row::Log { task: 1, log: 1 },
                Row::Task(2),
            ]
        );
    }

    #[test]
    fn enter_picks_row_under_cursor() {
        let index = index();
        let mut sidebar = Sidebar::default();
        let rows0 = rows(&index, &PlaybackSession::new());
        sidebar.move_down(rows0.len());
        assert_eq!(
            sidebar.pick(&rows0, &index),
            Some(PlaybackEvent::PickTask("b".to_string()))
        );

        let session =
            PlaybackSession::new().apply(PlaybackEvent::PickTask("b".to_string()), &index);
        let rows1 = rows(&index, &session);
        sidebar.move_down(rows1.len());
        // Logs are sorted best first, so the first row under "b" is log 2.
        let pick = sidebar.pick(&rows1, &index);
        assert_eq!(pick, Some(PlaybackEvent::PickLogAt(0)));
        let picked = session.apply(pick.unwrap(), &index);
        assert_eq!(picked.log_id(), Some(2));
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut sidebar = Sidebar::default();
        sidebar.move_up();
        assert_eq!(sidebar.cursor(), 0);
        sidebar.move_down(2);
        sidebar.move_down(2);
        assert_eq!(sidebar.cursor(), 1);
    }

    #[test]
    fn focus_follows_session() {
        let index = index();
        let session = PlaybackSession::new()
            .apply(PlaybackEvent::PickTask("b".to_string()), &index)
            .apply(PlaybackEvent::PickLog(1), &index);
        let rows = rows(&index, &session);
        let mut sidebar = Sidebar::default();

        sidebar.focus(&rows, &index, &session);
        assert_eq!(sidebar.cursor(), 3);

        let task_only =
            PlaybackSession::new().apply(PlaybackEvent::PickTask("c".to_string()), &index);
        let rows = super::rows(&index, &task_only);
        sidebar.focus(&rows, &index, &task_only);
        assert_eq!(sidebar.cursor(), 2);
    }

    #[test]
    fn focus_lands_on_the_picked_copy_of_a_repeated_id() {
        let index = Index::build(
            vec![record("a", 7, 30), record("a", 7, 20), record("a", 9, 10)],
            &TaskIds::new(["a"]),
        );
        let session = PlaybackSession::new()
            .apply(PlaybackEvent::PickTask("a".to_string()), &index)
            .apply(PlaybackEvent::PickLogAt(1), &index);
        let rows = rows(&index, &session);
        let mut sidebar = Sidebar::default();

        sidebar.focus(&rows, &index, &session);
        assert_eq!(sidebar.cursor(), 2);
        assert_eq!(
            sidebar.pick(&rows, &index),
            Some(PlaybackEvent::PickLogAt(1))
        );
    }
}
