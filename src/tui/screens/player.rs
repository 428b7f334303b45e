//! Player: the puzzle, the current step, and the grid.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::index::Index;
use crate::layout::{self, LayoutParams, Viewport};
use crate::model::{Grid, Puzzle};
use crate::playback::{PlaybackSession, RenderedCell, overlay};
use crate::tui::grid::{self, ACCENT, GridView};

/// Largest edge of a puzzle preview grid, in layout units.
const PREVIEW_MAX: u32 = 5;

/// Columns between preview grids.
const PREVIEW_SPACING: u16 = 3;

/// What the player shows when there's no grid.
pub enum Status<'a> {
    Loading,
    Failed(&'a str),
    Ready,
}

pub struct Player<'a> {
    pub index: &'a Index,
    pub session: &'a PlaybackSession,
    pub status: Status<'a>,
    pub puzzle: Option<&'a Puzzle>,
    pub show_puzzle: bool,
    pub params: LayoutParams,
}

impl Player<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().padding(Padding::new(2, 2, 1, 0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let muted = Style::default().fg(Color::DarkGray);

        if let Some(message) = self.placeholder() {
            let text = Paragraph::new(message)
                .style(muted)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            let middle = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(3),
                Constraint::Fill(1),
            ])
            .split(inner)[1];
            frame.render_widget(text, middle);
            return;
        }

        let previews = self.previews();
        let puzzle_height = match &previews {
            Some(previews) if self.show_puzzle => {
                previews.iter().map(|p| p.height).max().unwrap_or(0) + 2
            }
            _ => 0,
        };
        let complete = self.session.is_complete(self.index);

        let chunks = Layout::vertical([
            Constraint::Length(1),             // task line
            Constraint::Length(puzzle_height), // puzzle
            Constraint::Length(1),             // log line
            Constraint::Length(1),             // step line
            Constraint::Length(1),             // spacer
            Constraint::Min(0),                // grid
            Constraint::Length(if complete { 2 } else { 0 }),
        ])
        .split(inner);

        self.render_task_line(frame, chunks[0], previews.is_some());
        if let Some(previews) = &previews
            && self.show_puzzle
        {
            render_previews(frame, chunks[1], previews);
        }
        self.render_log_line(frame, chunks[2]);
        self.render_step_line(frame, chunks[3]);
        let reserved = inner.height.saturating_sub(chunks[5].height);
        self.render_grid(frame, grid::viewport(inner, reserved), chunks[5]);
        if complete {
            self.render_complete(frame, chunks[6]);
        }
    }

    fn placeholder(&self) -> Option<String> {
        match self.status {
            Status::Loading => return Some("Loading ARCTraj…".to_string()),
            Status::Failed(e) => return Some(format!("Failed to load: {e}\n\nR to retry")),
            Status::Ready => {}
        }
        if self.index.is_empty() {
            return Some("Nothing to show: no logs loaded.".to_string());
        }
        if self.session.task_id().is_none() {
            return Some("Select a task from the sidebar.".to_string());
        }
        None
    }

    fn render_task_line(&self, frame: &mut Frame, area: Rect, has_puzzle: bool) {
        let muted = Style::default().fg(Color::DarkGray);
        let task_id = self.session.task_id().unwrap_or_default();
        let mut spans = vec![
            Span::styled("Task ", muted),
            Span::styled(
                task_id.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ];
        if has_puzzle {
            let hint = if self.show_puzzle { "  t hide puzzle" } else { "  t show puzzle" };
            spans.push(Span::styled(hint, muted));
        } else if self.puzzle.is_none() {
            spans.push(Span::styled("  (no puzzle definition)", muted));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_log_line(&self, frame: &mut Frame, area: Rect) {
        let muted = Style::default().fg(Color::DarkGray);
        let line = match self.session.log(self.index) {
            Some(log) => Line::from(vec![
                Span::styled(format!("Log #{}", log.log_id), Style::default().fg(ACCENT)),
                Span::styled(format!(" (score: {})", log.score), muted),
                Span::styled("  [ ] switch log", muted),
            ]),
            None => Line::from(Span::styled("Select a log from the sidebar.", muted)),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_step_line(&self, frame: &mut Frame, area: Rect) {
        let (Some(trajectory), Some(step)) = (
            self.session.trajectory(self.index),
            self.session.current(self.index),
        ) else {
            return;
        };
        let muted = Style::default().fg(Color::DarkGray);
        let at_start = self.session.step() == 0;
        let at_end = self.session.step() == trajectory.last_index();
        let arrow = |label: &'static str, disabled: bool| {
            Span::styled(label, if disabled { muted } else { Style::default().fg(Color::White) })
        };
        let line = Line::from(vec![
            arrow("◀ ", at_start),
            Span::styled(
                format!("Step {}/{}", self.session.step() + 1, trajectory.len()),
                Style::default().fg(Color::White),
            ),
            Span::styled(" | ", muted),
            Span::styled(step.action.clone(), Style::default().fg(Color::Gray)),
            arrow(" ▶", at_end),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_grid(&self, frame: &mut Frame, viewport: Viewport, area: Rect) {
        let Some(step) = self.session.current(self.index) else {
            return;
        };
        let cells = overlay(step);
        let size = layout::cell_size(
            step.grid.cols(),
            step.grid.rows(),
            viewport.available(),
            self.params,
        );
        let size = u16::try_from(size).unwrap_or(u16::MAX);
        let gap = u16::try_from(self.params.gap).unwrap_or(0);
        let (width, height) = grid::footprint(step.grid.cols(), step.grid.rows(), size, gap);

        let grid_area = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y,
            width: width.min(area.width),
            height: height.min(area.height),
        };
        frame.render_widget(GridView::new(&cells, size, gap), grid_area);
    }

    fn render_complete(&self, frame: &mut Frame, area: Rect) {
        let key = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
        let text = Style::default().fg(Color::Gray);
        let line = Line::from(vec![
            Span::styled("r", key),
            Span::styled(" try another task   ", text),
            Span::styled("s", key),
            Span::styled(
                format!(" browse all {} tasks", self.index.tasks().len()),
                text,
            ),
        ]);
        let bottom = Rect {
            y: area.y + area.height.saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), bottom);
    }

    fn previews(&self) -> Option<Vec<Preview>> {
        let puzzle = self.puzzle?;
        let mut previews = Vec::new();
        for (i, pair) in puzzle.train.iter().enumerate() {
            previews.push(Preview::new(format!("in {}", i + 1), &pair.input));
            previews.push(Preview::new(format!("out {}", i + 1), &pair.output));
        }
        for (i, test) in puzzle.test.iter().enumerate() {
            previews.push(Preview::new(format!("test {}", i + 1), &test.input));
        }
        Some(previews)
    }
}

/// A labeled thumbnail in the puzzle strip.
struct Preview {
    label: String,
    cells: Vec<Vec<RenderedCell>>,
    size: u16,
    width: u16,
    height: u16,
}

impl Preview {
    fn new(label: String, grid: &Grid) -> Self {
        let (cells, size) = grid::thumbnail(grid, PREVIEW_MAX);
        let (width, height) = grid::footprint(grid.cols(), grid.rows(), size, 0);
        Self {
            label,
            cells,
            size,
            width,
            height,
        }
    }
}

/// Lays previews left to right, dropping the ones that don't fit.
fn render_previews(frame: &mut Frame, area: Rect, previews: &[Preview]) {
    let muted = Style::default().fg(Color::DarkGray);
    let mut x = area.x;
    for preview in previews {
        let width = preview.width.max(u16::try_from(preview.label.len()).unwrap_or(0));
        if x + width > area.right() {
            break;
        }
        frame.render_widget(
            Paragraph::new(Span::styled(preview.label.as_str(), muted)),
            Rect::new(x, area.y, width, 1),
        );
        let grid_area = Rect::new(
            x,
            area.y + 1,
            preview.width,
            preview.height.min(area.height.saturating_sub(1)),
        );
        frame.render_widget(GridView::new(&preview.cells, preview.size, 0), grid_area);
        x += width + PREVIEW_SPACING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::index::tests::record;
    use crate::playback::PlaybackEvent;
    use crate::tasks::TaskIds;

    fn screen_text(player: &Player) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                player.render(frame, area);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn player<'a>(index: &'a Index, session: &'a PlaybackSession, status: Status<'a>) -> Player<'a> {
        Player {
            index,
            session,
            status,
            puzzle: None,
            show_puzzle: true,
            params: LayoutParams::terminal(),
        }
    }

    #[test]
    fn loading_state() {
        let index = Index::default();
        let session = PlaybackSession::new();
        let text = screen_text(&player(&index, &session, Status::Loading));
        assert!(text.contains("Loading ARCTraj"));
    }

    #[test]
    fn empty_index_state() {
        let index = Index::default();
        let session = PlaybackSession::new();
        let text = screen_text(&player(&index, &session, Status::Ready));
        assert!(text.contains("Nothing to show"));
    }

    #[test]
    fn shows_step_and_completion_hint() {
        let index = Index::build(vec![record("t", 7, 90000)], &TaskIds::new(["t"]));
        let session = PlaybackSession::new()
            .apply(PlaybackEvent::PickTask("t".to_string()), &index)
            .apply(PlaybackEvent::PickLog(7), &index);

        let text = screen_text(&player(&index, &session, Status::Ready));
        assert!(text.contains("Log #7"));
        assert!(text.contains("Step 1/3 | op0"));
        assert!(!text.contains("try another"));

        let session = session.apply(PlaybackEvent::JumpToEnd, &index);
        let text = screen_text(&player(&index, &session, Status::Ready));
        assert!(text.contains("Step 3/3 | op2"));
        assert!(text.contains("try another task"));
        assert!(text.contains("browse all 1 tasks"));
    }

    #[test]
    fn puzzle_strip_labels() {
        let index = Index::build(vec![record("t", 7, 90000)], &TaskIds::new(["t"]));
        let session =
            PlaybackSession::new().apply(PlaybackEvent::PickTask("t".to_string()), &index);
        let puzzle: Puzzle = serde_json::from_str(
            r#"{"train":[{"input":[[1,2]],"output":[[2,1]]}],"test":[{"input":[[3]]}]}"#,
        )
        .unwrap();
        let mut view = player(&index, &session, Status::Ready);
        view.puzzle = Some(&puzzle);

        let text = screen_text(&view);
        assert!(text.contains("in 1"));
        assert!(text.contains("out 1"));
        assert!(text.contains("test 1"));
        assert!(text.contains("Select a log"));

        view.show_puzzle = false;
        let text = screen_text(&view);
        assert!(!text.contains("out 1"));
        assert!(text.contains("t show puzzle"));
    }
}
