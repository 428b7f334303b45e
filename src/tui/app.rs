//! Application loop: input, background work, and drawing.

use std::io;
use std::mem;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use rand::rngs::SmallRng;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};
use tracing::{debug, info};

use crate::config::Config;
use crate::playback::{PlaybackEvent, PlaybackSession, swipe};
use crate::select;
use crate::source::{Fetcher, Loaded, PuzzleSource};

use super::feed::{LoadState, PuzzleFeed};
use super::screens::{Player, Sidebar, Status, rows};

/// How long to wait for input before checking on background work.
const TICK: Duration = Duration::from_millis(100);

const SIDEBAR_WIDTH: u16 = 34;

/// Columns a mouse drag must cover to count as a swipe.
const SWIPE_THRESHOLD: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Runs the player until the user quits.
pub fn run(config: Config) -> io::Result<()> {
    let fetcher = Fetcher::new().map_err(io::Error::other)?;
    let mut app = App::new(config, fetcher);

    let mut terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture)
        .and_then(|()| app.event_loop(&mut terminal));
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

struct App {
    config: Config,
    fetcher: Fetcher,
    loaded: Loaded,
    load: LoadState,
    session: PlaybackSession,
    rng: SmallRng,
    sidebar: Sidebar,
    show_sidebar: bool,
    show_puzzle: bool,
    puzzles: PuzzleFeed,
    drag_from: Option<u16>,
}

impl App {
    fn new(config: Config, fetcher: Fetcher) -> Self {
        let puzzles = config
            .puzzles
            .as_ref()
            .map(|base| PuzzleSource::new(base.clone(), fetcher.clone()));
        info!(sources = config.sources.len(), "starting player");
        Self {
            load: LoadState::start(&config, &fetcher),
            rng: select::rng(config.seed),
            puzzles: PuzzleFeed::new(puzzles),
            config,
            fetcher,
            loaded: Loaded::default(),
            session: PlaybackSession::new(),
            sidebar: Sidebar::default(),
            show_sidebar: false,
            show_puzzle: true,
            drag_from: None,
        }
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        loop {
            self.poll();
            terminal.draw(|frame| self.render(frame))?;

            if !event::poll(TICK)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.on_key(key) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.on_mouse(mouse),
                _ => {}
            }
        }
    }

    /// Takes in finished background work.
    fn poll(&mut self) {
        if let Some(loaded) = self.load.poll() {
            self.install(loaded);
        }
        self.puzzles.follow(self.session.task_id());
        self.puzzles.poll();
    }

    /// Swaps in a fresh index and picks something to show.
    fn install(&mut self, loaded: Loaded) {
        self.loaded = loaded;
        self.session = PlaybackSession::new();
        self.sidebar.reset();
        self.random();
        if self.session.is_empty() {
            self.show_sidebar = true;
        }
    }

    fn reload(&mut self) {
        if self.load.is_loading() {
            debug!("reload ignored: load in flight");
            return;
        }
        info!("reloading sources");
        self.load = LoadState::start(&self.config, &self.fetcher);
    }

    fn random(&mut self) {
        match select::select(&self.loaded.index, &mut self.rng) {
            Some(selection) => {
                debug!(
                    task = %selection.task_id,
                    log = selection.log_id,
                    band = %selection.band,
                    "random selection"
                );
                self.apply(PlaybackEvent::Select(selection));
            }
            None => debug!("nothing to select"),
        }
    }

    fn apply(&mut self, event: PlaybackEvent) {
        let index = &self.loaded.index;
        self.session = mem::take(&mut self.session).apply(event, index);
        self.sidebar
            .focus(&rows(index, &self.session), index, &self.session);
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Right | KeyCode::Char('l') => self.apply(PlaybackEvent::StepForward),
            KeyCode::Left | KeyCode::Char('h') => self.apply(PlaybackEvent::StepBackward),
            KeyCode::Home => self.apply(PlaybackEvent::JumpToStart),
            KeyCode::End => self.apply(PlaybackEvent::JumpToEnd),
            KeyCode::Up | KeyCode::Char('k') if self.show_sidebar => self.sidebar.move_up(),
            KeyCode::Down | KeyCode::Char('j') if self.show_sidebar => {
                let len = rows(&self.loaded.index, &self.session).len();
                self.sidebar.move_down(len);
            }
            KeyCode::Enter if self.show_sidebar => {
                let rows = rows(&self.loaded.index, &self.session);
                if let Some(event) = self.sidebar.pick(&rows, &self.loaded.index) {
                    self.apply(event);
                }
            }
            KeyCode::Char('[') => self.switch_log(-1),
            KeyCode::Char(']') => self.switch_log(1),
            KeyCode::Char('r') => self.random(),
            KeyCode::Char('s') => self.show_sidebar = !self.show_sidebar,
            KeyCode::Char('t') => self.show_puzzle = !self.show_puzzle,
            KeyCode::Char('R') => self.reload(),
            _ => {}
        }
        Flow::Continue
    }

    fn switch_log(&mut self, offset: isize) {
        if let Some(pos) = self.session.neighbor_log(&self.loaded.index, offset) {
            self.apply(PlaybackEvent::PickLogAt(pos));
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.drag_from = Some(mouse.column),
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(from) = self.drag_from.take() else {
                    return;
                };
                let delta = i32::from(mouse.column) - i32::from(from);
                if let Some(event) = swipe(delta, SWIPE_THRESHOLD) {
                    self.apply(event);
                }
            }
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // help
        ])
        .split(frame.area());

        self.render_header(frame, chunks[0]);

        let sidebar_width = if self.show_sidebar { SIDEBAR_WIDTH } else { 0 };
        let body = Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(0)])
            .split(chunks[1]);
        if self.show_sidebar {
            self.sidebar.render(
                frame,
                body[0],
                &self.loaded.index,
                &self.session,
                self.puzzles.puzzle(),
            );
        }

        let status = match &self.load {
            LoadState::Loading(_) => Status::Loading,
            LoadState::Failed(e) => Status::Failed(e),
            LoadState::Ready => Status::Ready,
        };
        let player = Player {
            index: &self.loaded.index,
            session: &self.session,
            status,
            puzzle: self.puzzles.puzzle(),
            show_puzzle: self.show_puzzle,
            params: self.config.layout(),
        };
        player.render(frame, body[1]);

        let muted = Style::default().fg(Color::DarkGray);
        let help = Paragraph::new(Line::from(Span::styled(
            " ←→ step  home/end  [ ] log  r random  s sidebar  t puzzle  R reload  q quit",
            muted,
        )));
        frame.render_widget(help, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let muted = Style::default().fg(Color::DarkGray);
        let index = &self.loaded.index;
        let status = match &self.load {
            LoadState::Loading(_) => "loading…".to_string(),
            LoadState::Failed(_) => "load failed".to_string(),
            LoadState::Ready => format!(
                "{} tasks · {} logs · {} rows dropped",
                index.tasks().len(),
                index.log_count(),
                self.loaded.report.dropped_total()
            ),
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                " ARCTraj",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {status}"), muted),
        ]));
        frame.render_widget(header, area);
    }
}
