//! Background work for the player: source loads and puzzle fetches.
//!
//! Both run on their own threads and report back over channels the event
//! loop polls between frames.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use tracing::{debug, error};

use crate::config::Config;
use crate::model::Puzzle;
use crate::source::{self, Fetcher, LoadError, Loaded, PuzzleSource};

/// Where the source load stands.
pub enum LoadState {
    Loading(Receiver<Result<Loaded, LoadError>>),
    Ready,
    Failed(String),
}

impl LoadState {
    /// Starts loading all sources in the background.
    pub fn start(config: &Config, fetcher: &Fetcher) -> Self {
        let (tx, rx) = mpsc::channel();
        let config = config.clone();
        let fetcher = fetcher.clone();
        thread::spawn(move || {
            let _ = tx.send(source::load(&config, &fetcher));
        });
        Self::Loading(rx)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    /// A finished load, if one arrived since the last poll.
    pub fn poll(&mut self) -> Option<Loaded> {
        let Self::Loading(rx) = self else {
            return None;
        };
        match rx.try_recv() {
            Ok(Ok(loaded)) => {
                *self = Self::Ready;
                Some(loaded)
            }
            Ok(Err(e)) => {
                error!("load failed: {e}");
                *self = Self::Failed(e.to_string());
                None
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                *self = Self::Failed("loader stopped unexpectedly".to_string());
                None
            }
        }
    }
}

/// The puzzle definition of the selected task.
///
/// Every task change bumps the generation. A fetch result is kept only if
/// its generation is still current, so the last selection wins.
pub struct PuzzleFeed {
    source: Option<PuzzleSource>,
    generation: u64,
    task_id: Option<String>,
    puzzle: Option<Puzzle>,
    tx: Sender<(u64, Option<Puzzle>)>,
    rx: Receiver<(u64, Option<Puzzle>)>,
}

impl PuzzleFeed {
    pub fn new(source: Option<PuzzleSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            generation: 0,
            task_id: None,
            puzzle: None,
            tx,
            rx,
        }
    }

    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    /// Follows the selected task, fetching its puzzle when it changes.
    pub fn follow(&mut self, task_id: Option<&str>) {
        if self.task_id.as_deref() == task_id {
            return;
        }
        self.generation += 1;
        self.task_id = task_id.map(str::to_string);
        self.puzzle = None;

        let (Some(id), Some(source)) = (task_id, &self.source) else {
            return;
        };
        let generation = self.generation;
        let id = id.to_string();
        let source = source.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send((generation, source.fetch(&id)));
        });
    }

    /// Takes in finished fetches, dropping stale ones.
    pub fn poll(&mut self) {
        while let Ok((generation, puzzle)) = self.rx.try_recv() {
            if generation == self.generation {
                self.puzzle = puzzle;
            } else {
                debug!(generation, current = self.generation, "discarding stale puzzle");
            }
        }
    }
}
