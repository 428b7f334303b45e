//! CLI interface for arctraj.
//!
//! With no subcommand, opens the interactive player. The other commands are
//! non-interactive: load the configured sources, answer one question, exit.
//!
//! - `arctraj tasks|logs|show`: browse the index.
//! - `arctraj pick`: run the random selection once.
//! - `arctraj stats`: what the loader kept and dropped.

mod format;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{self, Config};
use crate::index::Index;
use crate::playback::{PlaybackEvent, PlaybackSession, overlay};
use crate::select::{self, Selection};
use crate::source::{self, Fetcher, Loaded};
use crate::{logging, tui};

use format::{format_grid, format_log, format_report, format_task};

/// arctraj: replay recorded ARC solving sessions.
#[derive(Debug, Parser)]
#[command(name = "arctraj", version, after_long_help = KEYS_HELP)]
pub struct Cli {
    /// Config file (default: ~/.arctraj/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Trajectory CSV to load: path or URL. Repeat for several.
    /// Replaces the configured sources.
    #[arg(long = "source", global = true)]
    sources: Vec<String>,

    /// Seed for random selection.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

const KEYS_HELP: &str = r"Player keys:
  ← → / h l      previous / next step (or drag the mouse sideways)
  Home End       first / last step
  ↑ ↓ / k j      move in the sidebar
  ⏎              pick the highlighted task or log
  [ ]            previous / next log of the task
  r              random log
  s              show / hide the sidebar
  t              show / hide the puzzle definition
  R              reload sources
  q esc          quit";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive player (default).
    Play,

    /// List tasks with their log counts and best scores.
    Tasks {
        /// Include tasks that have no logs.
        #[arg(long)]
        all: bool,
    },

    /// List a task's logs, best score first.
    Logs {
        /// Task id (e.g. 007bbfb7).
        task: String,
    },

    /// Pick a log at random, preferring mid-range scores.
    Pick,

    /// Print one step of a log.
    Show {
        /// Task id.
        task: String,

        /// Log id within the task.
        log: u64,

        /// Step to show, counted from 0. Clamped to the last step.
        #[arg(long, default_value_t = 0)]
        step: usize,
    },

    /// Summarize what was loaded and dropped.
    Stats,
}

/// Run the CLI, returning an error message on failure.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())
        .map_err(|e| e.to_string())?
        .with_overrides(cli.sources, cli.seed);
    config.validate().map_err(|e| e.to_string())?;

    let command = cli.command.unwrap_or(Command::Play);
    if matches!(command, Command::Play) {
        if let Some(home) = config::home_dir() {
            logging::init_file(&home.join("arctraj.log"))
                .map_err(|e| format!("failed to open log file: {e}"))?;
        }
        return tui::run(config).map_err(|e| e.to_string());
    }

    logging::init_stderr();
    let fetcher = Fetcher::new().map_err(|e| e.to_string())?;
    let loaded = source::load(&config, &fetcher).map_err(|e| e.to_string())?;

    match command {
        Command::Play => Ok(()),
        Command::Tasks { all } => {
            cmd_tasks(&loaded.index, all);
            Ok(())
        }
        Command::Logs { task } => cmd_logs(&loaded.index, &task),
        Command::Pick => {
            cmd_pick(&loaded.index, config.seed);
            Ok(())
        }
        Command::Show { task, log, step } => cmd_show(&loaded.index, &task, log, step),
        Command::Stats => {
            cmd_stats(&loaded);
            Ok(())
        }
    }
}

fn cmd_tasks(index: &Index, all: bool) {
    let mut shown = 0;
    for task in index.tasks() {
        if all || !task.logs.is_empty() {
            println!("{}", format_task(task));
            shown += 1;
        }
    }
    if shown == 0 {
        println!("No tasks with logs");
    }
}

fn cmd_logs(index: &Index, task_id: &str) -> Result<(), String> {
    let task = index
        .task(task_id.trim())
        .ok_or_else(|| format!("unknown task '{task_id}'"))?;

    if task.logs.is_empty() {
        println!("No logs for {}", task.id);
        return Ok(());
    }
    for log in &task.logs {
        println!("{}", format_log(log));
    }
    Ok(())
}

fn cmd_pick(index: &Index, seed: Option<u64>) {
    let mut rng = select::rng(seed);
    match select::select(index, &mut rng) {
        Some(Selection {
            task_id,
            log_id,
            score,
            band,
        }) => println!("{task_id}  {log_id}  {score}  [{band}]"),
        None => println!("Nothing to show: no logs loaded"),
    }
}

fn cmd_show(index: &Index, task_id: &str, log_id: u64, step: usize) -> Result<(), String> {
    let task_id = task_id.trim();
    if index.log(task_id, log_id).is_none() {
        return Err(format!("no log {log_id} in task '{task_id}'"));
    }

    let session = PlaybackSession::new()
        .apply(PlaybackEvent::PickTask(task_id.to_string()), index)
        .apply(PlaybackEvent::PickLog(log_id), index)
        .apply(PlaybackEvent::Seek(step), index);

    let (Some(trajectory), Some(current)) = (session.trajectory(index), session.current(index))
    else {
        return Err(format!("no log {log_id} in task '{task_id}'"));
    };

    println!(
        "{task_id} log #{log_id}  step {}/{}  {}",
        session.step() + 1,
        trajectory.len(),
        current.action
    );
    print!("{}", format_grid(&overlay(current)));
    if session.is_complete(index) {
        println!("(final step)");
    }
    Ok(())
}

fn cmd_stats(loaded: &Loaded) {
    print!(
        "{}",
        format_report(&loaded.report, &loaded.index, &select::band_sizes(&loaded.index))
    );
}
