//! Tracing setup.
//!
//! The filter comes from `ARCTRAJ_LOG` (e.g. `ARCTRAJ_LOG=debug`), defaulting
//! to `warn`. Command output goes to stderr; the interactive player writes to
//! a file so log lines never land on the screen.

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const ENV_VAR: &str = "ARCTRAJ_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}

/// Log to `path`, appending. Creates parent directories as needed.
pub fn init_file(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
