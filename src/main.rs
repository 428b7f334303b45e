mod cli;
mod config;
mod index;
mod layout;
mod logging;
mod model;
mod parse;
mod playback;
mod select;
mod source;
mod tasks;
mod tui;

use std::process;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
