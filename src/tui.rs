//! Interactive trajectory player.

mod app;
mod feed;
mod grid;
mod screens;

pub use app::run;
