//! Core data model for arctraj.
//!
//! Grids, the steps recorded while a person solved a task, and the
//! puzzle definitions those sessions were attempting.

mod grid;
mod puzzle;
mod trajectory;

pub use grid::Grid;
pub use puzzle::Puzzle;
pub use trajectory::{ActionStep, Log, RecordedStep, Trajectory};
