//! Screen rendering and input handling.

mod player;
mod sidebar;

pub use player::{Player, Status};
pub use sidebar::{Sidebar, rows};
