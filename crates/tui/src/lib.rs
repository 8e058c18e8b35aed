//! # logfold-tui
//!
//! Terminal rendering for the live group table: sparkline formatting,
//! view state, and the ratatui draw path. Widgets copy everything they
//! show out of the engine while the caller's read guard is held, so a
//! frame never mixes two store states.
//!
//! Keys: `Up`/`Down` move the cursor, `Enter` opens the detail pane for
//! the selected group, `Esc` closes it (or clears the cursor when no
//! pane is open), `q` or `Ctrl-C` quits.

mod app;
mod spark;
mod ui;

pub use app::{Action, App};
pub use spark::spark;
pub use ui::draw;
