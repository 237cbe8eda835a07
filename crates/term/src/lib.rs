//! Terminal presentation for the pairs game.
//!
//! [`GameView`] turns session state into text lines (pure, testable) and
//! [`TerminalRenderer`] writes them to the terminal through crossterm.

pub mod game_view;
pub mod renderer;

pub use tui_pairs_core as core;
pub use tui_pairs_types as types;

pub use game_view::{CursorView, GameView};
pub use renderer::{encode_full_into, TerminalRenderer};
