//! Terminal pairs (memory matching) game.
//!
//! Re-exports the workspace crates and hosts the application configuration
//! used by the `tui-pairs` binary.

pub mod config;

pub use tui_pairs_core as core;
pub use tui_pairs_input as input;
pub use tui_pairs_store as store;
pub use tui_pairs_term as term;
pub use tui_pairs_types as types;
