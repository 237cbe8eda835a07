//! Terminal input: key mapping and the board cursor.

pub mod cursor;
pub mod map;

pub use tui_pairs_types as types;

pub use cursor::GridCursor;
pub use map::{handle_key_event, should_quit, Direction, KeyAction};
