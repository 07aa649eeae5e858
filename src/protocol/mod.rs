//! Text protocol handling.
//!
//! Implements the command parser for the main loop, the JSON save format,
//! and the board projection printed back to the client.

pub mod parser;
pub mod render;
pub mod save;

pub use parser::{parse_command, Command};
pub use render::{render_board, square_view, SquareView};
pub use save::{decode_save, encode_save, load_from_path, save_to_path, SaveError, SaveGame};
