//! Terminal presentation for the falling-block game.
//!
//! Rendering goes through a plain framebuffer instead of a widget toolkit:
//! `GameView` turns a `GameSnapshot` into styled glyphs, and
//! `TerminalRenderer` flushes only what changed since the previous frame.
//!
//! - `core` stays free of terminal I/O
//! - field cells are drawn two glyphs wide to keep blocks roughly square

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
