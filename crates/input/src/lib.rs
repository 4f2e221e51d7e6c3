//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::InputEvent`]s and batches them per frame,
//! including on terminals without key-release events.

pub mod handler;
pub mod map;

pub use tui_blockfall_types as types;

pub use handler::{FrameInput, InputHandler};
pub use map::{map_key_event, should_quit};
