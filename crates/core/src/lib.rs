//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: No allocation on the tick/input path
//!
//! # Module Structure
//!
//! - [`board`]: 20x10 grid with collision checks and line clearing
//! - [`config`]: Engine tunables and their validation
//! - [`game_state`]: The simulation engine: phases, active piece, gravity
//! - [`pieces`]: Tetromino rotation tables (the piece catalog)
//! - [`rng`]: 7-bag random piece generation
//! - [`snapshot`]: Read-only copy of the state for renderers
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every 7 draws contain each piece exactly once
//! - **Rotation**: one direction, in place, no wall kicks; illegal rotations are ignored
//! - **Gravity**: one row per drop interval (200ms, 50ms while soft drop is held)
//! - **Lock**: a piece that cannot fall locks immediately
//! - **Line Clear**: full rows collapse, stacked ones in a single pass
//! - **Top-out**: a spawn onto occupied cells ends the game
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::GameState;
//! use tui_blockfall_types::{GamePhase, InputEvent};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//! assert_eq!(game.phase(), GamePhase::Play);
//!
//! game.process_input(InputEvent::MoveRight);
//! game.process_input(InputEvent::Rotate);
//! game.tick(200);
//!
//! let snap = game.snapshot();
//! assert_eq!(snap.occupancy().iter().flatten().filter(|c| **c).count(), 4);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) once per frame with the
//! elapsed milliseconds, after applying that frame's input events.

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use tui_blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, EngineConfig};
pub use game_state::{GameState, Tetromino};
pub use pieces::{get_shape, PieceShape, SPAWN_POSITION};
pub use rng::PieceBag;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
