//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation core, terminal rendering, input mapping).
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn anchor**: row 0, column 3 (`FIELD_WIDTH / 2 - 2`)
//!
//! Coordinates are always `(row, col)`.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame budget of the terminal loop (~60 FPS) |
//! | `NORMAL_DROP_MS` | 200 | Gravity period |
//! | `FAST_DROP_MS` | 50 | Gravity period while soft drop is held |
//! | `SOFT_DROP_RELEASE_TIMEOUT_MS` | 550 | Auto-release for terminals without key-release events |
//!
//! # Examples
//!
//! ```
//! use tui_blockfall_types::{GamePhase, InputEvent, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! assert_eq!(PieceKind::ALL.len(), 7);
//! assert_eq!(PieceKind::T.index(), 2);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::West.rotate_cw().index(), 0);
//!
//! assert_eq!(InputEvent::SoftDropOn.as_str(), "softDropOn");
//! assert_eq!(GamePhase::Finished.as_str(), "finished");
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 20);
//! ```

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: u8 = 10;

/// Field height in cells (20 rows)
pub const FIELD_HEIGHT: u8 = 20;

/// Row of the spawn anchor
pub const SPAWN_ROW: i8 = 0;

/// Column of the spawn anchor (centered horizontally)
pub const SPAWN_COL: i8 = (FIELD_WIDTH / 2) as i8 - 2;

/// Frame budget of the terminal loop in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity period while no soft drop is held
pub const NORMAL_DROP_MS: u32 = 200;

/// Gravity period while soft drop is held
pub const FAST_DROP_MS: u32 = 50;

/// Soft drop auto-release for terminals that never report key releases.
///
/// Must exceed the typical OS key-repeat delay, otherwise a held key would
/// flicker between fast and normal gravity before repeats kick in.
pub const SOFT_DROP_RELEASE_TIMEOUT_MS: u32 = 550;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_anchor_is_centered() {
        assert_eq!(SPAWN_ROW, 0);
        assert_eq!(SPAWN_COL, 3);
    }

    #[test]
    fn fast_drop_is_faster_than_normal() {
        assert!(FAST_DROP_MS < NORMAL_DROP_MS);
        assert!(SOFT_DROP_RELEASE_TIMEOUT_MS > NORMAL_DROP_MS);
    }

    #[test]
    fn rotation_index_roundtrips() {
        for i in 0..4 {
            assert_eq!(Rotation::from_index(i).index(), i);
        }
        assert_eq!(Rotation::from_index(4), Rotation::North);
    }

    #[test]
    fn piece_kind_index_matches_catalog_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}

/// The seven tetromino piece kinds, in catalog order
///
/// - **I**: 4-long bar
/// - **O**: 2x2 square
/// - **T**: T-shaped
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Position of this kind in the piece catalog (0..7)
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::J => 3,
            PieceKind::L => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
        }
    }

    /// Single uppercase letter, for display
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_str(), "I");
    /// assert_eq!(PieceKind::Z.as_str(), "Z");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }
}

/// Rotation states, one per rotation index
///
/// - **North** (0): spawn orientation
/// - **East** (1)
/// - **South** (2)
/// - **West** (3)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise, i.e. `(index + 1) mod 4`
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation index (0..4)
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for an index, taken modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Discrete input events consumed by the simulation engine
///
/// Produced by the input layer from key presses and releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece to the next rotation index
    Rotate,
    /// Soft drop key went down: use the fast gravity period
    SoftDropOn,
    /// Soft drop key went up: back to the normal gravity period
    SoftDropOff,
    /// Start over after game over
    Restart,
}

impl InputEvent {
    /// camelCase name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            InputEvent::MoveLeft => "moveLeft",
            InputEvent::MoveRight => "moveRight",
            InputEvent::Rotate => "rotate",
            InputEvent::SoftDropOn => "softDropOn",
            InputEvent::SoftDropOff => "softDropOff",
            InputEvent::Restart => "restart",
        }
    }
}

/// Phase of the simulation state machine
///
/// - **Pause**: initial/idle, nothing runs
/// - **NewBlock**: a piece locked (or the game restarted); the next tick spawns
/// - **Play**: a piece is falling and controllable
/// - **Finished**: top-out; only `Restart` leaves this phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Pause,
    NewBlock,
    Play,
    Finished,
}

impl GamePhase {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Pause => "pause",
            GamePhase::NewBlock => "newBlock",
            GamePhase::Play => "play",
            GamePhase::Finished => "finished",
        }
    }
}

/// A cell of the field
///
/// - `None`: empty
/// - `Some(PieceKind)`: occupied; the kind only drives the cell color
pub type Cell = Option<PieceKind>;
