//! Read-only copy of the engine state for renderers.

use crate::board::Grid;
use crate::pieces::{cells_at, get_shape, PieceShape};
use crate::types::{GamePhase, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH, NORMAL_DROP_MS};
use crate::Tetromino;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
}

impl ActiveSnapshot {
    /// Absolute (row, col) cells of the piece
    pub fn cells(&self) -> PieceShape {
        cells_at(&get_shape(self.kind, self.rotation), self.row, self.col)
    }
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            row: value.row,
            col: value.col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Grid including the falling piece's cells
    pub board: Grid,
    pub active: Option<ActiveSnapshot>,
    pub phase: GamePhase,
    /// Kind the next spawn will draw
    pub next: PieceKind,
    pub soft_drop: bool,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    /// Occupancy of (row, col); false when out of bounds
    pub fn occupied(&self, row: i8, col: i8) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        self.board
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .is_some_and(|c| c.is_some())
    }

    /// Boolean occupancy view of the grid
    pub fn occupancy(&self) -> [[bool; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize] {
        let mut out = [[false; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize];
        for (dst, src) in out.iter_mut().zip(self.board.iter()) {
            for (d, s) in dst.iter_mut().zip(src.iter()) {
                *d = s.is_some();
            }
        }
        out
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::Finished
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize],
            active: None,
            phase: GamePhase::Pause,
            next: PieceKind::I,
            soft_drop: false,
            drop_interval_ms: NORMAL_DROP_MS,
        }
    }
}
