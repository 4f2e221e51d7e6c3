//! Pieces module - the piece catalog
//!
//! Static rotation tables for the seven tetrominoes. Every kind has exactly four
//! rotation states; symmetric pieces repeat entries (O uses the same offsets for
//! all four). Rotation never kicks: a rotated shape is tried at the same anchor.

use crate::types::{PieceKind, Rotation, SPAWN_COL, SPAWN_ROW};

/// Offset of a single mino relative to the piece origin, as (row, col)
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the piece origin
pub type PieceShape = [MinoOffset; 4];

/// Rotation tables indexed by `[kind.index()][rotation.index()]`
const CATALOG: [[PieceShape; 4]; 7] = [
    // I
    [
        [(1, 0), (1, 1), (1, 2), (1, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 1), (1, 1), (2, 1), (3, 1)],
    ],
    // O
    [
        [(0, 0), (1, 0), (0, 1), (1, 1)],
        [(0, 0), (1, 0), (0, 1), (1, 1)],
        [(0, 0), (1, 0), (0, 1), (1, 1)],
        [(0, 0), (1, 0), (0, 1), (1, 1)],
    ],
    // T
    [
        [(1, 0), (1, 1), (1, 2), (0, 1)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (1, 1), (1, 2), (2, 1)],
        [(1, 1), (2, 1), (3, 1), (2, 0)],
    ],
    // J
    [
        [(0, 0), (1, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 0)],
    ],
    // L
    [
        [(1, 0), (1, 1), (1, 2), (0, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (1, 2), (2, 0)],
        [(0, 0), (0, 1), (1, 1), (2, 1)],
    ],
    // S
    [
        [(1, 0), (1, 1), (0, 1), (0, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(2, 0), (2, 1), (1, 1), (1, 2)],
        [(0, 0), (1, 0), (1, 1), (2, 1)],
    ],
    // Z
    [
        [(0, 0), (0, 1), (1, 1), (1, 2)],
        [(0, 2), (1, 2), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(0, 2), (1, 2), (1, 1), (2, 1)],
    ],
];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    CATALOG[kind.index()][rotation.index()]
}

/// Translate a shape to absolute (row, col) cells at the given anchor
pub fn cells_at(shape: &PieceShape, row: i8, col: i8) -> PieceShape {
    let mut out = *shape;
    for cell in &mut out {
        cell.0 += row;
        cell.1 += col;
    }
    out
}

/// Spawn anchor for new pieces (row, col)
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_ROW, SPAWN_COL);

/// Get initial shape for a new piece at the spawn anchor
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, Rotation::North)
}
