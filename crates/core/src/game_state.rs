//! Game state module - the simulation engine
//!
//! Ties together the board, the piece catalog and the bag. Drives the phase
//! machine Pause → NewBlock → Play → (lock) → NewBlock … → Finished, applies
//! input events and advances gravity on `tick`.
//!
//! The falling piece is stamped into the board. Every move, rotation and fall
//! builds a candidate piece, checks it against the board with the piece's own
//! cells treated as empty, and only then relocates it. Rejected candidates
//! never touch the board.

use log::{debug, info, warn};

use crate::board::ClearedRows;
use crate::config::{ConfigError, EngineConfig};
use crate::pieces::{cells_at, get_shape, get_spawn_shape, PieceShape, SPAWN_POSITION};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GamePhase, InputEvent, PieceKind, Rotation};
use crate::{Board, PieceBag};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn anchor, rotation 0
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            row: SPAWN_POSITION.0,
            col: SPAWN_POSITION.1,
        }
    }

    /// Mino offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute (row, col) cells
    pub fn cells(&self) -> PieceShape {
        cells_at(&self.shape(), self.row, self.col)
    }

    pub fn shifted(&self, drow: i8, dcol: i8) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
            ..*self
        }
    }

    /// Same anchor, next rotation index
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    bag: PieceBag,
    phase: GamePhase,
    config: EngineConfig,
    /// Gravity accumulator
    drop_timer_ms: u32,
    soft_drop: bool,
    /// Monotonic id of spawned pieces (increments only on successful spawn)
    piece_id: u32,
}

impl GameState {
    /// Create a new game with default timing and the given bag seed
    pub fn new(seed: u64) -> Self {
        Self::build(EngineConfig::with_seed(seed))
    }

    /// Create a new game from a validated configuration
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            warn!("rejected engine config {:?}: {}", config, err);
            return Err(err);
        }
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            board: Board::new(),
            active: None,
            bag: PieceBag::new(config.seed),
            phase: GamePhase::Pause,
            config,
            drop_timer_ms: 0,
            soft_drop: false,
            piece_id: 0,
        }
    }

    /// Leave the initial pause and spawn the first piece
    pub fn start(&mut self) {
        if self.phase != GamePhase::Pause {
            return;
        }
        debug!("game started (seed {})", self.config.seed);
        self.phase = GamePhase::NewBlock;
        self.spawn_piece();
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// Kind the next spawn will draw
    pub fn next_kind(&self) -> PieceKind {
        self.bag.peek()
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_drop
    }

    /// Current gravity period
    pub fn drop_interval_ms(&self) -> u32 {
        if self.soft_drop {
            self.config.fast_drop_ms
        } else {
            self.config.normal_drop_ms
        }
    }

    /// Time accumulated towards the next gravity step
    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.phase = self.phase;
        out.next = self.bag.peek();
        out.soft_drop = self.soft_drop;
        out.drop_interval_ms = self.drop_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a new piece from the bag
    ///
    /// On top-out the phase becomes `Finished` and the board is left as is.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.bag.draw();
        let piece = Tetromino::new(kind);
        let (row, col) = SPAWN_POSITION;

        if !self.board.stamp(&cells_at(&get_spawn_shape(kind), row, col), kind) {
            self.active = None;
            self.phase = GamePhase::Finished;
            info!(
                "top-out: {} blocked at spawn after {} pieces",
                kind.as_str(),
                self.piece_id
            );
            return false;
        }

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        self.drop_timer_ms = 0;
        self.phase = GamePhase::Play;
        debug!("spawned {} (piece {})", kind.as_str(), self.piece_id);

        true
    }

    /// Replace the active piece with `candidate` if it fits
    fn try_apply(&mut self, candidate: Tetromino) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let from = active.cells();
        let to = candidate.cells();
        if !self.board.fits(&to, &from) {
            return false;
        }

        self.board.relocate(&from, &to, candidate.kind);
        self.active = Some(candidate);
        true
    }

    /// Try to move the active piece one column (`dir` is -1 or +1)
    fn try_move(&mut self, dir: i8) -> bool {
        if self.phase != GamePhase::Play {
            return false;
        }
        match self.active {
            Some(active) => self.try_apply(active.shifted(0, dir)),
            None => false,
        }
    }

    /// Try to rotate the active piece in place (no wall kicks)
    fn try_rotate(&mut self) -> bool {
        if self.phase != GamePhase::Play {
            return false;
        }
        match self.active {
            Some(active) => self.try_apply(active.rotated()),
            None => false,
        }
    }

    /// Move the active piece one row down, locking it if it cannot fall
    ///
    /// Returns true if the piece moved.
    fn step_down(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if self.try_apply(active.shifted(1, 0)) {
            return true;
        }

        self.lock_piece();
        false
    }

    /// Fix the active piece in place, clear full rows and wait for a spawn
    fn lock_piece(&mut self) -> ClearedRows {
        let Some(active) = self.active.take() else {
            return ClearedRows::new();
        };

        // The piece's cells are already stamped; they simply stay.
        debug!(
            "locked {} at ({}, {}) {:?}",
            active.kind.as_str(),
            active.row,
            active.col,
            active.rotation
        );

        let cleared = self.board.clear_full_rows();
        if !cleared.is_empty() {
            info!("cleared {} row(s): {:?}", cleared.len(), cleared.as_slice());
        }

        self.phase = GamePhase::NewBlock;
        cleared
    }

    fn set_soft_drop(&mut self, on: bool) -> bool {
        if self.soft_drop == on {
            return false;
        }
        self.soft_drop = on;
        true
    }

    /// Start over after top-out
    fn restart(&mut self) -> bool {
        if self.phase != GamePhase::Finished {
            return false;
        }

        self.board.clear();
        self.active = None;
        self.soft_drop = false;
        self.drop_timer_ms = 0;
        self.phase = GamePhase::NewBlock;
        info!("restart after {} pieces", self.piece_id);

        true
    }

    /// Advance the clock
    ///
    /// `NewBlock` spawns the next piece. In `Play` the gravity accumulator grows
    /// by `elapsed_ms`; once it reaches the drop interval it is reset and the
    /// piece falls one row or locks. At most one step per call.
    ///
    /// Returns true if anything changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        match self.phase {
            GamePhase::Pause | GamePhase::Finished => false,
            GamePhase::NewBlock => {
                self.spawn_piece();
                true
            }
            GamePhase::Play => {
                self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
                if self.drop_timer_ms < self.drop_interval_ms() {
                    return false;
                }

                self.drop_timer_ms = 0;
                self.step_down();
                true
            }
        }
    }

    /// Apply an input event
    ///
    /// Illegal moves and rotations are silent no-ops. Returns true if the
    /// state changed.
    pub fn process_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::MoveLeft => self.try_move(-1),
            InputEvent::MoveRight => self.try_move(1),
            InputEvent::Rotate => self.try_rotate(),
            InputEvent::SoftDropOn => self.set_soft_drop(true),
            InputEvent::SoftDropOff => self.set_soft_drop(false),
            InputEvent::Restart => self.restart(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FAST_DROP_MS, NORMAL_DROP_MS};

    /// Replace the active piece with one of our choosing, stamped at (row, col).
    fn place(state: &mut GameState, kind: PieceKind, rotation: Rotation, row: i8, col: i8) {
        if let Some(active) = state.active.take() {
            for (r, c) in active.cells() {
                state.board.set(r, c, None);
            }
        }
        let piece = Tetromino {
            kind,
            rotation,
            row,
            col,
        };
        assert!(state.board.stamp(&piece.cells(), kind));
        state.active = Some(piece);
        state.phase = GamePhase::Play;
        state.drop_timer_ms = 0;
    }

    fn started() -> GameState {
        let mut state = GameState::new(12345);
        state.start();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase, GamePhase::Pause);
        assert!(state.active.is_none());
        assert_eq!(state.board.occupied_count(), 0);
        assert_eq!(state.piece_id, 0);
        assert_eq!(state.drop_interval_ms(), NORMAL_DROP_MS);
    }

    #[test]
    fn test_start_spawns_at_anchor() {
        let state = started();

        assert_eq!(state.phase, GamePhase::Play);
        let active = state.active.unwrap();
        assert_eq!((active.row, active.col), SPAWN_POSITION);
        assert_eq!(active.rotation, Rotation::North);

        let expected = cells_at(&get_shape(active.kind, Rotation::North), 0, 3);
        for (r, c) in expected {
            assert!(state.board.is_occupied(r, c));
        }
        assert_eq!(state.board.occupied_count(), 4);
        assert_eq!(state.piece_id, 1);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut state = started();
        let before = state.board.clone();
        state.start();
        assert_eq!(state.board, before);
        assert_eq!(state.piece_id, 1);
    }

    #[test]
    fn test_input_ignored_before_start() {
        let mut state = GameState::new(1);
        assert!(!state.process_input(InputEvent::MoveLeft));
        assert!(!state.process_input(InputEvent::Rotate));
        assert!(!state.tick(10_000));
        assert_eq!(state.phase, GamePhase::Pause);
    }

    #[test]
    fn test_move_left_and_right() {
        let mut state = started();
        place(&mut state, PieceKind::O, Rotation::North, 5, 4);

        assert!(state.process_input(InputEvent::MoveLeft));
        assert_eq!(state.active.unwrap().col, 3);
        assert!(state.board.is_occupied(5, 3));
        assert!(!state.board.is_occupied(5, 5));

        assert!(state.process_input(InputEvent::MoveRight));
        assert!(state.process_input(InputEvent::MoveRight));
        assert_eq!(state.active.unwrap().col, 5);
        assert_eq!(state.board.occupied_count(), 4);
    }

    #[test]
    fn test_move_into_wall_is_noop() {
        let mut state = started();
        place(&mut state, PieceKind::O, Rotation::North, 5, 0);

        let board = state.board.clone();
        let active = state.active;
        assert!(!state.process_input(InputEvent::MoveLeft));
        assert_eq!(state.board, board);
        assert_eq!(state.active, active);

        place(&mut state, PieceKind::O, Rotation::North, 5, 8);
        let board = state.board.clone();
        let active = state.active;
        assert!(!state.process_input(InputEvent::MoveRight));
        assert_eq!(state.board, board);
        assert_eq!(state.active, active);
    }

    #[test]
    fn test_move_into_stack_is_noop() {
        let mut state = started();
        place(&mut state, PieceKind::O, Rotation::North, 10, 4);
        state.board.set(11, 6, Some(PieceKind::Z));

        let board = state.board.clone();
        let active = state.active;
        assert!(!state.process_input(InputEvent::MoveRight));
        assert_eq!(state.board, board);
        assert_eq!(state.active, active);

        // The other side is open.
        assert!(state.process_input(InputEvent::MoveLeft));
    }

    #[test]
    fn test_legal_rotation_changes_only_active_cells() {
        let mut state = started();
        place(&mut state, PieceKind::T, Rotation::North, 5, 3);
        state.board.set(19, 0, Some(PieceKind::I));
        state.board.set(12, 9, Some(PieceKind::I));

        let before = state.board.clone();
        assert!(state.process_input(InputEvent::Rotate));

        let active = state.active.unwrap();
        assert_eq!(active.rotation, Rotation::East);
        assert_eq!((active.row, active.col), (5, 3));

        let old = Tetromino {
            rotation: Rotation::North,
            ..active
        }
        .cells();
        let new = active.cells();
        for r in 0..20i8 {
            for c in 0..10i8 {
                let in_old = old.contains(&(r, c));
                let in_new = new.contains(&(r, c));
                if !in_old && !in_new {
                    assert_eq!(state.board.get(r, c), before.get(r, c), "cell ({r}, {c})");
                } else {
                    assert_eq!(state.board.is_occupied(r, c), in_new, "cell ({r}, {c})");
                }
            }
        }
    }

    #[test]
    fn test_rotation_blocked_by_stack_is_noop() {
        let mut state = started();
        place(&mut state, PieceKind::T, Rotation::North, 5, 3);
        // East orientation would need (7, 4).
        state.board.set(7, 4, Some(PieceKind::L));

        let board = state.board.clone();
        assert!(!state.process_input(InputEvent::Rotate));
        assert_eq!(state.board, board);
        assert_eq!(state.active.unwrap().rotation, Rotation::North);

        state.board.set(7, 4, None);
        assert!(state.process_input(InputEvent::Rotate));
    }

    #[test]
    fn test_rotation_out_of_bounds_is_noop() {
        let mut state = started();
        // Vertical I hugging the left wall: anchor column -1 puts the bar in column 0.
        place(&mut state, PieceKind::I, Rotation::West, 5, -1);

        let board = state.board.clone();
        assert!(!state.process_input(InputEvent::Rotate));
        assert_eq!(state.board, board);
        assert_eq!(state.active.unwrap().rotation, Rotation::West);
    }

    #[test]
    fn test_rotation_through_all_states_returns_home() {
        let mut state = started();
        place(&mut state, PieceKind::J, Rotation::North, 8, 4);
        let board = state.board.clone();

        for _ in 0..4 {
            assert!(state.process_input(InputEvent::Rotate));
        }
        assert_eq!(state.active.unwrap().rotation, Rotation::North);
        assert_eq!(state.board, board);
    }

    #[test]
    fn test_gravity_waits_for_interval() {
        let mut state = started();
        let row = state.active.unwrap().row;

        assert!(!state.tick(NORMAL_DROP_MS - 1));
        assert_eq!(state.active.unwrap().row, row);
        assert_eq!(state.drop_timer_ms, NORMAL_DROP_MS - 1);

        assert!(state.tick(1));
        assert_eq!(state.active.unwrap().row, row + 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_gravity_steps_once_per_tick() {
        let mut state = started();
        let row = state.active.unwrap().row;

        assert!(state.tick(10_000));
        assert_eq!(state.active.unwrap().row, row + 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_soft_drop_switches_interval() {
        let mut state = started();

        assert!(state.process_input(InputEvent::SoftDropOn));
        assert!(!state.process_input(InputEvent::SoftDropOn));
        assert_eq!(state.drop_interval_ms(), FAST_DROP_MS);

        let row = state.active.unwrap().row;
        assert!(state.tick(FAST_DROP_MS));
        assert_eq!(state.active.unwrap().row, row + 1);

        assert!(state.process_input(InputEvent::SoftDropOff));
        assert_eq!(state.drop_interval_ms(), NORMAL_DROP_MS);
        assert!(!state.tick(FAST_DROP_MS));
    }

    #[test]
    fn test_lock_on_floor_then_respawn() {
        let mut state = started();
        place(&mut state, PieceKind::O, Rotation::North, 18, 0);
        let before = state.board.clone();

        assert!(state.tick(NORMAL_DROP_MS));
        assert_eq!(state.phase, GamePhase::NewBlock);
        assert!(state.active.is_none());
        assert_eq!(state.board, before);
        assert_eq!(state.drop_timer_ms, 0);

        let next = state.next_kind();
        assert!(state.tick(0));
        assert_eq!(state.phase, GamePhase::Play);
        let active = state.active.unwrap();
        assert_eq!(active.kind, next);
        assert_eq!(active.rotation, Rotation::North);
        assert_eq!((active.row, active.col), SPAWN_POSITION);
        assert_eq!(state.board.occupied_count(), 8);
    }

    #[test]
    fn test_lock_on_stack() {
        let mut state = started();
        place(&mut state, PieceKind::I, Rotation::North, 10, 2);
        // I occupies row 11, columns 2..=5; block one of the cells below.
        state.board.set(12, 5, Some(PieceKind::S));
        let before = state.board.clone();

        assert!(state.tick(NORMAL_DROP_MS));
        assert_eq!(state.phase, GamePhase::NewBlock);
        assert_eq!(state.board, before);
    }

    #[test]
    fn test_inputs_ignored_while_waiting_for_spawn() {
        let mut state = started();
        place(&mut state, PieceKind::O, Rotation::North, 18, 4);
        state.tick(NORMAL_DROP_MS);
        assert_eq!(state.phase, GamePhase::NewBlock);

        let board = state.board.clone();
        assert!(!state.process_input(InputEvent::MoveLeft));
        assert!(!state.process_input(InputEvent::Rotate));
        assert_eq!(state.board, board);
    }

    #[test]
    fn test_lock_clears_full_rows() {
        let mut state = started();
        place(&mut state, PieceKind::O, Rotation::North, 18, 0);
        for c in 2..10 {
            state.board.set(18, c, Some(PieceKind::I));
            state.board.set(19, c, Some(PieceKind::I));
        }
        state.board.set(17, 5, Some(PieceKind::T));

        assert!(state.tick(NORMAL_DROP_MS));
        assert_eq!(state.phase, GamePhase::NewBlock);
        assert_eq!(state.board.occupied_count(), 1);
        assert!(state.board.is_occupied(19, 5));
    }

    #[test]
    fn test_top_out_leaves_board_untouched() {
        let mut state = started();
        place(&mut state, PieceKind::O, Rotation::North, 18, 0);
        state.tick(NORMAL_DROP_MS);
        assert_eq!(state.phase, GamePhase::NewBlock);

        for c in 0..10 {
            if c != 1 {
                state.board_mut().set(0, c, Some(PieceKind::Z));
                state.board_mut().set(1, c, Some(PieceKind::Z));
            }
        }
        let before = state.board.clone();
        let piece_id = state.piece_id;

        assert!(state.tick(0));
        assert_eq!(state.phase, GamePhase::Finished);
        assert!(state.game_over());
        assert!(state.active.is_none());
        assert_eq!(state.board, before);
        assert_eq!(state.piece_id, piece_id);

        // Finished ignores everything but restart.
        assert!(!state.tick(10_000));
        assert!(!state.process_input(InputEvent::MoveLeft));
        assert_eq!(state.board, before);
    }

    #[test]
    fn test_restart_only_from_finished() {
        let mut state = started();
        assert!(!state.process_input(InputEvent::Restart));
        assert_eq!(state.phase, GamePhase::Play);

        state.active = None;
        state.phase = GamePhase::Finished;
        state.board.set(0, 4, Some(PieceKind::J));
        state.soft_drop = true;

        assert!(state.process_input(InputEvent::Restart));
        assert_eq!(state.phase, GamePhase::NewBlock);
        assert_eq!(state.board.occupied_count(), 0);
        assert!(!state.soft_drop);

        assert!(state.tick(0));
        assert_eq!(state.phase, GamePhase::Play);
        assert_eq!(state.board.occupied_count(), 4);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let cfg = EngineConfig {
            seed: 1,
            normal_drop_ms: 0,
            fast_drop_ms: 0,
        };
        assert!(GameState::with_config(cfg).is_err());

        let cfg = EngineConfig {
            seed: 9,
            normal_drop_ms: 500,
            fast_drop_ms: 25,
        };
        let state = GameState::with_config(cfg).unwrap();
        assert_eq!(state.drop_interval_ms(), 500);
        assert_eq!(state.config().seed, 9);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = started();
        state.process_input(InputEvent::SoftDropOn);

        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::Play);
        assert_eq!(snap.active, state.active.map(ActiveSnapshot::from));
        assert_eq!(snap.next, state.next_kind());
        assert!(snap.soft_drop);
        assert_eq!(snap.drop_interval_ms, FAST_DROP_MS);

        let occupied: usize = snap.occupancy().iter().flatten().filter(|b| **b).count();
        assert_eq!(occupied, 4);
        for (r, c) in snap.active.unwrap().cells() {
            assert!(snap.occupied(r, c));
        }
    }

    #[test]
    fn test_tetromino_new() {
        let piece = Tetromino::new(PieceKind::T);

        assert_eq!(piece.kind, PieceKind::T);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!((piece.row, piece.col), (0, 3));
        assert_eq!(piece.cells(), [(1, 3), (1, 4), (1, 5), (0, 4)]);
    }
}
