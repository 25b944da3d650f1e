//! Game state module - the facade input front ends drive
//!
//! Owns the grid for the whole session and exposes the only two mutations the
//! outside world can make: rotating a piece and moving the power source. After
//! each mutation power is propagated again, the win condition is checked, and
//! change notifications are queued for the renderer.
//!
//! Solving the board is terminal: later mutations are ignored. There is no
//! restart; build a new `GameState` instead.

use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::connectivity::{propagate, PropagationResult};
use crate::error::GameError;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::snapshot::{GameEvent, GameSnapshot, PieceSnapshot};
use crate::topology;
use crate::types::{Direction, GameAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Unsolved,
    Won,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    status: GameStatus,
    result: PropagationResult,
    /// Piece snapshots as of the last notification, row-major.
    notified: Vec<PieceSnapshot>,
    events: Vec<GameEvent>,
    /// Applied rotations and power moves; rejected and ignored calls don't count.
    moves: u32,
    seed: u32,
}

impl GameState {
    /// Build a board from `config`, wire it, scramble it and power it up.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let mut grid = Grid::new(config.width, config.height, config.power(), config.radius)?;
        let mut rng = SimpleRng::new(config.seed);
        topology::build(&mut grid, config.layout, &mut rng);

        debug!(
            width = config.width,
            height = config.height,
            seed = config.seed,
            layout = config.layout.as_str(),
            "new game"
        );
        Ok(Self::with_grid(grid, config.seed))
    }

    /// Wrap an already wired grid (no generation, no scrambling).
    pub fn from_grid(grid: Grid) -> Self {
        Self::with_grid(grid, 0)
    }

    fn with_grid(grid: Grid, seed: u32) -> Self {
        let mut state = Self {
            grid,
            status: GameStatus::Unsolved,
            result: PropagationResult::default(),
            notified: Vec::new(),
            events: Vec::new(),
            moves: 0,
            seed,
        };
        state.refresh();
        state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Result of the most recent propagation
    pub fn result(&self) -> &PropagationResult {
        &self.result
    }

    pub fn piece_at(&self, row: usize, col: usize) -> Result<PieceSnapshot, GameError> {
        self.grid.piece_at(row, col).map(PieceSnapshot::from)
    }

    /// Rotate the piece at `(row, col)` clockwise
    pub fn rotate(&mut self, row: usize, col: usize) -> Result<PropagationResult, GameError> {
        if self.is_won() {
            return Ok(self.result.clone());
        }

        self.grid.piece_at_mut(row, col)?.rotate();
        self.moves = self.moves.wrapping_add(1);
        debug!(row, col, moves = self.moves, "rotated piece");

        self.refresh();
        Ok(self.result.clone())
    }

    /// Move the power source one piece in `dir`
    ///
    /// A move off the board is rejected and leaves everything unchanged.
    pub fn move_power(&mut self, dir: Direction) -> PropagationResult {
        if self.is_won() {
            return self.result.clone();
        }

        if !self.grid.move_power_source(dir) {
            debug!(direction = dir.as_str(), "power move rejected at edge");
            return self.result.clone();
        }
        self.moves = self.moves.wrapping_add(1);
        let to = self.grid.power_source();
        debug!(row = to.row, col = to.col, moves = self.moves, "moved power source");

        self.refresh();
        self.result.clone()
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> Result<PropagationResult, GameError> {
        trace!(action = action.as_str(), "apply action");
        match action {
            GameAction::RotatePiece { row, col } => self.rotate(row, col),
            GameAction::MovePower(dir) => Ok(self.move_power(dir)),
        }
    }

    /// Take and clear the queued renderer notifications.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.fill_from_grid(&self.grid);
        out.moves = self.moves;
        out.won = self.is_won();
        out.seed = self.seed;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn refresh(&mut self) {
        self.result = propagate(&mut self.grid);
        self.queue_piece_changes();

        if self.result.won && self.status == GameStatus::Unsolved {
            self.status = GameStatus::Won;
            self.events.push(GameEvent::Solved { moves: self.moves });
            info!(moves = self.moves, "network solved");
        }
    }

    fn queue_piece_changes(&mut self) {
        if self.notified.len() != self.grid.len() {
            self.notified = self.grid.pieces().iter().map(PieceSnapshot::from).collect();
            self.events
                .extend(self.notified.iter().copied().map(GameEvent::PieceChanged));
            return;
        }

        for (prev, piece) in self.notified.iter_mut().zip(self.grid.pieces()) {
            let now = PieceSnapshot::from(piece);
            if *prev != now {
                *prev = now;
                self.events.push(GameEvent::PieceChanged(now));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Connectors, Position};

    /// Horizontal line ending in a cap that only opens to the left; the cap
    /// is turned one quarter out of place.
    fn broken_line(len: usize) -> Grid {
        let horizontal = Connectors::empty()
            .with(Direction::Left)
            .with(Direction::Right);
        let mut row = vec![horizontal; len - 1];
        row.push(Connectors::empty().with(Direction::Left));
        let mut grid = Grid::from_connectors(&[row], Position::new(0, 0), 10).unwrap();
        grid.get_mut(0, len - 1).unwrap().rotate();
        grid
    }

    #[test]
    fn test_new_game_is_unsolved() {
        let state = GameState::new(&GameConfig::new(6, 6).with_seed(12345)).unwrap();
        assert_eq!(state.status(), GameStatus::Unsolved);
        assert_eq!(state.moves(), 0);
        assert_eq!(state.seed(), 12345);
        assert!(state.result().is_reachable(Position::new(0, 0)));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(matches!(
            GameState::new(&GameConfig::new(0, 4)),
            Err(GameError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            GameState::new(&GameConfig::new(2, 2).with_power(3, 0)),
            Err(GameError::PowerSourceOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_new_rejects_zero_radius() {
        let cfg = GameConfig {
            radius: 0,
            ..GameConfig::new(1, 1)
        };
        assert_eq!(
            GameState::new(&cfg).map(|_| ()),
            Err(GameError::InvalidRadius { radius: 0 })
        );
    }

    #[test]
    fn test_snapshot_powered_matches_reachable() {
        let state = GameState::new(&GameConfig::new(1, 1)).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.powered, state.result().powered_count());
        assert_eq!(snap.powered, 1);
    }

    #[test]
    fn test_piece_at_out_of_bounds_is_error() {
        let state = GameState::new(&GameConfig::new(4, 3)).unwrap();
        assert_eq!(
            state.piece_at(3, 0),
            Err(GameError::OutOfBounds { row: 3, col: 0 })
        );
        assert_eq!(
            state.piece_at(0, 4),
            Err(GameError::OutOfBounds { row: 0, col: 4 })
        );
        assert!(state.piece_at(2, 3).is_ok());
    }

    #[test]
    fn test_single_piece_starts_won() {
        let mut state = GameState::new(&GameConfig::new(1, 1)).unwrap();
        assert!(state.is_won());
        let events = state.take_events();
        assert!(events.contains(&GameEvent::Solved { moves: 0 }));
    }

    #[test]
    fn test_initial_events_cover_every_piece() {
        let mut state = GameState::new(&GameConfig::new(3, 4)).unwrap();
        let changed = state
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::PieceChanged(_)))
            .count();
        assert_eq!(changed, 12);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_rotate_out_of_bounds_is_error() {
        let mut state = GameState::new(&GameConfig::new(3, 3)).unwrap();
        assert_eq!(
            state.rotate(3, 0),
            Err(GameError::OutOfBounds { row: 3, col: 0 })
        );
        assert_eq!(state.moves(), 0);
    }

    #[test]
    fn test_rotate_emits_change_for_rotated_piece() {
        let mut state = GameState::from_grid(broken_line(3));
        state.take_events();

        state.rotate(0, 2).unwrap();
        let events = state.take_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::PieceChanged(p) if p.row == 0 && p.col == 2
        )));
    }

    #[test]
    fn test_solving_is_terminal() {
        let mut state = GameState::from_grid(broken_line(3));
        assert!(!state.is_won());

        // Three more quarter turns bring the cap back to facing left.
        state.rotate(0, 2).unwrap();
        state.rotate(0, 2).unwrap();
        let result = state.rotate(0, 2).unwrap();
        assert!(result.won);
        assert!(state.is_won());
        assert_eq!(state.moves(), 3);

        let before = state.grid().clone();
        let after_rotate = state.rotate(0, 1).unwrap();
        let after_move = state.move_power(Direction::Right);
        assert_eq!(state.grid(), &before);
        assert_eq!(after_rotate, result);
        assert_eq!(after_move, result);
        assert_eq!(state.moves(), 3);
    }

    #[test]
    fn test_solved_event_emitted_once() {
        let mut state = GameState::from_grid(broken_line(2));
        state.take_events();

        state.rotate(0, 1).unwrap();
        state.rotate(0, 1).unwrap();
        state.rotate(0, 1).unwrap();
        state.rotate(0, 1).unwrap();

        let solved = state
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Solved { .. }))
            .count();
        assert_eq!(solved, 1);
    }

    #[test]
    fn test_move_power_counts_moves() {
        let mut state = GameState::new(&GameConfig::new(4, 4)).unwrap();
        state.move_power(Direction::Down);
        assert_eq!(state.grid().power_source(), Position::new(1, 0));
        assert_eq!(state.moves(), 1);

        state.move_power(Direction::Left);
        assert_eq!(state.grid().power_source(), Position::new(1, 0));
        assert_eq!(state.moves(), 1);
    }

    #[test]
    fn test_apply_action_dispatches() {
        let mut rows = vec![vec![Connectors::empty(); 3]; 3];
        rows[1][1] = Connectors::all();
        let grid = Grid::from_connectors(&rows, Position::new(0, 0), 10).unwrap();
        let mut state = GameState::from_grid(grid);
        let before = state.piece_at(1, 1).unwrap();
        state
            .apply_action(GameAction::RotatePiece { row: 1, col: 1 })
            .unwrap();
        state
            .apply_action(GameAction::MovePower(Direction::Right))
            .unwrap();
        assert_eq!(state.moves(), 2);
        assert_eq!(state.grid().power_source(), Position::new(0, 1));
        // A four-way piece looks the same after any rotation.
        assert_eq!(state.piece_at(1, 1).unwrap().connectors(), before.connectors());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let state = GameState::new(&GameConfig::new(5, 3).with_seed(4)).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.width, 5);
        assert_eq!(snap.height, 3);
        assert_eq!(snap.pieces.len(), 15);
        assert_eq!(snap.powered, state.result().powered_count());
        assert_eq!(snap.won, state.is_won());
        assert_eq!(snap.seed, 4);
    }
}
