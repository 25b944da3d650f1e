use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::{Connectors, Position};

/// Read-only view of one piece, as handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub row: usize,
    pub col: usize,
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
    pub power_amount: u8,
    pub power_source: bool,
}

impl PieceSnapshot {
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    pub fn connectors(&self) -> Connectors {
        Connectors::from_flags(self.left, self.right, self.top, self.bottom)
    }

    pub fn is_powered(&self) -> bool {
        self.power_amount > 0
    }
}

impl From<&Piece> for PieceSnapshot {
    fn from(value: &Piece) -> Self {
        let c = value.connectors();
        Self {
            row: value.row(),
            col: value.col(),
            left: c.left(),
            right: c.right(),
            top: c.top(),
            bottom: c.bottom(),
            power_amount: value.power_amount(),
            power_source: value.is_power_source(),
        }
    }
}

/// Notification for the rendering sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece's connectors, power amount or source flag changed
    PieceChanged(PieceSnapshot),
    /// Every piece is powered; emitted once
    Solved { moves: u32 },
}

/// Whole-board view, reused across frames by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major
    pub pieces: Vec<PieceSnapshot>,
    pub power: Position,
    pub radius: u8,
    pub powered: usize,
    pub moves: u32,
    pub won: bool,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn get(&self, row: usize, col: usize) -> Option<&PieceSnapshot> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.pieces.get(row * self.width + col)
    }

    /// Overwrite the board part from `grid`, keeping the allocation.
    pub fn fill_from_grid(&mut self, grid: &Grid) {
        self.width = grid.width();
        self.height = grid.height();
        self.power = grid.power_source();
        self.radius = grid.radius();
        self.pieces.clear();
        self.pieces.extend(grid.pieces().iter().map(PieceSnapshot::from));
        self.powered = self.pieces.iter().filter(|p| p.is_powered()).count();
    }
}
