//! Grid module - owns every piece of the board
//!
//! Pieces are stored in a flat vector in row-major order (`row * width + col`).
//! The grid is also the adjacency source for the rest of the crate: a piece's
//! candidate neighbours are the bounds-checked offsets in the four directions,
//! and a *matched* neighbour is one where both facing connectors are open.
//! Matched edges are never stored; they are read off the connector flags each
//! time they are needed.

use arrayvec::ArrayVec;

use crate::error::GameError;
use crate::piece::Piece;
use crate::types::{Direction, Position};

/// The board: `height` rows of `width` pieces and the power source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    radius: u8,
    pieces: Vec<Piece>,
    power: Position,
}

impl Grid {
    /// Create a grid of closed, unpowered pieces with the power source at
    /// `power`.
    pub fn new(width: usize, height: usize, power: Position, radius: u8) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }
        if radius == 0 {
            return Err(GameError::InvalidRadius { radius });
        }
        if power.row >= height || power.col >= width {
            return Err(GameError::PowerSourceOutOfBounds {
                row: power.row,
                col: power.col,
            });
        }

        let mut pieces = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                pieces.push(Piece::new(Position::new(row, col), radius));
            }
        }

        let mut grid = Self {
            width,
            height,
            radius,
            pieces,
            power,
        };
        let idx = grid.flat(power);
        grid.pieces[idx].set_power_source(true);
        Ok(grid)
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    /// Flat index of a position already known to be in bounds.
    #[inline(always)]
    fn flat(&self, pos: Position) -> usize {
        pos.row * self.width + pos.col
    }

    /// Position of a flat index.
    pub fn position_of(&self, idx: usize) -> Position {
        Position::new(idx / self.width, idx % self.width)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn radius(&self) -> u8 {
        self.radius
    }

    /// Number of pieces on the board
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Piece> {
        self.index(row, col).map(|idx| &self.pieces[idx])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Piece> {
        self.index(row, col).map(move |idx| &mut self.pieces[idx])
    }

    /// Piece lookup that reports out-of-bounds coordinates as an error
    pub fn piece_at(&self, row: usize, col: usize) -> Result<&Piece, GameError> {
        self.get(row, col).ok_or(GameError::OutOfBounds { row, col })
    }

    pub fn piece_at_mut(&mut self, row: usize, col: usize) -> Result<&mut Piece, GameError> {
        self.get_mut(row, col).ok_or(GameError::OutOfBounds { row, col })
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn pieces_mut(&mut self) -> &mut [Piece] {
        &mut self.pieces
    }

    /// Current power source location
    pub fn power_source(&self) -> Position {
        self.power
    }

    /// Move the power source one step.
    ///
    /// Clears the source flag and power at the old location and sets the
    /// flag at the new one. Returns false (and changes nothing) if the move
    /// would leave the board.
    pub fn move_power_source(&mut self, dir: Direction) -> bool {
        let Some(next) = self.power.step(dir, self.width, self.height) else {
            return false;
        };

        let old = self.flat(self.power);
        self.pieces[old].set_power_source(false);
        self.pieces[old].set_power_amount(0);

        let new = self.flat(next);
        self.pieces[new].set_power_source(true);
        self.power = next;
        true
    }

    /// In-bounds neighbour of `pos` in `dir`
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        pos.step(dir, self.width, self.height)
    }

    /// True if `pos` and its neighbour in `dir` both open the facing
    /// connectors.
    pub fn is_matched(&self, pos: Position, dir: Direction) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let Some(other) = self.neighbor(pos, dir) else {
            return false;
        };
        self.pieces[self.flat(pos)].is_open(dir)
            && self.pieces[self.flat(other)].is_open(dir.opposite())
    }

    /// Neighbours reachable from `pos` through matched connectors.
    ///
    /// Stack-only, at most four entries.
    pub fn matched_neighbors(&self, pos: Position) -> ArrayVec<Position, 4> {
        let mut out = ArrayVec::new();
        let Some(piece) = self.get(pos.row, pos.col) else {
            return out;
        };
        let open = piece.connectors();
        for dir in open.iter() {
            let Some(other) = self.neighbor(pos, dir) else {
                continue;
            };
            if self.pieces[self.flat(other)].is_open(dir.opposite()) {
                out.push(other);
            }
        }
        out
    }

    /// Every matched edge on the board, each undirected pair once.
    ///
    /// Pairs are listed with the upper/left piece first.
    pub fn matched_edges(&self) -> Vec<(Position, Position)> {
        let mut edges = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                let pos = Position::new(row, col);
                for dir in [Direction::Down, Direction::Right] {
                    if self.is_matched(pos, dir) {
                        if let Some(other) = self.neighbor(pos, dir) {
                            edges.push((pos, other));
                        }
                    }
                }
            }
        }
        edges
    }

    /// Number of row- and column-adjacent piece pairs
    pub fn candidate_edge_count(&self) -> usize {
        self.height * (self.width - 1) + self.width * (self.height - 1)
    }

    /// Build a grid from explicit connector rows (for tests and demos).
    ///
    /// Every row must have the same length.
    pub fn from_connectors(
        rows: &[Vec<crate::types::Connectors>],
        power: Position,
        radius: u8,
    ) -> Result<Self, GameError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.iter().any(|r| r.len() != width) {
            return Err(GameError::InvalidDimensions { width, height });
        }

        let mut grid = Self::new(width, height, power, radius)?;
        for (row, cells) in rows.iter().enumerate() {
            for (col, connectors) in cells.iter().enumerate() {
                let idx = row * width + col;
                grid.pieces[idx].set_connectors(*connectors);
            }
        }
        Ok(grid)
    }
}
