//! Keyboard selection cursor.

use crate::types::{Direction, Position};

/// Selected piece, clamped to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: Position,
    width: usize,
    height: usize,
}

impl Cursor {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            position: Position::new(0, 0),
            width,
            height,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move one step; stays put at the board edge. Returns true if it moved.
    pub fn step(&mut self, dir: Direction) -> bool {
        match self.position.step(dir, self.width, self.height) {
            Some(next) => {
                self.position = next;
                true
            }
            None => false,
        }
    }

    /// Jump to `pos` if it is on the board.
    pub fn select(&mut self, pos: Position) -> bool {
        if pos.row >= self.height || pos.col >= self.width {
            return false;
        }
        self.position = pos;
        true
    }
}
