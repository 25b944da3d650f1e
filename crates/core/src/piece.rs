//! Piece module - a single board cell with up to four connectors

use crate::types::{Connectors, Direction, Position};

/// One cell of the board.
///
/// The position is fixed at creation. Connectors, the power-source flag and
/// the power amount change as the game is played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    position: Position,
    connectors: Connectors,
    power_source: bool,
    power_amount: u8,
    radius: u8,
}

impl Piece {
    /// Create an unpowered piece with no open connectors
    pub fn new(position: Position, radius: u8) -> Self {
        Self {
            position,
            connectors: Connectors::empty(),
            power_source: false,
            power_amount: 0,
            radius,
        }
    }

    pub fn with_connectors(mut self, connectors: Connectors) -> Self {
        self.connectors = connectors;
        self
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn row(&self) -> usize {
        self.position.row
    }

    pub fn col(&self) -> usize {
        self.position.col
    }

    pub fn connectors(&self) -> Connectors {
        self.connectors
    }

    pub fn set_connectors(&mut self, connectors: Connectors) {
        self.connectors = connectors;
    }

    /// Open the connector on one side
    pub fn open(&mut self, side: Direction) {
        self.connectors.insert(side);
    }

    pub fn is_open(&self, side: Direction) -> bool {
        self.connectors.contains(side)
    }

    /// Rotate the piece 90° clockwise
    pub fn rotate(&mut self) {
        self.connectors = self.connectors.rotate_cw();
    }

    /// Rotate clockwise `turns` times
    pub fn rotate_times(&mut self, turns: u32) {
        self.connectors = self.connectors.rotated(turns);
    }

    pub fn is_power_source(&self) -> bool {
        self.power_source
    }

    pub fn set_power_source(&mut self, power_source: bool) {
        self.power_source = power_source;
    }

    pub fn power_amount(&self) -> u8 {
        self.power_amount
    }

    /// Set the power amount.
    ///
    /// # Panics
    ///
    /// Panics if `amount` exceeds the radius. Only the connectivity engine
    /// produces amounts, so a larger value is a bug, not bad input.
    pub fn set_power_amount(&mut self, amount: u8) {
        assert!(
            amount <= self.radius,
            "power amount {amount} exceeds radius {}",
            self.radius
        );
        self.power_amount = amount;
    }

    pub fn is_powered(&self) -> bool {
        self.power_amount > 0
    }

    pub fn radius(&self) -> u8 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece() -> Piece {
        Piece::new(Position::new(1, 2), 10)
    }

    #[test]
    fn test_new_piece_is_closed_and_unpowered() {
        let p = piece();
        assert_eq!(p.row(), 1);
        assert_eq!(p.col(), 2);
        assert!(p.connectors().is_empty());
        assert!(!p.is_power_source());
        assert_eq!(p.power_amount(), 0);
        assert!(!p.is_powered());
    }

    #[test]
    fn test_rotate_moves_left_to_top() {
        let mut p = piece();
        p.open(Direction::Left);
        p.open(Direction::Down);

        p.rotate();

        assert!(p.is_open(Direction::Up));
        assert!(p.is_open(Direction::Left));
        assert!(!p.is_open(Direction::Down));
        assert!(!p.is_open(Direction::Right));
    }

    #[test]
    fn test_rotate_four_times_restores() {
        let mut p = piece().with_connectors(Connectors::from_flags(true, false, true, false));
        let before = p.connectors();
        for _ in 0..4 {
            p.rotate();
        }
        assert_eq!(p.connectors(), before);
    }

    #[test]
    fn test_rotate_times_matches_repeated_rotate() {
        let start = Connectors::from_flags(false, true, true, false);
        let mut a = piece().with_connectors(start);
        let mut b = piece().with_connectors(start);
        a.rotate_times(3);
        for _ in 0..3 {
            b.rotate();
        }
        assert_eq!(a.connectors(), b.connectors());
    }

    #[test]
    fn test_set_power_amount_within_radius() {
        let mut p = piece();
        p.set_power_amount(10);
        assert_eq!(p.power_amount(), 10);
        assert!(p.is_powered());
        p.set_power_amount(0);
        assert!(!p.is_powered());
    }

    #[test]
    #[should_panic(expected = "exceeds radius")]
    fn test_set_power_amount_above_radius_panics() {
        let mut p = piece();
        p.set_power_amount(11);
    }
}
