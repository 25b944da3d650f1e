//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Coordinates
//!
//! Pieces are addressed by `(row, col)`:
//!
//! - **row** grows downwards, `0` is the top row
//! - **col** grows to the right, `0` is the leftmost column
//! - Storage order is row-major (`row * width + col`)
//!
//! # Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 8 | Columns in a default board |
//! | `DEFAULT_HEIGHT` | 8 | Rows in a default board |
//! | `DEFAULT_RADIUS` | 10 | Power amount handed to every connected piece |
//! | `EDGE_WEIGHT_BOUND` | 100 | Candidate edge weights are drawn from `[0, 100)` |
//!
//! # Examples
//!
//! ```
//! use light_em_all_types::{Connectors, Direction, GameAction};
//!
//! // An elbow joining the top and the right side
//! let elbow = Connectors::empty().with(Direction::Up).with(Direction::Right);
//!
//! // Rotating clockwise turns it into a right/bottom elbow
//! let turned = elbow.rotate_cw();
//! assert!(turned.contains(Direction::Right));
//! assert!(turned.contains(Direction::Down));
//! assert!(!turned.contains(Direction::Up));
//!
//! // Parse an action
//! let action = GameAction::from_str("up").unwrap();
//! assert_eq!(action, GameAction::MovePower(Direction::Up));
//! ```

/// Default board width in pieces
pub const DEFAULT_WIDTH: usize = 8;

/// Default board height in pieces
pub const DEFAULT_HEIGHT: usize = 8;

/// Power amount assigned to every piece connected to the source.
pub const DEFAULT_RADIUS: u8 = 10;

/// Exclusive upper bound for random candidate edge weights.
pub const EDGE_WEIGHT_BOUND: u32 = 100;

/// One of the four sides of a piece, also used as a movement direction.
///
/// The declaration order is clockwise starting at the top, which is the same
/// order as the bits of [`Connectors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in clockwise order, starting at `Up`.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// The side facing this one on a neighbouring piece
    ///
    /// # Examples
    ///
    /// ```
    /// use light_em_all_types::Direction;
    ///
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Row/column delta of a single step in this direction.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Direction::Up => 0b0001,
            Direction::Right => 0b0010,
            Direction::Down => 0b0100,
            Direction::Left => 0b1000,
        }
    }

    /// Parse a direction from string (case-insensitive)
    ///
    /// Accepts names or single letters, plus the top/bottom aliases:
    /// "up" | "u" | "top", "right" | "r", "down" | "d" | "bottom", "left" | "l"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" | "top" => Some(Direction::Up),
            "right" | "r" => Some(Direction::Right),
            "down" | "d" | "bottom" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

/// Set of open connectors on a piece, stored as four bits.
///
/// Bit 0 is the top side and the bits continue clockwise (right, bottom,
/// left), so a clockwise rotation is a 4-bit rotate-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Connectors(u8);

impl Connectors {
    const MASK: u8 = 0b1111;

    /// No open connectors.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// All four connectors open.
    pub const fn all() -> Self {
        Self(Self::MASK)
    }

    /// Build from raw bits; `None` if any bit above the low four is set.
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::MASK != 0 {
            return None;
        }
        Some(Self(bits))
    }

    /// Build from four independent side flags.
    pub fn from_flags(left: bool, right: bool, top: bool, bottom: bool) -> Self {
        let mut c = Self::empty();
        c.set(Direction::Left, left);
        c.set(Direction::Right, right);
        c.set(Direction::Up, top);
        c.set(Direction::Down, bottom);
        c
    }

    pub fn contains(&self, side: Direction) -> bool {
        self.0 & side.bit() != 0
    }

    pub fn insert(&mut self, side: Direction) {
        self.0 |= side.bit();
    }

    pub fn remove(&mut self, side: Direction) {
        self.0 &= !side.bit();
    }

    pub fn set(&mut self, side: Direction, open: bool) {
        if open {
            self.insert(side);
        } else {
            self.remove(side);
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, side: Direction) -> Self {
        self.insert(side);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of open connectors (0..=4).
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn left(&self) -> bool {
        self.contains(Direction::Left)
    }

    pub fn right(&self) -> bool {
        self.contains(Direction::Right)
    }

    pub fn top(&self) -> bool {
        self.contains(Direction::Up)
    }

    pub fn bottom(&self) -> bool {
        self.contains(Direction::Down)
    }

    /// Rotate clockwise by 90°
    ///
    /// New top = old left, new right = old top, new bottom = old right,
    /// new left = old bottom.
    ///
    /// # Examples
    ///
    /// ```
    /// use light_em_all_types::{Connectors, Direction};
    ///
    /// let left_only = Connectors::empty().with(Direction::Left);
    /// assert_eq!(left_only.rotate_cw(), Connectors::empty().with(Direction::Up));
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self(((self.0 << 1) | (self.0 >> 3)) & Self::MASK)
    }

    /// Rotate clockwise `turns` times (taken modulo 4).
    pub fn rotated(&self, turns: u32) -> Self {
        let mut c = *self;
        for _ in 0..turns % 4 {
            c = c.rotate_cw();
        }
        c
    }

    /// Iterate the open sides in clockwise order starting at the top.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.contains(*d))
    }
}

/// A `(row, col)` address on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring position one step in `dir`, if it stays inside a
    /// `width × height` board.
    ///
    /// # Examples
    ///
    /// ```
    /// use light_em_all_types::{Direction, Position};
    ///
    /// let origin = Position::new(0, 0);
    /// assert_eq!(origin.step(Direction::Up, 3, 3), None);
    /// assert_eq!(origin.step(Direction::Down, 3, 3), Some(Position::new(1, 0)));
    /// ```
    pub fn step(&self, dir: Direction, width: usize, height: usize) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        if row >= height || col >= width {
            return None;
        }
        Some(Position { row, col })
    }
}

/// Mutations the board accepts from the outside world.
///
/// These are the only two operations input front ends can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Rotate the piece at `(row, col)` clockwise
    RotatePiece { row: usize, col: usize },
    /// Move the power source one piece in the given direction
    MovePower(Direction),
}

impl GameAction {
    /// Parse a power move from its direction name
    ///
    /// Rotations carry coordinates and have no string form.
    ///
    /// # Examples
    ///
    /// ```
    /// use light_em_all_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("Left"), Some(GameAction::MovePower(Direction::Left)));
    /// assert_eq!(GameAction::from_str("rotate"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        Direction::from_str(s).map(GameAction::MovePower)
    }

    /// Short name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::RotatePiece { .. } => "rotate",
            GameAction::MovePower(_) => "movePower",
        }
    }
}

/// How the initial wiring of a board is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardLayout {
    /// Random spanning tree (Kruskal over random edge weights)
    #[default]
    Random,
    /// Hand-made pattern: a four-way bus along the middle row, straight
    /// vertical pieces everywhere else
    Fixed,
}

impl BoardLayout {
    /// Parse layout from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "random" | "kruskal" => Some(BoardLayout::Random),
            "fixed" | "manual" => Some(BoardLayout::Fixed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardLayout::Random => "random",
            BoardLayout::Fixed => "fixed",
        }
    }
}
