use std::fmt;

/// Errors reported by board construction and board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Width or height is zero
    InvalidDimensions { width: usize, height: usize },
    /// Power handed to connected pieces must be positive
    InvalidRadius { radius: u8 },
    /// The requested power source start lies outside the board
    PowerSourceOutOfBounds { row: usize, col: usize },
    /// A piece address outside the board
    OutOfBounds { row: usize, col: usize },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidDimensions { width, height } => {
                write!(f, "board must be at least 1x1, got {width}x{height}")
            }
            GameError::InvalidRadius { radius } => {
                write!(f, "power radius must be at least 1, got {radius}")
            }
            GameError::PowerSourceOutOfBounds { row, col } => {
                write!(f, "power source start ({row}, {col}) is outside the board")
            }
            GameError::OutOfBounds { row, col } => {
                write!(f, "no piece at ({row}, {col})")
            }
        }
    }
}

impl std::error::Error for GameError {}
