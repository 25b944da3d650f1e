//! Game configuration
//!
//! Defaults can be overridden from the environment:
//!
//! - `LIGHTEMALL_WIDTH`, `LIGHTEMALL_HEIGHT`: board size in pieces
//! - `LIGHTEMALL_POWER_ROW`, `LIGHTEMALL_POWER_COL`: power source start
//! - `LIGHTEMALL_SEED`: RNG seed
//! - `LIGHTEMALL_LAYOUT`: `random` or `fixed`
//!
//! Unparseable values fall back to the default.

use crate::error::GameError;
use crate::types::{BoardLayout, Position, DEFAULT_HEIGHT, DEFAULT_RADIUS, DEFAULT_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub power_row: usize,
    pub power_col: usize,
    pub seed: u32,
    pub radius: u8,
    pub layout: BoardLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            power_row: 0,
            power_col: 0,
            seed: 1,
            radius: DEFAULT_RADIUS,
            layout: BoardLayout::Random,
        }
    }
}

impl GameConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_power(mut self, row: usize, col: usize) -> Self {
        self.power_row = row;
        self.power_col = col;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_layout(mut self, layout: BoardLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn power(&self) -> Position {
        Position::new(self.power_row, self.power_col)
    }

    pub fn from_env() -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let d = Self::default();
        Self {
            width: parsed("LIGHTEMALL_WIDTH").unwrap_or(d.width),
            height: parsed("LIGHTEMALL_HEIGHT").unwrap_or(d.height),
            power_row: parsed("LIGHTEMALL_POWER_ROW").unwrap_or(d.power_row),
            power_col: parsed("LIGHTEMALL_POWER_COL").unwrap_or(d.power_col),
            seed: parsed("LIGHTEMALL_SEED").unwrap_or(d.seed),
            radius: d.radius,
            layout: env::var("LIGHTEMALL_LAYOUT")
                .ok()
                .and_then(|s| BoardLayout::from_str(s.trim()))
                .unwrap_or(d.layout),
        }
    }

    /// Check the parameters a board can be built from.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.radius == 0 {
            return Err(GameError::InvalidRadius {
                radius: self.radius,
            });
        }
        if self.power_row >= self.height || self.power_col >= self.width {
            return Err(GameError::PowerSourceOutOfBounds {
                row: self.power_row,
                col: self.power_col,
            });
        }
        Ok(())
    }
}
