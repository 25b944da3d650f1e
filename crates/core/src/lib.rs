//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the puzzle rules: board generation, the connector
//! model, power propagation and the game facade. It has **no dependencies** on
//! rendering, terminal input, or I/O, making it:
//!
//! - **Deterministic**: the same seed produces the same scrambled board
//! - **Testable**: every rule is reachable from plain unit tests
//! - **Portable**: can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`piece`]: a single cell and its four connectors
//! - [`grid`]: row-major board storage, neighbour lookup and matched edges
//! - [`rng`]: seeded LCG and the [`RandomSource`] seam
//! - [`topology`]: Kruskal spanning tree, imprinting and scrambling
//! - [`connectivity`]: breadth-first power propagation and the win check
//! - [`game_state`]: the facade driven by input front ends
//! - [`snapshot`]: read-only views and renderer notifications
//! - [`config`]: board parameters with environment overrides
//!
//! # Game Rules
//!
//! - A fresh board is a spanning tree over all pieces, hidden by rotating
//!   every piece a random number of quarter turns
//! - Two neighbours are connected only if **both** open the facing side
//! - Every piece connected to the power source receives full power
//! - The puzzle is solved when every piece is powered; solving is final
//!
//! # Example
//!
//! ```
//! use light_em_all_core::{GameConfig, GameState};
//! use light_em_all_types::Direction;
//!
//! let mut game = GameState::new(&GameConfig::new(5, 5).with_seed(12345)).unwrap();
//!
//! // Rotate a piece and move the power source
//! game.rotate(2, 3).unwrap();
//! let result = game.move_power(Direction::Down);
//!
//! // The source itself is always powered
//! assert!(result.is_reachable(game.grid().power_source()));
//! ```

pub mod config;
pub mod connectivity;
pub mod error;
pub mod game_state;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod snapshot;
pub mod topology;

pub use light_em_all_types as types;

// Re-export commonly used types for convenience
pub use config::GameConfig;
pub use connectivity::{propagate, reachable_from, PropagationResult};
pub use error::GameError;
pub use game_state::{GameState, GameStatus};
pub use grid::Grid;
pub use piece::Piece;
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use snapshot::{GameEvent, GameSnapshot, PieceSnapshot};
pub use topology::{SpanningTree, UnionFind, WeightedEdge};
