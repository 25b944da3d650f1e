//! Connectivity module - power propagation from the source
//!
//! Power flows breadth-first from the power source through matched edges only.
//! Every piece reached gets the full radius as its power amount, every other
//! piece gets zero. The puzzle is solved when every piece is reached.

use std::collections::{BTreeSet, VecDeque};

use tracing::trace;

use crate::grid::Grid;
use crate::types::Position;

/// Outcome of one propagation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropagationResult {
    /// Pieces connected to the power source (the source included)
    pub reachable: BTreeSet<Position>,
    /// True when every piece on the board is reachable
    pub won: bool,
}

impl PropagationResult {
    pub fn is_reachable(&self, pos: Position) -> bool {
        self.reachable.contains(&pos)
    }

    pub fn powered_count(&self) -> usize {
        self.reachable.len()
    }
}

/// Flat visited mask of pieces reachable from `source` through matched edges.
///
/// Pure: reads connector flags only. An out-of-bounds source reaches nothing.
pub fn reachable_from(grid: &Grid, source: Position) -> Vec<bool> {
    let mut visited = vec![false; grid.len()];
    let Some(start) = grid.index(source.row, source.col) else {
        return visited;
    };

    let mut queue: VecDeque<Position> = VecDeque::with_capacity(grid.len());
    visited[start] = true;
    queue.push_back(source);

    while let Some(pos) = queue.pop_front() {
        for next in grid.matched_neighbors(pos) {
            let Some(idx) = grid.index(next.row, next.col) else {
                continue;
            };
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            queue.push_back(next);
        }
    }

    visited
}

/// Recompute power for every piece from the grid's power source.
///
/// Reached pieces get `grid.radius()`, the rest get 0.
pub fn propagate(grid: &mut Grid) -> PropagationResult {
    let visited = reachable_from(grid, grid.power_source());
    let radius = grid.radius();

    let mut reachable = BTreeSet::new();
    for (idx, piece) in grid.pieces_mut().iter_mut().enumerate() {
        if visited[idx] {
            piece.set_power_amount(radius);
            reachable.insert(piece.position());
        } else {
            piece.set_power_amount(0);
        }
    }

    let won = reachable.len() == grid.len();
    trace!(powered = reachable.len(), total = grid.len(), won, "propagated");
    PropagationResult { reachable, won }
}
