//! Topology module - builds the hidden wiring of a fresh board
//!
//! A random board is a spanning tree of the grid graph: every piece is wired
//! into one network with exactly one path between any two pieces. The tree is
//! found with Kruskal's algorithm over randomly weighted candidate edges, then
//! imprinted onto the pieces' connectors, then hidden by rotating every piece
//! a random number of quarter turns.
//!
//! # Steps
//!
//! 1. [`candidate_edges`]: one edge per vertically and horizontally adjacent
//!    pair, enumerated row-major (the edge below a piece before the edge to its
//!    right), each weighted uniformly in `[0, EDGE_WEIGHT_BOUND)`
//! 2. [`kruskal`]: stable ascending sort by weight, union-find over flat piece
//!    indices, stop at `N - 1` edges
//! 3. [`imprint`]: open the facing connectors of both endpoints of each tree edge
//! 4. [`scramble`]: rotate every piece clockwise `[0, 3]` times

use tracing::trace;

use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::types::{BoardLayout, Connectors, Direction, EDGE_WEIGHT_BOUND};

/// A candidate connection between two adjacent pieces (flat indices).
///
/// `a` is always the upper or left piece of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedEdge {
    pub a: usize,
    pub b: usize,
    pub weight: u32,
}

/// Edges chosen by Kruskal's algorithm, in the order they were accepted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpanningTree {
    edges: Vec<WeightedEdge>,
}

impl SpanningTree {
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Disjoint-set forest over `0..n` with union by rank and path halving.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Representative of `x`'s set.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merge the sets of `a` and `b`. Returns false if they were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

/// Enumerate every adjacent pair with a random weight.
pub fn candidate_edges(grid: &Grid, rng: &mut impl RandomSource) -> Vec<WeightedEdge> {
    let width = grid.width();
    let height = grid.height();
    let mut edges = Vec::with_capacity(grid.candidate_edge_count());

    for row in 0..height {
        for col in 0..width {
            let idx = row * width + col;
            if row + 1 < height {
                edges.push(WeightedEdge {
                    a: idx,
                    b: idx + width,
                    weight: rng.next_below(EDGE_WEIGHT_BOUND),
                });
            }
            if col + 1 < width {
                edges.push(WeightedEdge {
                    a: idx,
                    b: idx + 1,
                    weight: rng.next_below(EDGE_WEIGHT_BOUND),
                });
            }
        }
    }

    edges
}

/// Minimum spanning tree over `node_count` nodes.
///
/// Ties in weight keep enumeration order.
pub fn kruskal(node_count: usize, mut edges: Vec<WeightedEdge>) -> SpanningTree {
    edges.sort_by_key(|e| e.weight);

    let target = node_count.saturating_sub(1);
    let mut sets = UnionFind::new(node_count);
    let mut tree = Vec::with_capacity(target);

    for edge in edges {
        if tree.len() == target {
            break;
        }
        if sets.union(edge.a, edge.b) {
            tree.push(edge);
        }
    }

    SpanningTree { edges: tree }
}

/// Random spanning tree for `grid`'s dimensions.
pub fn spanning_tree(grid: &Grid, rng: &mut impl RandomSource) -> SpanningTree {
    let edges = candidate_edges(grid, rng);
    kruskal(grid.len(), edges)
}

/// Open the facing connectors for every edge in `tree`.
pub fn imprint(grid: &mut Grid, tree: &SpanningTree) {
    let width = grid.width();
    for edge in tree.edges() {
        let (toward_b, toward_a) = if edge.b == edge.a + width {
            (Direction::Down, Direction::Up)
        } else {
            (Direction::Right, Direction::Left)
        };
        grid.pieces_mut()[edge.a].open(toward_b);
        grid.pieces_mut()[edge.b].open(toward_a);
    }
}

/// Rotate every piece clockwise a random `[0, 3]` times.
pub fn scramble(grid: &mut Grid, rng: &mut impl RandomSource) {
    for piece in grid.pieces_mut() {
        piece.rotate_times(rng.next_below(4));
    }
}

/// Wire the fixed pattern: a four-way bus on the middle row and straight
/// vertical pieces everywhere else.
pub fn fixed_pattern(grid: &mut Grid) {
    let bus_row = grid.height() / 2;
    let vertical = Connectors::empty().with(Direction::Up).with(Direction::Down);
    for piece in grid.pieces_mut() {
        if piece.row() == bus_row {
            piece.set_connectors(Connectors::all());
        } else {
            piece.set_connectors(vertical);
        }
    }
}

/// Generate the wiring for a fresh board and scramble it.
///
/// Replaces whatever connectors the pieces had.
pub fn build(grid: &mut Grid, layout: BoardLayout, rng: &mut impl RandomSource) {
    for piece in grid.pieces_mut() {
        piece.set_connectors(Connectors::empty());
    }

    match layout {
        BoardLayout::Random => {
            let tree = spanning_tree(grid, rng);
            trace!(edges = tree.len(), pieces = grid.len(), "spanning tree built");
            imprint(grid, &tree);
        }
        BoardLayout::Fixed => fixed_pattern(grid),
    }

    scramble(grid, rng);
}
