//! Power propagation over hand-built boards.

use std::collections::BTreeSet;

use light_em_all::core::connectivity::propagate;
use light_em_all::core::Grid;
use light_em_all::types::{Connectors, Direction, Position};

fn piece(sides: &[Direction]) -> Connectors {
    sides.iter().fold(Connectors::empty(), |c, &d| c.with(d))
}

/// 2x2 loop: every piece opens towards both of its neighbours.
fn ring() -> Vec<Vec<Connectors>> {
    use Direction::*;
    vec![
        vec![piece(&[Right, Down]), piece(&[Left, Down])],
        vec![piece(&[Up, Right]), piece(&[Up, Left])],
    ]
}

#[test]
fn ring_is_fully_powered() {
    let mut grid = Grid::from_connectors(&ring(), Position::new(0, 0), 10).unwrap();
    let result = propagate(&mut grid);

    assert!(result.won);
    assert_eq!(result.powered_count(), 4);
    for p in grid.pieces() {
        assert_eq!(p.power_amount(), 10);
    }
}

#[test]
fn closing_one_corner_of_the_ring_isolates_it() {
    let mut rows = ring();
    rows[1][1] = Connectors::empty();
    let mut grid = Grid::from_connectors(&rows, Position::new(0, 0), 10).unwrap();
    let result = propagate(&mut grid);

    let expected: BTreeSet<Position> = [
        Position::new(0, 0),
        Position::new(0, 1),
        Position::new(1, 0),
    ]
    .into_iter()
    .collect();
    assert_eq!(result.reachable, expected);
    assert!(!result.won);
    assert_eq!(grid.get(1, 1).unwrap().power_amount(), 0);
}

#[test]
fn propagate_is_idempotent() {
    let mut rows = ring();
    rows[0][1] = piece(&[Direction::Up]);
    let mut grid = Grid::from_connectors(&rows, Position::new(1, 1), 10).unwrap();

    let first = propagate(&mut grid);
    let powered: Vec<u8> = grid.pieces().iter().map(|p| p.power_amount()).collect();
    let second = propagate(&mut grid);
    let powered_again: Vec<u8> = grid.pieces().iter().map(|p| p.power_amount()).collect();

    assert_eq!(first, second);
    assert_eq!(powered, powered_again);
}

#[test]
fn four_rotations_restore_every_shape() {
    for bits in 0..16u8 {
        let rows = vec![vec![Connectors::from_bits(bits).unwrap()]];
        let mut grid = Grid::from_connectors(&rows, Position::new(0, 0), 10).unwrap();
        let before = grid.get(0, 0).unwrap().connectors();
        for _ in 0..4 {
            grid.get_mut(0, 0).unwrap().rotate();
        }
        assert_eq!(grid.get(0, 0).unwrap().connectors(), before);
    }
}

#[test]
fn rotating_a_bridge_toggles_the_win() {
    let horizontal = piece(&[Direction::Left, Direction::Right]);
    let rows = vec![vec![horizontal; 3]];
    let mut grid = Grid::from_connectors(&rows, Position::new(0, 0), 10).unwrap();
    assert!(propagate(&mut grid).won);

    grid.get_mut(0, 1).unwrap().rotate();
    let broken = propagate(&mut grid);
    assert!(!broken.won);
    assert_eq!(broken.powered_count(), 1);

    grid.get_mut(0, 1).unwrap().rotate();
    assert!(propagate(&mut grid).won);

    // A straight piece lines up every other turn; four turns always restore it.
    grid.get_mut(0, 1).unwrap().rotate();
    assert!(!propagate(&mut grid).won);
    grid.get_mut(0, 1).unwrap().rotate();
    assert!(propagate(&mut grid).won);
}

#[test]
fn all_open_square_with_a_closed_corner() {
    let mut rows = vec![vec![Connectors::all(); 2]; 2];
    let mut grid = Grid::from_connectors(&rows, Position::new(0, 0), 10).unwrap();
    assert!(propagate(&mut grid).won);

    rows[1][1] = Connectors::empty();
    let mut grid = Grid::from_connectors(&rows, Position::new(0, 0), 10).unwrap();
    let result = propagate(&mut grid);
    assert_eq!(result.powered_count(), 3);
    assert!(!result.is_reachable(Position::new(1, 1)));
    assert!(!result.won);
}

#[test]
fn power_follows_a_moved_source() {
    use Direction::*;
    // Two islands: a vertical pair on the left and a lone piece on the right.
    let rows = vec![
        vec![piece(&[Down]), Connectors::empty()],
        vec![piece(&[Up]), Connectors::empty()],
    ];
    let mut grid = Grid::from_connectors(&rows, Position::new(0, 0), 10).unwrap();
    assert_eq!(propagate(&mut grid).powered_count(), 2);

    assert!(grid.move_power_source(Right));
    let result = propagate(&mut grid);
    assert_eq!(result.powered_count(), 1);
    assert!(result.is_reachable(Position::new(0, 1)));
    assert_eq!(grid.get(0, 0).unwrap().power_amount(), 0);
}
