//! Facade behaviour across whole games.

use light_em_all::core::rng::SimpleRng;
use light_em_all::core::topology::{self, spanning_tree};
use light_em_all::core::{GameConfig, GameError, GameEvent, GameState, GameStatus, Grid};
use light_em_all::term::{GameView, Viewport};
use light_em_all::types::{BoardLayout, Connectors, Direction, GameAction, Position};

/// A wired tree and a scrambled copy of it.
fn solved_and_scrambled(width: usize, height: usize, seed: u32) -> (Grid, Grid) {
    let mut solved = Grid::new(width, height, Position::new(0, 0), 10).unwrap();
    let tree = spanning_tree(&solved, &mut SimpleRng::new(seed));
    topology::imprint(&mut solved, &tree);
    let mut scrambled = solved.clone();
    topology::scramble(&mut scrambled, &mut SimpleRng::new(seed.wrapping_add(1)));
    (solved, scrambled)
}

fn target(solved: &Grid, row: usize, col: usize) -> Connectors {
    solved.get(row, col).unwrap().connectors()
}

#[test]
fn unscrambling_every_piece_wins() {
    for seed in 1..6 {
        let (solved, scrambled) = solved_and_scrambled(6, 5, seed);
        let mut game = GameState::from_grid(scrambled);

        'outer: for row in 0..5 {
            for col in 0..6 {
                let mut turns = 0;
                while game.piece_at(row, col).unwrap().connectors() != target(&solved, row, col) {
                    if game.is_won() {
                        break 'outer;
                    }
                    game.rotate(row, col).unwrap();
                    turns += 1;
                    assert!(turns <= 3, "piece ({row}, {col}) never lined up");
                }
            }
        }

        assert_eq!(game.status(), GameStatus::Won, "seed {seed}");
        assert_eq!(game.result().powered_count(), 30);
    }
}

#[test]
fn solved_event_reports_moves() {
    let horizontal = Connectors::empty()
        .with(Direction::Left)
        .with(Direction::Right);
    let mut grid =
        Grid::from_connectors(&[vec![horizontal; 3]], Position::new(0, 0), 10).unwrap();
    grid.get_mut(0, 2).unwrap().rotate();
    let mut game = GameState::from_grid(grid);
    game.take_events();

    game.rotate(0, 2).unwrap();
    let events = game.take_events();
    assert!(events.contains(&GameEvent::Solved { moves: 1 }));
    assert!(game.is_won());
}

#[test]
fn power_cannot_leave_the_board() {
    let mut game = GameState::new(&GameConfig::new(4, 4).with_seed(3)).unwrap();
    game.take_events();
    let before = game.grid().clone();

    let result = game.move_power(Direction::Up);
    assert_eq!(game.grid(), &before);
    assert_eq!(game.grid().power_source(), Position::new(0, 0));
    assert_eq!(&result, game.result());
    assert_eq!(game.moves(), 0);
    assert!(game.take_events().is_empty());
}

#[test]
fn moving_power_updates_the_source_flag() {
    // Closed pieces never connect, so the board cannot be won by accident.
    let mut game = GameState::from_grid(Grid::new(3, 3, Position::new(0, 0), 10).unwrap());
    game.move_power(Direction::Right);
    game.move_power(Direction::Down);

    let source = game.grid().power_source();
    assert_eq!(source, Position::new(1, 1));
    let sources = game
        .grid()
        .pieces()
        .iter()
        .filter(|p| p.is_power_source())
        .count();
    assert_eq!(sources, 1);
    assert!(game.piece_at(1, 1).unwrap().power_source);
    assert!(game.result().is_reachable(source));
}

#[test]
fn rotate_outside_board_is_rejected() {
    let mut game = GameState::from_grid(Grid::new(3, 2, Position::new(0, 0), 10).unwrap());
    assert_eq!(
        game.apply_action(GameAction::RotatePiece { row: 2, col: 0 }),
        Err(GameError::OutOfBounds { row: 2, col: 0 })
    );
}

#[test]
fn fixed_layout_game_starts() {
    let cfg = GameConfig::new(5, 5)
        .with_seed(11)
        .with_layout(BoardLayout::Fixed)
        .with_power(2, 2);
    let game = GameState::new(&cfg).unwrap();
    assert_eq!(game.grid().power_source(), Position::new(2, 2));
    for col in 0..5 {
        assert_eq!(game.piece_at(2, col).unwrap().connectors(), Connectors::all());
    }
}

#[test]
fn clicking_a_rendered_piece_rotates_it() {
    let mut game = GameState::new(&GameConfig::new(4, 3).with_seed(21)).unwrap();
    let view = GameView::default();
    let viewport = Viewport::new(40, 12);
    let snap = game.snapshot();

    // Frame is 4*3+2 wide, centred; first piece column starts one past the border.
    let start_x = (40 - 14) / 2;
    let start_y = (12 - 5) / 2;
    let pos = view
        .cell_at(&snap, viewport, start_x + 1 + 3 * 2 + 1, start_y + 1 + 1)
        .unwrap();
    assert_eq!(pos, Position::new(1, 2));

    let before = game.piece_at(1, 2).unwrap().connectors();
    let was_won = game.is_won();
    game.rotate(pos.row, pos.col).unwrap();
    if !was_won {
        assert_eq!(
            game.piece_at(1, 2).unwrap().connectors(),
            before.rotate_cw()
        );
    }
}
