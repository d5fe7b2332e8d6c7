//! Property tests for grid, collision and scoring invariants.

use classic_tetris::core::{
    catalog_shape, is_valid, level_for_lines, line_clear_points, ActionOutcome, GameState, Grid,
    Scoreboard,
};
use classic_tetris::types::{GameAction, Phase, PieceKind, Rgb, GRID_HEIGHT, GRID_WIDTH};
use proptest::prelude::*;

const GREY: Rgb = Rgb::new(128, 128, 128);

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    (0usize..7).prop_map(|i| PieceKind::ALL[i])
}

fn action_strategy() -> impl Strategy<Value = GameAction> {
    prop_oneof![
        4 => Just(GameAction::MoveLeft),
        4 => Just(GameAction::MoveRight),
        4 => Just(GameAction::SoftDrop),
        4 => Just(GameAction::Rotate),
        1 => Just(GameAction::PauseToggle),
        1 => Just(GameAction::Restart),
        1 => Just(GameAction::Start),
    ]
}

proptest! {
    #[test]
    fn placement_outside_walls_or_floor_is_invalid(
        kind in kind_strategy(),
        x in -6i16..16,
        y in -6i16..26,
    ) {
        let grid = Grid::new();
        let shape = catalog_shape(kind);
        let in_bounds = x >= 0
            && x + shape.cols() as i16 <= GRID_WIDTH as i16
            && y + shape.rows() as i16 <= GRID_HEIGHT as i16;
        prop_assert_eq!(is_valid(&grid, &shape, x, y), in_bounds);
    }

    #[test]
    fn four_rotations_are_identity(kind in kind_strategy(), turns in 0usize..4) {
        let base = catalog_shape(kind);
        let mut shape = base;
        for _ in 0..turns {
            shape = shape.rotated();
        }
        prop_assert_eq!(shape.cells().count(), base.cells().count());
        for _ in turns..4 {
            shape = shape.rotated();
        }
        prop_assert_eq!(shape, base);
    }

    #[test]
    fn clear_row_drops_exactly_one_row_of_cells(
        bits in proptest::collection::vec(any::<bool>(), GRID_WIDTH * GRID_HEIGHT),
        row in 0usize..GRID_HEIGHT,
    ) {
        let mut grid = Grid::new();
        for (i, &on) in bits.iter().enumerate() {
            if on {
                grid.set((i / GRID_WIDTH) as i16, (i % GRID_WIDTH) as i16, Some(GREY));
            }
        }
        let before = grid.occupied_count();
        let in_row = grid.row(row).iter().filter(|c| c.is_some()).count();
        let below: Vec<_> = (row + 1..GRID_HEIGHT).map(|r| grid.row(r).to_vec()).collect();

        prop_assert!(grid.clear_row(row));
        prop_assert_eq!(grid.occupied_count(), before - in_row);
        prop_assert!(grid.row(0).iter().all(|c| c.is_none()));
        for (i, r) in (row + 1..GRID_HEIGHT).enumerate() {
            prop_assert_eq!(grid.row(r), below[i].as_slice());
        }
    }

    #[test]
    fn clear_full_rows_leaves_no_full_row(
        full in proptest::collection::vec(any::<bool>(), GRID_HEIGHT),
    ) {
        let mut grid = Grid::new();
        for (row, &is_full) in full.iter().enumerate() {
            for col in 0..GRID_WIDTH {
                if is_full || col != row % GRID_WIDTH {
                    grid.set(row as i16, col as i16, Some(GREY));
                }
            }
        }
        let expected = full.iter().filter(|&&f| f).count();
        let before = grid.occupied_count();

        let cleared = grid.clear_full_rows();
        prop_assert_eq!(cleared.len(), expected);
        prop_assert_eq!(grid.occupied_count(), before - expected * GRID_WIDTH);
        prop_assert!((0..GRID_HEIGHT).all(|r| !grid.row_is_full(r)));
    }

    #[test]
    fn scoring_follows_level_before_clear(clears in proptest::collection::vec(0u32..=4, 1..60)) {
        let mut board = Scoreboard::new(0);
        let mut expected_score = 0u32;
        let mut total = 0u32;
        for lines in clears {
            let level = board.level();
            let result = board.record_clear(lines);
            expected_score += line_clear_points(lines, level);
            total += lines;
            prop_assert_eq!(result.points, lines * 100 * level);
            prop_assert_eq!(board.score(), expected_score);
            prop_assert_eq!(board.lines_cleared(), total);
            prop_assert_eq!(board.level(), total / 10 + 1);
            prop_assert_eq!(board.level(), level_for_lines(total));
            prop_assert!(board.high_score() >= board.score());
        }
    }

    #[test]
    fn random_play_keeps_engine_consistent(
        seed in any::<u32>(),
        actions in proptest::collection::vec(action_strategy(), 1..300),
    ) {
        let mut game = GameState::new(seed, 0);
        game.apply_action(GameAction::Start);
        for action in actions {
            prop_assert_ne!(game.apply_action(action), ActionOutcome::Exit);
            game.tick();

            prop_assert_eq!(game.level(), game.lines_cleared() / 10 + 1);
            prop_assert!(game.high_score() >= game.score());
            prop_assert!((0..GRID_HEIGHT).all(|r| !game.grid().row_is_full(r)));
            if game.phase() == Phase::Playing {
                let active = game.active();
                prop_assert!(is_valid(game.grid(), &active.shape, active.x, active.y));
            }
        }
    }
}
