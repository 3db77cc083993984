#[cfg(test)]
mod tests {
    use crate::components::{Board, Cell, Position, TetrominoType};
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
    use crate::session::*;
    use crate::tests::test_utils::{
        TEST_SEED, block_spawn_area, fill_row_except, place_piece, started_session,
    };

    fn drop_until_landed(session: &mut GameSession) -> (usize, DropOutcome) {
        let mut falls = 0;
        loop {
            match session.move_down() {
                DropOutcome::Falling => falls += 1,
                outcome => return (falls, outcome),
            }
        }
    }

    #[test]
    fn test_new_session_not_started() {
        let session = GameSession::with_seed(TEST_SEED);
        assert_eq!(session.state(), SessionState::NotStarted);
        assert!(session.current_piece.is_none());
        assert_eq!(session.score, 0);
        assert_eq!(session.level, 1);
        assert!(session.board.is_empty());
    }

    #[test]
    fn test_start_spawns_centered_piece() {
        let session = started_session();
        assert_eq!(session.state(), SessionState::Playing);

        let piece = session.current_piece.as_ref().expect("piece after start");
        assert_eq!(piece.position, Position { x: 4, y: 0 });
        assert_eq!(piece.shape, piece.tetromino_type.shape());
    }

    #[test]
    fn test_start_resets_previous_game() {
        let mut session = started_session();
        session.score = 2500;
        session.level = 3;
        session.lines_cleared = 12;
        fill_row_except(&mut session.board, 19, &[0]);

        session.start();

        assert_eq!(session.score, 0);
        assert_eq!(session.level, 1);
        assert_eq!(session.lines_cleared, 0);
        assert!(session.board.is_empty());
        assert!(session.is_playing());
    }

    #[test]
    fn test_init_board_clears_cells() {
        let mut session = started_session();
        fill_row_except(&mut session.board, 10, &[]);
        session.init_board();

        assert!(session.board.is_empty());
        assert_eq!(session.board.rows.len(), BOARD_HEIGHT);
        assert_eq!(session.board.width, BOARD_WIDTH);
    }

    #[test]
    fn test_seeded_sessions_spawn_the_same_sequence() {
        let mut a = GameSession::with_seed(99);
        let mut b = GameSession::with_seed(99);
        a.start();
        b.start();

        for _ in 0..20 {
            a.spawn_piece();
            b.spawn_piece();
            let type_a = a.current_piece.as_ref().map(|p| p.tetromino_type);
            let type_b = b.current_piece.as_ref().map(|p| p.tetromino_type);
            assert_eq!(type_a, type_b);
        }
    }

    #[test]
    fn test_try_move_commits_valid_move() {
        let mut session = started_session();
        place_piece(&mut session, TetrominoType::T, 4, 5);

        assert!(session.move_left());
        assert!(session.move_right());
        assert!(session.move_right());
        assert!(session.try_move(0, 1));

        let piece = session.current_piece.as_ref().unwrap();
        assert_eq!(piece.position, Position { x: 5, y: 6 });
    }

    #[test]
    fn test_rejected_move_leaves_state_untouched() {
        let mut session = started_session();
        place_piece(&mut session, TetrominoType::O, 0, 10);
        session.board.set(2, 11, Cell::Filled);

        let before = session.clone();

        // Wall on the left, filled cell on the right
        assert!(!session.move_left());
        assert!(!session.move_right());
        assert!(!session.try_move(0, 20));

        assert_eq!(session.current_piece, before.current_piece);
        assert_eq!(session.board, before.board);
        assert_eq!(session.score, before.score);
    }

    #[test]
    fn test_try_move_with_rejects_colliding_shape() {
        let mut session = started_session();
        place_piece(&mut session, TetrominoType::I, 3, 19);

        let vertical = TetrominoType::I.shape().rotated_clockwise();
        assert!(!session.try_move_with(0, 0, vertical));

        let piece = session.current_piece.as_ref().unwrap();
        assert_eq!(piece.shape, TetrominoType::I.shape());
        assert_eq!(piece.position, Position { x: 3, y: 19 });
    }

    #[test]
    fn test_free_piece_rotated_four_times_returns_to_original() {
        for tetromino_type in TetrominoType::ALL {
            let mut session = started_session();
            place_piece(&mut session, tetromino_type, 4, 8);
            let original = session.current_piece.clone().unwrap();

            for _ in 0..4 {
                assert!(session.rotate(), "{tetromino_type:?} should rotate freely");
            }

            assert_eq!(session.current_piece, Some(original));
        }
    }

    #[test]
    fn test_rotation_without_wall_kick_is_rejected() {
        let mut session = started_session();

        // A flat I on the floor has no room to stand up
        place_piece(&mut session, TetrominoType::I, 3, 19);
        assert!(!session.rotate());
        assert_eq!(
            session.current_piece.as_ref().unwrap().shape,
            TetrominoType::I.shape()
        );

        // A vertical I against the right wall cannot lie down
        place_piece(&mut session, TetrominoType::I, 9, 5);
        session.current_piece.as_mut().unwrap().shape =
            TetrominoType::I.shape().rotated_clockwise();
        assert!(!session.rotate());
        assert_eq!(session.current_piece.as_ref().unwrap().position.x, 9);
    }

    #[test]
    fn test_i_piece_falls_nineteen_rows_then_lands() {
        let mut session = started_session();
        place_piece(&mut session, TetrominoType::I, 3, 0);

        let (falls, outcome) = drop_until_landed(&mut session);

        assert_eq!(falls, 19);
        assert_eq!(outcome, DropOutcome::Landed { lines_cleared: 0 });
        for x in 3..7 {
            assert_eq!(session.board.cell(x, 19), Some(Cell::Filled));
        }
        assert_eq!(session.board.rows[19].iter().filter(|c| c.is_filled()).count(), 4);

        // Nothing else to clear and a new piece is falling
        assert_eq!(session.clear_lines(), 0);
        assert!(session.is_playing());
        assert_eq!(
            session.current_piece.as_ref().unwrap().position,
            Position { x: 4, y: 0 }
        );
    }

    #[test]
    fn test_single_line_clear_scores_by_level() {
        let mut session = started_session();
        fill_row_except(&mut session.board, 19, &[3, 4, 5, 6]);
        place_piece(&mut session, TetrominoType::I, 3, 0);

        let (_, outcome) = drop_until_landed(&mut session);

        assert_eq!(outcome, DropOutcome::Landed { lines_cleared: 1 });
        assert_eq!(session.score, 40);
        assert_eq!(session.level, 1);
        assert_eq!(session.lines_cleared, 1);
        assert!(session.board.is_empty());
    }

    #[test]
    fn test_line_clear_at_higher_level() {
        let mut session = started_session();
        session.score = 1500;
        session.level = 2;
        fill_row_except(&mut session.board, 19, &[0, 1]);
        fill_row_except(&mut session.board, 18, &[0, 1]);
        place_piece(&mut session, TetrominoType::O, 0, 0);

        let (_, outcome) = drop_until_landed(&mut session);

        assert_eq!(outcome, DropOutcome::Landed { lines_cleared: 2 });
        assert_eq!(session.score, 1500 + 100 * 2);
        assert_eq!(session.level, 2);
    }

    #[test]
    fn test_drops_without_clears_keep_score() {
        let mut session = started_session();

        for _ in 0..5 {
            let (_, outcome) = drop_until_landed(&mut session);
            assert_eq!(outcome, DropOutcome::Landed { lines_cleared: 0 });
        }

        assert_eq!(session.score, 0);
        assert_eq!(session.level, 1);
        assert!(session.is_playing());
        assert!(!session.board.is_empty());
    }

    #[test]
    fn test_score_for_table() {
        let mut session = started_session();

        assert_eq!(session.score_for(0), 0);
        assert_eq!(session.score_for(1), 40);
        assert_eq!(session.score_for(2), 100);
        assert_eq!(session.score_for(3), 300);
        assert_eq!(session.score, 440);
        assert_eq!(session.level, 1);

        // 440 + 1200 crosses into level 2
        assert_eq!(session.score_for(4), 1200);
        assert_eq!(session.score, 1640);
        assert_eq!(session.level, 2);

        // Points now double
        assert_eq!(session.score_for(1), 80);
        assert_eq!(session.score, 1720);
    }

    #[test]
    fn test_level_tracks_score_after_every_update() {
        let mut session = started_session();
        let sequence = [1, 4, 0, 2, 3, 4, 4, 1, 2, 4, 3, 4, 4, 4];

        for lines in sequence {
            session.score_for(lines);
            assert_eq!(session.level, session.score / 1000 + 1);
        }
        assert!(session.level > 1);
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut session = started_session();
        block_spawn_area(&mut session.board);
        place_piece(&mut session, TetrominoType::O, 0, 18);

        let outcome = session.move_down();

        assert_eq!(outcome, DropOutcome::Landed { lines_cleared: 0 });
        assert_eq!(session.state(), SessionState::GameOver);
        assert!(session.is_game_over());
    }

    #[test]
    fn test_game_over_rejects_every_mutation() {
        let mut session = started_session();
        block_spawn_area(&mut session.board);
        place_piece(&mut session, TetrominoType::O, 0, 18);
        session.move_down();
        assert!(session.is_game_over());

        let board: Board = session.board.clone();
        let piece = session.current_piece.clone();
        let score = session.score;

        assert!(!session.move_left());
        assert!(!session.move_right());
        assert!(!session.rotate());
        assert!(!session.try_move(0, 1));
        assert_eq!(session.move_down(), DropOutcome::Inactive);

        assert_eq!(session.board, board);
        assert_eq!(session.current_piece, piece);
        assert_eq!(session.score, score);

        // Starting again leaves the terminal state
        session.start();
        assert!(session.is_playing());
    }

    #[test]
    fn test_not_started_session_ignores_moves() {
        let mut session = GameSession::with_seed(TEST_SEED);
        assert!(!session.move_left());
        assert!(!session.rotate());
        assert_eq!(session.move_down(), DropOutcome::Inactive);
        assert_eq!(session.state(), SessionState::NotStarted);
    }

    #[test]
    fn test_snapshot_marks_board_and_piece() {
        let mut session = started_session();
        session.board.set(0, 19, Cell::Filled);
        place_piece(&mut session, TetrominoType::O, 4, 10);
        let board_before = session.board.clone();

        let snapshot = session.snapshot_with_active_piece();

        assert_eq!(snapshot.width, BOARD_WIDTH);
        assert_eq!(snapshot.height, BOARD_HEIGHT);
        assert_eq!(snapshot.cells().count(), BOARD_WIDTH * BOARD_HEIGHT);
        assert_eq!(snapshot.get(0, 19), Some(CellView::Filled));
        for (x, y) in [(4, 10), (5, 10), (4, 11), (5, 11)] {
            assert_eq!(snapshot.get(x, y), Some(CellView::Active));
        }
        assert_eq!(snapshot.cells().filter(|c| *c == CellView::Active).count(), 4);
        assert_eq!(snapshot.cells().filter(|c| *c == CellView::Filled).count(), 1);

        // Reading never writes the piece into the board
        assert_eq!(session.board, board_before);
    }

    #[test]
    fn test_snapshot_clamps_piece_above_board() {
        let mut session = started_session();
        place_piece(&mut session, TetrominoType::T, 4, -1);

        let snapshot = session.snapshot_with_active_piece();

        // Only the T's lower stem is on the board
        assert_eq!(snapshot.cells().filter(|c| *c == CellView::Active).count(), 1);
        assert_eq!(snapshot.get(5, 0), Some(CellView::Active));
    }
}
