#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss
)]

use bevy_ecs::prelude::Resource;
use log::{debug, info};
use std::time::Duration;

use crate::components::{Board, Piece, Shape, TetrominoType};
use crate::game::{self, BOARD_HEIGHT, BOARD_WIDTH, STARTING_LEVEL};

/// Lifecycle of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    Playing,
    GameOver,
}

/// Result of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece moved down one row.
    Falling,
    /// The piece could not move and was merged into the board.
    Landed { lines_cleared: usize },
    /// No game is in progress; nothing changed.
    Inactive,
}

/// What a render target sees in one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    Empty,
    Filled,
    Active,
}

/// Read-only view of the board with the falling piece painted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    rows: Vec<Vec<CellView>>,
}

impl Snapshot {
    #[must_use]
    pub fn rows(&self) -> &[Vec<CellView>] {
        &self.rows
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<CellView> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Cells in row-major order, `height * width` of them.
    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        self.rows.iter().flatten().copied()
    }
}

/// The board state engine: grid, falling piece, score and level.
#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    pub board: Board,
    pub current_piece: Option<Piece>,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    state: SessionState,
    rng: fastrand::Rng,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(fastrand::Rng::new())
    }
}

impl GameSession {
    #[must_use]
    pub fn new(rng: fastrand::Rng) -> Self {
        Self {
            board: Board::new(BOARD_WIDTH, BOARD_HEIGHT),
            current_piece: None,
            score: 0,
            level: STARTING_LEVEL,
            lines_cleared: 0,
            state: SessionState::NotStarted,
            rng,
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(fastrand::Rng::with_seed(seed))
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    /// Gravity interval for the current level.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        game::drop_interval(self.level)
    }

    /// Begins a fresh game from any state.
    pub fn start(&mut self) {
        self.init_board();
        self.score = 0;
        self.level = STARTING_LEVEL;
        self.lines_cleared = 0;
        self.state = SessionState::Playing;
        self.spawn_piece();
        if !self.current_position_is_valid() {
            self.state = SessionState::GameOver;
        }
        info!("New game started");
    }

    pub fn init_board(&mut self) {
        self.board.clear();
    }

    /// Replaces the current piece with a random one at the top center. Legality is left to the caller.
    pub fn spawn_piece(&mut self) {
        let tetromino_type = TetrominoType::random(&mut self.rng);
        debug!("Spawning {tetromino_type:?}");
        self.current_piece = Some(Piece::spawn(tetromino_type, self.board.width));
    }

    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(shape) = self.current_piece.as_ref().map(|piece| piece.shape.clone()) else {
            return false;
        };
        self.try_move_with(dx, dy, shape)
    }

    /// Moves the piece by `(dx, dy)` wearing `shape`. Commits only if every block lands on a free cell.
    pub fn try_move_with(&mut self, dx: i32, dy: i32, shape: Shape) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(piece) = self.current_piece.as_mut() else {
            return false;
        };

        let target = piece.position.offset(dx, dy);
        if !self.board.is_valid_position(&shape, target) {
            return false;
        }

        piece.position = target;
        piece.shape = shape;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Turns the piece clockwise in place. Blocked rotations leave the piece as it was.
    pub fn rotate(&mut self) -> bool {
        let Some(rotated) = self
            .current_piece
            .as_ref()
            .map(|piece| piece.shape.rotated_clockwise())
        else {
            return false;
        };
        self.try_move_with(0, 0, rotated)
    }

    pub fn move_down(&mut self) -> DropOutcome {
        if !self.is_playing() || self.current_piece.is_none() {
            return DropOutcome::Inactive;
        }
        if self.try_move(0, 1) {
            return DropOutcome::Falling;
        }

        self.merge_piece();
        let lines_cleared = self.clear_lines();
        let points = self.score_for(lines_cleared);
        if lines_cleared > 0 {
            info!(
                "Cleared {lines_cleared} lines for {points} points (score {}, level {})",
                self.score, self.level
            );
        }

        self.spawn_piece();
        if !self.current_position_is_valid() {
            self.state = SessionState::GameOver;
            info!("Game over with final score {}", self.score);
        }

        DropOutcome::Landed { lines_cleared }
    }

    fn merge_piece(&mut self) {
        if let Some(piece) = self.current_piece.as_ref() {
            self.board.lock_piece(piece);
        }
    }

    pub fn clear_lines(&mut self) -> usize {
        let lines_cleared = self.board.clear_lines();
        self.lines_cleared += u32::try_from(lines_cleared).unwrap_or(u32::MAX);
        lines_cleared
    }

    /// Awards points for `lines_cleared` at the current level, then recomputes the level.
    pub fn score_for(&mut self, lines_cleared: usize) -> u32 {
        let points = game::line_clear_points(lines_cleared).saturating_mul(self.level);
        self.score = self.score.saturating_add(points);
        self.level = game::level_for_score(self.score);
        points
    }

    fn current_position_is_valid(&self) -> bool {
        self.current_piece
            .as_ref()
            .is_some_and(|piece| self.board.is_valid_position(&piece.shape, piece.position))
    }

    #[must_use]
    pub fn snapshot_with_active_piece(&self) -> Snapshot {
        let mut rows: Vec<Vec<CellView>> = self
            .board
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if cell.is_filled() {
                            CellView::Filled
                        } else {
                            CellView::Empty
                        }
                    })
                    .collect()
            })
            .collect();

        if let Some(piece) = self.current_piece.as_ref() {
            for (x, y) in piece.blocks() {
                if x < 0 || y < 0 {
                    continue;
                }
                if let Some(view) = rows
                    .get_mut(y as usize)
                    .and_then(|row| row.get_mut(x as usize))
                {
                    *view = CellView::Active;
                }
            }
        }

        Snapshot {
            width: self.board.width,
            height: self.board.height,
            rows,
        }
    }
}
