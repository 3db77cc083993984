#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Line clear scoring indexed by lines cleared (level 1 values, multiplied by level)
pub const LINE_CLEAR_POINTS: [u32; 5] = [0, 40, 100, 300, 1200];

// Level progression
pub const POINTS_PER_LEVEL: u32 = 1000;
pub const STARTING_LEVEL: u32 = 1;

// Gravity timing in milliseconds
pub const BASE_DROP_INTERVAL_MS: u64 = 1000;
pub const DROP_INTERVAL_STEP_MS: u64 = 100;
pub const MIN_DROP_INTERVAL_MS: u64 = 100;

/// Level reached at a given score. Every 1000 points is one level.
#[must_use]
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + STARTING_LEVEL
}

/// Base points for clearing `lines` rows at once, before the level multiplier.
#[must_use]
pub fn line_clear_points(lines: usize) -> u32 {
    // A single piece spans at most four rows; anything larger scores as a tetris
    LINE_CLEAR_POINTS[lines.min(LINE_CLEAR_POINTS.len() - 1)]
}

/// Time between gravity steps at `level`.
#[must_use]
pub fn drop_interval(level: u32) -> Duration {
    let step = u64::from(level).saturating_mul(DROP_INTERVAL_STEP_MS);
    let millis = BASE_DROP_INTERVAL_MS
        .saturating_sub(step)
        .max(MIN_DROP_INTERVAL_MS);
    Duration::from_millis(millis)
}
