pub mod loader;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gameplay: GameplayConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    // Fixed seed for the piece generator; unset means a fresh sequence every run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub speed_policy: SpeedPolicy,
}

impl GameplayConfig {
    /// Random source for piece selection honoring the configured seed.
    #[must_use]
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

/// When the gravity interval follows the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedPolicy {
    /// Re-arm the interval whenever a landing changes the level.
    #[default]
    PerLevel,
    /// Keep the interval chosen at game start.
    PerSession,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_grid: bool,
    pub show_controls: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_grid: false,
            show_controls: true,
        }
    }
}
