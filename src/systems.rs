use bevy_ecs::prelude::*;
use log::{debug, info, trace};
use std::time::Duration;

use crate::config::{Config, SpeedPolicy};
use crate::input::{Command, Input};
use crate::session::{DropOutcome, GameSession};

/// Gravity clock driving the periodic `move_down`.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct DropTimer {
    pub elapsed: Duration,
    pub interval: Duration,
    pub active: bool,
}

impl Default for DropTimer {
    fn default() -> Self {
        Self {
            elapsed: Duration::ZERO,
            interval: crate::game::drop_interval(crate::game::STARTING_LEVEL),
            active: false,
        }
    }
}

impl DropTimer {
    pub fn arm(&mut self, interval: Duration) {
        self.elapsed = Duration::ZERO;
        self.interval = interval;
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.elapsed = Duration::ZERO;
        self.active = false;
    }

    /// Advances the clock; true when a gravity step is due.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += delta;
        if self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }
}

/// Starts a new session and arms gravity at the starting level's speed.
pub fn start_game(world: &mut World) {
    let interval = {
        let mut session = world.resource_mut::<GameSession>();
        session.start();
        session.drop_interval()
    };

    world.resource_mut::<Input>().clear();
    world.resource_mut::<DropTimer>().arm(interval);

    debug!("Drop interval armed at {}ms", interval.as_millis());
}

pub fn input_system(world: &mut World) {
    let commands = world.resource_mut::<Input>().drain();
    if commands.is_empty() {
        return;
    }

    // Commands only reach a running game
    if !world.resource::<GameSession>().is_playing() {
        debug!("Ignoring {} commands outside of play", commands.len());
        return;
    }

    for command in commands {
        debug!("Command: {command:?}");
        let drop_result = {
            let mut session = world.resource_mut::<GameSession>();
            match command {
                Command::MoveLeft => {
                    session.move_left();
                    None
                }
                Command::MoveRight => {
                    session.move_right();
                    None
                }
                Command::Rotate => {
                    session.rotate();
                    None
                }
                Command::SoftDrop => {
                    let level_before = session.level;
                    Some((session.move_down(), level_before))
                }
            }
        };

        if let Some((outcome, level_before)) = drop_result {
            after_drop(world, outcome, level_before);
        }

        if !world.resource::<GameSession>().is_playing() {
            break;
        }
    }
}

pub fn game_tick_system(world: &mut World, delta: Duration) {
    trace!("Game tick with delta: {}ms", delta.as_millis());

    if !world.resource::<GameSession>().is_playing() {
        return;
    }

    if !world.resource_mut::<DropTimer>().tick(delta) {
        return;
    }

    let (level_before, outcome) = {
        let mut session = world.resource_mut::<GameSession>();
        let level_before = session.level;
        (level_before, session.move_down())
    };
    after_drop(world, outcome, level_before);
}

// Follow-up after a gravity step or soft drop: speed changes and game over
fn after_drop(world: &mut World, outcome: DropOutcome, level_before: u32) {
    if !matches!(outcome, DropOutcome::Landed { .. }) {
        return;
    }

    let policy = world
        .get_resource::<Config>()
        .map(|config| config.gameplay.speed_policy)
        .unwrap_or_default();

    let (game_over, level, interval, score) = {
        let session = world.resource::<GameSession>();
        (
            session.is_game_over(),
            session.level,
            session.drop_interval(),
            session.score,
        )
    };

    let mut timer = world.resource_mut::<DropTimer>();
    if game_over {
        timer.stop();
        info!("Stopped gravity, final score {score}");
        return;
    }

    if policy == SpeedPolicy::PerLevel && level != level_before {
        timer.interval = interval;
        info!(
            "Level {level} reached, drop interval now {}ms",
            interval.as_millis()
        );
    }
}
