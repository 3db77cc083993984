#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::World;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::debug;
use std::time::Duration;

use crate::Time;
use crate::config::Config;
use crate::input::{Command, Input};
use crate::menu_types::{Menu, MenuOption, MenuState};
use crate::session::GameSession;
use crate::systems::{self, DropTimer};

pub type AppResult<T> = anyhow::Result<T>;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub menu: Menu,
}

impl App {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Input::default());
        world.insert_resource(DropTimer::default());
        world.insert_resource(GameSession::new(config.gameplay.rng()));
        world.insert_resource(config);

        Self {
            world,
            should_quit: false,
            menu: Menu::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        self.world.resource::<GameSession>()
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        self.world.resource::<Config>()
    }

    /// The start control: switches to the game screen with a fresh session.
    pub fn start_game(&mut self) {
        self.menu.state = MenuState::Game;
        systems::start_game(&mut self.world);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        debug!("Key event: {key:?}");

        // Allow quitting with 'q' from any screen
        if matches!(key.code, KeyCode::Char('q' | 'Q')) {
            self.should_quit = true;
            return;
        }

        match self.menu.state {
            MenuState::MainMenu => self.handle_menu_key(key.code),
            MenuState::Game => self.handle_game_key(key.code),
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('w') => self.menu.prev_option(),
            KeyCode::Down | KeyCode::Char('s') => self.menu.next_option(),
            KeyCode::Enter | KeyCode::Char(' ') => match self.menu.selected_option {
                MenuOption::NewGame => self.start_game(),
                MenuOption::Quit => self.should_quit = true,
            },
            _ => {}
        }
    }

    fn handle_game_key(&mut self, code: KeyCode) {
        if self.session().is_game_over() {
            match code {
                KeyCode::Enter => self.start_game(),
                KeyCode::Esc => self.menu.state = MenuState::MainMenu,
                _ => {}
            }
            return;
        }

        if let Some(command) = Command::from_key(code) {
            self.world.resource_mut::<Input>().push(command);
            // Apply right away so the next frame reflects the move
            systems::input_system(&mut self.world);
        }
    }

    /// Advances gravity by `delta`. Only the game screen runs the systems.
    pub fn on_tick(&mut self, delta: Duration) {
        if self.menu.state != MenuState::Game {
            return;
        }
        systems::input_system(&mut self.world);
        systems::game_tick_system(&mut self.world, delta);
    }

    /// Measures the time since the last update and advances the game by it.
    pub fn update(&mut self) {
        let delta = {
            let mut time = self.world.resource_mut::<Time>();
            time.update();
            time.delta()
        };
        self.on_tick(delta);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
