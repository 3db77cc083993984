use bevy_ecs::prelude::Resource;
use crossterm::event::KeyCode;

/// Gameplay commands the driver forwards to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

impl Command {
    /// Fixed key bindings: arrows, with WASD as an alternative.
    #[must_use]
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left | KeyCode::Char('a') => Some(Command::MoveLeft),
            KeyCode::Right | KeyCode::Char('d') => Some(Command::MoveRight),
            KeyCode::Down | KeyCode::Char('s') => Some(Command::SoftDrop),
            KeyCode::Up | KeyCode::Char('w') => Some(Command::Rotate),
            _ => None,
        }
    }
}

// Commands waiting for the next input pass, oldest first
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    pending: Vec<Command>,
}

impl Input {
    pub fn push(&mut self, command: Command) {
        self.pending.push(command);
    }

    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
