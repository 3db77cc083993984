mod main_menu;
pub mod title;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

pub use crate::menu_types::{Menu, MenuOption, MenuState};

use self::main_menu::render_main_menu_options;
use self::title::{TITLE_HEIGHT, render_ascii_title};

/// Draws the start screen: title art above the option list.
pub fn render_menu(f: &mut Frame, menu: &Menu) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(TITLE_HEIGHT + 2),
            Constraint::Min(0),
        ])
        .split(f.area());

    render_ascii_title(f, chunks[1]);
    render_main_menu_options(f, chunks[2], menu);
}
