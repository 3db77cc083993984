use crate::app::App;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::menu;
use crate::menu_types::MenuState;
use crate::session::{CellView, GameSession};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

// Each cell is 2 characters wide and 1 tall to look roughly square
const CELL_WIDTH: u16 = 2;
const BOARD_AREA_WIDTH: u16 = BOARD_WIDTH as u16 * CELL_WIDTH + 2; // +2 for borders
const BOARD_AREA_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2; // +2 for borders
const MIN_INFO_WIDTH: u16 = 20;
const TITLE_HEIGHT: u16 = 2;

pub const MIN_TOTAL_WIDTH: u16 = BOARD_AREA_WIDTH + MIN_INFO_WIDTH;
pub const MIN_TOTAL_HEIGHT: u16 = BOARD_AREA_HEIGHT + TITLE_HEIGHT;

pub fn render(f: &mut Frame, app: &App) {
    if app.menu.state == MenuState::MainMenu {
        menu::render_menu(f, &app.menu);
        return;
    }

    // Check if the terminal is too small to render the game properly
    if f.area().width < MIN_TOTAL_WIDTH || f.area().height < MIN_TOTAL_HEIGHT {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Tetris"));

        let warning_area = centered_rect(90, 80, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_AREA_WIDTH),
            Constraint::Min(MIN_INFO_WIDTH),
        ])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(BOARD_AREA_HEIGHT),
            Constraint::Min(0),
        ])
        .split(main_layout[0]);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(4), // Score, level, lines
            Constraint::Length(5), // Status
            Constraint::Min(0),    // Controls
        ])
        .split(main_layout[1]);

    let title = Paragraph::new("TETRIS")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, app, game_layout[1]);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let session = app.session();
    let stats = Paragraph::new(format_stats(session))
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(stats, info_layout[1]);

    if session.is_game_over() {
        let status = Paragraph::new(format!(
            "GAME OVER!\nFinal score: {}\nEnter: play again\nEsc: menu",
            session.score
        ))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });
        f.render_widget(status, info_layout[2]);
    }

    if app.config().display.show_controls {
        let controls = Paragraph::new(
            "Controls:\n\
            ←/→: Move left/right\n\
            ↓: Soft drop\n\
            ↑: Rotate\n\
            Q: Quit\n\
            ",
        )
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true });
        f.render_widget(controls, info_layout[3]);
    }
}

/// The score, level and line readouts.
#[must_use]
pub fn format_stats(session: &GameSession) -> String {
    format!(
        "Score: {}\nLevel: {}\nLines: {}",
        session.score, session.level, session.lines_cleared
    )
}

/// Glyph and color for one board cell, or `None` to leave it blank.
#[must_use]
pub fn cell_appearance(view: CellView, show_grid: bool) -> Option<(&'static str, Color)> {
    match view {
        CellView::Filled => Some(("█", Color::Gray)),
        CellView::Active => Some(("█", Color::Cyan)),
        CellView::Empty if show_grid => Some(("·", Color::DarkGray)),
        CellView::Empty => None,
    }
}

fn render_game_board(f: &mut Frame, app: &App, area: Rect) {
    let inner_area = Block::default().borders(Borders::ALL).inner(area);
    f.render_widget(Block::default().borders(Borders::ALL), area);

    let show_grid = app.config().display.show_grid;
    let session = app.session();
    let snapshot = session.snapshot_with_active_piece();

    for (y, row) in snapshot.rows().iter().enumerate() {
        for (x, view) in row.iter().enumerate() {
            let Some((symbol, color)) = cell_appearance(*view, show_grid) else {
                continue;
            };
            let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
                continue;
            };

            let block_x = inner_area.left() + x * CELL_WIDTH;
            let block_y = inner_area.top() + y;
            if block_y >= inner_area.bottom() {
                continue;
            }

            // The empty-cell dot only takes the left column of the pair
            let columns = if *view == CellView::Empty { 1 } else { CELL_WIDTH };
            for dx in 0..columns {
                if block_x + dx >= inner_area.right() {
                    break;
                }
                if let Some(cell) = f.buffer_mut().cell_mut((block_x + dx, block_y)) {
                    cell.set_symbol(symbol);
                    cell.set_fg(color);
                }
            }
        }
    }

    // If game is over, overlay "GAME OVER" text
    if session.is_game_over() {
        let game_over = Paragraph::new("GAME OVER")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let game_over_area = Rect {
            x: inner_area.x,
            y: inner_area.y + inner_area.height / 2,
            width: inner_area.width,
            height: 1,
        };

        f.render_widget(game_over, game_over_area);
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
