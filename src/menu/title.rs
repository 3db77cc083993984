#![warn(clippy::all, clippy::pedantic)]

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
};

// ASCII art letters for the "TETRIS" title, one color per letter
pub const TITLE_LETTERS: [(&str, Color); 6] = [
    ("████\n ██ \n ██ \n ██ \n ██ ", Color::Red),
    ("████\n█   \n███ \n█   \n████", Color::Yellow),
    ("████\n ██ \n ██ \n ██ \n ██ ", Color::Green),
    ("███ \n█  █\n███ \n█ █ \n█  █", Color::Cyan),
    ("███\n █ \n █ \n █ \n███", Color::Blue),
    (" ███\n█   \n ██ \n   █\n███ ", Color::Magenta),
];

pub const TITLE_HEIGHT: u16 = 5;

/// Renders the ASCII art title
pub fn render_ascii_title(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = (0..usize::from(TITLE_HEIGHT))
        .map(|row| {
            let mut spans = Vec::new();
            for (index, (letter, color)) in TITLE_LETTERS.iter().enumerate() {
                if index > 0 {
                    spans.push(Span::raw(" "));
                }
                let segment = letter.lines().nth(row).unwrap_or_default().to_string();
                spans.push(Span::styled(segment, Style::default().fg(*color)));
            }
            Line::from(spans)
        })
        .collect();

    let title = Paragraph::new(Text::from(lines)).alignment(Alignment::Center);
    f.render_widget(title, area);
}
