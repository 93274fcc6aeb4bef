//! Key hints, or the last error

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

const HINTS: &[(&str, &str)] = &[
    ("←/h", "prev month"),
    ("→/l", "next month"),
    ("t", "this month"),
    ("↑/↓", "select"),
    ("r", "reload"),
    ("q", "quit"),
];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(Color::Red),
        )),
        None => {
            let mut spans = Vec::new();
            for (key, action) in HINTS {
                spans.push(Span::styled(
                    format!(" {} ", key),
                    Style::default().fg(Color::Black).bg(Color::Gray),
                ));
                spans.push(Span::raw(format!(" {}  ", action)));
            }
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}
