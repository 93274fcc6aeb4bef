//! Month name and totals

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::Money;
use crate::tui::app::App;

fn amount_color(amount: Money) -> Color {
    if amount.is_negative() {
        Color::Red
    } else if amount.is_zero() {
        Color::Yellow
    } else {
        Color::Green
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let symbol = app.settings.currency_symbol.as_str();
    let title = Span::styled(
        format!(" {} ", app.month.name()),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    let Some(overview) = &app.overview else {
        frame.render_widget(Paragraph::new("No data").block(block), area);
        return;
    };

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let first = Line::from(vec![
        label("Budgeted "),
        Span::raw(overview.total_budgeted.format_with_symbol(symbol)),
        label("   Credits "),
        Span::raw(overview.total_credits.format_with_symbol(symbol)),
        label(" (unassigned "),
        Span::raw(overview.unassigned_credits.format_with_symbol(symbol)),
        label(")"),
    ]);
    let second = Line::from(vec![
        label("Spent "),
        Span::raw(overview.total_spent.format_with_symbol(symbol)),
        label("   Remaining "),
        Span::styled(
            overview.total_remaining.format_with_symbol(symbol),
            Style::default()
                .fg(amount_color(overview.total_remaining))
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(vec![first, second]).block(block), area);
}
