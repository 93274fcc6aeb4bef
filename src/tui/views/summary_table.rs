//! Category summary table
//!
//! Overspent rows are red, rows past the warning percentage yellow.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::display::format_percentage;
use crate::tui::app::App;

fn right(text: String) -> Cell<'static> {
    Cell::from(Text::from(text).right_aligned())
}

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Categories ");

    let Some(overview) = &app.overview else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };
    if overview.categories.is_empty() {
        frame.render_widget(
            Paragraph::new("No categories. Run 'expense init' to create the defaults.")
                .block(block),
            area,
        );
        return;
    }

    let symbol = app.settings.currency_symbol.as_str();
    let warning = app.settings.budget_warning_percent;

    let rows = overview.categories.iter().map(|summary| {
        let style = if summary.is_overspent() {
            Style::default().fg(Color::Red)
        } else if summary.is_near_limit(warning) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        Row::new(vec![
            Cell::from(summary.category.label()),
            right(summary.budgeted.format_with_symbol(symbol)),
            right(summary.assigned_credits.format_with_symbol(symbol)),
            right(summary.spent.format_with_symbol(symbol)),
            right(summary.remaining.format_with_symbol(symbol)),
            right(format_percentage(summary.percent_used)),
        ])
        .style(style)
    });

    let header = Row::new(vec![
        Cell::from("Category"),
        right("Budgeted".into()),
        right("Credits".into()),
        right("Spent".into()),
        right("Remaining".into()),
        right("Used".into()),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let widths = [
        Constraint::Min(16),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, area, &mut app.table_state);
}
