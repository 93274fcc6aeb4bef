//! Spending per category as a horizontal bar chart

use ratatui::{
    layout::{Direction, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Spending ");
    let symbol = app.settings.currency_symbol.as_str();
    let selected = app.selected_summary().map(|s| s.category.id);

    let mut spending: Vec<_> = app
        .overview
        .iter()
        .flat_map(|o| o.categories.iter())
        .filter(|s| s.spent.is_positive())
        .collect();
    if spending.is_empty() {
        frame.render_widget(Paragraph::new("Nothing spent yet").block(block), area);
        return;
    }
    spending.sort_by(|a, b| b.spent.cmp(&a.spent));

    let bars: Vec<Bar> = spending
        .iter()
        .map(|s| {
            let color = if Some(s.category.id) == selected {
                Color::Cyan
            } else if s.is_overspent() {
                Color::Red
            } else {
                Color::Blue
            };
            Bar::default()
                .value(s.spent.cents().unsigned_abs())
                .label(Line::from(s.category.name.clone()))
                .text_value(s.spent.format_with_symbol(symbol))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}
