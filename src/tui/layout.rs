//! Dashboard layout: header, summary table beside the chart, status bar

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct DashboardLayout {
    /// Month name and totals
    pub header: Rect,
    /// Category summary table
    pub table: Rect,
    /// Spending bar chart
    pub chart: Rect,
    /// Key hints and messages
    pub status_bar: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(vertical[1]);

        Self {
            header: vertical[0],
            table: body[0],
            chart: body[1],
            status_bar: vertical[2],
        }
    }
}
