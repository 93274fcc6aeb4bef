//! Dashboard views

pub mod chart;
pub mod header;
pub mod status_bar;
pub mod summary_table;

use ratatui::Frame;

use super::app::App;
use super::layout::DashboardLayout;

/// Render the whole dashboard
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = DashboardLayout::new(frame.area());

    header::render(frame, app, layout.header);
    summary_table::render(frame, app, layout.table);
    chart::render(frame, app, layout.chart);
    status_bar::render(frame, app, layout.status_bar);
}
