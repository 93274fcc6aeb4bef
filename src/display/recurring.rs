//! Recurring schedule display

use std::collections::HashMap;

use crate::models::{CategoryId, RecurringExpense};
use crate::services::UpcomingOccurrence;

use super::category::label_for;
use super::table::render_table;

pub fn format_schedule_list(
    schedules: &[RecurringExpense],
    labels: &HashMap<CategoryId, String>,
    symbol: &str,
) -> String {
    if schedules.is_empty() {
        return "No recurring expenses.\n".to_string();
    }

    let rows = schedules.iter().map(|r| {
        let status = if r.is_exhausted() {
            "done"
        } else if r.active {
            "active"
        } else {
            "paused"
        };
        vec![
            r.id.to_string(),
            label_for(labels, r.category_id),
            r.description.clone(),
            format!("day {} {}", r.day_of_month, r.time_of_day.format("%H:%M")),
            format!("{}/{}", r.occurrences_created, r.total_occurrences),
            r.next_occurrence()
                .map(|next| next.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".into()),
            status.to_string(),
            r.amount.format_with_symbol(symbol),
        ]
    });

    render_table(
        &["ID", "Category", "Description", "When", "Created", "Next", "Status", "Amount"],
        rows,
        7,
    )
}

pub fn format_upcoming(
    upcoming: &[UpcomingOccurrence],
    labels: &HashMap<CategoryId, String>,
    symbol: &str,
) -> String {
    if upcoming.is_empty() {
        return "Nothing scheduled.\n".to_string();
    }

    let rows = upcoming.iter().map(|o| {
        vec![
            o.due.format("%Y-%m-%d %H:%M").to_string(),
            label_for(labels, o.schedule.category_id),
            o.schedule.description.clone(),
            format!("{}/{}", o.number, o.schedule.total_occurrences),
            o.schedule.amount.format_with_symbol(symbol),
        ]
    });

    render_table(&["Due", "Category", "Description", "#", "Amount"], rows, 4)
}
