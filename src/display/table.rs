//! Shared `tabled` table builder

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

/// Render a header plus rows, right-aligning columns from `numeric_from` on
pub fn render_table<R>(header: &[&str], rows: R, numeric_from: usize) -> String
where
    R: IntoIterator<Item = Vec<String>>,
{
    let mut builder = Builder::default();
    builder.push_record(header.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    if numeric_from < header.len() {
        table.with(Modify::new(Columns::new(numeric_from..header.len())).with(Alignment::right()));
    }
    table.to_string()
}
