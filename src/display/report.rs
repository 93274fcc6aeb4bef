//! Formatting helpers shared by reports and summaries

use crate::models::Money;

/// Percentage with precision that suits its size
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else if pct.abs() < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// A bar of `width` cells, filled in proportion to `value / max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Horizontal bar chart: one line per (label, amount), scaled to the largest amount
pub fn render_bar_chart(rows: &[(String, Money)], width: usize) -> String {
    if rows.is_empty() {
        return "No data to chart.\n".to_string();
    }

    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let max = rows
        .iter()
        .map(|(_, amount)| amount.cents())
        .max()
        .unwrap_or(0) as f64;

    let mut output = String::new();
    for (label, amount) in rows {
        let pad = label_width - label.chars().count();
        output.push_str(&format!(
            "{}{} {} {}\n",
            label,
            " ".repeat(pad),
            format_bar(amount.cents() as f64, max, width),
            amount
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(7.26), "7.3%");
        assert_eq!(format_percentage(85.4), "85%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(5.0, 10.0, 4), "██░░");
        assert_eq!(format_bar(20.0, 10.0, 4), "████");
        assert_eq!(format_bar(0.0, 10.0, 3), "░░░");
    }

    #[test]
    fn test_bar_chart_scales_to_largest() {
        let rows = vec![
            ("Rent".to_string(), Money::from_units(1000)),
            ("Dining".to_string(), Money::from_units(250)),
        ];
        let chart = render_bar_chart(&rows, 8);
        let lines: Vec<_> = chart.lines().collect();

        assert_eq!(lines[0], "Rent   ████████ $1000.00");
        assert_eq!(lines[1], "Dining ██░░░░░░ $250.00");
        assert_eq!(render_bar_chart(&[], 8), "No data to chart.\n");
    }
}
