//! Report CLI commands

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use super::{parse_date, parse_month};
use crate::config::settings::Settings;
use crate::display::render_bar_chart;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Month;
use crate::reports::{BudgetStatus, BudgetVsActualReport, SpendingReport, TrendReport};
use crate::storage::Storage;

const MAX_TREND_MONTHS: u32 = 1200;

const CHART_WIDTH: usize = 30;

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending by category over a date range
    Spending {
        /// Start date (YYYY-MM-DD), defaults to the first of the month
        #[arg(short, long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        end: Option<String>,
        /// Report on a whole month instead of a date range
        #[arg(short, long, conflicts_with_all = ["start", "end"])]
        month: Option<String>,
        /// Show the top N categories only
        #[arg(long)]
        top: Option<usize>,
        /// Draw a bar chart below the table
        #[arg(long)]
        chart: bool,
        /// Export to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Month-over-month expenses, credits and budgets
    Trend {
        /// Last month of the window, defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Number of months in the window
        #[arg(short = 'n', long, default_value = "6")]
        months: u32,
        /// Draw a bar chart of monthly expenses
        #[arg(long)]
        chart: bool,
    },

    /// Budgeted against actual spending for a month
    Budget {
        #[arg(short, long)]
        month: Option<String>,
    },
}

pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    match cmd {
        ReportCommands::Spending {
            start,
            end,
            month,
            top,
            chart,
            output,
        } => handle_spending_report(storage, start, end, month, top, chart, output),
        ReportCommands::Trend {
            month,
            months,
            chart,
        } => handle_trend_report(storage, month, months, chart),
        ReportCommands::Budget { month } => {
            let month = parse_month(month.as_deref())?;
            let report =
                BudgetVsActualReport::generate(storage, month, settings.budget_warning_percent)?;
            print!("{}", report.format_terminal());
            let over = report.count(BudgetStatus::Over);
            if over > 0 {
                println!("{} categor{} over budget", over, if over == 1 { "y" } else { "ies" });
            }
            Ok(())
        }
    }
}

fn handle_spending_report(
    storage: &Storage,
    start: Option<String>,
    end: Option<String>,
    month: Option<String>,
    top: Option<usize>,
    chart: bool,
    output: Option<PathBuf>,
) -> ExpenseResult<()> {
    let (start_date, end_date) = match month {
        Some(month) => {
            let month = parse_month(Some(&month))?;
            (month.first_day(), month.last_day())
        }
        None => {
            let end_date = parse_date(end.as_deref())?;
            let start_date = match start {
                Some(start) => parse_date(Some(&start))?,
                None => Month::of(end_date).first_day(),
            };
            (start_date, end_date)
        }
    };

    if start_date > end_date {
        return Err(ExpenseError::Validation(format!(
            "Start date {} is after end date {}",
            start_date, end_date
        )));
    }

    let mut report = SpendingReport::generate(storage, start_date, end_date)?;
    if let Some(limit) = top {
        report.categories.truncate(limit);
    }

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        report.export_csv(BufWriter::new(file))?;
        println!("Spending report exported to: {}", path.display());
        return Ok(());
    }

    print!("{}", report.format_terminal());
    if chart {
        let rows: Vec<_> = report
            .categories
            .iter()
            .map(|row| (row.category_label.clone(), row.total))
            .collect();
        println!();
        print!("{}", render_bar_chart(&rows, CHART_WIDTH));
    }

    Ok(())
}

fn handle_trend_report(
    storage: &Storage,
    month: Option<String>,
    months: u32,
    chart: bool,
) -> ExpenseResult<()> {
    if !(1..=MAX_TREND_MONTHS).contains(&months) {
        return Err(ExpenseError::Validation(format!(
            "The trend window must be 1-{} months",
            MAX_TREND_MONTHS
        )));
    }

    let report = TrendReport::generate(storage, parse_month(month.as_deref())?, months)?;
    print!("{}", report.format_terminal());

    if let Some(peak) = report.peak_month() {
        println!("Highest spending: {} ({})", peak.month.name(), peak.expenses);
    }
    if chart {
        let rows: Vec<_> = report
            .rows
            .iter()
            .map(|row| (row.month.short_name(), row.expenses))
            .collect();
        println!();
        print!("{}", render_bar_chart(&rows, CHART_WIDTH));
    }

    Ok(())
}
