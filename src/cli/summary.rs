//! Summary CLI commands: the monthly reconciliation views

use clap::Subcommand;

use super::parse_month;
use crate::config::settings::Settings;
use crate::display::{
    format_balances, format_month_overview, format_salary_tracking, format_unassigned,
};
use crate::error::ExpenseResult;
use crate::models::Month;
use crate::services::{SalaryService, SummaryService};
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum SummaryCommands {
    /// Budgeted, credits, spent and remaining per category for a month
    Month {
        /// Month (YYYY-MM, "current", "last")
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Remaining balance of each month in a year, with a running total
    Balances {
        #[arg(short, long, value_parser = clap::value_parser!(i32).range(1..=9999))]
        year: Option<i32>,
    },

    /// Unassigned credits per month
    Unassigned {
        #[arg(short, long, value_parser = clap::value_parser!(i32).range(1..=9999))]
        year: Option<i32>,
    },

    /// Which months a salary was received in
    Salary {
        #[arg(short, long, value_parser = clap::value_parser!(i32).range(1..=9999))]
        year: Option<i32>,
    },
}

fn year_or_current(year: Option<i32>) -> i32 {
    year.unwrap_or_else(|| Month::current().year())
}

pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SummaryCommands,
) -> ExpenseResult<()> {
    let service = SummaryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        SummaryCommands::Month { month } => {
            let overview = service.month_overview(parse_month(month.as_deref())?)?;
            print!(
                "{}",
                format_month_overview(&overview, settings.budget_warning_percent, symbol)
            );
        }

        SummaryCommands::Balances { year } => {
            let year = year_or_current(year);
            let balances = service.monthly_remaining_balances(year)?;
            print!("{}", format_balances(year, &balances, symbol));
        }

        SummaryCommands::Unassigned { year } => {
            let year = year_or_current(year);
            let rows = service.monthly_unassigned_credits(year)?;
            print!("{}", format_unassigned(year, &rows, symbol));
        }

        SummaryCommands::Salary { year } => {
            let year = year_or_current(year);
            let salary = SalaryService::new(storage);
            print!(
                "{}",
                format_salary_tracking(year, &salary.months_tracking(year)?, symbol)
            );

            let current = Month::current();
            if year == current.year() {
                let january = current.offset(1 - current.month() as i32);
                let missing = salary.missing_months(january, current)?;
                if !missing.is_empty() {
                    let names: Vec<_> = missing.iter().map(Month::short_name).collect();
                    println!("Missing so far: {}", names.join(", "));
                }
            }
            if let Some(latest) = salary.latest_salary()? {
                println!(
                    "Latest salary: {} on {}",
                    latest.amount.format_with_symbol(symbol),
                    latest.date.format(&settings.date_format)
                );
            }
        }
    }

    Ok(())
}
