//! Recurring expense CLI commands

use chrono::Local;
use clap::Subcommand;

use super::{parse_amount, parse_date, parse_time, run_due_schedules};
use crate::config::settings::Settings;
use crate::display::{category_labels, format_schedule_list, format_upcoming};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::RecurringExpense;
use crate::services::{
    CategoryService, CreateRecurringInput, RecurringService, UpdateRecurringInput,
};
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum RecurringCommands {
    /// Schedule a monthly expense
    Add {
        /// Amount of each expense
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Day of the month (1-31); short months use their last day
        #[arg(long)]
        day: u32,
        /// Number of expenses to create
        #[arg(short = 'n', long)]
        count: u32,
        /// Time of day (HH:MM), defaults to the configured time
        #[arg(short, long)]
        time: Option<String>,
        /// First possible date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// List schedules
    List {
        /// Only schedules that will still create expenses
        #[arg(short, long)]
        active: bool,
    },

    /// Stop a schedule from creating expenses
    Pause {
        /// Schedule ID
        id: String,
    },

    /// Restart a paused schedule
    Resume {
        /// Schedule ID
        id: String,
    },

    /// Edit a schedule
    Edit {
        /// Schedule ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Time of day (HH:MM)
        #[arg(short, long)]
        time: Option<String>,
        /// New total number of expenses
        #[arg(short = 'n', long)]
        count: Option<u32>,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Delete a schedule (expenses it created are kept)
    Delete {
        /// Schedule ID
        id: String,
    },

    /// Create every expense that is due now
    Run,

    /// Show the next scheduled expenses
    Upcoming {
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

fn find_schedule(service: &RecurringService, id: &str) -> ExpenseResult<RecurringExpense> {
    service
        .find(id)?
        .ok_or_else(|| ExpenseError::recurring_not_found(id))
}

pub fn handle_recurring_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RecurringCommands,
) -> ExpenseResult<()> {
    let service = RecurringService::new(storage);
    let categories = CategoryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        RecurringCommands::Add {
            amount,
            category,
            day,
            count,
            time,
            start,
            description,
        } => {
            let category = categories.require(&category)?;
            let time_of_day = match time {
                Some(time) => parse_time(&time)?,
                None => settings.default_recurring_time,
            };

            let schedule = service.create(CreateRecurringInput {
                category_id: category.id,
                amount: parse_amount(&amount)?,
                description,
                day_of_month: day,
                time_of_day,
                start_date: parse_date(start.as_deref())?,
                total_occurrences: count,
            })?;

            println!(
                "Scheduled {} for {} on day {} at {}, {} times",
                schedule.amount.format_with_symbol(symbol),
                category.label(),
                schedule.day_of_month,
                schedule.time_of_day.format("%H:%M"),
                schedule.total_occurrences
            );
            if let Some(next) = schedule.next_occurrence() {
                println!("  First: {}", next.format("%Y-%m-%d %H:%M"));
            }
            if let Some(last) = schedule.final_occurrence() {
                println!("  Last:  {}", last.format("%Y-%m-%d %H:%M"));
            }
            println!("  ID: {}", schedule.id);

            // A start date in the past may already have due occurrences
            run_due_schedules(storage)?;
        }

        RecurringCommands::List { active } => {
            let schedules = service.list(active)?;
            let labels = category_labels(&categories.list(true)?);
            print!("{}", format_schedule_list(&schedules, &labels, symbol));
        }

        RecurringCommands::Pause { id } => {
            let schedule = find_schedule(&service, &id)?;
            service.pause(schedule.id)?;
            println!("Paused schedule {}", schedule.id);
        }

        RecurringCommands::Resume { id } => {
            let schedule = find_schedule(&service, &id)?;
            service.resume(schedule.id)?;
            println!("Resumed schedule {}", schedule.id);
            run_due_schedules(storage)?;
        }

        RecurringCommands::Edit {
            id,
            amount,
            category,
            time,
            count,
            description,
        } => {
            let schedule = find_schedule(&service, &id)?;
            let updated = service.update(
                schedule.id,
                UpdateRecurringInput {
                    category_id: category
                        .map(|c| categories.require(&c).map(|c| c.id))
                        .transpose()?,
                    amount: amount.map(|a| parse_amount(&a)).transpose()?,
                    description,
                    time_of_day: time.map(|t| parse_time(&t)).transpose()?,
                    total_occurrences: count,
                },
            )?;
            println!("Updated schedule {}: {}", updated.id, updated);
        }

        RecurringCommands::Delete { id } => {
            let schedule = find_schedule(&service, &id)?;
            let deleted = service.delete(schedule.id)?;
            println!(
                "Deleted schedule {} ({} expenses it created are kept)",
                deleted.id, deleted.occurrences_created
            );
        }

        RecurringCommands::Run => {
            if run_due_schedules(storage)? == 0 {
                println!("No scheduled expenses are due.");
            }
        }

        RecurringCommands::Upcoming { limit } => {
            let upcoming = service.upcoming(Local::now().naive_local(), limit)?;
            let labels = category_labels(&categories.list(true)?);
            print!("{}", format_upcoming(&upcoming, &labels, symbol));
        }
    }

    Ok(())
}
