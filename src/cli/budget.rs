//! Budget CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_month};
use crate::config::settings::Settings;
use crate::display::{category_labels, format_budget_list};
use crate::error::ExpenseResult;
use crate::services::{BudgetService, CategoryService, SummaryService};
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set a category's budget for a month
    Set {
        /// Category name or ID
        category: String,
        /// Amount (e.g. "400")
        amount: String,
        /// Month (YYYY-MM, "current", "next"), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List budgets for a month
    List {
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Remove a category's budget for a month
    Delete {
        /// Category name or ID
        category: String,
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Copy the previous month's budgets into a month
    Copy {
        /// Target month, defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Replace budgets that already exist in the target month
        #[arg(long)]
        overwrite: bool,
    },

    /// Show categories that are over budget
    Overspent {
        #[arg(short, long)]
        month: Option<String>,
    },
}

pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> ExpenseResult<()> {
    let service = BudgetService::new(storage);
    let categories = CategoryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            month,
        } => {
            let category = categories.require(&category)?;
            let month = parse_month(month.as_deref())?;
            let budget = service.set_budget(category.id, month, parse_amount(&amount)?)?;
            println!(
                "Budget for {} in {}: {}",
                category.label(),
                month.name(),
                budget.amount.format_with_symbol(symbol)
            );
        }

        BudgetCommands::List { month } => {
            let month = parse_month(month.as_deref())?;
            let budgets = service.budgets_for_month(month)?;
            let labels = category_labels(&categories.list(true)?);
            print!("{}", format_budget_list(month, &budgets, &labels, symbol));
        }

        BudgetCommands::Delete { category, month } => {
            let category = categories.require(&category)?;
            let month = parse_month(month.as_deref())?;
            service.delete_budget(category.id, month)?;
            println!("Removed {} budget for {}", category.name, month.name());
        }

        BudgetCommands::Copy { month, overwrite } => {
            let month = parse_month(month.as_deref())?;
            let written = service.copy_from_previous(month, overwrite)?;
            println!(
                "Copied {} budget{} from {} into {}",
                written,
                if written == 1 { "" } else { "s" },
                month.prev().name(),
                month.name()
            );
        }

        BudgetCommands::Overspent { month } => {
            let month = parse_month(month.as_deref())?;
            let overspent = SummaryService::new(storage).overspent_categories(month)?;
            if overspent.is_empty() {
                println!("No overspent categories in {}.", month.name());
                return Ok(());
            }

            println!("Overspent in {}:", month.name());
            for summary in overspent {
                println!(
                    "  {:<28} over by {}",
                    summary.category.label(),
                    summary.remaining.abs().format_with_symbol(symbol)
                );
            }
        }
    }

    Ok(())
}
