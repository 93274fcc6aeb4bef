//! Expense CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date, parse_month};
use crate::config::settings::Settings;
use crate::display::{category_labels, format_expense_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::{
    CategoryService, CreateExpenseInput, ExpenseFilter, ExpenseService, UpdateExpenseInput,
};
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount (e.g. "12.50")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// Month (YYYY-MM, "current", "last")
        #[arg(long)]
        month: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Text to look for in descriptions
        #[arg(short, long)]
        search: Option<String>,
        /// Maximum number of expenses to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
}

pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);
    let categories = CategoryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            description,
        } => {
            let category = categories.require(&category)?;
            let expense = service.create(CreateExpenseInput {
                category_id: category.id,
                amount: parse_amount(&amount)?,
                date: parse_date(date.as_deref())?,
                description,
            })?;

            println!(
                "Recorded {} in {} on {}",
                expense.amount.format_with_symbol(symbol),
                category.label(),
                expense.date.format(&settings.date_format)
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List {
            month,
            category,
            from,
            to,
            search,
            limit,
        } => {
            let mut filter = ExpenseFilter::new().limit(limit);
            if let Some(month) = month {
                filter = filter.month(parse_month(Some(&month))?);
            }
            if let Some(category) = category {
                filter = filter.category(categories.require(&category)?.id);
            }
            if let (Some(from), Some(to)) = (from, to) {
                filter = filter.date_range(parse_date(Some(&from))?, parse_date(Some(&to))?);
            }
            if let Some(search) = search {
                filter = filter.search(search);
            }

            let expenses = service.list(filter)?;
            let labels = category_labels(&categories.list(true)?);
            print!("{}", format_expense_list(&expenses, &labels, symbol));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            date,
            description,
        } => {
            let expense = service
                .find(&id)?
                .ok_or_else(|| ExpenseError::expense_not_found(&id))?;

            let input = UpdateExpenseInput {
                category_id: category
                    .map(|c| categories.require(&c).map(|c| c.id))
                    .transpose()?,
                amount: amount.map(|a| parse_amount(&a)).transpose()?,
                date: date.map(|d| parse_date(Some(&d))).transpose()?,
                description,
            };

            let updated = service.update(expense.id, input)?;
            println!("Updated expense {}: {}", updated.id, updated);
        }

        ExpenseCommands::Delete { id } => {
            let expense = service
                .find(&id)?
                .ok_or_else(|| ExpenseError::expense_not_found(&id))?;
            let deleted = service.delete(expense.id)?;
            println!(
                "Deleted expense {} ({} on {})",
                deleted.id,
                deleted.amount.format_with_symbol(symbol),
                deleted.date
            );
        }
    }

    Ok(())
}
