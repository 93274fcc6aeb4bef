//! Credit CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date, parse_month};
use crate::config::settings::Settings;
use crate::display::{category_labels, format_credit_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Credit;
use crate::services::{
    CategoryService, CreateCreditInput, CreditFilter, CreditService, UpdateCreditInput,
};
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum CreditCommands {
    /// Record a credit (income, refund, gift...)
    Add {
        /// Amount (e.g. "2500")
        amount: String,
        /// Where the money came from
        #[arg(short, long, default_value = "Income")]
        source: String,
        /// Assign to a category
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Mark as a salary payment
        #[arg(long)]
        salary: bool,
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List credits
    List {
        /// Month (YYYY-MM, "current", "last")
        #[arg(long)]
        month: Option<String>,
        /// Category name or ID
        #[arg(short, long, conflicts_with = "unassigned")]
        category: Option<String>,
        /// Only credits without a category
        #[arg(short, long)]
        unassigned: bool,
        /// Only salary credits
        #[arg(long)]
        salary: bool,
    },

    /// Assign a credit to a category
    Assign {
        /// Credit ID
        id: String,
        /// Category name or ID
        category: String,
    },

    /// Remove a credit's category
    Unassign {
        /// Credit ID
        id: String,
    },

    /// Edit a credit
    Edit {
        /// Credit ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        source: Option<String>,
        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Salary flag (true/false)
        #[arg(long)]
        salary: Option<bool>,
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Delete a credit
    Delete {
        /// Credit ID
        id: String,
    },
}

fn find_credit(service: &CreditService, id: &str) -> ExpenseResult<Credit> {
    service
        .find(id)?
        .ok_or_else(|| ExpenseError::credit_not_found(id))
}

pub fn handle_credit_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CreditCommands,
) -> ExpenseResult<()> {
    let service = CreditService::new(storage);
    let categories = CategoryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        CreditCommands::Add {
            amount,
            source,
            category,
            date,
            salary,
            notes,
        } => {
            let category = category.map(|c| categories.require(&c)).transpose()?;
            let credit = service.create(CreateCreditInput {
                amount: parse_amount(&amount)?,
                date: parse_date(date.as_deref())?,
                source,
                category_id: category.as_ref().map(|c| c.id),
                is_salary: salary,
                notes,
            })?;

            println!(
                "Recorded credit {} from {}",
                credit.amount.format_with_symbol(symbol),
                credit.source
            );
            match category {
                Some(category) => println!("  Assigned to: {}", category.label()),
                None => println!("  Unassigned"),
            }
            println!("  ID: {}", credit.id);
        }

        CreditCommands::List {
            month,
            category,
            unassigned,
            salary,
        } => {
            let mut filter = CreditFilter::new();
            if let Some(month) = month {
                filter = filter.month(parse_month(Some(&month))?);
            }
            if let Some(category) = category {
                filter = filter.category(categories.require(&category)?.id);
            }
            if unassigned {
                filter = filter.unassigned();
            }
            if salary {
                filter = filter.salary();
            }

            let credits = service.list(filter)?;
            let labels = category_labels(&categories.list(true)?);
            print!("{}", format_credit_list(&credits, &labels, symbol));
        }

        CreditCommands::Assign { id, category } => {
            let credit = find_credit(&service, &id)?;
            let category = categories.require(&category)?;
            service.assign(credit.id, Some(category.id))?;
            println!("Assigned credit {} to {}", credit.id, category.label());
        }

        CreditCommands::Unassign { id } => {
            let credit = find_credit(&service, &id)?;
            service.assign(credit.id, None)?;
            println!("Credit {} is now unassigned", credit.id);
        }

        CreditCommands::Edit {
            id,
            amount,
            source,
            date,
            salary,
            notes,
        } => {
            let credit = find_credit(&service, &id)?;
            let updated = service.update(
                credit.id,
                UpdateCreditInput {
                    amount: amount.map(|a| parse_amount(&a)).transpose()?,
                    date: date.map(|d| parse_date(Some(&d))).transpose()?,
                    source,
                    is_salary: salary,
                    notes,
                },
            )?;
            println!("Updated credit {}: {}", updated.id, updated);
        }

        CreditCommands::Delete { id } => {
            let credit = find_credit(&service, &id)?;
            let deleted = service.delete(credit.id)?;
            println!(
                "Deleted credit {} ({} from {})",
                deleted.id,
                deleted.amount.format_with_symbol(symbol),
                deleted.source
            );
        }
    }

    Ok(())
}
