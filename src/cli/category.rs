//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::ExpenseResult;
use crate::services::CategoryService;
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a category
    Add {
        /// Category name
        name: String,
        /// Icon (emoji or short text)
        #[arg(short, long)]
        icon: Option<String>,
        /// Color tag (e.g. "#4caf50")
        #[arg(short, long)]
        color: Option<String>,
    },

    /// List categories
    List {
        /// Include hidden categories
        #[arg(short, long)]
        all: bool,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New icon ("" clears it)
        #[arg(short, long)]
        icon: Option<String>,
        /// New color ("" clears it)
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Hide a category from lists and summaries
    Hide {
        /// Category name or ID
        category: String,
    },

    /// Show a hidden category again
    Unhide {
        /// Category name or ID
        category: String,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
        /// Also delete its expenses and recurring schedules
        #[arg(long)]
        force: bool,
    },
}

pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> ExpenseResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add { name, icon, color } => {
            let category = service.create(&name, icon.as_deref(), color.as_deref())?;
            println!("Created category: {}", category.label());
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List { all } => {
            print!("{}", format_category_list(&service.list(all)?));
        }

        CategoryCommands::Edit {
            category,
            name,
            icon,
            color,
        } => {
            let existing = service.require(&category)?;
            if name.is_none() && icon.is_none() && color.is_none() {
                println!("Nothing to change. Use --name, --icon or --color.");
                return Ok(());
            }
            let updated =
                service.update(existing.id, name.as_deref(), icon.as_deref(), color.as_deref())?;
            println!("Updated category: {}", updated.label());
        }

        CategoryCommands::Hide { category } => {
            let existing = service.require(&category)?;
            let hidden = service.set_hidden(existing.id, true)?;
            println!("Hidden category: {}", hidden.name);
        }

        CategoryCommands::Unhide { category } => {
            let existing = service.require(&category)?;
            let shown = service.set_hidden(existing.id, false)?;
            println!("Category visible again: {}", shown.name);
        }

        CategoryCommands::Delete { category, force } => {
            let existing = service.require(&category)?;
            let deletion = service.delete(existing.id, force)?;
            println!("Deleted category: {}", deletion.category.name);
            if deletion.budgets_removed > 0 {
                println!("  Budgets removed:    {}", deletion.budgets_removed);
            }
            if deletion.credits_unassigned > 0 {
                println!("  Credits unassigned: {}", deletion.credits_unassigned);
            }
            if deletion.expenses_deleted > 0 {
                println!("  Expenses deleted:   {}", deletion.expenses_deleted);
            }
            if deletion.schedules_deleted > 0 {
                println!("  Schedules deleted:  {}", deletion.schedules_deleted);
            }
        }
    }

    Ok(())
}
