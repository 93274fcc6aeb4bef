use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_cli::cli::{
    handle_audit_command, handle_budget_command, handle_category_command, handle_credit_command,
    handle_expense_command, handle_export_command, handle_recurring_command,
    handle_report_command, handle_summary_command, run_due_schedules, BudgetCommands,
    CategoryCommands, CreditCommands, ExpenseCommands, ExportCommands, RecurringCommands,
    ReportCommands, SummaryCommands,
};
use expense_cli::config::{ExpensePaths, Settings};
use expense_cli::models::Month;
use expense_cli::storage::{initialize_storage, Storage};

/// Environment variable holding the log filter
const LOG_ENV: &str = "EXPENSE_LOG";

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "Track expenses, credits, monthly category budgets and recurring \
                  expenses from the command line, and see where each month's \
                  money went."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, settings and default categories
    Init,

    /// Show configuration and paths
    Config,

    /// Category management
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommands),

    /// Expense management
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Credit (income) management
    #[command(subcommand)]
    Credit(CreditCommands),

    /// Monthly budgets
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Recurring expense schedules
    #[command(subcommand, alias = "rec")]
    Recurring(RecurringCommands),

    /// Monthly summaries and balances
    #[command(subcommand)]
    Summary(SummaryCommands),

    /// Analytics reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Launch the interactive dashboard
    #[command(alias = "ui")]
    Dashboard {
        /// Month to open (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

impl Commands {
    /// Whether the command changes data, and so should see due recurring
    /// expenses inserted first
    fn mutates(&self) -> bool {
        match self {
            Commands::Category(cmd) => !matches!(cmd, CategoryCommands::List { .. }),
            Commands::Expense(cmd) => !matches!(cmd, ExpenseCommands::List { .. }),
            Commands::Credit(cmd) => !matches!(cmd, CreditCommands::List { .. }),
            Commands::Budget(cmd) => !matches!(
                cmd,
                BudgetCommands::List { .. } | BudgetCommands::Overspent { .. }
            ),
            Commands::Recurring(cmd) => !matches!(
                cmd,
                RecurringCommands::List { .. }
                    | RecurringCommands::Upcoming { .. }
                    | RecurringCommands::Run
            ),
            Commands::Init
            | Commands::Config
            | Commands::Summary(_)
            | Commands::Report(_)
            | Commands::Export(_)
            | Commands::Audit { .. }
            | Commands::Dashboard { .. } => false,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("expense - terminal personal expense tracker");
        println!();
        println!("Run 'expense --help' for usage information.");
        println!("Run 'expense dashboard' to open the interactive view.");
        return Ok(());
    };

    if let Commands::Init = command {
        println!("Initializing expense-cli at: {}", paths.base_dir().display());
        initialize_storage(&paths)?;
        settings.setup_completed = true;
        settings.save(&paths)?;
        println!("Initialization complete!");
        println!();
        println!("Run 'expense category list' to see the default categories.");
        return Ok(());
    }

    if let Commands::Config = command {
        println!("expense-cli configuration");
        println!("=========================");
        println!("Base directory:  {}", paths.base_dir().display());
        println!("Data directory:  {}", paths.data_dir().display());
        println!("Settings file:   {}", paths.settings_file().display());
        println!("Audit log:       {}", paths.audit_log().display());
        println!();
        println!("Settings:");
        println!("  Currency symbol:        {}", settings.currency_symbol);
        println!("  Date format:            {}", settings.date_format);
        println!("  Budget warning at:      {}%", settings.budget_warning_percent);
        println!(
            "  Default recurring time: {}",
            settings.default_recurring_time.format("%H:%M")
        );
        println!("  Initialized:            {}", settings.setup_completed);
        return Ok(());
    }

    let storage = Storage::open(paths)?;
    if command.mutates() {
        run_due_schedules(&storage)?;
    }

    match command {
        Commands::Category(cmd) => handle_category_command(&storage, cmd)?,
        Commands::Expense(cmd) => handle_expense_command(&storage, &settings, cmd)?,
        Commands::Credit(cmd) => handle_credit_command(&storage, &settings, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&storage, &settings, cmd)?,
        Commands::Recurring(cmd) => handle_recurring_command(&storage, &settings, cmd)?,
        Commands::Summary(cmd) => handle_summary_command(&storage, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&storage, cmd)?,
        Commands::Audit { count } => handle_audit_command(&storage, count)?,
        Commands::Dashboard { month } => {
            let month = match month {
                Some(month) => Month::parse(&month)?,
                None => Month::current(),
            };
            expense_cli::tui::run_tui(&storage, &settings, month)?;
        }
        Commands::Init | Commands::Config => {}
    }

    Ok(())
}
