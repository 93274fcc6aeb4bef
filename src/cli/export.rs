//! Data export CLI commands
//!
//! Without `--output` the export is written to stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use super::parse_month;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{
    export_budgets_csv, export_credits_csv, export_expenses_csv, export_full_json,
    export_full_yaml,
};
use crate::storage::Storage;

/// Table exported by `export csv`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CsvTable {
    Expenses,
    Credits,
    Budgets,
}

#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export one table as CSV
    Csv {
        #[arg(value_enum)]
        table: CsvTable,
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only budgets of this month (budgets table only)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Export everything as JSON
    Json {
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Export everything as YAML
    Yaml {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn open_output(output: Option<&Path>) -> ExpenseResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn report_written(output: Option<&Path>, what: &str) {
    if let Some(path) = output {
        // stdout holds the export itself
        println!("Exported {} to: {}", what, path.display());
    }
}

pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> ExpenseResult<()> {
    match cmd {
        ExportCommands::Csv {
            table,
            output,
            month,
        } => {
            let writer = open_output(output.as_deref())?;
            let rows = match table {
                CsvTable::Expenses => export_expenses_csv(storage, writer)?,
                CsvTable::Credits => export_credits_csv(storage, writer)?,
                CsvTable::Budgets => {
                    let month = month.map(|m| parse_month(Some(&m))).transpose()?;
                    export_budgets_csv(storage, writer, month)?
                }
            };
            report_written(output.as_deref(), &format!("{} rows", rows));
        }

        ExportCommands::Json { output, pretty } => {
            let mut writer = open_output(output.as_deref())?;
            export_full_json(storage, &mut writer, pretty)?;
            writeln!(writer)?;
            writer.flush()?;
            report_written(output.as_deref(), "full JSON export");
        }

        ExportCommands::Yaml { output } => {
            let mut writer = open_output(output.as_deref())?;
            export_full_yaml(storage, &mut writer)?;
            writer.flush()?;
            report_written(output.as_deref(), "full YAML export");
        }
    }

    Ok(())
}
