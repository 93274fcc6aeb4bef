//! JSON-file storage
//!
//! One file per table under `data/`, each held in memory by a repository and
//! written back atomically. The `Storage` coordinator owns the repositories
//! and the audit log.

pub mod budgets;
pub mod categories;
pub mod credits;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod recurring;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

pub use budgets::{BudgetKey, BudgetRepository};
pub use categories::CategoryRepository;
pub use credits::CreditRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use recurring::RecurringRepository;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> ExpenseResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> ExpenseResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))
}

pub struct Storage {
    paths: ExpensePaths,
    pub categories: CategoryRepository,
    pub expenses: ExpenseRepository,
    pub credits: CreditRepository,
    pub budgets: BudgetRepository,
    pub recurring: RecurringRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create the repositories; call `load_all` to read the files
    pub fn new(paths: ExpensePaths) -> ExpenseResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: CategoryRepository::new(paths.categories_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            credits: CreditRepository::new(paths.credits_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            recurring: RecurringRepository::new(paths.recurring_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Open and load everything in one step
    pub fn open(paths: ExpensePaths) -> ExpenseResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    pub fn load_all(&self) -> ExpenseResult<()> {
        self.categories.load()?;
        self.expenses.load()?;
        self.credits.load()?;
        self.budgets.load()?;
        self.recurring.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> ExpenseResult<()> {
        self.categories.save()?;
        self.expenses.save()?;
        self.credits.save()?;
        self.budgets.save()?;
        self.recurring.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> ExpenseResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update with a generated diff summary
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> ExpenseResult<()> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> ExpenseResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
