//! Dashboard state
//!
//! Holds the month being viewed, its computed overview and the table
//! selection. The overview is recomputed whenever the month changes.

use ratatui::widgets::TableState;

use crate::config::settings::Settings;
use crate::models::Month;
use crate::services::{CategorySummary, MonthOverview, SummaryService};
use crate::storage::Storage;

pub struct App<'a> {
    pub storage: &'a Storage,

    pub settings: &'a Settings,

    pub should_quit: bool,

    /// Month being viewed
    pub month: Month,

    /// Summary of `month`, `None` if it could not be computed
    pub overview: Option<MonthOverview>,

    /// Selected row of the category table
    pub table_state: TableState,

    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings, month: Month) -> Self {
        let mut app = Self {
            storage,
            settings,
            should_quit: false,
            month,
            overview: None,
            table_state: TableState::default(),
            status_message: None,
        };
        app.refresh();
        app
    }

    /// Recompute the overview for the current month
    pub fn refresh(&mut self) {
        match SummaryService::new(self.storage).month_overview(self.month) {
            Ok(overview) => {
                let selected = if overview.categories.is_empty() {
                    None
                } else {
                    Some(
                        self.table_state
                            .selected()
                            .unwrap_or(0)
                            .min(overview.categories.len() - 1),
                    )
                };
                self.table_state.select(selected);
                self.overview = Some(overview);
                self.status_message = None;
            }
            Err(e) => {
                self.overview = None;
                self.table_state.select(None);
                self.status_message = Some(e.to_string());
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_month(&mut self, month: Month) {
        if month != self.month {
            self.month = month;
            self.refresh();
        }
    }

    pub fn next_month(&mut self) {
        self.set_month(self.month.next());
    }

    pub fn prev_month(&mut self) {
        self.set_month(self.month.prev());
    }

    pub fn current_month(&mut self) {
        self.set_month(Month::current());
    }

    fn row_count(&self) -> usize {
        self.overview.as_ref().map_or(0, |o| o.categories.len())
    }

    pub fn select_next(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let next = self.table_state.selected().map_or(0, |i| (i + 1).min(count - 1));
        self.table_state.select(Some(next));
    }

    pub fn select_prev(&mut self) {
        if self.row_count() == 0 {
            return;
        }
        let prev = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(prev));
    }

    pub fn selected_summary(&self) -> Option<&CategorySummary> {
        let index = self.table_state.selected()?;
        self.overview.as_ref()?.categories.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::Category;
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, Storage::open(paths).unwrap())
    }

    #[test]
    fn test_month_navigation_recomputes_overview() {
        let (_temp, storage) = storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, Month::new(2025, 1).unwrap());

        app.prev_month();
        assert_eq!(app.month, Month::new(2024, 12).unwrap());
        assert_eq!(app.overview.as_ref().unwrap().month, app.month);

        app.next_month();
        app.next_month();
        assert_eq!(app.month, Month::new(2025, 2).unwrap());

        app.current_month();
        assert_eq!(app.month, Month::current());
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let (_temp, storage) = storage();
        storage.categories.upsert(Category::new("Food")).unwrap();
        storage.categories.upsert(Category::new("Rent")).unwrap();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, Month::new(2025, 1).unwrap());

        assert_eq!(app.table_state.selected(), Some(0));
        app.select_prev();
        assert_eq!(app.table_state.selected(), Some(0));

        app.select_next();
        app.select_next();
        assert_eq!(app.table_state.selected(), Some(1));
        assert_eq!(app.selected_summary().unwrap().category.name, "Rent");
    }

    #[test]
    fn test_empty_month_has_no_selection() {
        let (_temp, storage) = storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, Month::new(2025, 1).unwrap());

        app.select_next();
        assert_eq!(app.table_state.selected(), None);
        assert!(app.selected_summary().is_none());
    }
}
