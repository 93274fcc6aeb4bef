//! First-run setup

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::{Category, DEFAULT_CATEGORIES};

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Create the directory layout and seed the default categories
///
/// An existing category file is never overwritten.
pub fn initialize_storage(paths: &ExpensePaths) -> Result<(), ExpenseError> {
    paths.ensure_directories()?;

    if needs_initialization(paths) {
        let categories = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, icon)| Category::with_icon(*name, *icon))
            .collect();
        write_json_atomic(paths.categories_file(), &CategoryData { categories })?;
    }

    Ok(())
}

pub fn needs_initialization(paths: &ExpensePaths) -> bool {
    !paths.categories_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::file_io::read_json;
    use tempfile::TempDir;

    #[test]
    fn test_seeds_default_categories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();
        assert!(!needs_initialization(&paths));

        let data: CategoryData = read_json(paths.categories_file()).unwrap();
        assert_eq!(data.categories.len(), 8);

        let labels: Vec<_> = data.categories.iter().map(|c| c.label()).collect();
        assert!(labels.contains(&"🛒 Groceries".to_string()));
        assert!(labels.contains(&"🛍️ Shopping".to_string()));
    }

    #[test]
    fn test_does_not_overwrite_existing_categories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let custom = CategoryData {
            categories: vec![Category::new("Pets")],
        };
        write_json_atomic(paths.categories_file(), &custom).unwrap();

        initialize_storage(&paths).unwrap();

        let data: CategoryData = read_json(paths.categories_file()).unwrap();
        assert_eq!(data.categories.len(), 1);
        assert_eq!(data.categories[0].name, "Pets");
    }
}
