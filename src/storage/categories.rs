//! Category repository backed by categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::ExpenseError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryData {
    pub categories: Vec<Category>,
}

pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        data.clear();
        for category in file_data.categories {
            data.insert(category.id, category);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), ExpenseError> {
        let file_data = CategoryData {
            categories: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, ExpenseError> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// All categories sorted by name
    pub fn get_all(&self) -> Result<Vec<Category>, ExpenseError> {
        let data = read_lock(&self.data)?;
        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by_key(|c| c.name.to_lowercase());
        Ok(list)
    }

    /// Case-insensitive lookup by name
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, ExpenseError> {
        let data = read_lock(&self.data)?;
        let wanted = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|c| c.name.to_lowercase() == wanted)
            .cloned())
    }

    pub fn upsert(&self, category: Category) -> Result<(), ExpenseError> {
        write_lock(&self.data)?.insert(category.id, category);
        Ok(())
    }

    pub fn delete(&self, id: CategoryId) -> Result<bool, ExpenseError> {
        Ok(write_lock(&self.data)?.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        Ok(read_lock(&self.data)?.len())
    }
}
