//! Category display formatting

use std::collections::HashMap;

use crate::models::{Category, CategoryId};

use super::table::render_table;

/// Display labels (icon + name) keyed by id
pub fn category_labels(categories: &[Category]) -> HashMap<CategoryId, String> {
    categories.iter().map(|c| (c.id, c.label())).collect()
}

/// Label for `id`, or a placeholder when the category is gone
pub fn label_for(labels: &HashMap<CategoryId, String>, id: CategoryId) -> String {
    labels
        .get(&id)
        .cloned()
        .unwrap_or_else(|| format!("(unknown {})", id))
}

pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'expense init' to create the default categories."
            .to_string();
    }

    let rows = categories.iter().map(|c| {
        vec![
            c.id.to_string(),
            c.label(),
            c.color.clone().unwrap_or_default(),
            if c.hidden { "hidden".into() } else { String::new() },
        ]
    });

    render_table(&["ID", "Category", "Color", ""], rows, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_and_labels() {
        let mut pets = Category::with_icon("Pets", "🐶");
        pets.set_hidden(true);
        let categories = vec![Category::new("Rent"), pets];

        let table = format_category_list(&categories);
        assert!(table.contains("🐶 Pets"));
        assert!(table.contains("hidden"));

        let labels = category_labels(&categories);
        assert_eq!(label_for(&labels, categories[0].id), "Rent");
        assert!(label_for(&labels, CategoryId::new()).starts_with("(unknown cat-"));
    }

    #[test]
    fn test_empty_list_hint() {
        assert!(format_category_list(&[]).contains("expense init"));
    }
}
