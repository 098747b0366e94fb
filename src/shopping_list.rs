use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::BrowserError;

/// One line of the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// Generated id, never reused within the same list
    pub id: String,
    /// Quantity to buy, `None` when the ingredient had no quantity
    pub count: Option<f64>,
    /// Long-form unit name, may be empty
    pub unit: String,
    /// Ingredient name as parsed from the recipe
    pub ingredient: String,
}

/// Items to buy, kept in the order they were added.
///
/// Identical ingredients are never merged; each add produces its own entry.
#[derive(Debug, Default)]
pub struct ShoppingList {
    /// Insertion order
    items: Vec<ShoppingItem>,
    /// Last id number handed out; keeps growing across `empty()`
    next_id: u64,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(
        &mut self,
        count: Option<f64>,
        unit: impl Into<String>,
        ingredient: impl Into<String>,
    ) -> ShoppingItem {
        self.next_id += 1;
        let item = ShoppingItem {
            id: format!("item-{}", self.next_id),
            count,
            unit: unit.into(),
            ingredient: ingredient.into(),
        };
        debug!("Added shopping item {} ({})", item.id, item.ingredient);
        self.items.push(item.clone());
        item
    }

    /// Remove an item. Unknown ids are ignored.
    pub fn delete_item(&mut self, id: &str) -> Option<ShoppingItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn update_count(&mut self, id: &str, value: f64) -> Result<(), BrowserError> {
        if !value.is_finite() || value < 0.0 {
            return Err(BrowserError::InvalidArgument(format!(
                "count must be a finite non-negative number, got {}",
                value
            )));
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| BrowserError::NotFound(format!("shopping item {}", id)))?;
        item.count = Some(value);
        Ok(())
    }

    /// Remove every item. Ids already handed out are never reused.
    pub fn empty(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
