use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ForkifyError, Result};
use crate::models::ingredient::format_quantity;

/// Source of shopping list item ids
pub trait IdGenerator: Send + Sync {
    /// Return an id never handed out before by this generator
    fn next_id(&mut self) -> String;
}

/// Deterministic ids: `item-1`, `item-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    last: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.last += 1;
        format!("item-{}", self.last)
    }
}

/// Random v4 UUIDs
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: String,
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}

impl fmt::Display for ShoppingListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(count) = self.count {
            parts.push(format_quantity(count));
        }
        if !self.unit.is_empty() {
            parts.push(self.unit.clone());
        }
        parts.push(self.ingredient.clone());

        f.write_str(&parts.join(" "))
    }
}

/// Ingredients the user intends to buy, in the order they were added
pub struct ShoppingList {
    items: IndexMap<String, ShoppingListItem>,
    ids: Box<dyn IdGenerator>,
}

impl ShoppingList {
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            items: IndexMap::new(),
            ids,
        }
    }

    /// Append a new item under a fresh id and return a copy of it
    pub fn add_item(
        &mut self,
        count: Option<f64>,
        unit: impl Into<String>,
        ingredient: impl Into<String>,
    ) -> ShoppingListItem {
        // A generator that repeats itself must not clobber a live item
        let mut id = self.ids.next_id();
        while self.items.contains_key(&id) {
            id = self.ids.next_id();
        }

        let item = ShoppingListItem {
            id: id.clone(),
            count,
            unit: unit.into(),
            ingredient: ingredient.into(),
        };
        self.items.insert(id, item.clone());
        item
    }

    /// Remove the item with `id`; returns it if it was present
    pub fn delete_item(&mut self, id: &str) -> Option<ShoppingListItem> {
        self.items.shift_remove(id)
    }

    pub fn update_count(&mut self, id: &str, count: Option<f64>) -> Result<&ShoppingListItem> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| ForkifyError::NotFound(id.to_string()))?;
        item.count = count;
        Ok(item)
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingListItem> {
        self.items.get(id)
    }

    pub fn items(&self) -> impl Iterator<Item = &ShoppingListItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl Default for ShoppingList {
    fn default() -> Self {
        Self::new(Box::new(RandomIds))
    }
}

impl fmt::Debug for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShoppingList")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}
