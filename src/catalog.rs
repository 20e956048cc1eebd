// src/catalog.rs

use crate::constants::ITEMS_PER_LEVEL;
use crate::error::CatalogError;
use crate::models::{Item, Level};
use log::debug;
use std::collections::HashSet;

/// Immutable, ordered item list. Each level owns one contiguous slice of it.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    per_level: usize,
}

impl Catalog {
    /// Loads the catalog that ships with the crate.
    pub fn embedded() -> Result<Self, CatalogError> {
        let data = include_str!("data/hanja.json");
        let items: Vec<Item> = serde_json::from_str(data)?;
        Self::from_items(items, ITEMS_PER_LEVEL)
    }

    pub fn from_items(items: Vec<Item>, per_level: usize) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
        }

        let needed = per_level * Level::ALL.len();
        if items.len() < needed {
            return Err(CatalogError::LevelOutOfRange {
                level: Level::ALL[items.len() / per_level.max(1)],
                found: items.len(),
                needed,
            });
        }

        debug!("Catalog loaded: {} items, {} per level", items.len(), per_level);
        Ok(Catalog { items, per_level })
    }

    pub fn all(&self) -> &[Item] {
        &self.items
    }

    pub fn level_items(&self, level: Level) -> &[Item] {
        let start = level.index() * self.per_level;
        &self.items[start..start + self.per_level]
    }

    pub fn get(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
