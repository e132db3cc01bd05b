//! Category list: unique names kept in sorted order

use crate::consts::CATEGORIES_KEY;
use crate::persistence::Storage;

/// Categories offered on first run and after a reset
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Groceries",
    "Utilities",
    "Entertainment",
    "Transport",
    "Healthcare",
    "Shopping",
    "Dining",
    "Rent",
    "Salary",
    "Other",
];

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

#[derive(Debug)]
pub struct CategoryStore {
    items: Vec<String>,
    storage: Storage,
}

impl CategoryStore {
    /// Load persisted categories, falling back to the defaults
    pub fn load(storage: Storage) -> Self {
        let items = storage.load(CATEGORIES_KEY, default_categories());
        Self { items, storage }
    }

    pub fn list(&self) -> &[String] {
        &self.items
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|c| c == name)
    }

    /// Insert `name` and re-sort. Exact duplicates are ignored (returns false).
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.items.push(name);
        self.items.sort();
        self.persist();
        true
    }

    /// Returns false if `name` was not present
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|c| c != name);
        let removed = self.items.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Restore the default list
    pub fn reset(&mut self) {
        self.items = default_categories();
        self.persist();
    }

    /// Replace the whole list (imports). Stored as given.
    pub fn replace(&mut self, items: Vec<String>) {
        self.items = items;
        self.persist();
    }

    pub fn reload(&mut self) {
        self.items = self.storage.load(CATEGORIES_KEY, default_categories());
    }

    fn persist(&self) {
        self.storage.save(CATEGORIES_KEY, &self.items);
    }
}
