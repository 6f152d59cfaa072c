//! # Favorites
//!
//! Recipes the user starred, in the order they were starred.
//!
//! ## Rules
//! - Unique by recipe id
//! - Loaded once from the `favorites` slot when the store is created
//! - Every change rewrites the whole slot, no diffs
//! - Writes are fire-and-forget: a failed write is logged and the in-memory set stays authoritative
//!
//! ## Snapshot
//! JSON array of listing records, same shape the backend serves:
//! ```json
//! [{ "idMeal": "52772", "strMeal": "Teriyaki Chicken Casserole", "strMealThumb": "...", "strCategory": "Chicken" }]
//! ```
use std::collections::HashSet;

use catalog::Recipe;
use tracing::{debug, warn};

use crate::storage::{Storage, StorageError};

pub const FAVORITES_SLOT: &str = "favorites";

pub struct Favorites<S: Storage> {
    recipes: Vec<Recipe>,
    storage: S,
}

impl<S: Storage> Favorites<S> {
    /// A missing or unreadable snapshot starts an empty set.
    pub fn init(storage: S) -> Self {
        let recipes = match load(&storage) {
            Ok(recipes) => recipes,
            Err(e) => {
                warn!("Ignoring saved favorites: {e}");
                Vec::new()
            }
        };
        debug!("Loaded {} favorites", recipes.len());

        Self { recipes, storage }
    }

    pub fn add(&mut self, recipe: Recipe) {
        if self.contains(&recipe.id) {
            return;
        }

        self.recipes.push(recipe);
        self.persist();
    }

    pub fn remove(&mut self, id: &str) {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != id);

        if self.recipes.len() != before {
            self.persist();
        }
    }

    /// Returns whether the recipe is a favorite afterwards.
    pub fn toggle(&mut self, recipe: Recipe) -> bool {
        if self.contains(&recipe.id) {
            self.remove(&recipe.id);
            false
        } else {
            self.add(recipe);
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.recipes.iter().any(|r| r.id == id)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.recipes)
            .map_err(StorageError::from)
            .and_then(|snapshot| self.storage.save(FAVORITES_SLOT, &snapshot));

        if let Err(e) = result {
            warn!("Failed to persist favorites: {e}");
        }
    }
}

fn load<S: Storage>(storage: &S) -> Result<Vec<Recipe>, StorageError> {
    let Some(snapshot) = storage.load(FAVORITES_SLOT)? else {
        return Ok(Vec::new());
    };

    let mut recipes: Vec<Recipe> = serde_json::from_str(&snapshot)?;

    // hand-edited snapshots may repeat ids, first one wins
    let mut seen = HashSet::new();
    recipes.retain(|r| seen.insert(r.id.clone()));

    Ok(recipes)
}
