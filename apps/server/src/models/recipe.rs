//! Persisted recipe and ingredient entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recipe as stored in the `recipe` table.
///
/// `ingredients` is not a column: it is filled by whoever loaded the recipe
/// (fetch-by-id loads it eagerly, search attaches it from a batch fetch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(rename = "is_vegetarian")]
    pub vegetarian: bool,
    pub instructions: String,
    #[sqlx(skip)]
    pub ingredients: Vec<Ingredient>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An ingredient row, owned by exactly one recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub recipe_id: i64,
    pub name: String,
    /// Quantity as persisted, independent of any serving multiplier.
    pub quantity: i32,
    pub unit: Option<String>,
}

/// Recipe content supplied by a client for insert or full replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub description: Option<String>,
    pub vegetarian: bool,
    pub instructions: String,
    pub ingredients: Vec<IngredientDraft>,
}

/// Ingredient content supplied by a client.
///
/// `id` refers to an existing ingredient of the same recipe; on replace, a
/// matching child is updated in place and any other id is treated as new.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientDraft {
    pub id: Option<i64>,
    pub name: String,
    pub quantity: i32,
    pub unit: Option<String>,
}

impl IngredientDraft {
    pub fn into_ingredient(self, id: i64, recipe_id: i64) -> Ingredient {
        Ingredient {
            id,
            recipe_id,
            name: self.name,
            quantity: self.quantity,
            unit: self.unit,
        }
    }
}
