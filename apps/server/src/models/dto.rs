//! Service-level recipe views
//!
//! These are what services hand back to the API layer. Conversions from the
//! persisted entities are explicit field-by-field mappings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::recipe::{Ingredient, Recipe};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub vegetarian: bool,
    pub instructions: String,
    pub ingredients: Vec<IngredientDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDto {
    pub id: i64,
    pub name: String,
    pub quantity: i32,
    pub unit: Option<String>,
}

impl From<Recipe> for RecipeDto {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            vegetarian: recipe.vegetarian,
            instructions: recipe.instructions,
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(IngredientDto::from)
                .collect(),
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

impl From<Ingredient> for IngredientDto {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            quantity: ingredient.quantity,
            unit: ingredient.unit,
        }
    }
}
