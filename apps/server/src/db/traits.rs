//! Core traits for recipe storage backends

use crate::{
    db::search::predicate::RecipePredicate,
    models::{Ingredient, PageRequest, Recipe, RecipeDraft},
    Result,
};
use async_trait::async_trait;

/// Storage operations on recipes.
///
/// Recipes returned by [`find_page`](Self::find_page) carry no ingredients;
/// callers batch-load them through an [`IngredientRepository`]. Recipes
/// returned by every other method carry their full ingredient list.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Fetch one page of recipes matching `predicate`, newest first.
    ///
    /// Ordering is `created_at` descending with `id` descending as the tie
    /// breaker, so consecutive pages are disjoint and stable.
    async fn find_page(&self, predicate: &RecipePredicate, page: PageRequest)
        -> Result<Vec<Recipe>>;

    /// Count every recipe matching `predicate`, ignoring paging.
    async fn count(&self, predicate: &RecipePredicate) -> Result<i64>;

    /// Read a recipe with its ingredients.
    ///
    /// # Returns
    /// * `Ok(Some(recipe))` - Recipe exists
    /// * `Ok(None)` - No recipe with this id
    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>>;

    async fn exists_by_id(&self, id: i64) -> Result<bool>;

    /// Persist a new recipe and its ingredients atomically.
    ///
    /// The store assigns every id and both timestamps.
    async fn insert(&self, draft: RecipeDraft) -> Result<Recipe>;

    /// Replace the scalar fields and the full ingredient set of a recipe.
    ///
    /// `created_at` is preserved and `updated_at` refreshed. Children whose id
    /// appears in the draft are updated in place; the rest are deleted; drafts
    /// without a known id are inserted.
    ///
    /// # Errors
    /// * `RecipeNotFound` - If no recipe has this id
    async fn replace(&self, id: i64, draft: RecipeDraft) -> Result<Recipe>;

    /// Delete a recipe and, by cascade, its ingredients.
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete_by_id(&self, id: i64) -> Result<bool>;
}

/// Batch access to ingredients.
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Every ingredient whose owner is in `recipe_ids`, in unspecified order.
    ///
    /// An empty id list yields an empty result without touching the store.
    async fn find_by_recipe_ids(&self, recipe_ids: &[i64]) -> Result<Vec<Ingredient>>;
}
