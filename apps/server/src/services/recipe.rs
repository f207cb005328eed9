//! Recipe service - CRUD and search orchestration
//!
//! Search flow: the engine fetches one page of recipes plus the total, the
//! ingredients of exactly those recipes are loaded in one batch, and the
//! assembler attaches and scales them.

use std::sync::Arc;

use crate::db::search::engine::SearchEngine;
use crate::db::search::params::SearchFilters;
use crate::db::traits::{IngredientRepository, RecipeRepository};
use crate::models::{Page, RecipeDraft, RecipeDto};
use crate::services::assembler::ResultAssembler;
use crate::{Error, Result};

pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
    ingredients: Arc<dyn IngredientRepository>,
    search_engine: SearchEngine,
}

impl RecipeService {
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        ingredients: Arc<dyn IngredientRepository>,
    ) -> Self {
        Self {
            search_engine: SearchEngine::new(recipes.clone()),
            recipes,
            ingredients,
        }
    }

    /// Build a service whose recipe and ingredient repositories are the same store.
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: RecipeRepository + IngredientRepository + 'static,
    {
        Self::new(store.clone(), store)
    }

    /// Persist a new recipe and return its id.
    pub async fn create(&self, draft: RecipeDraft) -> Result<i64> {
        tracing::info!(title = %draft.title, "Preparing to save new recipe");
        let recipe = self.recipes.insert(draft).await?;
        Ok(recipe.id)
    }

    pub async fn update(&self, id: i64, draft: RecipeDraft) -> Result<RecipeDto> {
        tracing::info!(id, "Preparing to update recipe");
        self.ensure_exists(id).await?;
        let recipe = self.recipes.replace(id, draft).await?;
        Ok(RecipeDto::from(recipe))
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<()> {
        tracing::info!(id, "Preparing to delete recipe");
        self.ensure_exists(id).await?;
        if !self.recipes.delete_by_id(id).await? {
            // Deleted concurrently between the check and the delete.
            return Err(Error::RecipeNotFound(id));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<RecipeDto> {
        tracing::info!(id, "Preparing to find recipe");
        match self.recipes.find_by_id(id).await? {
            Some(recipe) => Ok(RecipeDto::from(recipe)),
            None => {
                tracing::info!(id, "Recipe not found");
                Err(Error::RecipeNotFound(id))
            }
        }
    }

    /// Search recipes; `filters.servings` scales the returned quantities only.
    pub async fn search(&self, filters: &SearchFilters) -> Result<Page<RecipeDto>> {
        let page = self.search_engine.search(filters).await?;

        let ids: Vec<i64> = page.content.iter().map(|r| r.id).collect();
        let ingredients = self.ingredients.find_by_recipe_ids(&ids).await?;

        Ok(ResultAssembler::assemble(page, ingredients, filters.servings))
    }

    async fn ensure_exists(&self, id: i64) -> Result<()> {
        if !self.recipes.exists_by_id(id).await? {
            tracing::info!(id, "Recipe not found");
            return Err(Error::RecipeNotFound(id));
        }
        Ok(())
    }
}
