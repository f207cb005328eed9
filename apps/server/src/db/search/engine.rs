//! Search execution - page query plus count query
//!
//! The SearchEngine is responsible for:
//! - Building the recipe predicate from search filters
//! - Fetching the requested page and the total match count with that predicate
//! - Reporting sort requests it does not honour

use std::sync::Arc;

use crate::db::search::params::SearchFilters;
use crate::db::search::predicate::RecipePredicate;
use crate::db::traits::RecipeRepository;
use crate::models::{Page, Recipe};
use crate::Result;

/// Search engine executes recipe searches against a recipe repository
#[derive(Clone)]
pub struct SearchEngine {
    recipes: Arc<dyn RecipeRepository>,
}

impl SearchEngine {
    pub fn new(recipes: Arc<dyn RecipeRepository>) -> Self {
        Self { recipes }
    }

    /// Run one search. Recipes in the returned page carry no ingredients.
    ///
    /// The page and the count are separate, concurrent reads and may observe
    /// different snapshots under concurrent writes.
    pub async fn search(&self, filters: &SearchFilters) -> Result<Page<Recipe>> {
        if !filters.uses_default_sort() {
            tracing::debug!(
                sort = %filters.sort,
                "Ignoring requested sort, results are ordered by creation time"
            );
        }

        let predicate = RecipePredicate::from_filters(filters);
        let page = filters.page;

        let (recipes, total) = futures::try_join!(
            self.recipes.find_page(&predicate, page),
            self.recipes.count(&predicate),
        )?;

        tracing::debug!(
            conditions = predicate.conditions().len(),
            page = page.page,
            page_size = page.page_size,
            returned = recipes.len(),
            total,
            "Recipe search executed"
        );

        Ok(Page::new(recipes, page, total))
    }
}
