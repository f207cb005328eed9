//! In-memory recipe store
//!
//! Evaluates search predicates directly against stored rows. Ordering,
//! paging and replace semantics mirror [`PostgresRecipeStore`](super::PostgresRecipeStore).

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::search::predicate::RecipePredicate;
use super::traits::{IngredientRepository, RecipeRepository};
use crate::models::{Ingredient, PageRequest, Recipe, RecipeDraft};
use crate::{Error, Result};

#[derive(Debug, Default)]
struct Tables {
    recipes: BTreeMap<i64, Recipe>,
    ingredients: BTreeMap<i64, Ingredient>,
    next_recipe_id: i64,
    next_ingredient_id: i64,
}

impl Tables {
    fn next_recipe_id(&mut self) -> i64 {
        self.next_recipe_id += 1;
        self.next_recipe_id
    }

    fn next_ingredient_id(&mut self) -> i64 {
        self.next_ingredient_id += 1;
        self.next_ingredient_id
    }

    fn ingredients_of(&self, recipe_id: i64) -> Vec<Ingredient> {
        self.ingredients
            .values()
            .filter(|i| i.recipe_id == recipe_id)
            .cloned()
            .collect()
    }

    /// Matching recipes, newest first with id as tie breaker.
    fn matching(&self, predicate: &RecipePredicate) -> Vec<&Recipe> {
        let mut by_recipe: HashMap<i64, Vec<&Ingredient>> = HashMap::new();
        for ingredient in self.ingredients.values() {
            by_recipe
                .entry(ingredient.recipe_id)
                .or_default()
                .push(ingredient);
        }

        let mut matches: Vec<&Recipe> = self
            .recipes
            .values()
            .filter(|r| {
                let own = by_recipe.get(&r.id).map(Vec::as_slice).unwrap_or_default();
                predicate.matches(r, own)
            })
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        matches
    }
}

/// Recipe and ingredient repository held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryRecipeStore {
    tables: RwLock<Tables>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| Error::Internal("recipe store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| Error::Internal("recipe store lock poisoned".to_string()))
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeStore {
    async fn find_page(
        &self,
        predicate: &RecipePredicate,
        page: PageRequest,
    ) -> Result<Vec<Recipe>> {
        let tables = self.read()?;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        Ok(tables
            .matching(predicate)
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, predicate: &RecipePredicate) -> Result<i64> {
        let tables = self.read()?;
        Ok(tables.matching(predicate).len() as i64)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>> {
        let tables = self.read()?;
        Ok(tables.recipes.get(&id).map(|recipe| Recipe {
            ingredients: tables.ingredients_of(id),
            ..recipe.clone()
        }))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.read()?.recipes.contains_key(&id))
    }

    async fn insert(&self, draft: RecipeDraft) -> Result<Recipe> {
        let mut tables = self.write()?;
        let now = Utc::now();
        let id = tables.next_recipe_id();

        let mut ingredients = Vec::with_capacity(draft.ingredients.len());
        for ingredient in draft.ingredients {
            let ingredient_id = tables.next_ingredient_id();
            let ingredient = ingredient.into_ingredient(ingredient_id, id);
            tables.ingredients.insert(ingredient_id, ingredient.clone());
            ingredients.push(ingredient);
        }

        let recipe = Recipe {
            id,
            title: draft.title,
            description: draft.description,
            vegetarian: draft.vegetarian,
            instructions: draft.instructions,
            ingredients: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        tables.recipes.insert(id, recipe.clone());

        Ok(Recipe {
            ingredients,
            ..recipe
        })
    }

    async fn replace(&self, id: i64, draft: RecipeDraft) -> Result<Recipe> {
        let mut tables = self.write()?;

        let created_at = tables
            .recipes
            .get(&id)
            .map(|r| r.created_at)
            .ok_or(Error::RecipeNotFound(id))?;

        let existing: HashSet<i64> = tables.ingredients_of(id).iter().map(|i| i.id).collect();
        let kept: HashSet<i64> = draft
            .ingredients
            .iter()
            .filter_map(|i| i.id)
            .filter(|i| existing.contains(i))
            .collect();
        tables
            .ingredients
            .retain(|child, i| i.recipe_id != id || kept.contains(child));

        let mut updated = HashSet::new();
        let mut ingredients = Vec::with_capacity(draft.ingredients.len());
        for ingredient in draft.ingredients {
            let child = match ingredient.id {
                Some(child) if kept.contains(&child) && updated.insert(child) => child,
                _ => tables.next_ingredient_id(),
            };
            let ingredient = ingredient.into_ingredient(child, id);
            tables.ingredients.insert(child, ingredient.clone());
            ingredients.push(ingredient);
        }

        let recipe = Recipe {
            id,
            title: draft.title,
            description: draft.description,
            vegetarian: draft.vegetarian,
            instructions: draft.instructions,
            ingredients: Vec::new(),
            created_at,
            updated_at: Utc::now(),
        };
        tables.recipes.insert(id, recipe.clone());

        Ok(Recipe {
            ingredients,
            ..recipe
        })
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let mut tables = self.write()?;
        if tables.recipes.remove(&id).is_none() {
            return Ok(false);
        }
        tables.ingredients.retain(|_, i| i.recipe_id != id);
        Ok(true)
    }
}

#[async_trait]
impl IngredientRepository for InMemoryRecipeStore {
    async fn find_by_recipe_ids(&self, recipe_ids: &[i64]) -> Result<Vec<Ingredient>> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let tables = self.read()?;
        Ok(tables
            .ingredients
            .values()
            .filter(|i| recipe_ids.contains(&i.recipe_id))
            .cloned()
            .collect())
    }
}
