//! PostgreSQL recipe store

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};

use super::search::predicate::RecipePredicate;
use super::search::query_builder::QueryBuilder;
use super::traits::{IngredientRepository, RecipeRepository};
use crate::models::{Ingredient, IngredientDraft, PageRequest, Recipe, RecipeDraft};
use crate::{Error, Result};

const RECIPE_RETURNING: &str =
    "RETURNING id, title, description, is_vegetarian, instructions, created_at, updated_at";
const INGREDIENT_RETURNING: &str = "RETURNING id, recipe_id, name, quantity, unit";

/// Recipe and ingredient repository backed by PostgreSQL.
#[derive(Clone)]
pub struct PostgresRecipeStore {
    pool: PgPool,
}

impl PostgresRecipeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn ingredients_of(conn: &mut PgConnection, recipe_id: i64) -> Result<Vec<Ingredient>> {
        sqlx::query_as::<_, Ingredient>(
            "SELECT id, recipe_id, name, quantity, unit
             FROM ingredient
             WHERE recipe_id = $1
             ORDER BY id",
        )
        .bind(recipe_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(Error::Database)
    }

    async fn insert_ingredient(
        conn: &mut PgConnection,
        recipe_id: i64,
        draft: IngredientDraft,
    ) -> Result<Ingredient> {
        let sql = format!(
            "INSERT INTO ingredient (recipe_id, name, quantity, unit)
             VALUES ($1, $2, $3, $4) {INGREDIENT_RETURNING}"
        );
        sqlx::query_as::<_, Ingredient>(&sql)
            .bind(recipe_id)
            .bind(draft.name)
            .bind(draft.quantity)
            .bind(draft.unit)
            .fetch_one(&mut *conn)
            .await
            .map_err(Error::Database)
    }

    async fn update_ingredient(
        conn: &mut PgConnection,
        recipe_id: i64,
        id: i64,
        draft: IngredientDraft,
    ) -> Result<Ingredient> {
        let sql = format!(
            "UPDATE ingredient SET name = $1, quantity = $2, unit = $3
             WHERE id = $4 AND recipe_id = $5 {INGREDIENT_RETURNING}"
        );
        sqlx::query_as::<_, Ingredient>(&sql)
            .bind(draft.name)
            .bind(draft.quantity)
            .bind(draft.unit)
            .bind(id)
            .bind(recipe_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(Error::Database)
    }
}

#[async_trait]
impl RecipeRepository for PostgresRecipeStore {
    async fn find_page(
        &self,
        predicate: &RecipePredicate,
        page: PageRequest,
    ) -> Result<Vec<Recipe>> {
        self.fetch_page(QueryBuilder::new(predicate, page)).await
    }

    async fn count(&self, predicate: &RecipePredicate) -> Result<i64> {
        self.count_total(QueryBuilder::new(predicate, PageRequest::default()))
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>> {
        let mut conn = self.pool.acquire().await.map_err(Error::Database)?;

        let recipe = sqlx::query_as::<_, Recipe>(
            "SELECT id, title, description, is_vegetarian, instructions, created_at, updated_at
             FROM recipe
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(Error::Database)?;

        let Some(mut recipe) = recipe else {
            return Ok(None);
        };
        recipe.ingredients = Self::ingredients_of(&mut conn, id).await?;
        Ok(Some(recipe))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM recipe WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn insert(&self, draft: RecipeDraft) -> Result<Recipe> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let now = Utc::now();

        let sql = format!(
            "INSERT INTO recipe (title, description, is_vegetarian, instructions, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5) {RECIPE_RETURNING}"
        );
        let mut recipe = sqlx::query_as::<_, Recipe>(&sql)
            .bind(draft.title)
            .bind(draft.description)
            .bind(draft.vegetarian)
            .bind(draft.instructions)
            .bind(now)
            .fetch_one(&mut *tx)
            .await
            .map_err(Error::Database)?;

        for ingredient in draft.ingredients {
            let saved = Self::insert_ingredient(&mut tx, recipe.id, ingredient).await?;
            recipe.ingredients.push(saved);
        }

        tx.commit().await.map_err(Error::Database)?;
        Ok(recipe)
    }

    async fn replace(&self, id: i64, draft: RecipeDraft) -> Result<Recipe> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let sql = format!(
            "UPDATE recipe
             SET title = $1, description = $2, is_vegetarian = $3, instructions = $4, updated_at = $5
             WHERE id = $6 {RECIPE_RETURNING}"
        );
        let mut recipe = sqlx::query_as::<_, Recipe>(&sql)
            .bind(draft.title)
            .bind(draft.description)
            .bind(draft.vegetarian)
            .bind(draft.instructions)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::RecipeNotFound(id))?;

        let existing: HashSet<i64> =
            sqlx::query_scalar::<_, i64>("SELECT id FROM ingredient WHERE recipe_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await
                .map_err(Error::Database)?
                .into_iter()
                .collect();

        let kept: Vec<i64> = draft
            .ingredients
            .iter()
            .filter_map(|i| i.id)
            .filter(|i| existing.contains(i))
            .collect();

        sqlx::query("DELETE FROM ingredient WHERE recipe_id = $1 AND NOT (id = ANY($2))")
            .bind(id)
            .bind(&kept)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        // An id listed twice is updated once; later duplicates become new rows.
        let mut updated = HashSet::new();
        for ingredient in draft.ingredients {
            let saved = match ingredient.id {
                Some(child) if existing.contains(&child) && updated.insert(child) => {
                    Self::update_ingredient(&mut tx, id, child, ingredient).await?
                }
                _ => Self::insert_ingredient(&mut tx, id, ingredient).await?,
            };
            recipe.ingredients.push(saved);
        }

        tx.commit().await.map_err(Error::Database)?;
        Ok(recipe)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM recipe WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?
            .rows_affected();

        Ok(deleted > 0)
    }
}

#[async_trait]
impl IngredientRepository for PostgresRecipeStore {
    async fn find_by_recipe_ids(&self, recipe_ids: &[i64]) -> Result<Vec<Ingredient>> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Ingredient>(
            "SELECT id, recipe_id, name, quantity, unit
             FROM ingredient
             WHERE recipe_id = ANY($1)
             ORDER BY id",
        )
        .bind(recipe_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)
    }
}
