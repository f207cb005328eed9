//! Schema bootstrap for the recipe tables
//!
//! Every statement is idempotent, so running this at each start-up is safe.
//! Column changes are out of scope here: existing tables are left untouched.

use sqlx::PgPool;

use crate::{Error, Result};

const STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS recipe (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description VARCHAR(255),
        is_vegetarian BOOLEAN NOT NULL DEFAULT FALSE,
        instructions TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE TABLE IF NOT EXISTS ingredient (
        id BIGSERIAL PRIMARY KEY,
        recipe_id BIGINT NOT NULL REFERENCES recipe (id) ON DELETE CASCADE,
        name VARCHAR(255) NOT NULL,
        quantity INTEGER NOT NULL CHECK (quantity > 0),
        unit VARCHAR(255)
    )",
    "CREATE INDEX IF NOT EXISTS idx_recipe_created_at ON recipe (created_at DESC, id DESC)",
    "CREATE INDEX IF NOT EXISTS idx_ingredient_recipe_id ON ingredient (recipe_id)",
    "CREATE INDEX IF NOT EXISTS idx_ingredient_name ON ingredient (name)",
];

/// Create the `recipe` and `ingredient` tables and their indexes if missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(Error::Database)?;
    }

    tracing::info!("Recipe schema ready");
    Ok(())
}
