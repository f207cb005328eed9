use super::query_builder::{BindValue, QueryBuilder};
use crate::db::store::PostgresRecipeStore;
use crate::models::Recipe;
use crate::Result;

impl PostgresRecipeStore {
    /// Execute the page query. Returned recipes carry no ingredients.
    pub(crate) async fn fetch_page(&self, query: QueryBuilder<'_>) -> Result<Vec<Recipe>> {
        let (sql, bind_values) = query.build_sql();

        let mut query_builder = sqlx::query_as::<_, Recipe>(&sql);
        for value in bind_values {
            query_builder = match value {
                BindValue::Bool(v) => query_builder.bind(v),
                BindValue::Text(v) => query_builder.bind(v),
                BindValue::TextArray(vs) => query_builder.bind(vs),
                BindValue::Timestamp(v) => query_builder.bind(v),
                BindValue::BigInt(v) => query_builder.bind(v),
            };
        }

        let recipes = query_builder
            .fetch_all(self.pool())
            .await
            .map_err(crate::Error::Database)?;

        Ok(recipes)
    }

    pub(crate) async fn count_total(&self, query: QueryBuilder<'_>) -> Result<i64> {
        let (sql, bind_values) = query.build_count_sql();

        let mut query_builder = sqlx::query_scalar::<_, i64>(&sql);
        for value in bind_values {
            query_builder = match value {
                BindValue::Bool(v) => query_builder.bind(v),
                BindValue::Text(v) => query_builder.bind(v),
                BindValue::TextArray(vs) => query_builder.bind(vs),
                BindValue::Timestamp(v) => query_builder.bind(v),
                BindValue::BigInt(v) => query_builder.bind(v),
            };
        }

        let total = query_builder
            .fetch_one(self.pool())
            .await
            .map_err(crate::Error::Database)?;

        Ok(total)
    }
}
