//! SQL query builder for recipe searches.
//!
//! Renders the page query and the count query from one [`RecipePredicate`],
//! so both always see the same WHERE clause and bind sequence.

use super::predicate::{RecipePredicate, JOINED_INGREDIENT_ALIAS, RECIPE_ALIAS};
use crate::models::PageRequest;
use chrono::{DateTime, Utc};

pub(crate) mod bind;

use bind::push_bigint;

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone)]
pub enum BindValue {
    Bool(bool),
    Text(String),
    TextArray(Vec<String>),
    Timestamp(DateTime<Utc>),
    BigInt(i64),
}

const RECIPE_COLUMNS: &str =
    "r.id, r.title, r.description, r.is_vegetarian, r.instructions, r.created_at, r.updated_at";

pub struct QueryBuilder<'a> {
    predicate: &'a RecipePredicate,
    page: PageRequest,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(predicate: &'a RecipePredicate, page: PageRequest) -> Self {
        Self { predicate, page }
    }

    fn push_from(&self, sql: &mut String) {
        sql.push_str(&format!(" FROM recipe {RECIPE_ALIAS}"));
        if self.predicate.requires_ingredient_join() {
            sql.push_str(&format!(
                " JOIN ingredient {i} ON {i}.recipe_id = {RECIPE_ALIAS}.id",
                i = JOINED_INGREDIENT_ALIAS
            ));
        }
    }

    pub fn build_sql(&self) -> (String, Vec<BindValue>) {
        let mut bind_params = Vec::new();
        let mut sql = String::from("SELECT ");
        // The ingredient join fans out one row per matching ingredient.
        if self.predicate.requires_ingredient_join() {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(RECIPE_COLUMNS);

        self.push_from(&mut sql);
        sql.push_str(&self.predicate.build_where(&mut bind_params));

        // Newest first; id breaks ties so pages never overlap.
        sql.push_str(" ORDER BY r.created_at DESC, r.id DESC");

        let limit_idx = push_bigint(&mut bind_params, self.page.limit());
        let offset_idx = push_bigint(&mut bind_params, self.page.offset());
        sql.push_str(&format!(" LIMIT ${limit_idx} OFFSET ${offset_idx}"));

        (sql, bind_params)
    }

    pub fn build_count_sql(&self) -> (String, Vec<BindValue>) {
        let mut bind_params = Vec::new();
        let mut sql = if self.predicate.requires_ingredient_join() {
            String::from("SELECT COUNT(DISTINCT r.id)")
        } else {
            String::from("SELECT COUNT(*)")
        };

        self.push_from(&mut sql);
        sql.push_str(&self.predicate.build_where(&mut bind_params));

        (sql, bind_params)
    }
}
