//! Recipe search predicate.
//!
//! A [`RecipePredicate`] is the conjunction of independent [`RecipeCondition`]s,
//! one per supplied filter. The same value renders the WHERE clause of both the
//! page query and the count query, and can be evaluated directly against a
//! recipe and its ingredients by embedded stores.
//!
//! Ingredient names compare exactly (case-sensitive) while the instruction
//! filter is case-insensitive.

use chrono::{DateTime, Utc};

use super::params::SearchFilters;
use super::query_builder::bind::{push_bool, push_text, push_text_array, push_timestamp};
use super::query_builder::BindValue;
use crate::models::{Ingredient, Recipe};

/// Alias of the recipe relation in generated SQL.
pub(crate) const RECIPE_ALIAS: &str = "r";
/// Alias of the ingredient relation joined for the included-ingredients filter.
pub(crate) const JOINED_INGREDIENT_ALIAS: &str = "i";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeCondition {
    Vegetarian(bool),
    /// Lower-cased needle matched against the lower-cased instructions.
    InstructionContains(String),
    CreatedAtOrAfter(DateTime<Utc>),
    CreatedAtOrBefore(DateTime<Utc>),
    /// At least one ingredient named exactly one of these.
    HasAnyIngredient(Vec<String>),
    /// No ingredient named exactly any of these.
    HasNoIngredient(Vec<String>),
}

impl RecipeCondition {
    pub(crate) fn build_sql(&self, bind_params: &mut Vec<BindValue>) -> String {
        let r = RECIPE_ALIAS;
        match self {
            Self::Vegetarian(v) => {
                let idx = push_bool(bind_params, *v);
                format!("{r}.is_vegetarian = ${idx}")
            }
            Self::InstructionContains(needle) => {
                let idx = push_text(bind_params, needle.clone());
                format!("STRPOS(LOWER({r}.instructions), ${idx}) > 0")
            }
            Self::CreatedAtOrAfter(ts) => {
                let idx = push_timestamp(bind_params, *ts);
                format!("{r}.created_at >= ${idx}")
            }
            Self::CreatedAtOrBefore(ts) => {
                let idx = push_timestamp(bind_params, *ts);
                format!("{r}.created_at <= ${idx}")
            }
            Self::HasAnyIngredient(names) => {
                let idx = push_text_array(bind_params, names.clone());
                format!("{JOINED_INGREDIENT_ALIAS}.name = ANY(${idx})")
            }
            Self::HasNoIngredient(names) => {
                let idx = push_text_array(bind_params, names.clone());
                format!(
                    "NOT EXISTS (SELECT 1 FROM ingredient x WHERE x.recipe_id = {r}.id AND x.name = ANY(${idx}))"
                )
            }
        }
    }

    /// Evaluate against one recipe and its own ingredient rows.
    ///
    /// Case folding uses Unicode default lower-casing, while PostgreSQL
    /// `LOWER()` follows the database collation. The two agree on ASCII but
    /// may differ for characters such as `İ`.
    pub fn matches(&self, recipe: &Recipe, ingredients: &[&Ingredient]) -> bool {
        match self {
            Self::Vegetarian(v) => recipe.vegetarian == *v,
            Self::InstructionContains(needle) => {
                recipe.instructions.to_lowercase().contains(needle.as_str())
            }
            Self::CreatedAtOrAfter(ts) => recipe.created_at >= *ts,
            Self::CreatedAtOrBefore(ts) => recipe.created_at <= *ts,
            Self::HasAnyIngredient(names) => ingredients.iter().any(|i| names.contains(&i.name)),
            Self::HasNoIngredient(names) => !ingredients.iter().any(|i| names.contains(&i.name)),
        }
    }

    /// Whether rendering this condition needs the ingredient join in the FROM clause.
    pub fn requires_ingredient_join(&self) -> bool {
        matches!(self, Self::HasAnyIngredient(_))
    }
}

/// Conjunction of recipe conditions. Empty means "match everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipePredicate {
    conditions: Vec<RecipeCondition>,
}

impl RecipePredicate {
    pub fn unconditional() -> Self {
        Self::default()
    }

    pub fn from_filters(filters: &SearchFilters) -> Self {
        let mut predicate = Self::unconditional();

        if let Some(v) = filters.vegetarian {
            predicate = predicate.and(RecipeCondition::Vegetarian(v));
        }

        if let Some(text) = filters.instruction.as_deref() {
            if !text.trim().is_empty() {
                predicate = predicate.and(RecipeCondition::InstructionContains(text.to_lowercase()));
            }
        }

        if let Some(ts) = filters.created_after {
            predicate = predicate.and(RecipeCondition::CreatedAtOrAfter(ts));
        }

        if let Some(ts) = filters.created_before {
            predicate = predicate.and(RecipeCondition::CreatedAtOrBefore(ts));
        }

        if let Some(names) = filters.included_ingredients.as_ref().filter(|n| !n.is_empty()) {
            predicate = predicate.and(RecipeCondition::HasAnyIngredient(names.clone()));
        }

        if let Some(names) = filters.excluded_ingredients.as_ref().filter(|n| !n.is_empty()) {
            predicate = predicate.and(RecipeCondition::HasNoIngredient(names.clone()));
        }

        predicate
    }

    pub fn and(mut self, condition: RecipeCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[RecipeCondition] {
        &self.conditions
    }

    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn requires_ingredient_join(&self) -> bool {
        self.conditions
            .iter()
            .any(RecipeCondition::requires_ingredient_join)
    }

    /// Render the WHERE clause (including the keyword), or an empty string when unconditional.
    pub(crate) fn build_where(&self, bind_params: &mut Vec<BindValue>) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }

        let clauses: Vec<String> = self
            .conditions
            .iter()
            .map(|c| c.build_sql(bind_params))
            .collect();

        format!(" WHERE {}", clauses.join(" AND "))
    }

    /// Evaluate in memory against `recipe` and its own ingredient rows.
    pub fn matches(&self, recipe: &Recipe, ingredients: &[&Ingredient]) -> bool {
        self.conditions
            .iter()
            .all(|c| c.matches(recipe, ingredients))
    }
}
