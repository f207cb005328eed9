//! Recipe search parameters

use chrono::{DateTime, Utc};

use crate::models::PageRequest;

/// The only ordering the search honours; any other `sort` value is accepted and ignored.
pub const DEFAULT_SORT: &str = "createdAt";

/// Filters, paging and presentation options for one recipe search.
///
/// Every filter is optional. `servings` never reaches the database: it only
/// scales the quantities of the returned ingredients.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilters {
    pub vegetarian: Option<bool>,
    /// Match recipes having at least one ingredient with one of these exact names.
    pub included_ingredients: Option<Vec<String>>,
    /// Match recipes having no ingredient with any of these exact names.
    pub excluded_ingredients: Option<Vec<String>>,
    /// Case-insensitive substring of the instructions.
    pub instruction: Option<String>,
    /// Inclusive lower bound on the creation timestamp.
    pub created_after: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the creation timestamp.
    pub created_before: Option<DateTime<Utc>>,
    pub page: PageRequest,
    pub sort: String,
    pub servings: i32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            vegetarian: None,
            included_ingredients: None,
            excluded_ingredients: None,
            instruction: None,
            created_after: None,
            created_before: None,
            page: PageRequest::default(),
            sort: DEFAULT_SORT.to_string(),
            servings: 1,
        }
    }
}

impl SearchFilters {
    pub fn vegetarian(mut self, vegetarian: bool) -> Self {
        self.vegetarian = Some(vegetarian);
        self
    }

    pub fn including<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.included_ingredients = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn excluding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_ingredients = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn instruction(mut self, text: impl Into<String>) -> Self {
        self.instruction = Some(text.into());
        self
    }

    pub fn created_between(
        mut self,
        after: Option<DateTime<Utc>>,
        before: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_after = after;
        self.created_before = before;
        self
    }

    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        self.page = PageRequest::new(page, page_size);
        self
    }

    pub fn servings(mut self, servings: i32) -> Self {
        self.servings = servings;
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    pub fn uses_default_sort(&self) -> bool {
        self.sort == DEFAULT_SORT
    }
}
