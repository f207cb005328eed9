//! Recipe search - filters, predicate, SQL building and execution

pub mod engine;
mod execute;
pub mod params;
pub mod predicate;
pub mod query_builder;

pub use engine::SearchEngine;
pub use params::SearchFilters;
pub use predicate::{RecipeCondition, RecipePredicate};
