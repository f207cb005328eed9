//! Recipe search tests (GET /v1/recipes)

#[path = "../support/mod.rs"]
mod support;

mod filters;
