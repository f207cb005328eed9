//! Recipe CRUD endpoint tests (POST/GET/PUT/DELETE /v1/recipes)

#[path = "../support/mod.rs"]
mod support;

mod delete;
mod read;
