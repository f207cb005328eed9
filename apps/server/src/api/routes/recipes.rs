//! Recipe API routes

use crate::api::handlers::recipes;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/recipes",
            get(recipes::search_recipes).post(recipes::create_recipe),
        )
        .route(
            "/v1/recipes/:id",
            get(recipes::get_recipe)
                .put(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
}
