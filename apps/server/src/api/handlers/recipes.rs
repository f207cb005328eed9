//! Recipe CRUD and search handlers

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    api::{
        dto::{RecipeIdResponse, RecipeRequest, RecipeResponse},
        extractors::ValidatedJson,
        search_query::parse_search_query,
    },
    models::Page,
    request_context::RequestContext,
    state::AppState,
    Error, Result,
};

/// Recipe ids arrive as raw path segments so a malformed id maps to `INVALID_DATA`.
fn parse_recipe_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| Error::invalid_field("id", format!("Invalid recipe id: {raw}")))
}

/// Create a recipe
///
/// POST /v1/recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    ValidatedJson(request): ValidatedJson<RecipeRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!(request_id = %ctx.request_id, title = %request.title, "Received request to create recipe");

    let title = request.title.clone();
    let id = state.recipe_service.create(request.into()).await?;

    tracing::info!(request_id = %ctx.request_id, %title, id, "Recipe successfully created");
    Ok((StatusCode::CREATED, Json(RecipeIdResponse { id })))
}

/// Replace a recipe
///
/// PUT /v1/recipes/{id}
pub async fn update_recipe(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(raw_id): Path<String>,
    ValidatedJson(request): ValidatedJson<RecipeRequest>,
) -> Result<Json<RecipeResponse>> {
    let id = parse_recipe_id(&raw_id)?;
    tracing::info!(request_id = %ctx.request_id, id, "Received request to update recipe");

    let updated = state.recipe_service.update(id, request.into()).await?;

    tracing::info!(request_id = %ctx.request_id, id, "Recipe successfully updated");
    Ok(Json(RecipeResponse::from(updated)))
}

/// Delete a recipe
///
/// DELETE /v1/recipes/{id}
pub async fn delete_recipe(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_recipe_id(&raw_id)?;
    tracing::info!(request_id = %ctx.request_id, id, "Received request to delete recipe");

    state.recipe_service.delete_by_id(id).await?;

    tracing::info!(request_id = %ctx.request_id, id, "Recipe successfully deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/recipes/{id}
pub async fn get_recipe(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(raw_id): Path<String>,
) -> Result<Json<RecipeResponse>> {
    let id = parse_recipe_id(&raw_id)?;
    tracing::info!(request_id = %ctx.request_id, id, "Received request to find recipe");

    let recipe = state.recipe_service.find_by_id(id).await?;

    tracing::info!(request_id = %ctx.request_id, id, "Recipe successfully found");
    Ok(Json(RecipeResponse::from(recipe)))
}

/// Search recipes
///
/// GET /v1/recipes?vegetarian=&servings=&includedIngredients=&excludedIngredients=
///     &instruction=&createdAfter=&createdBefore=&page=&pageSize=&sort=
pub async fn search_recipes(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    RawQuery(query): RawQuery,
) -> Result<Json<Page<RecipeResponse>>> {
    let filters = parse_search_query(query.as_deref(), state.config.search.default_page_size)?;

    tracing::info!(
        request_id = %ctx.request_id,
        vegetarian = ?filters.vegetarian,
        servings = filters.servings,
        included = ?filters.included_ingredients,
        excluded = ?filters.excluded_ingredients,
        instruction = ?filters.instruction,
        created_after = ?filters.created_after,
        created_before = ?filters.created_before,
        "Received request to search recipes"
    );

    let page = state.recipe_service.search(&filters).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        total = page.total_elements,
        returned = page.number_of_elements,
        "Returning recipe page"
    );
    Ok(Json(page.map(RecipeResponse::from)))
}
