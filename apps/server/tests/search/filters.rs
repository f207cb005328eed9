//! Filter tests over the Feijoada / Salad / Tropeiro beans scenario
//!
//! Tests cover:
//! - vegetarian flag
//! - included and excluded ingredient names (exact, case-sensitive)
//! - instruction substring (case-insensitive, literal)
//! - creation date range (inclusive)

use crate::support::{
    assert_error_code, assert_status, create_recipe, page_titles, seed_scenario, sorted_titles,
    total_elements, with_test_app, RecipeBuilder,
};
use axum::http::{Method, StatusCode};
use chrono::{Duration, SecondsFormat, Utc};

#[tokio::test]
async fn no_filters_return_everything() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_scenario(app).await?;

            let (status, page) = app.json(Method::GET, "/v1/recipes", None).await?;

            assert_status(status, StatusCode::OK, "search");
            assert_eq!(total_elements(&page)?, 3);
            assert_eq!(
                sorted_titles(&page)?,
                vec!["Feijoada", "Salad", "Tropeiro beans"]
            );

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn vegetarian_with_included_ingredient() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_scenario(app).await?;

            let (_, page) = app
                .json(
                    Method::GET,
                    "/v1/recipes?vegetarian=true&includedIngredients=bean",
                    None,
                )
                .await?;

            assert_eq!(page_titles(&page)?, vec!["Tropeiro beans"]);
            assert_eq!(total_elements(&page)?, 1);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn vegetarian_false_keeps_only_non_vegetarian() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_scenario(app).await?;

            let (_, page) = app
                .json(Method::GET, "/v1/recipes?vegetarian=false", None)
                .await?;

            assert_eq!(sorted_titles(&page)?, vec!["Feijoada", "Salad"]);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn ingredient_names_match_case_sensitively() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_scenario(app).await?;

            let (_, page) = app
                .json(Method::GET, "/v1/recipes?includedIngredients=Bean", None)
                .await?;

            assert_eq!(page_titles(&page)?, vec!["Feijoada"]);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn included_ingredients_match_any_without_duplicates() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_scenario(app).await?;

            // Feijoada has both names and must appear once.
            let (_, page) = app
                .json(
                    Method::GET,
                    "/v1/recipes?includedIngredients=Bean,Milk&includedIngredients=Tomato",
                    None,
                )
                .await?;

            assert_eq!(sorted_titles(&page)?, vec!["Feijoada", "Salad"]);
            assert_eq!(total_elements(&page)?, 2);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn instruction_substring_is_case_insensitive() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_scenario(app).await?;

            for query in ["instruction=mix", "instruction=MIX"] {
                let (_, page) = app
                    .json(Method::GET, &format!("/v1/recipes?{query}"), None)
                    .await?;
                assert_eq!(page_titles(&page)?, vec!["Tropeiro beans"], "{query}");
            }

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn instruction_wildcards_are_literal() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_scenario(app).await?;
            create_recipe(
                app,
                RecipeBuilder::new("Lemonade")
                    .instructions("Use 100% lemon juice")
                    .ingredient("Lemon", 3, "unit")
                    .build(),
            )
            .await?;

            let (_, page) = app
                .json(Method::GET, "/v1/recipes?instruction=%25", None)
                .await?;
            assert_eq!(page_titles(&page)?, vec!["Lemonade"]);

            let (_, page) = app
                .json(Method::GET, "/v1/recipes?instruction=c_ok", None)
                .await?;
            assert!(page_titles(&page)?.is_empty());

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn excluded_ingredient_removes_recipes_containing_it() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_scenario(app).await?;

            let (_, page) = app
                .json(Method::GET, "/v1/recipes?excludedIngredients=Lettuce", None)
                .await?;

            assert_eq!(sorted_titles(&page)?, vec!["Feijoada", "Tropeiro beans"]);
            assert_eq!(total_elements(&page)?, 2);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn included_and_excluded_combine() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_scenario(app).await?;

            let (_, page) = app
                .json(
                    Method::GET,
                    "/v1/recipes?includedIngredients=Bean,bean&excludedIngredients=Milk",
                    None,
                )
                .await?;

            assert_eq!(page_titles(&page)?, vec!["Tropeiro beans"]);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn creation_range_is_inclusive() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_scenario(app).await?;
            let now = Utc::now();
            let after = (now - Duration::days(2)).to_rfc3339_opts(SecondsFormat::Secs, true);
            let before = (now + Duration::days(2)).to_rfc3339_opts(SecondsFormat::Secs, true);

            let (_, page) = app
                .json(
                    Method::GET,
                    &format!("/v1/recipes?createdAfter={after}&createdBefore={before}"),
                    None,
                )
                .await?;
            assert_eq!(total_elements(&page)?, 3);

            let (_, page) = app
                .json(
                    Method::GET,
                    &format!("/v1/recipes?createdBefore={after}"),
                    None,
                )
                .await?;
            assert_eq!(total_elements(&page)?, 0);
            assert_eq!(page["empty"], true);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn malformed_filter_is_bad_request() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app
                .json(Method::GET, "/v1/recipes?createdAfter=yesterday", None)
                .await?;

            assert_status(status, StatusCode::BAD_REQUEST, "bad date");
            assert_eq!(assert_error_code(&body, 101), vec!["createdAfter"]);

            Ok(())
        })
    })
    .await
}
