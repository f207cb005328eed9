//! READ operation tests (GET /v1/recipes/{id})

use crate::support::{
    assert_error_code, assert_status, create_recipe, ingredient_quantities, tropeiro_beans,
    with_test_app,
};
use axum::http::{Method, StatusCode};

#[tokio::test]
async fn read_returns_recipe_with_ingredients() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let id = create_recipe(app, tropeiro_beans()).await?;

            let (status, recipe) = app
                .json(Method::GET, &format!("/v1/recipes/{id}"), None)
                .await?;

            assert_status(status, StatusCode::OK, "read");
            assert_eq!(recipe["id"], id);
            assert_eq!(recipe["title"], "Tropeiro beans");
            assert_eq!(recipe["vegetarian"], true);
            assert!(recipe["description"].is_null());
            assert!(recipe["createdAt"].is_string());
            assert_eq!(
                ingredient_quantities(&recipe)?,
                vec![("bean".to_string(), 50), ("Cassava flour".to_string(), 80)]
            );
            assert_eq!(recipe["ingredients"][0]["unit"], "g");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn read_unknown_recipe_is_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.json(Method::GET, "/v1/recipes/4242", None).await?;

            assert_status(status, StatusCode::NOT_FOUND, "read missing");
            let fields = assert_error_code(&body, 102);
            assert!(fields.is_empty());

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn read_with_non_numeric_id_is_bad_request() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.json(Method::GET, "/v1/recipes/abc", None).await?;

            assert_status(status, StatusCode::BAD_REQUEST, "read bad id");
            assert_eq!(assert_error_code(&body, 101), vec!["id"]);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn responses_carry_request_id() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, headers, _) = app
                .request_with_extra_headers(
                    Method::GET,
                    "/v1/recipes",
                    None,
                    &[("x-request-id", "req-123")],
                )
                .await?;

            assert_status(status, StatusCode::OK, "search");
            let request_id = headers
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .expect("x-request-id header");
            assert!(uuid::Uuid::parse_str(request_id).is_ok());
            assert_eq!(
                headers.get("x-correlation-id").and_then(|v| v.to_str().ok()),
                Some("req-123")
            );

            Ok(())
        })
    })
    .await
}
