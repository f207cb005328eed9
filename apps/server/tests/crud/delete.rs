//! DELETE operation tests (DELETE /v1/recipes/{id})

use crate::support::{
    assert_error_code, assert_status, create_recipe, page_titles, salad, seed_scenario,
    with_test_app,
};
use axum::http::{Method, StatusCode};

#[tokio::test]
async fn delete_removes_recipe() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let id = create_recipe(app, salad()).await?;
            let path = format!("/v1/recipes/{id}");

            let (status, body) = app.json(Method::DELETE, &path, None).await?;
            assert_status(status, StatusCode::NO_CONTENT, "delete");
            assert!(body.is_null());

            let (status, body) = app.json(Method::GET, &path, None).await?;
            assert_status(status, StatusCode::NOT_FOUND, "read after delete");
            assert_error_code(&body, 102);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn delete_twice_is_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let id = create_recipe(app, salad()).await?;
            let path = format!("/v1/recipes/{id}");

            app.json(Method::DELETE, &path, None).await?;
            let (status, body) = app.json(Method::DELETE, &path, None).await?;

            assert_status(status, StatusCode::NOT_FOUND, "second delete");
            assert_error_code(&body, 102);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn delete_cascades_ingredients_out_of_search() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let scenario = seed_scenario(app).await?;
            app.json(
                Method::DELETE,
                &format!("/v1/recipes/{}", scenario.salad),
                None,
            )
            .await?;

            let (_, page) = app
                .json(Method::GET, "/v1/recipes?includedIngredients=Lettuce", None)
                .await?;
            assert!(page_titles(&page)?.is_empty());

            Ok(())
        })
    })
    .await
}
