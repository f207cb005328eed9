#![allow(dead_code)]

pub mod assertions;

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use futures::FutureExt as _;
use recipebox::{
    api::create_router,
    config::StorageBackend,
    state::AppStateOptions,
    AppState, Config,
};
use serde_json::Value;
use sqlx::Connection as _;
use tower::ServiceExt as _;
use url::Url;
use uuid::Uuid;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;

/// Per-test PostgreSQL schema, dropped on cleanup.
struct TestSchema {
    name: String,
    admin_database_url: String,
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    schema: Option<TestSchema>,
}

impl TestApp {
    /// App backed by a fresh in-memory store.
    pub async fn new() -> anyhow::Result<Self> {
        Self::new_with_config(|_| {}).await
    }

    pub async fn new_with_config(configure: impl FnOnce(&mut Config)) -> anyhow::Result<Self> {
        let shared = shared::shared().await?;
        let mut config = shared.base_config.clone();
        configure(&mut config);
        config.storage.backend = StorageBackend::Memory;

        let state = AppState::new_with_options(
            config,
            AppStateOptions {
                storage: StorageBackend::Memory,
                init_schema: false,
            },
        )
        .await
        .context("initialize AppState")?;

        Ok(Self {
            router: create_router(state.clone()),
            state,
            schema: None,
        })
    }

    /// App backed by PostgreSQL in its own schema, or `None` when
    /// `database.test_database_url` is not configured.
    pub async fn postgres() -> anyhow::Result<Option<Self>> {
        let shared = shared::shared().await?;
        let mut config = shared.base_config.clone();
        let Some(admin_database_url) = config.database.test_database_url.clone() else {
            return Ok(None);
        };

        let name = format!("test_{}", Uuid::new_v4().simple());
        let mut admin_conn = sqlx::PgConnection::connect(&admin_database_url)
            .await
            .context("connect admin db for schema create")?;
        sqlx::query(&format!(r#"CREATE SCHEMA "{}""#, name))
            .execute(&mut admin_conn)
            .await
            .context("create test schema")?;

        config.database.url = with_search_path(&admin_database_url, &name)?;
        config.storage.backend = StorageBackend::Postgres;

        let state = AppState::new_with_options(
            config,
            AppStateOptions {
                storage: StorageBackend::Postgres,
                init_schema: true,
            },
        )
        .await
        .context("initialize AppState")?;

        Ok(Some(Self {
            router: create_router(state.clone()),
            state,
            schema: Some(TestSchema {
                name,
                admin_database_url,
            }),
        }))
    }

    pub async fn cleanup(self) -> anyhow::Result<()> {
        if let Some(pool) = &self.state.db_pool {
            pool.close().await;
        }

        if let Some(schema) = self.schema {
            let mut admin_conn = sqlx::PgConnection::connect(&schema.admin_database_url)
                .await
                .context("connect admin db for schema drop")?;
            sqlx::query(&format!(r#"DROP SCHEMA "{}" CASCADE"#, schema.name))
                .execute(&mut admin_conn)
                .await
                .context("drop test schema")?;
        }

        Ok(())
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        self.request_with_extra_headers(method, path_and_query, body, &[])
            .await
    }

    pub async fn request_with_extra_headers(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let body = match body {
            Some(value) => Body::from(serde_json::to_vec(&value).context("encode body")?),
            None => Body::empty(),
        };
        let mut request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("host", "example.org")
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .body(body)
            .context("build request")?;

        for (name, value) in extra_headers {
            request.headers_mut().insert(
                name.parse::<HeaderName>().context("parse header name")?,
                value.parse::<HeaderValue>().context("parse header value")?,
            );
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }

    /// Request and decode the JSON response body.
    pub async fn json(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let (status, _headers, bytes) = self.request(method, path_and_query, body).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .with_context(|| format!("decode JSON body: {}", String::from_utf8_lossy(&bytes)))?
        };
        Ok((status, value))
    }
}

async fn run_with_app<F>(app: TestApp, f: F) -> anyhow::Result<()>
where
    F: for<'a> FnOnce(
        &'a TestApp,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>,
    >,
{
    let result = std::panic::AssertUnwindSafe(f(&app)).catch_unwind().await;
    let cleanup_result = app.cleanup().await;

    if let Err(e) = cleanup_result {
        eprintln!("test cleanup failed: {e:?}");
    }

    match result {
        Ok(r) => r,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

pub async fn with_test_app<F>(f: F) -> anyhow::Result<()>
where
    F: for<'a> FnOnce(
        &'a TestApp,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>,
    >,
{
    with_test_app_with_config(|_| {}, f).await
}

pub async fn with_test_app_with_config<C, F>(configure: C, f: F) -> anyhow::Result<()>
where
    C: FnOnce(&mut Config),
    F: for<'a> FnOnce(
        &'a TestApp,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>,
    >,
{
    let app = TestApp::new_with_config(configure).await?;
    run_with_app(app, f).await
}

/// Run `f` against PostgreSQL; a no-op when no test database is configured.
pub async fn with_postgres_test_app<F>(f: F) -> anyhow::Result<()>
where
    F: for<'a> FnOnce(
        &'a TestApp,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>,
    >,
{
    match TestApp::postgres().await? {
        Some(app) => run_with_app(app, f).await,
        None => {
            eprintln!("database.test_database_url not set, skipping PostgreSQL test");
            Ok(())
        }
    }
}

fn with_search_path(database_url: &str, schema: &str) -> anyhow::Result<String> {
    let mut url = Url::parse(database_url).context("parse database URL")?;
    url.query_pairs_mut()
        .append_pair("options", &format!("-c search_path={}", schema));
    Ok(url.to_string())
}
