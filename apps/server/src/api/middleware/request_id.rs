//! Request ID middleware with OpenTelemetry trace context injection

use axum::{
    extract::Request,
    http::{HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use opentelemetry::trace::TraceContextExt;
use std::time::Instant;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use uuid::Uuid;

use crate::request_context::RequestContext;

/// Name of the recipe operation a request maps to, for span and log fields.
fn recipe_operation(method: &Method, path: &str) -> Option<&'static str> {
    let rest = path.strip_prefix("/v1/recipes")?;
    let rest = rest.trim_end_matches('/');

    match (method, rest.is_empty()) {
        (&Method::GET, true) => Some("search"),
        (&Method::POST, true) => Some("create"),
        (&Method::GET, false) => Some("read"),
        (&Method::PUT, false) => Some("update"),
        (&Method::DELETE, false) => Some("delete"),
        _ => None,
    }
}

/// Creates the root span of every HTTP request.
///
/// The server always assigns a fresh `x-request-id`. A client-supplied id that
/// differs is echoed back as `x-correlation-id`, and the OpenTelemetry trace
/// id is exposed as `x-trace-id`.
#[tracing::instrument(
    name = "http_request",
    skip_all,
    fields(
        http.method = %req.method(),
        http.route = %req.uri().path(),
        otel.kind = "server",
        http.response.status_code = tracing::field::Empty,
        recipe.operation = tracing::field::Empty,
        request_id = tracing::field::Empty,
    )
)]
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let span = Span::current();
    let start = Instant::now();

    let client_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let ctx = RequestContext::new(Uuid::new_v4().to_string());
    span.record("request_id", ctx.request_id.as_str());

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    if let Some(operation) = recipe_operation(&method, &path) {
        span.record("recipe.operation", operation);
    }

    req.extensions_mut().insert(ctx.clone());
    tracing::debug!(method = %method, path = %path, "Incoming request");

    let mut response = next.run(req).await;

    let status = response.status();
    span.record("http.response.status_code", status.as_u16());
    tracing::info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = start.elapsed().as_millis(),
        request_id = %ctx.request_id,
        "Request completed"
    );

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&ctx.request_id) {
        headers.insert("x-request-id", value);
    }

    let trace_id = span.context().span().span_context().trace_id().to_string();
    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        headers.insert("x-trace-id", value);
    }

    if let Some(client_id) = client_id.filter(|id| *id != ctx.request_id) {
        if let Ok(value) = HeaderValue::from_str(&client_id) {
            headers.insert("x-correlation-id", value);
        }
    }

    response
}
