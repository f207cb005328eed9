//! Security headers middleware

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Headers set on every JSON API response.
const API_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("content-security-policy", "default-src 'none'"),
    ("cache-control", "no-store"),
];

fn is_https(headers: &HeaderMap, scheme: Option<&str>) -> bool {
    let forwarded = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("https"));
    forwarded || scheme.is_some_and(|s| s.eq_ignore_ascii_case("https"))
}

/// Adds baseline security headers; HSTS only when HTTPS is used or terminated upstream.
pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let https = is_https(req.headers(), req.uri().scheme_str());

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in API_HEADERS {
        headers.insert(*name, HeaderValue::from_static(*value));
    }
    if https {
        headers.insert(
            "strict-transport-security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}
