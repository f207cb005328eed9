//! Per-request context injected by middleware.

#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Server-assigned id, returned to the client as `x-request-id`.
    pub request_id: String,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}
