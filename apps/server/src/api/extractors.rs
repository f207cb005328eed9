//! Custom Axum extractors for recipe request bodies.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::Error;

/// JSON body that is deserialized and then validated.
///
/// Unreadable or mistyped bodies fail with `InvalidRequest`; constraint
/// violations fail with per-field `Validation` errors. Both render as
/// `INVALID_DATA`.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

        value.validate()?;
        Ok(Self(value))
    }
}
