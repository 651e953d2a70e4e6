//! Extractors that report malformed input through `AppError`.
//!
//! axum's own `Form` and `Query` reject with plain-text bodies; these wrap
//! them so request-format failures share the service's JSON error shape.

use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Form,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;

/// Form-encoded body; a missing or mistyped field is a 422.
pub struct FormInput<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for FormInput<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::UnprocessableEntity(e.body_text()))?;

        Ok(FormInput(value))
    }
}

/// Query string parameters; a missing or mistyped parameter is a 422.
pub struct QueryInput<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for QueryInput<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::UnprocessableEntity(e.body_text()))?;

        Ok(QueryInput(value))
    }
}
