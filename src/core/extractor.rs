use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// Custom JSON extractor with the wire-compatible rejection body.
///
/// Any body that fails to parse into the target DTO answers
/// 400 `{"error": "Wrong data"}`, matching the original service.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppJsonRejection(rejection)),
        }
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        match self.0 {
            JsonRejection::JsonDataError(err) => {
                tracing::debug!("Invalid JSON data: {}", err);
            }
            JsonRejection::JsonSyntaxError(err) => {
                tracing::debug!("Invalid JSON syntax: {}", err);
            }
            other => {
                tracing::debug!("Failed to parse JSON body: {}", other);
            }
        }

        AppError::BadRequest("Wrong data".to_string()).into_response()
    }
}
