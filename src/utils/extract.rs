//! Extractores que responden con `AppError`
//!
//! `Json` y `Query` de axum rechazan con texto plano; estos envoltorios
//! convierten el rechazo en un 422 con el mismo formato que el resto de
//! los errores de validación.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::utils::errors::{field_error, AppError};

/// Body JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

/// Query string
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| field_error("body", rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| field_error("query", rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{self, StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Range {
        desde: Option<chrono::NaiveDate>,
    }

    async fn query(uri: &str) -> Result<ApiQuery<Range>, AppError> {
        let request = http::Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (mut parts, _) = request.into_parts();
        ApiQuery::<Range>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_query_parses() {
        let ApiQuery(range) = query("/?desde=2024-03-01").await.unwrap();
        assert_eq!(range.desde, chrono::NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[tokio::test]
    async fn test_bad_query_is_a_validation_error() {
        let err = query("/?desde=ayer").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_bad_json_is_a_validation_error() {
        let request = http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{\"desde\": 3"))
            .unwrap();
        let err = ApiJson::<Range>::from_request(request, &()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
