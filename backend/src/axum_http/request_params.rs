use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error_responses::AppError;

/// Single `:id` path segment parsed as a UUID. Malformed ids answer 400.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state).await?;
        Ok(PathId(id))
    }
}

/// Query string extractor whose rejections use the `{"message"}` body.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(inner) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(QueryParams(inner))
    }
}
