use axum::{
    Json, async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::error_responses::AppError;

/// JSON body extractor that rejects malformed, unknown-field and invalid
/// payloads with a 400 before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(AppError::from)?;
        inner.validate()?;
        Ok(ValidatedJson(inner))
    }
}
