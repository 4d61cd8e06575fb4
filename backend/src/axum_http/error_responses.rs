use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::usecases::{
    accounts::AccountError, admin::AdminError, subscription_plans::SubscriptionPlanError,
    subscriptions::SubscriptionError, trainer_catalog::TrainerCatalogError,
    trainer_directory::TrainerDirectoryError,
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Maps a use case status onto the taxonomy. 5xx statuses never carry their message.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => AppError::BadRequest(message),
            StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
            StatusCode::FORBIDDEN => AppError::Forbidden(message),
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            _ => AppError::Internal(anyhow::anyhow!(message)),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(format!("Validation error: {}", err))
    }
}

macro_rules! usecase_error_into_app_error {
    ($($usecase_error:ident),+ $(,)?) => {
        $(
            impl From<$usecase_error> for AppError {
                fn from(err: $usecase_error) -> Self {
                    match err {
                        $usecase_error::Internal(inner) => AppError::Internal(inner),
                        other => AppError::from_status(other.status_code(), other.to_string()),
                    }
                }
            }
        )+
    };
}

usecase_error_into_app_error!(
    AccountError,
    AdminError,
    SubscriptionPlanError,
    SubscriptionError,
    TrainerCatalogError,
    TrainerDirectoryError,
);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            AppError::Internal(err) => {
                // Detail stays in the logs.
                error!(error = ?err, "request failed with internal error");
                "Internal server error".to_string()
            }
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => msg,
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn client_errors_carry_only_the_message() {
        let response = AppError::NotFound("Trainer not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "message": "Trainer not found" }));
    }

    #[tokio::test]
    async fn internal_errors_hide_detail() {
        let response =
            AppError::Internal(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn usecase_errors_keep_status_and_message() {
        let err = AppError::from(SubscriptionError::DietPlanNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Diet plan not found");

        let err = AppError::from(AdminError::Internal(anyhow::anyhow!("pool timed out")));
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn from_status_maps_taxonomy() {
        assert!(matches!(
            AppError::from_status(StatusCode::FORBIDDEN, "no".to_string()),
            AppError::Forbidden(_)
        ));
        assert!(matches!(
            AppError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
            AppError::Internal(_)
        ));
    }
}
