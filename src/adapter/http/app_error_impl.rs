use crate::application::app_error::AppError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidId(_)
            | AppError::InvalidAuthProvider(_)
            | AppError::ValidationError(_)
            | AppError::JsonRejection(_)
            | AppError::QueryRejection(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::ProfileNotFound => StatusCode::NOT_FOUND,
            AppError::ProfileAlreadyExists | AppError::UserAlreadyExists => StatusCode::CONFLICT,
            AppError::IdentityProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseError(_) | AppError::TokenEncodingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details stay in the logs.
        let message = match &self {
            AppError::DatabaseError(_) | AppError::TokenEncodingError(_) | AppError::IdentityProviderUnavailable(_) => {
                error!("{}", self);
                None
            }
            _ => Some(self.to_string()),
        };

        let message = match message {
            Some(msg) => msg,
            None => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use rstest::rstest;
    use serde_json::Value;

    use crate::application::app_error::AppError;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[rstest]
    #[case(AppError::InvalidToken, StatusCode::UNAUTHORIZED, "Invalid token")]
    #[case(AppError::ProfileNotFound, StatusCode::NOT_FOUND, "Profile not found")]
    #[case(AppError::AccessDenied, StatusCode::FORBIDDEN, "Forbidden")]
    #[case(AppError::ProfileAlreadyExists, StatusCode::CONFLICT, "Profile already exists")]
    #[case(AppError::UserAlreadyExists, StatusCode::CONFLICT, "User already exists")]
    #[case(AppError::InvalidAuthProvider("github".to_string()), StatusCode::BAD_REQUEST, "Unsupported auth provider: github")]
    #[case(AppError::TokenEncodingError("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")]
    #[case(AppError::IdentityProviderUnavailable("timeout".to_string()), StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")]
    #[tokio::test]
    async fn test_error_rendering(#[case] err: AppError, #[case] status: StatusCode, #[case] message: &str) {
        let (actual_status, body) = render(err).await;
        assert_eq!(actual_status, status);
        assert_eq!(body["error"], message);
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let (status, body) = render(AppError::DatabaseError(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
    }
}
