use axum::extract::rejection::{JsonRejection, QueryRejection};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unsupported auth provider: {0}")]
    InvalidAuthProvider(String),

    #[error("Identity provider unavailable: {0}")]
    IdentityProviderUnavailable(String),

    #[error("Failed to sign token: {0}")]
    TokenEncodingError(String),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Profile already exists")]
    ProfileAlreadyExists,

    #[error("Forbidden")]
    AccessDenied,

    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),

    #[error(transparent)]
    ValidationError(#[from] validator::ValidationErrors),

    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    #[error(transparent)]
    QueryRejection(#[from] QueryRejection),
}

pub type AppResult<T> = Result<T, AppError>;
