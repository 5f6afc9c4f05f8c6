use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::dto::auth::AuthTokensDTO;

fn default_auth_provider() -> String {
    "google".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    /// ID token issued by the identity provider.
    #[validate(length(min = 1, message = "Credential must not be empty"))]
    pub credential: String,
    #[serde(default = "default_auth_provider")]
    #[schema(default = "google", example = "google")]
    pub auth_provider: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token must not be empty"))]
    pub refresh_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub nik: Option<String>,
}

impl From<AuthTokensDTO> for TokenResponse {
    fn from(dto: AuthTokensDTO) -> Self {
        Self {
            access_token: dto.access_token,
            refresh_token: dto.refresh_token,
            nik: dto.nik,
        }
    }
}

/// Serialized as `{}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmptyResponse {}
