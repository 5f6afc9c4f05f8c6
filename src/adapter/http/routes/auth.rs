use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::schema::auth::{EmptyResponse, RefreshRequest, SignInRequest, TokenResponse};
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::AppResult;
use crate::application::dto::auth::{RefreshDTO, SignInDTO};
use crate::application::interactors::auth::{RefreshInteractor, SignInInteractor};

#[utoipa::path(
    post,
    path = "/sign-in",
    tag = "Auth",
    request_body(
        content = SignInRequest,
        example = json!(
            {
                "credential": "eyJhbGciOiJSUzI1NiIsImtpZCI6IjFmNDA...",
                "auth_provider": "google"
            }
        )
    ),
    responses(
        (
            status = 200,
            description = "Signed in. A first sign-in also creates the user, a default profile and an email contact",
            body = TokenResponse,
            example = json!(
                {
                    "access_token": "eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzI1NiJ9...",
                    "refresh_token": "eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzI1NiJ9...",
                    "nik": null
                }
            )
        ),
        (
            status = 400,
            description = "Unsupported auth provider or malformed body",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Unsupported auth provider: github"
                }
            )
        ),
        (
            status = 401,
            description = "Identity token rejected",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Invalid token"
                }
            )
        ),
        (
            status = 503,
            description = "Identity provider keys could not be fetched",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Service Unavailable"
                }
            )
        )
    )
)]
pub async fn sign_in(
    interactor: SignInInteractor,
    ValidJson(payload): ValidJson<SignInRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = SignInDTO {
        credential: payload.credential,
        auth_provider: payload.auth_provider,
    };
    let tokens = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(TokenResponse::from(tokens))))
}

#[utoipa::path(
    post,
    path = "/refresh",
    tag = "Auth",
    request_body(
        content = RefreshRequest,
        example = json!(
            {
                "refresh_token": "eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzI1NiJ9..."
            }
        )
    ),
    responses(
        (
            status = 200,
            description = "New token pair",
            body = TokenResponse
        ),
        (
            status = 401,
            description = "Refresh token invalid, expired, or its user is gone",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Invalid token"
                }
            )
        )
    )
)]
pub async fn refresh(
    interactor: RefreshInteractor,
    ValidJson(payload): ValidJson<RefreshRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = RefreshDTO {
        refresh_token: payload.refresh_token,
    };
    let tokens = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(TokenResponse::from(tokens))))
}

/// Tokens are stateless, so there is nothing to revoke.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    responses(
        (
            status = 200,
            description = "Always succeeds",
            body = EmptyResponse,
            example = json!({})
        )
    )
)]
pub async fn logout() -> impl IntoResponse {
    (StatusCode::OK, Json(EmptyResponse {}))
}
