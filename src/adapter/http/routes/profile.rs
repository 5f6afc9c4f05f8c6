use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::extractor::AuthUser;
use crate::adapter::http::schema::pagination::OffsetQuery;
use crate::adapter::http::schema::profile::{
    ModifyProfileRequest, ProfileListResponse, ProfileResponse, UpsertProfileRequest,
};
use crate::adapter::http::validation::{ValidJson, ValidQuery};
use crate::application::app_error::AppResult;
use crate::application::dto::profile::{
    DeleteProfileDTO, GetProfileDTO, GetProfileListDTO, ModifyProfileDTO, UpsertProfileDTO,
};
use crate::application::interactors::profile::{
    DeleteProfileInteractor, GetProfileInteractor, GetProfileListInteractor, ModifyProfileInteractor,
    UpsertProfileInteractor,
};
use crate::infra::constants::{DEFAULT_LIMIT, DEFAULT_OFFSET};

#[utoipa::path(
    get,
    path = "/profile/",
    tag = "Profile",
    params(OffsetQuery),
    responses(
        (
            status = 200,
            description = "Profiles of the caller, oldest first",
            body = ProfileListResponse,
            example = json!(
                {
                    "items": [],
                    "total": 0,
                    "offset": 0,
                    "limit": 10
                }
            )
        ),
        (
            status = 400,
            description = "Malformed query string",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Failed to deserialize query string: limit: invalid digit found in string"
                }
            )
        ),
        (
            status = 401,
            description = "Missing or invalid access token",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Invalid token"
                }
            )
        )
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_profiles(
    auth_user: AuthUser,
    interactor: GetProfileListInteractor,
    ValidQuery(query): ValidQuery<OffsetQuery>,
) -> AppResult<impl IntoResponse> {
    let dto = GetProfileListDTO {
        user_id: auth_user.user_id,
        offset: query.offset.unwrap_or(DEFAULT_OFFSET),
        limit: query.limit.unwrap_or(DEFAULT_LIMIT),
    };
    let result = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileListResponse::from(result))))
}

#[utoipa::path(
    post,
    path = "/profile/",
    tag = "Profile",
    request_body(
        content = UpsertProfileRequest,
        example = json!(
            {
                "name": "backend-cv",
                "summary": "Backend engineer",
                "avatar": { "url": "https://cdn.example.com/avatars/jane.png" },
                "contacts": [{ "key": "phone", "value": "+62 811 0000 000" }],
                "experience": [
                    {
                        "company": "Acme",
                        "position": "Engineer",
                        "start_date": "2020-01-01"
                    }
                ],
                "skills": [{ "name": "Rust", "level": "advanced" }]
            }
        )
    ),
    responses(
        (
            status = 200,
            description = "Profile created, or replaced when the caller already has one with this name",
            body = ProfileResponse
        ),
        (
            status = 400,
            description = "Validation error or malformed entry id",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "name: Profile name must be 1-100 characters"
                }
            )
        ),
        (
            status = 401,
            description = "Missing or invalid access token",
            body = ErrorResponse
        )
    ),
    security(("bearerAuth" = []))
)]
pub async fn upsert_profile(
    auth_user: AuthUser,
    interactor: UpsertProfileInteractor,
    ValidJson(payload): ValidJson<UpsertProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = UpsertProfileDTO {
        user_id: auth_user.user_id,
        name: payload.name,
        summary: payload.summary,
        details: payload.details,
        entries: payload.entries.into(),
        avatar: payload.avatar.map(Into::into),
    };
    let result = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(result))))
}

#[utoipa::path(
    get,
    path = "/profile/{name}",
    tag = "Profile",
    params(("name" = String, Path, description = "Profile name, unique per user")),
    responses(
        (
            status = 200,
            description = "Profile with all of its entries",
            body = ProfileResponse
        ),
        (
            status = 401,
            description = "Missing or invalid access token",
            body = ErrorResponse
        ),
        (
            status = 404,
            description = "The caller has no profile with this name",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Profile not found"
                }
            )
        )
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_profile(
    auth_user: AuthUser,
    interactor: GetProfileInteractor,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let dto = GetProfileDTO {
        user_id: auth_user.user_id,
        name,
    };
    let result = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(result))))
}

#[utoipa::path(
    patch,
    path = "/profile/{id}",
    tag = "Profile",
    params(("id" = String, Path, description = "Profile id")),
    request_body(
        content = ModifyProfileRequest,
        example = json!(
            {
                "summary": "Staff engineer",
                "languages": [{ "language": "English", "level": "C1" }]
            }
        )
    ),
    responses(
        (
            status = 200,
            description = "Non-empty scalars overwritten and entries appended",
            body = ProfileResponse
        ),
        (
            status = 400,
            description = "Validation error or malformed id",
            body = ErrorResponse
        ),
        (
            status = 401,
            description = "Missing or invalid access token",
            body = ErrorResponse
        ),
        (
            status = 403,
            description = "Profile belongs to another user",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Forbidden"
                }
            )
        ),
        (
            status = 404,
            description = "Profile not found",
            body = ErrorResponse
        ),
        (
            status = 409,
            description = "Rename collides with another profile of the caller",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Profile already exists"
                }
            )
        )
    ),
    security(("bearerAuth" = []))
)]
pub async fn modify_profile(
    auth_user: AuthUser,
    interactor: ModifyProfileInteractor,
    Path(profile_id): Path<String>,
    ValidJson(payload): ValidJson<ModifyProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = ModifyProfileDTO {
        user_id: auth_user.user_id,
        profile_id,
        name: payload.name,
        summary: payload.summary,
        details: payload.details,
        entries: payload.entries.into(),
        avatar: payload.avatar.map(Into::into),
    };
    let result = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(result))))
}

#[utoipa::path(
    delete,
    path = "/profile/{id}",
    tag = "Profile",
    params(("id" = String, Path, description = "Profile id")),
    responses(
        (
            status = 204,
            description = "Profile and its entries deleted"
        ),
        (
            status = 401,
            description = "Missing or invalid access token",
            body = ErrorResponse
        ),
        (
            status = 403,
            description = "Profile belongs to another user",
            body = ErrorResponse
        ),
        (
            status = 404,
            description = "Profile not found",
            body = ErrorResponse
        )
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_profile(
    auth_user: AuthUser,
    interactor: DeleteProfileInteractor,
    Path(profile_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let dto = DeleteProfileDTO {
        user_id: auth_user.user_id,
        profile_id,
    };
    interactor.execute(dto).await?;
    Ok(StatusCode::NO_CONTENT)
}
