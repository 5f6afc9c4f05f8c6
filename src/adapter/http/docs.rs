use axum::{response::Html, Json};
use utoipa::{
    openapi::{
        security::{Http, HttpAuthScheme, SecurityScheme},
        OpenApi as OpenApiDoc,
    }, Modify,
    OpenApi,
};

use crate::adapter::http::{
    app_error_impl::ErrorResponse,
    routes::{auth, profile},
    schema::{
        auth::{EmptyResponse, RefreshRequest, SignInRequest, TokenResponse},
        profile::{
            AvatarSchema, ContactSchema, EducationSchema, EntriesRequest, ExperienceSchema, LanguageSchema,
            ModifyProfileRequest, ProfileListResponse, ProfileResponse, SkillSchema, UpsertProfileRequest,
        },
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        if let Some(components) = openapi.components.as_mut() {
            let mut bearer = Http::new(HttpAuthScheme::Bearer);
            bearer.bearer_format = Some("JWT".to_string());
            components.add_security_scheme("bearerAuth", SecurityScheme::Http(bearer));
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    paths(
        auth::sign_in,
        auth::refresh,
        auth::logout,
        profile::get_profiles,
        profile::upsert_profile,
        profile::get_profile,
        profile::modify_profile,
        profile::delete_profile
    ),
    components(
        schemas(
            ErrorResponse,
            SignInRequest,
            RefreshRequest,
            TokenResponse,
            EmptyResponse,
            ContactSchema,
            EducationSchema,
            ExperienceSchema,
            LanguageSchema,
            SkillSchema,
            AvatarSchema,
            EntriesRequest,
            UpsertProfileRequest,
            ModifyProfileRequest,
            ProfileResponse,
            ProfileListResponse
        )
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<OpenApiDoc> {
    Json(ApiDoc::openapi())
}

pub async fn docs_ui() -> Html<&'static str> {
    Html(
        r#"
            <!doctype html>
            <html>
              <head>
                <title>Profile API</title>
                <meta charset="utf-8">
                <meta name="viewport" content="width=device-width, initial-scale=1">
                <script src="https://unpkg.com/@stoplight/elements/web-components.min.js"></script>
                <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements/styles.min.css">
              </head>
              <body style="height: 100%; margin: 0;">
                <elements-api
                  apiDescriptionUrl="openapi.json"
                  basePath="/"
                  router="hash"
                />
              </body>
            </html>
        "#,
    )
}
