use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use sqlx::{Pool, Postgres};

use crate::adapter::db::gateway::avatar::AvatarGateway;
use crate::adapter::db::gateway::entry::{EntryGateway, entry_gateways};
use crate::adapter::db::gateway::profile::ProfileGateway;
use crate::adapter::db::gateway::user::UserGateway;
use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interactors::auth::{AuthenticateInteractor, RefreshInteractor, SignInInteractor};
use crate::application::interactors::profile::{
    DeleteProfileInteractor, GetProfileInteractor, GetProfileListInteractor, ModifyProfileInteractor,
    ProfileAggregate, UpsertProfileInteractor,
};
use crate::application::interface::identity::IdentityVerifier;
use crate::application::interface::token::TokenIssuer;
use crate::domain::entities::entry::ContactData;
use crate::infra::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: Pool<Postgres>,
    pub config: Arc<AppConfig>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub identity_verifier: Arc<dyn IdentityVerifier>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

#[async_trait]
pub trait FromAppState: Sized {
    async fn from_app_state(state: &AppState) -> AppResult<Self>;
}

fn profile_aggregate(session: &SqlxSession) -> ProfileAggregate {
    ProfileAggregate::new(entry_gateways(session), Arc::new(AvatarGateway::new(session.clone())))
}

// SignInInteractor
#[async_trait]
impl FromAppState for SignInInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let user_gateway = UserGateway::new(session.clone());

        Ok(SignInInteractor::new(
            Arc::new(session.clone()),
            state.identity_verifier.clone(),
            Arc::new(user_gateway.clone()),
            Arc::new(user_gateway),
            Arc::new(ProfileGateway::new(session.clone())),
            Arc::new(EntryGateway::<ContactData>::new(session)),
            state.token_issuer.clone(),
        ))
    }
}

impl<S> FromRequestParts<S> for SignInInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        SignInInteractor::from_app_state(&app_state).await
    }
}

// RefreshInteractor
#[async_trait]
impl FromAppState for RefreshInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());

        Ok(RefreshInteractor::new(
            Arc::new(UserGateway::new(session)),
            state.token_issuer.clone(),
        ))
    }
}

impl<S> FromRequestParts<S> for RefreshInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        RefreshInteractor::from_app_state(&app_state).await
    }
}

// AuthenticateInteractor
#[async_trait]
impl FromAppState for AuthenticateInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());

        Ok(AuthenticateInteractor::new(
            Arc::new(UserGateway::new(session)),
            state.token_issuer.clone(),
        ))
    }
}

impl<S> FromRequestParts<S> for AuthenticateInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        AuthenticateInteractor::from_app_state(&app_state).await
    }
}

// GetProfileInteractor
#[async_trait]
impl FromAppState for GetProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());

        Ok(GetProfileInteractor::new(
            Arc::new(ProfileGateway::new(session.clone())),
            profile_aggregate(&session),
        ))
    }
}

impl<S> FromRequestParts<S> for GetProfileInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        GetProfileInteractor::from_app_state(&app_state).await
    }
}

// GetProfileListInteractor
#[async_trait]
impl FromAppState for GetProfileListInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());

        Ok(GetProfileListInteractor::new(
            Arc::new(ProfileGateway::new(session.clone())),
            profile_aggregate(&session),
        ))
    }
}

impl<S> FromRequestParts<S> for GetProfileListInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        GetProfileListInteractor::from_app_state(&app_state).await
    }
}

// UpsertProfileInteractor
#[async_trait]
impl FromAppState for UpsertProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let profile_gateway = ProfileGateway::new(session.clone());

        Ok(UpsertProfileInteractor::new(
            Arc::new(session.clone()),
            Arc::new(profile_gateway.clone()),
            Arc::new(profile_gateway),
            profile_aggregate(&session),
        ))
    }
}

impl<S> FromRequestParts<S> for UpsertProfileInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        UpsertProfileInteractor::from_app_state(&app_state).await
    }
}

// ModifyProfileInteractor
#[async_trait]
impl FromAppState for ModifyProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let profile_gateway = ProfileGateway::new(session.clone());

        Ok(ModifyProfileInteractor::new(
            Arc::new(session.clone()),
            Arc::new(profile_gateway.clone()),
            Arc::new(profile_gateway),
            profile_aggregate(&session),
        ))
    }
}

impl<S> FromRequestParts<S> for ModifyProfileInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        ModifyProfileInteractor::from_app_state(&app_state).await
    }
}

// DeleteProfileInteractor
#[async_trait]
impl FromAppState for DeleteProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let profile_gateway = ProfileGateway::new(session.clone());

        Ok(DeleteProfileInteractor::new(
            Arc::new(session),
            Arc::new(profile_gateway.clone()),
            Arc::new(profile_gateway),
        ))
    }
}

impl<S> FromRequestParts<S> for DeleteProfileInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        DeleteProfileInteractor::from_app_state(&app_state).await
    }
}
