use std::sync::Arc;

use crate::adapter::crypto::jwt::JwtTokenIssuer;
use crate::adapter::identity::google::GoogleIdentityVerifier;
use crate::infra::config::AppConfig;
use crate::infra::db::init_db;
use crate::infra::state::AppState;

pub mod app;
pub mod config;
pub mod constants;
pub mod db;
pub mod setup;
pub mod state;

pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = init_db(config).await?;
    let token_issuer = JwtTokenIssuer::new(&config.auth)?;
    let identity_verifier = GoogleIdentityVerifier::new(&config.identity);

    Ok(AppState {
        pool,
        config: Arc::new(config.clone()),
        token_issuer: Arc::new(token_issuer),
        identity_verifier: Arc::new(identity_verifier),
    })
}
