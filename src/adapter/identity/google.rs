use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::identity::{IdentityVerifier, VerifiedIdentity};
use crate::infra::config::IdentityConfig;

#[derive(Debug, Deserialize)]
struct GoogleClaims {
    sub: String,
    email: Option<String>,
    email_verified: Option<bool>,
}

#[derive(Clone)]
struct CachedKeys {
    keys: JwkSet,
    expires_at: DateTime<Utc>,
}

impl CachedKeys {
    fn new(keys: JwkSet, ttl: Duration) -> Self {
        Self {
            keys,
            expires_at: Utc::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Verifies Google ID tokens against the published key set.
///
/// Keys are cached for `jwks_cache_ttl` seconds. A token signed with a key id
/// missing from the cache triggers one refetch, which covers key rotation.
pub struct GoogleIdentityVerifier {
    http: reqwest::Client,
    jwks_url: String,
    client_id: String,
    issuers: Vec<String>,
    cache_ttl: Duration,
    cache: RwLock<Option<CachedKeys>>,
}

impl GoogleIdentityVerifier {
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            jwks_url: config.jwks_url.clone(),
            client_id: config.google_client_id.clone(),
            issuers: config.issuers.clone(),
            cache_ttl: Duration::seconds(config.jwks_cache_ttl as i64),
            cache: RwLock::new(None),
        }
    }

    #[cfg(test)]
    fn with_keys(config: &IdentityConfig, keys: JwkSet) -> Self {
        let verifier = Self::new(config);
        Self {
            cache: RwLock::new(Some(CachedKeys::new(keys, verifier.cache_ttl))),
            ..verifier
        }
    }

    async fn fetch_keys(&self) -> AppResult<JwkSet> {
        let unavailable = |e: reqwest::Error| {
            error!("Failed to fetch identity provider keys from {}: {}", self.jwks_url, e);
            AppError::IdentityProviderUnavailable(e.to_string())
        };
        let keys: JwkSet = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)?;

        info!("Fetched {} identity provider keys", keys.keys.len());
        let mut cache = self.cache.write().await;
        *cache = Some(CachedKeys::new(keys.clone(), self.cache_ttl));
        Ok(keys)
    }

    async fn cached_keys(&self) -> Option<JwkSet> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|cached| !cached.is_expired())
            .map(|cached| cached.keys.clone())
    }

    async fn decoding_key(&self, kid: &str) -> AppResult<DecodingKey> {
        let keys = match self.cached_keys().await {
            Some(keys) if keys.find(kid).is_some() => keys,
            _ => self.fetch_keys().await?,
        };
        let jwk = keys.find(kid).ok_or_else(|| {
            debug!("Unknown signing key id {}", kid);
            AppError::InvalidToken
        })?;
        DecodingKey::from_jwk(jwk).map_err(|_| AppError::InvalidToken)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.client_id.as_str()]);
        validation.set_issuer(self.issuers.as_slice());
        validation
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(&self, credential: &str) -> AppResult<VerifiedIdentity> {
        let header = decode_header(credential).map_err(|_| AppError::InvalidToken)?;
        let kid = header.kid.ok_or(AppError::InvalidToken)?;
        let key = self.decoding_key(&kid).await?;

        let claims = decode::<GoogleClaims>(credential, &key, &self.validation())
            .map_err(|e| {
                debug!("Rejected identity token: {}", e);
                AppError::InvalidToken
            })?
            .claims;

        let email = match claims.email_verified {
            Some(false) => None,
            _ => claims.email,
        };
        Ok(VerifiedIdentity { sub: claims.sub, email })
    }
}
