use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{
    app_error::{AppError, AppResult},
    interface::token::{TokenIssuer, TokenPair},
};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;
use crate::infra::config::AuthConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub kind: TokenKind,
}

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SigningKeys {
    fn from_secret(secret: &str, ttl: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl),
        }
    }
}

/// HMAC-signed access and refresh tokens, each kind with its own secret and lifetime.
pub struct JwtTokenIssuer {
    algorithm: Algorithm,
    access: SigningKeys,
    refresh: SigningKeys,
}

impl JwtTokenIssuer {
    pub fn new(config: &AuthConfig) -> anyhow::Result<Self> {
        let algorithm: Algorithm = config.algorithm.parse()?;
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            anyhow::bail!("Token algorithm {:?} is not an HMAC algorithm", algorithm);
        }

        Ok(Self {
            algorithm,
            access: SigningKeys::from_secret(&config.access_secret, config.access_ttl),
            refresh: SigningKeys::from_secret(&config.refresh_secret, config.refresh_ttl),
        })
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    fn sign(&self, user_id: &Id<User>, kind: TokenKind) -> AppResult<String> {
        let keys = self.keys(kind);
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.value.to_string(),
            iat: now.timestamp(),
            exp: (now + keys.ttl).timestamp(),
            kind,
        };
        encode(&Header::new(self.algorithm), &claims, &keys.encoding)
            .map_err(|e| AppError::TokenEncodingError(e.to_string()))
    }

    fn verify(&self, token: &str, kind: TokenKind) -> AppResult<Id<User>> {
        let validation = Validation::new(self.algorithm);
        let data = decode::<Claims>(token, &self.keys(kind).decoding, &validation).map_err(|e| {
            debug!("Rejected {:?} token: {}", kind, e);
            AppError::InvalidToken
        })?;
        if data.claims.kind != kind {
            return Err(AppError::InvalidToken);
        }
        data.claims.sub.try_into().map_err(|_| AppError::InvalidToken)
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: &Id<User>) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.sign(user_id, TokenKind::Access)?,
            refresh_token: self.sign(user_id, TokenKind::Refresh)?,
        })
    }

    fn decode_access(&self, token: &str) -> AppResult<Id<User>> {
        self.verify(token, TokenKind::Access)
    }

    fn decode_refresh(&self, token: &str) -> AppResult<Id<User>> {
        self.verify(token, TokenKind::Refresh)
    }
}
