use async_trait::async_trait;

use crate::application::app_error::AppResult;

/// Identity asserted by an external provider after its token was verified.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub sub: String,
    pub email: Option<String>,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, credential: &str) -> AppResult<VerifiedIdentity>;
}
