use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::application::app_error::AppError;
use crate::domain::entities::id::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthProvider {
    Google,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Google => "google",
        }
    }
}

impl FromStr for AuthProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(AuthProvider::Google),
            other => Err(AppError::InvalidAuthProvider(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Id<User>,
    pub email: String,
    pub sub: String,
    pub nik: Option<String>,
    pub auth_provider: AuthProvider,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, sub: String, auth_provider: AuthProvider) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            email,
            sub,
            nik: None,
            auth_provider,
            created_at: now,
            updated_at: now,
        }
    }
}
