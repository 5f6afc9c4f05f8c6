use chrono::{DateTime, Utc};

use crate::application::app_error::{AppError, AppResult};
use crate::domain::entities::avatar::Avatar;
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

pub const DEFAULT_PROFILE_NAME: &str = "default";

#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Id<Profile>,
    pub user_id: Id<User>,
    pub name: String,
    pub summary: Option<String>,
    pub details: Option<String>,
    pub avatar_id: Option<Id<Avatar>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(user_id: Id<User>, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            user_id,
            name,
            summary: None,
            details: None,
            avatar_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Empty profile created for every user on sign-up.
    pub fn default_for(user_id: Id<User>) -> Self {
        Self::new(user_id, DEFAULT_PROFILE_NAME.to_string())
    }

    /// Single ownership gate for every profile mutation.
    pub fn authorize(profile: Option<Profile>, user_id: &Id<User>) -> AppResult<Profile> {
        let profile = profile.ok_or(AppError::ProfileNotFound)?;
        if profile.user_id != *user_id {
            return Err(AppError::AccessDenied);
        }
        Ok(profile)
    }

    /// Overwrites scalars only with non-empty values.
    pub fn merge_scalars(&mut self, name: Option<String>, summary: Option<String>, details: Option<String>) {
        if let Some(name) = non_empty(name) {
            self.name = name;
        }
        if let Some(summary) = non_empty(summary) {
            self.summary = Some(summary);
        }
        if let Some(details) = non_empty(details) {
            self.details = Some(details);
        }
        self.updated_at = Utc::now();
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
