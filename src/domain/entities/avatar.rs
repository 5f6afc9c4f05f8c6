use chrono::{DateTime, Utc};

use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

#[derive(Debug, Clone)]
pub struct Avatar {
    pub id: Id<Avatar>,
    pub user_id: Id<User>,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Avatar {
    pub fn new(user_id: Id<User>, url: String) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            user_id,
            url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reuses `existing` when the caller owns it, otherwise builds a new avatar.
    pub fn resolve(existing: Option<Avatar>, user_id: &Id<User>, url: String) -> Self {
        match existing {
            Some(mut avatar) if avatar.user_id == *user_id => {
                avatar.url = url;
                avatar.updated_at = Utc::now();
                avatar
            }
            _ => Avatar::new(user_id.clone(), url),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::domain::entities::avatar::Avatar;
    use crate::domain::entities::id::Id;
    use crate::domain::entities::user::User;

    #[rstest]
    fn test_resolve_owned_avatar() {
        let user_id: Id<User> = Id::generate();
        let existing = Avatar::new(user_id.clone(), "https://cdn/old.png".to_string());
        let resolved = Avatar::resolve(Some(existing.clone()), &user_id, "https://cdn/new.png".to_string());
        assert_eq!(resolved.id, existing.id);
        assert_eq!(resolved.url, "https://cdn/new.png");
    }

    #[rstest]
    fn test_resolve_foreign_avatar_creates_new() {
        let existing = Avatar::new(Id::generate(), "https://cdn/old.png".to_string());
        let user_id: Id<User> = Id::generate();
        let resolved = Avatar::resolve(Some(existing.clone()), &user_id, "https://cdn/new.png".to_string());
        assert_ne!(resolved.id, existing.id);
        assert_eq!(resolved.user_id, user_id);
    }
}
