use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;
use crate::domain::entities::user::User;

#[async_trait]
pub trait ProfileWriter: Send + Sync {
    async fn insert(&self, profile: Profile) -> AppResult<Id<Profile>>;
    async fn update(&self, profile: Profile) -> AppResult<()>;
    async fn delete(&self, profile_id: &Id<Profile>) -> AppResult<()>;
}

#[async_trait]
pub trait ProfileReader: Send + Sync {
    async fn find_by_id(&self, profile_id: &Id<Profile>) -> AppResult<Option<Profile>>;
    async fn find_by_name(&self, user_id: &Id<User>, name: &str) -> AppResult<Option<Profile>>;
    async fn find_by_user(&self, user_id: &Id<User>, limit: i64, offset: i64) -> AppResult<Vec<Profile>>;
    async fn count_by_user(&self, user_id: &Id<User>) -> AppResult<i64>;
}
