use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::avatar::Avatar;
use crate::domain::entities::id::Id;

#[async_trait]
pub trait AvatarReader: Send + Sync {
    async fn find_by_id(&self, avatar_id: &Id<Avatar>) -> AppResult<Option<Avatar>>;
}

#[async_trait]
pub trait AvatarWriter: Send + Sync {
    async fn save(&self, avatar: Avatar) -> AppResult<Id<Avatar>>;
}

pub trait AvatarRepository: AvatarReader + AvatarWriter {}

impl<T: AvatarReader + AvatarWriter> AvatarRepository for T {}
