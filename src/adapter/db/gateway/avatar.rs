use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::avatar::{AvatarReader, AvatarWriter};
use crate::domain::entities::avatar::Avatar;
use crate::domain::entities::id::Id;

#[derive(Clone)]
pub struct AvatarGateway {
    session: SqlxSession,
}

impl AvatarGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }
}

#[async_trait]
impl AvatarReader for AvatarGateway {
    async fn find_by_id(&self, avatar_id: &Id<Avatar>) -> AppResult<Option<Avatar>> {
        self.session
            .with_tx(|tx| {
                let avatar_id = avatar_id.value;
                async move {
                    let result = sqlx::query(
                        r#"
                            SELECT
                                id, user_id, url, created_at, updated_at
                            FROM
                                avatars
                            WHERE id = $1
                        "#,
                    )
                    .bind(avatar_id)
                    .fetch_optional(tx.as_mut())
                    .await?;

                    match result {
                        Some(row) => Ok(Some(Avatar {
                            id: Id::new(row.try_get("id")?),
                            user_id: Id::new(row.try_get("user_id")?),
                            url: row.try_get("url")?,
                            created_at: row.try_get("created_at")?,
                            updated_at: row.try_get("updated_at")?,
                        })),
                        None => Ok(None),
                    }
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl AvatarWriter for AvatarGateway {
    async fn save(&self, avatar: Avatar) -> AppResult<Id<Avatar>> {
        self.session
            .with_tx(|tx| {
                let avatar = avatar.clone();
                async move {
                    let row = sqlx::query(
                        r#"
                            INSERT INTO avatars
                                (id, user_id, url, created_at, updated_at)
                            VALUES
                                ($1, $2, $3, $4, $5)
                            ON CONFLICT (id) DO UPDATE SET
                                url = EXCLUDED.url, updated_at = EXCLUDED.updated_at
                            RETURNING id
                        "#,
                    )
                    .bind(avatar.id.value)
                    .bind(avatar.user_id.value)
                    .bind(avatar.url)
                    .bind(avatar.created_at)
                    .bind(avatar.updated_at)
                    .fetch_one(tx.as_mut())
                    .await?;

                    let id: Uuid = row.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }
}
