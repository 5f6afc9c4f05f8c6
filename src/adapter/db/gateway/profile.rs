use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;
use crate::domain::entities::user::User;

#[derive(Clone)]
pub struct ProfileGateway {
    session: SqlxSession,
}

impl ProfileGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn map_profile(row: &PgRow) -> AppResult<Profile> {
        let avatar_id: Option<Uuid> = row.try_get("avatar_id")?;
        Ok(Profile {
            id: Id::new(row.try_get("id")?),
            user_id: Id::new(row.try_get("user_id")?),
            name: row.try_get("name")?,
            summary: row.try_get("summary")?,
            details: row.try_get("details")?,
            avatar_id: avatar_id.map(Id::new),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn find_profile(result: Option<PgRow>) -> AppResult<Option<Profile>> {
        result.as_ref().map(Self::map_profile).transpose()
    }
}

/// `(user_id, name)` is unique, so a concurrent create or rename surfaces as a conflict.
fn conflict_on_duplicate(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::ProfileAlreadyExists,
        _ => AppError::DatabaseError(err),
    }
}

#[async_trait]
impl ProfileWriter for ProfileGateway {
    async fn insert(&self, profile: Profile) -> AppResult<Id<Profile>> {
        self.session
            .with_tx(|tx| {
                let profile = profile.clone();
                async move {
                    let row = sqlx::query(
                        r#"
                            INSERT INTO profiles
                                (id, user_id, name, summary, details, avatar_id, created_at, updated_at)
                            VALUES
                                ($1, $2, $3, $4, $5, $6, $7, $8)
                            RETURNING id
                        "#,
                    )
                    .bind(profile.id.value)
                    .bind(profile.user_id.value)
                    .bind(profile.name)
                    .bind(profile.summary)
                    .bind(profile.details)
                    .bind(profile.avatar_id.map(|id| id.value))
                    .bind(profile.created_at)
                    .bind(profile.updated_at)
                    .fetch_one(tx.as_mut())
                    .await
                    .map_err(conflict_on_duplicate)?;

                    let id: Uuid = row.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn update(&self, profile: Profile) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let profile = profile.clone();
                async move {
                    sqlx::query(
                        r#"
                            UPDATE
                                profiles
                            SET
                                name = $2, summary = $3, details = $4, avatar_id = $5, updated_at = $6
                            WHERE
                                id = $1
                        "#,
                    )
                    .bind(profile.id.value)
                    .bind(profile.name)
                    .bind(profile.summary)
                    .bind(profile.details)
                    .bind(profile.avatar_id.map(|id| id.value))
                    .bind(profile.updated_at)
                    .execute(tx.as_mut())
                    .await
                    .map_err(conflict_on_duplicate)?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }

    async fn delete(&self, profile_id: &Id<Profile>) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let profile_id = profile_id.value;
                async move {
                    sqlx::query("DELETE FROM profiles WHERE id = $1")
                        .bind(profile_id)
                        .execute(tx.as_mut())
                        .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl ProfileReader for ProfileGateway {
    async fn find_by_id(&self, profile_id: &Id<Profile>) -> AppResult<Option<Profile>> {
        self.session
            .with_tx(|tx| {
                let profile_id = profile_id.value;
                async move {
                    let result = sqlx::query(
                        r#"
                            SELECT
                                id, user_id, name, summary, details, avatar_id, created_at, updated_at
                            FROM
                                profiles
                            WHERE id = $1
                        "#,
                    )
                    .bind(profile_id)
                    .fetch_optional(tx.as_mut())
                    .await?;

                    Self::find_profile(result)
                }
                .boxed()
            })
            .await
    }

    async fn find_by_name(&self, user_id: &Id<User>, name: &str) -> AppResult<Option<Profile>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                let name = name.to_owned();
                async move {
                    let result = sqlx::query(
                        r#"
                            SELECT
                                id, user_id, name, summary, details, avatar_id, created_at, updated_at
                            FROM
                                profiles
                            WHERE user_id = $1 AND name = $2
                        "#,
                    )
                    .bind(user_id)
                    .bind(&name)
                    .fetch_optional(tx.as_mut())
                    .await?;

                    Self::find_profile(result)
                }
                .boxed()
            })
            .await
    }

    async fn find_by_user(&self, user_id: &Id<User>, limit: i64, offset: i64) -> AppResult<Vec<Profile>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let rows = sqlx::query(
                        r#"
                            SELECT
                                id, user_id, name, summary, details, avatar_id, created_at, updated_at
                            FROM
                                profiles
                            WHERE user_id = $1
                            ORDER BY created_at, id
                            LIMIT $2 OFFSET $3
                        "#,
                    )
                    .bind(user_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(tx.as_mut())
                    .await?;

                    rows.iter().map(Self::map_profile).collect()
                }
                .boxed()
            })
            .await
    }

    async fn count_by_user(&self, user_id: &Id<User>) -> AppResult<i64> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let row = sqlx::query("SELECT COUNT(*) AS total FROM profiles WHERE user_id = $1")
                        .bind(user_id)
                        .fetch_one(tx.as_mut())
                        .await?;
                    let total: i64 = row.try_get("total")?;
                    Ok(total)
                }
                .boxed()
            })
            .await
    }
}
