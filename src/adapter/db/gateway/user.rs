use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::gateway::user::{UserReader, UserWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::{AuthProvider, User};

#[derive(Clone)]
pub struct UserGateway {
    session: SqlxSession,
}

impl UserGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn find_user(result: Option<PgRow>) -> AppResult<Option<User>> {
        match result {
            Some(row) => {
                let auth_provider: String = row.try_get("auth_provider")?;
                Ok(Some(User {
                    id: Id::new(row.try_get("id")?),
                    email: row.try_get("email")?,
                    sub: row.try_get("sub")?,
                    nik: row.try_get("nik")?,
                    auth_provider: auth_provider.parse::<AuthProvider>()?,
                    created_at: row.try_get("created_at")?,
                    updated_at: row.try_get("updated_at")?,
                }))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserWriter for UserGateway {
    async fn insert(&self, user: User) -> AppResult<Id<User>> {
        self.session
            .with_tx(|tx| {
                let user = user.clone();
                async move {
                    let result = sqlx::query(
                        r#"
                            INSERT INTO users
                                (id, email, sub, nik, auth_provider, created_at, updated_at)
                            VALUES
                                ($1, $2, $3, $4, $5, $6, $7)
                            ON CONFLICT (email) DO NOTHING
                            RETURNING
                                id
                        "#,
                    )
                    .bind(user.id.value)
                    .bind(&user.email)
                    .bind(&user.sub)
                    .bind(&user.nik)
                    .bind(user.auth_provider.as_str())
                    .bind(user.created_at)
                    .bind(user.updated_at)
                    .fetch_optional(tx.as_mut())
                    .await?;
                    // No row back means a concurrent sign-in registered this email first.
                    let row = result.ok_or(AppError::UserAlreadyExists)?;
                    let id: Uuid = row.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl UserReader for UserGateway {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.session
            .with_tx(|tx| {
                let email = email.to_owned();
                async move {
                    let result = sqlx::query(
                        r#"
                            SELECT
                                id, email, sub, nik, auth_provider, created_at, updated_at
                            FROM
                                users
                            WHERE email = $1
                        "#,
                    )
                    .bind(&email)
                    .fetch_optional(tx.as_mut())
                    .await?;

                    Self::find_user(result)
                }
                .boxed()
            })
            .await
    }

    async fn find_by_id(&self, user_id: &Id<User>) -> AppResult<Option<User>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let result = sqlx::query(
                        r#"
                            SELECT
                                id, email, sub, nik, auth_provider, created_at, updated_at
                            FROM
                                users
                            WHERE id = $1
                        "#,
                    )
                    .bind(user_id)
                    .fetch_optional(tx.as_mut())
                    .await?;

                    Self::find_user(result)
                }
                .boxed()
            })
            .await
    }
}
