use crate::application::{
    app_error::{AppError, AppResult},
    interface::db::DBSession
};
use async_trait::async_trait;
use futures::future::BoxFuture;
use sqlx::{Pool, Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct SessionInner {
    pool: Pool<Postgres>,
    transaction: Option<Transaction<'static, Postgres>>,
}

/// Unit of work shared by every gateway of one request.
///
/// The transaction is opened by the first statement and lives until `commit`.
/// Dropping the session without committing rolls the work back.
#[derive(Clone)]
pub struct SqlxSession {
    inner: Arc<Mutex<SessionInner>>,
}

impl SqlxSession {
    pub fn new_lazy(pool: Pool<Postgres>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                pool,
                transaction: None,
            })),
        }
    }

    pub async fn with_tx<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(&'a mut Transaction<'static, Postgres>) -> BoxFuture<'a, AppResult<T>>,
    {
        let mut inner = self.inner.lock().await;
        if inner.transaction.is_none() {
            let tx = inner.pool.begin().await?;
            inner.transaction = Some(tx);
        }
        let tx = inner
            .transaction
            .as_mut()
            .ok_or_else(|| AppError::DatabaseError(sqlx::Error::PoolClosed))?;
        f(tx).await
    }
}

#[async_trait]
impl DBSession for SqlxSession {
    async fn commit(&self) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        if let Some(tx) = inner.transaction.take() {
            tx.commit().await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use futures::FutureExt;
    use rstest::rstest;
    use sqlx::postgres::PgPoolOptions;
    use uuid::Uuid;

    use crate::adapter::db::session::SqlxSession;
    use crate::application::interface::db::DBSession;

    async fn count_marker(pool: &sqlx::PgPool, email: &str) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(pool)
            .await
            .expect("count users")
    }

    async fn insert_marker(session: &SqlxSession, email: &str) {
        let email = email.to_owned();
        session
            .with_tx(|tx| {
                async move {
                    sqlx::query(
                        "INSERT INTO users (id, email, sub, auth_provider, created_at, updated_at) \
                         VALUES ($1, $2, 'sub', 'google', now(), now())",
                    )
                    .bind(Uuid::now_v7())
                    .bind(&email)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
            .expect("insert marker");
    }

    #[rstest]
    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_uncommitted_work_is_rolled_back() {
        let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
        let pool = PgPoolOptions::new().connect(&url).await.expect("connect");
        let email = format!("{}@rollback.test", Uuid::now_v7().as_simple());

        {
            let session = SqlxSession::new_lazy(pool.clone());
            insert_marker(&session, &email).await;
        }
        assert_eq!(count_marker(&pool, &email).await, 0);

        let session = SqlxSession::new_lazy(pool.clone());
        insert_marker(&session, &email).await;
        session.commit().await.expect("commit");
        assert_eq!(count_marker(&pool, &email).await, 1);

        sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(&email)
            .execute(&pool)
            .await
            .expect("cleanup");
    }
}
