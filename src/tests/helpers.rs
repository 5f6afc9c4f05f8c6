#![cfg(test)]

use sqlx::PgPool;
use uuid::Uuid;

pub fn unique_email() -> String {
    format!("{}@test.example", Uuid::now_v7().as_simple())
}

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Option<Uuid> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
        .expect("find user by email")
}

pub async fn insert_user(pool: &PgPool) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (id, email, sub, auth_provider, created_at, updated_at) \
         VALUES ($1, $2, $3, 'google', now(), now()) RETURNING id",
    )
    .bind(Uuid::now_v7())
    .bind(unique_email())
    .bind(Uuid::now_v7().to_string())
    .fetch_one(pool)
    .await
    .expect("insert user")
}

pub async fn delete_user(pool: &PgPool, user_id: Uuid) {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("delete user");
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::unique_email;

    #[test]
    fn test_unique_email_never_repeats_in_a_burst() {
        let emails: HashSet<String> = (0..10_000).map(|_| unique_email()).collect();
        assert_eq!(emails.len(), 10_000);
    }
}
