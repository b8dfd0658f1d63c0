use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the identity store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub firstname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, firstname, email, password_hash, is_admin, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// True when a user already holds either unique field.
    pub async fn username_or_email_taken(
        db: &PgPool,
        username: &str,
        email: &str,
    ) -> anyhow::Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM users WHERE username = $1 OR email = $2
            )
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_one(db)
        .await?;
        Ok(taken)
    }

    /// Create a new user. Always non-admin; promotion is a separate,
    /// operator-driven step (see [`User::promote_admin`]).
    pub async fn create(
        db: &PgPool,
        username: &str,
        firstname: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, firstname, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, firstname, email, password_hash, is_admin, created_at
            "#,
        )
        .bind(username)
        .bind(firstname)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }

    /// Flip the admin flag for an existing user; returns whether a row matched.
    pub async fn promote_admin(db: &PgPool, email: &str) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users SET is_admin = TRUE WHERE email = $1
            "#,
        )
        .bind(email)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
