//! User repository for database operations
//!
//! Absence is reported as `Option::None`, not an error. Uniqueness of
//! `login_id` is enforced by the database's unique constraint, so a racing
//! duplicate insert fails atomically with a unique violation the service
//! layer maps to a conflict.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use user_management_shared::models::{AuditFields, User};

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub login_id: String,
    pub password: String,
    pub email: Option<String>,
    pub created_on: DateTime<Utc>,
    pub modified_on: DateTime<Utc>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            login_id: record.login_id,
            password: record.password,
            email: record.email,
            audit: AuditFields {
                created_on: Some(record.created_on),
                modified_on: Some(record.modified_on),
                created_by: record.created_by,
                modified_by: record.modified_by,
            },
        }
    }
}

const USER_COLUMNS: &str =
    "id, login_id, password, email, created_on, modified_on, created_by, modified_by";

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Insert a new user. `acting` stamps created_by/modified_by.
    pub async fn create(
        pool: &PgPool,
        login_id: &str,
        password_hash: &str,
        email: Option<&str>,
        acting: Option<&str>,
    ) -> sqlx::Result<UserRecord> {
        sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (login_id, password, email, created_by, modified_by)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(login_id)
        .bind(password_hash)
        .bind(email)
        .bind(acting)
        .fetch_one(pool)
        .await
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> sqlx::Result<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find user by login id
    pub async fn find_by_login_id(
        pool: &PgPool,
        login_id: &str,
    ) -> sqlx::Result<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE login_id = $1
            "#,
        ))
        .bind(login_id)
        .fetch_optional(pool)
        .await
    }

    /// Check if a login id is already taken
    pub async fn login_id_exists(pool: &PgPool, login_id: &str) -> sqlx::Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE login_id = $1)
            "#,
        )
        .bind(login_id)
        .fetch_one(pool)
        .await
    }

    /// List all users, oldest first
    pub async fn list_all(pool: &PgPool) -> sqlx::Result<Vec<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY id
            "#,
        ))
        .fetch_all(pool)
        .await
    }

    /// Update login id and email of an existing user.
    /// Returns `None` when no user has the given id.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        login_id: &str,
        email: Option<&str>,
        acting: Option<&str>,
    ) -> sqlx::Result<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            UPDATE users SET
                login_id = $2,
                email = $3,
                modified_on = NOW(),
                modified_by = $4
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(login_id)
        .bind(email)
        .bind(acting)
        .fetch_optional(pool)
        .await
    }

    /// Replace the stored password hash. Returns false when the id is absent.
    pub async fn update_password(
        pool: &PgPool,
        id: i64,
        password_hash: &str,
        acting: Option<&str>,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                password = $2,
                modified_on = NOW(),
                modified_by = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .bind(acting)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a user by id. Returns false when the id is absent.
    /// Ids are never reused: the sequence keeps advancing.
    pub async fn delete(pool: &PgPool, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
