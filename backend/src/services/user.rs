//! User service: authentication, registration, and account management
//!
//! Password hashing and verification run on the blocking thread pool; the
//! JWT service is passed by reference (pre-computed keys). Every mutating
//! operation takes the acting principal explicitly for the audit stamps.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use sqlx::PgPool;
use user_management_shared::models::User;
use user_management_shared::types::AuthenticationResponse;
use user_management_shared::validation::{is_valid_password, validate_login_id};
use validator::ValidateEmail;

const PASSWORD_POLICY: &str =
    "Password must be at least 8 characters long and contain only letters and numbers";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
    )
}

fn validate_email(email: Option<&str>) -> Result<(), ApiError> {
    if let Some(email) = email {
        if !email.validate_email() {
            return Err(ApiError::Validation("Invalid email format".to_string()));
        }
    }
    Ok(())
}

/// User service for authentication and account operations
pub struct UserService;

impl UserService {
    /// Authenticate by login id and password, issuing a token on success.
    ///
    /// An unknown login id and a wrong password are indistinguishable to
    /// the caller.
    pub async fn authenticate(
        pool: &PgPool,
        jwt_service: &JwtService,
        login_id: &str,
        password: &str,
    ) -> Result<AuthenticationResponse, ApiError> {
        let user = UserRepository::find_by_login_id(pool, login_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        let valid =
            PasswordService::verify_async(password.to_string(), user.password.clone()).await?;
        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        let auth_token = jwt_service.issue(&user.login_id)?;

        Ok(AuthenticationResponse {
            user: user.into(),
            auth_token,
        })
    }

    /// Register a new user.
    ///
    /// The password is validated against the policy, then hashed before it
    /// ever reaches the store. A duplicate login id is a conflict, whether
    /// detected by the pre-check or by the unique constraint on a racing
    /// insert.
    pub async fn register(
        pool: &PgPool,
        login_id: &str,
        password: &str,
        email: Option<&str>,
        acting: Option<&str>,
    ) -> Result<User, ApiError> {
        validate_login_id(login_id).map_err(ApiError::Validation)?;
        validate_email(email)?;
        if !is_valid_password(password) {
            return Err(ApiError::Validation(PASSWORD_POLICY.to_string()));
        }

        if UserRepository::login_id_exists(pool, login_id).await? {
            return Err(ApiError::Conflict(
                "User with this login ID already exists".to_string(),
            ));
        }

        let password_hash = PasswordService::hash_async(password.to_string()).await?;

        let user = UserRepository::create(pool, login_id, &password_hash, email, acting)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::Conflict("User with this login ID already exists".to_string())
                } else {
                    ApiError::Database(e)
                }
            })?;

        Ok(user.into())
    }

    /// Change a user's password after verifying the old one.
    pub async fn change_password(
        pool: &PgPool,
        id: i64,
        old_password: &str,
        new_password: &str,
        acting: Option<&str>,
    ) -> Result<(), ApiError> {
        let user = UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        if !is_valid_password(new_password) {
            return Err(ApiError::Validation(PASSWORD_POLICY.to_string()));
        }

        let valid =
            PasswordService::verify_async(old_password.to_string(), user.password.clone()).await?;
        if !valid {
            return Err(ApiError::Unauthorized(
                "Old password is incorrect".to_string(),
            ));
        }

        let password_hash = PasswordService::hash_async(new_password.to_string()).await?;
        UserRepository::update_password(pool, id, &password_hash, acting).await?;

        Ok(())
    }

    /// Fetch a user by id
    pub async fn get_user(pool: &PgPool, id: i64) -> Result<User, ApiError> {
        let user = UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
        Ok(user.into())
    }

    /// List all users
    pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, ApiError> {
        let users = UserRepository::list_all(pool).await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    /// Update login id and email of an existing user.
    /// The password is never touched here.
    pub async fn update_user(
        pool: &PgPool,
        id: i64,
        login_id: &str,
        email: Option<&str>,
        acting: Option<&str>,
    ) -> Result<User, ApiError> {
        validate_login_id(login_id).map_err(ApiError::Validation)?;
        validate_email(email)?;

        let user = UserRepository::update(pool, id, login_id, email, acting)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::Conflict("User with this login ID already exists".to_string())
                } else {
                    ApiError::Database(e)
                }
            })?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    /// Delete a user by id. A second delete of the same id is NotFound.
    pub async fn delete_user(pool: &PgPool, id: i64) -> Result<(), ApiError> {
        let deleted = UserRepository::delete(pool, id).await?;
        if !deleted {
            return Err(ApiError::NotFound("User not found".to_string()));
        }
        Ok(())
    }
}
