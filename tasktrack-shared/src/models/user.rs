/// User model and database operations
///
/// Users are the identity store of TaskTrack: every task references its
/// creator and (optionally) an assignee, and every history entry records
/// the acting user. Passwords are stored as Argon2id hashes, never in
/// plaintext.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     email CITEXT NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     role user_role NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Deleting a user does not cascade: tasks created by or assigned to the
/// user keep their (now dangling) reference, and history rows keep the
/// actor id. References across tables are soft.
///
/// # Example
///
/// ```no_run
/// use tasktrack_shared::models::user::{CreateUser, Role, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     name: "Bob".to_string(),
///     email: "bob@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     role: Role::Member,
/// }).await?;
///
/// let found = User::find_by_email(&pool, "BOB@example.com").await?;
/// assert!(found.is_some()); // email lookup is case-insensitive
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User role
///
/// Admins administer users and categories; managers administer users and
/// may delete any task; members see and work only their own assigned tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full control over users, categories, and tasks
    Admin,

    /// Manages users and tasks, but not categories
    Manager,

    /// Works own assigned tasks only
    Member,
}

impl Role {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Member => "member",
        }
    }
}

/// User model representing one account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address (case-insensitive business key, unique via CITEXT)
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Role
    pub role: Role,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// User projection without the credential, safe to return to clients
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserInfo {
    /// Unique user ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Role
    pub role: Role,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Email address (stored case-insensitively)
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,

    /// Role
    pub role: Role,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns a database error on a duplicate email (unique constraint
    /// `users_email_key`) or connection failure. The API layer maps the
    /// constraint violation to a conflict response.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address (case-insensitive via CITEXT)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists all users without their credential field
    pub async fn list(pool: &PgPool) -> Result<Vec<UserInfo>, sqlx::Error> {
        let users = sqlx::query_as::<_, UserInfo>(
            r#"
            SELECT id, name, email, role
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Deletes a user by ID
    ///
    /// No cascade: tasks referencing the user keep their dangling ids.
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if the user did not exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replaces a user's password hash
    ///
    /// Used by both the admin reset and the self-service change; callers
    /// are responsible for verifying the old password and validating the
    /// new one against the credential policy first.
    pub async fn set_password_hash(
        pool: &PgPool,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks whether any admin account exists (bootstrap seed guard)
    pub async fn admin_exists(pool: &PgPool) -> Result<bool, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE role = 'admin')")
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Manager.as_str(), "manager");
        assert_eq!(Role::Member.as_str(), "member");
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"member\"").unwrap(),
            Role::Member
        );
    }

    // Integration tests for database operations are in tests/store_tests.rs
}
