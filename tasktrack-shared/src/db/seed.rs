/// First-run bootstrap seed
///
/// A fresh deployment has no users, which would make it impossible to log
/// in and create any. On startup, after migrations, the server seeds one
/// admin account if (and only if) no admin exists yet. Seed credentials
/// come from configuration; the caller hashes the password before calling
/// in.

use sqlx::PgPool;
use tracing::info;

use crate::models::user::{CreateUser, Role, User};

/// Creates the default admin account if no admin exists
///
/// # Returns
///
/// The newly created admin, or None if an admin was already present
pub async fn seed_admin(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<Option<User>, sqlx::Error> {
    if User::admin_exists(pool).await? {
        return Ok(None);
    }

    let admin = User::create(
        pool,
        CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: Role::Admin,
        },
    )
    .await?;

    info!(email = %admin.email, "Seeded default admin account");
    Ok(Some(admin))
}
