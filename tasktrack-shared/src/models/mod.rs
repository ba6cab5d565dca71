/// Database models for TaskTrack
///
/// # Models
///
/// - `user`: user accounts, roles, and credential storage
/// - `category`: admin-managed task categories
/// - `task`: work items and their lifecycle operations
/// - `history`: the append-only per-task audit ledger
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
/// # Ok(())
/// # }
/// ```

pub mod category;
pub mod history;
pub mod task;
pub mod user;
