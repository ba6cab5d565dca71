/// Category model and database operations
///
/// Categories are flat, admin-managed labels attached to tasks. Deleting a
/// category does not touch tasks that reference it; the stale reference is
/// accepted and reporting groups such tasks under "uncategorized".
///
/// # Schema
///
/// ```sql
/// CREATE TABLE categories (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Category model
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    /// Unique category ID
    pub id: Uuid,

    /// Category name (unique)
    pub name: String,

    /// When the category was created
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new category
    ///
    /// # Errors
    ///
    /// Returns a database error on a duplicate name (unique constraint
    /// `categories_name_key`); the API layer maps it to a conflict.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Self, sqlx::Error> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    /// Finds a category by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(category)
    }

    /// Lists all categories ordered by name
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories ORDER BY name",
        )
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }

    /// Renames a category
    ///
    /// # Returns
    ///
    /// True if a row was updated, false if the category did not exist
    pub async fn rename(pool: &PgPool, id: Uuid, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE categories SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a category
    ///
    /// Tasks referencing the category keep their (now stale) category id.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_without_created_at() {
        let category = Category {
            id: Uuid::new_v4(),
            name: "bug".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["name"], "bug");
        assert!(json.get("created_at").is_none());
    }
}
