/// Task history ledger
///
/// An append-only audit log of actions taken against tasks: who did what,
/// when, with a small structured metadata payload. Entries are written
/// inside the same transaction as the task mutation they describe, are
/// never updated or deleted, and deliberately survive deletion of the task
/// they reference.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE task_history (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     task_id UUID NOT NULL,
///     action TEXT NOT NULL,
///     user_id UUID NOT NULL,
///     meta JSONB NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// One immutable history entry
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HistoryEntry {
    /// Unique entry ID
    pub id: Uuid,

    /// Task the entry describes
    pub task_id: Uuid,

    /// Human-readable action description, e.g. "Task created"
    pub action: String,

    /// Actor who performed the action
    pub user_id: Uuid,

    /// Structured metadata payload
    pub meta: JsonValue,

    /// When the action happened
    pub created_at: DateTime<Utc>,
}

/// History entry joined with the actor's display name
///
/// The join is a LEFT JOIN: if the acting user has since been deleted the
/// name is null and the entry is still returned.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HistoryWithActor {
    /// Unique entry ID
    pub id: Uuid,

    /// Task the entry describes
    pub task_id: Uuid,

    /// Action description
    pub action: String,

    /// Actor id
    pub user_id: Uuid,

    /// Metadata payload
    pub meta: JsonValue,

    /// When the action happened
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,

    /// Actor display name (null if the user was deleted)
    pub performed_by_name: Option<String>,
}

impl HistoryEntry {
    /// Appends one entry to the ledger
    ///
    /// Generic over the executor so callers can append inside the same
    /// transaction as the task mutation being recorded.
    pub async fn append<'e, E>(
        executor: E,
        task_id: Uuid,
        action: &str,
        user_id: Uuid,
        meta: JsonValue,
    ) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let entry = sqlx::query_as::<_, HistoryEntry>(
            r#"
            INSERT INTO task_history (task_id, action, user_id, meta)
            VALUES ($1, $2, $3, $4)
            RETURNING id, task_id, action, user_id, meta, created_at
            "#,
        )
        .bind(task_id)
        .bind(action)
        .bind(user_id)
        .bind(meta)
        .fetch_one(executor)
        .await?;

        Ok(entry)
    }

    /// Lists all entries for a task, newest first, with actor names
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: Uuid,
    ) -> Result<Vec<HistoryWithActor>, sqlx::Error> {
        let entries = sqlx::query_as::<_, HistoryWithActor>(
            r#"
            SELECT h.id, h.task_id, h.action, h.user_id, h.meta, h.created_at,
                   u.name AS performed_by_name
            FROM task_history h
            LEFT JOIN users u ON h.user_id = u.id
            WHERE h.task_id = $1
            ORDER BY h.created_at DESC, h.id DESC
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }

    /// Counts entries for a task
    pub async fn count_for_task(pool: &PgPool, task_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM task_history WHERE task_id = $1")
                .bind(task_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_with_actor_wire_format() {
        let entry = HistoryWithActor {
            id: Uuid::new_v4(),
            task_id: Uuid::new_v4(),
            action: "Status changed to completed".to_string(),
            user_id: Uuid::new_v4(),
            meta: serde_json::json!({}),
            created_at: Utc::now(),
            performed_by_name: Some("Manager One".to_string()),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["action"], "Status changed to completed");
        assert_eq!(json["performedByName"], "Manager One");
        assert!(json.get("timestamp").is_some());
        assert!(json.get("created_at").is_none());
    }
}
