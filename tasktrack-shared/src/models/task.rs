/// Task model and lifecycle operations
///
/// Tasks are the core entity of TaskTrack. A task belongs to its creator,
/// optionally references an assignee and a category, and moves through the
/// lifecycle `open` → `in-progress` → `completed`. That path is the
/// recommended one only: any authenticated actor may set any of the three
/// statuses directly, so there is no transition table to enforce.
///
/// Every mutation that records history (create, status update, reassign)
/// runs in one transaction with its ledger append: if the history write
/// fails, the mutation rolls back. General field edits record no history;
/// the asymmetry is deliberate.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     priority task_priority NOT NULL,
///     status task_status NOT NULL DEFAULT 'open',
///     due_date DATE,
///     assignee_id UUID,
///     created_by UUID NOT NULL,
///     category_id UUID,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// References to users and categories are soft: no foreign keys, no
/// cascades. Deleting a referenced user or category leaves the id behind.
///
/// # Example
///
/// ```no_run
/// use tasktrack_shared::models::task::{NewTask, Task, TaskPriority, TaskStatus};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, actor_id: Uuid) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, NewTask {
///     title: "Fix login bug".to_string(),
///     description: "Fix redirect after login".to_string(),
///     priority: TaskPriority::High,
///     due_date: None,
///     assignee_id: None,
///     category_id: None,
/// }, actor_id).await?;
///
/// assert_eq!(task.status, TaskStatus::Open);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use super::history::HistoryEntry;

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Newly created, not yet started
    Open,

    /// Being worked on
    InProgress,

    /// Done
    Completed,
}

impl TaskStatus {
    /// Converts status to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// Converts priority to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Title (required, non-empty)
    pub title: String,

    /// Free-form description (defaults to empty)
    pub description: String,

    /// Priority
    pub priority: TaskPriority,

    /// Lifecycle status
    pub status: TaskStatus,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Current assignee (soft reference, may dangle)
    pub assignee_id: Option<Uuid>,

    /// Creator (immutable after creation)
    pub created_by: Uuid,

    /// Category (soft reference, may dangle)
    pub category_id: Option<Uuid>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Task row joined with assignee and category display fields for listing
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithRefs {
    /// Unique task ID
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Description
    pub description: String,

    /// Priority
    pub priority: TaskPriority,

    /// Status
    pub status: TaskStatus,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Current assignee id
    pub assignee_id: Option<Uuid>,

    /// Creator id
    pub created_by: Uuid,

    /// Category id
    pub category_id: Option<Uuid>,

    /// Assignee display name (null if unassigned or user deleted)
    pub assignee_name: Option<String>,

    /// Assignee email (null if unassigned or user deleted)
    pub assignee_email: Option<String>,

    /// Category name (null if uncategorized or category deleted)
    pub category_name: Option<String>,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a task
///
/// The assignee must already be resolved to an id; email resolution (and
/// the AssigneeNotFound failure) happens at the API boundary before any
/// write.
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Title
    pub title: String,

    /// Description (empty string if the caller supplied none)
    pub description: String,

    /// Priority
    pub priority: TaskPriority,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Optional resolved assignee
    pub assignee_id: Option<Uuid>,

    /// Optional category
    pub category_id: Option<Uuid>,
}

/// Partial field edit
///
/// Null-coalescing semantics: an absent field keeps the prior value. A
/// field cannot be cleared through an edit.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New due date
    pub due_date: Option<NaiveDate>,

    /// New category
    pub category_id: Option<Uuid>,
}

impl Task {
    /// Creates a task in the `open` state and records a "Task created"
    /// history entry, both in one transaction
    pub async fn create(pool: &PgPool, data: NewTask, actor_id: Uuid) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, priority, due_date, assignee_id, created_by, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, priority, status, due_date,
                      assignee_id, created_by, category_id, created_at, updated_at
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.priority)
        .bind(data.due_date)
        .bind(data.assignee_id)
        .bind(actor_id)
        .bind(data.category_id)
        .fetch_one(&mut *tx)
        .await?;

        HistoryEntry::append(
            &mut *tx,
            task.id,
            "Task created",
            actor_id,
            json!({
                "priority": data.priority.as_str(),
                "assigneeId": data.assignee_id,
                "categoryId": data.category_id,
            }),
        )
        .await?;

        tx.commit().await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, priority, status, due_date,
                   assignee_id, created_by, category_id, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks joined with assignee and category display fields,
    /// newest first
    ///
    /// `assignee_filter` carries the actor's visibility scope: `Some(id)`
    /// restricts the result to tasks assigned to that user (members see
    /// only their own work), `None` returns everything.
    pub async fn list(
        pool: &PgPool,
        assignee_filter: Option<Uuid>,
    ) -> Result<Vec<TaskWithRefs>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskWithRefs>(
            r#"
            SELECT t.id, t.title, t.description, t.priority, t.status, t.due_date,
                   t.assignee_id, t.created_by, t.category_id,
                   u.name AS assignee_name, u.email AS assignee_email,
                   c.name AS category_name,
                   t.created_at
            FROM tasks t
            LEFT JOIN users u ON t.assignee_id = u.id
            LEFT JOIN categories c ON t.category_id = c.id
            WHERE ($1::uuid IS NULL OR t.assignee_id = $1)
            ORDER BY t.created_at DESC, t.id DESC
            "#,
        )
        .bind(assignee_filter)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Sets the task's status and records a history entry
    ///
    /// Any status value is accepted regardless of the current one; calling
    /// this twice with the same status leaves the task unchanged but
    /// records two entries; history is not deduplicated.
    ///
    /// # Returns
    ///
    /// True if the task existed; false leaves no history behind.
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: TaskStatus,
        actor_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("UPDATE tasks SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        HistoryEntry::append(
            &mut *tx,
            id,
            &format!("Status changed to {}", status.as_str()),
            actor_id,
            json!({}),
        )
        .await?;

        tx.commit().await?;

        Ok(true)
    }

    /// Reassigns the task and records a history entry
    ///
    /// The assignee must already be resolved to an existing user id; email
    /// resolution happens at the API boundary.
    pub async fn reassign(
        pool: &PgPool,
        id: Uuid,
        assignee_id: Uuid,
        actor_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result =
            sqlx::query("UPDATE tasks SET assignee_id = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(assignee_id)
                .execute(&mut *tx)
                .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        HistoryEntry::append(
            &mut *tx,
            id,
            "Reassigned",
            actor_id,
            json!({ "assigneeId": assignee_id }),
        )
        .await?;

        tx.commit().await?;

        Ok(true)
    }

    /// Applies a partial edit, keeping any field the edit leaves absent
    ///
    /// Authorization (admin or current assignee) is the caller's
    /// responsibility via the policy; this operation records no history
    /// entry, unlike the other mutations.
    ///
    /// # Returns
    ///
    /// The updated task, or None if it does not exist
    pub async fn edit(pool: &PgPool, id: Uuid, data: TaskEdit) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                due_date = COALESCE($5, due_date),
                category_id = COALESCE($6, category_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, priority, status, due_date,
                      assignee_id, created_by, category_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.priority)
        .bind(data.due_date)
        .bind(data.category_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// History rows for the task are kept.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
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
    fn test_status_wire_strings() {
        assert_eq!(TaskStatus::Open.as_str(), "open");
        assert_eq!(TaskStatus::InProgress.as_str(), "in-progress");
        assert_eq!(TaskStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_status_serde_kebab_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"in-progress\"").unwrap(),
            TaskStatus::InProgress
        );
        assert!(serde_json::from_str::<TaskStatus>("\"archived\"").is_err());
    }

    #[test]
    fn test_priority_serde_lowercase() {
        assert_eq!(serde_json::to_string(&TaskPriority::High).unwrap(), "\"high\"");
        assert!(serde_json::from_str::<TaskPriority>("\"urgent\"").is_err());
    }

    #[test]
    fn test_task_edit_default_changes_nothing() {
        let edit = TaskEdit::default();
        assert!(edit.title.is_none());
        assert!(edit.description.is_none());
        assert!(edit.priority.is_none());
        assert!(edit.due_date.is_none());
        assert!(edit.category_id.is_none());
    }

    // Integration tests for lifecycle operations are in tests/store_tests.rs
}
