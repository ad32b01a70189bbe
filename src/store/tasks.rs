//! Owner-scoped task persistence.
//!
//! Every function here takes the owner's id as a mandatory parameter and
//! every statement filters (or sets) `owner_id` accordingly. No unfiltered
//! task query exists anywhere in the crate, so a handler physically cannot
//! read or write another user's tasks. A task belonging to someone else looks
//! exactly like a task that does not exist: `None` / zero rows.

use crate::error::AppError;
use crate::models::{Task, TaskUpdate};
use sqlx::PgPool;
use uuid::Uuid;

/// All tasks belonging to `owner`, newest first.
pub async fn list(pool: &PgPool, owner: i32) -> Result<Vec<Task>, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, owner_id, created_at, updated_at
         FROM tasks WHERE owner_id = $1
         ORDER BY created_at DESC",
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Inserts a task built by `Task::new`; `owner_id` was already set from the
/// authenticated identity there.
pub async fn create(pool: &PgPool, task: &Task) -> Result<Task, AppError> {
    let created = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (id, title, description, owner_id)
         VALUES ($1, $2, $3, $4)
         RETURNING id, title, description, owner_id, created_at, updated_at",
    )
    .bind(task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.owner_id)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Fetches a single task, `None` if absent or owned by someone else.
pub async fn find(pool: &PgPool, id: Uuid, owner: i32) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, owner_id, created_at, updated_at
         FROM tasks WHERE id = $1 AND owner_id = $2",
    )
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Applies a partial update; fields left out of `update` keep their stored
/// values. Returns `None` if the task is absent or owned by someone else.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    owner: i32,
    update: &TaskUpdate,
) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "UPDATE tasks
         SET title = COALESCE($3, title),
             description = COALESCE($4, description),
             updated_at = now()
         WHERE id = $1 AND owner_id = $2
         RETURNING id, title, description, owner_id, created_at, updated_at",
    )
    .bind(id)
    .bind(owner)
    .bind(&update.title)
    .bind(&update.description)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Deletes a task; `false` if absent or owned by someone else.
pub async fn delete(pool: &PgPool, id: Uuid, owner: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
