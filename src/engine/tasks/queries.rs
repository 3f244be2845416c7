//! Canned access patterns over the task schema

use rusqlite::{params, Connection, Params};
use tracing::debug;

use super::models::{Status, StatusName, Task, User};
use crate::engine::database::{Database, DatabaseError};

const TASK_COLUMNS: &str = "id, title, description, status_id, user_id";

/// All tasks owned by `user_id`.
pub fn tasks_for_user(db: &Database, user_id: i64) -> Result<Vec<Task>, DatabaseError> {
    let conn = db.get_connection()?;
    query_tasks(
        &conn,
        &format!("SELECT {} FROM tasks WHERE user_id = ?1 ORDER BY id", TASK_COLUMNS),
        params![user_id],
    )
}

/// All tasks whose status carries the given name.
pub fn tasks_with_status(db: &Database, status: StatusName) -> Result<Vec<Task>, DatabaseError> {
    let conn = db.get_connection()?;
    query_tasks(
        &conn,
        &format!(
            "SELECT {} FROM tasks WHERE status_id = (SELECT id FROM status WHERE name = ?1) ORDER BY id",
            TASK_COLUMNS
        ),
        params![status.as_str()],
    )
}

pub fn new_tasks(db: &Database) -> Result<Vec<Task>, DatabaseError> {
    tasks_with_status(db, StatusName::New)
}

/// Move a task to "in progress". Returns false when no task has that id.
pub fn advance_to_in_progress(db: &Database, task_id: i64) -> Result<bool, DatabaseError> {
    let conn = db.get_connection()?;
    let changed = conn.execute(
        "UPDATE tasks SET status_id = (SELECT id FROM status WHERE name = ?1) WHERE id = ?2",
        params![StatusName::InProgress.as_str(), task_id],
    )?;
    debug!(task_id, changed, "advance to in progress");
    Ok(changed > 0)
}

/// Users that no task references.
pub fn users_without_tasks(db: &Database) -> Result<Vec<User>, DatabaseError> {
    let conn = db.get_connection()?;
    let mut stmt = conn.prepare(
        "SELECT id, fullname, email FROM users
         WHERE id NOT IN (SELECT DISTINCT user_id FROM tasks)
         ORDER BY id",
    )?;
    let users = stmt
        .query_map([], User::from_row)?
        .collect::<Result<Vec<User>, _>>()?;
    Ok(users)
}

/// Tasks whose status is anything other than "completed".
pub fn incomplete_tasks(db: &Database) -> Result<Vec<Task>, DatabaseError> {
    let conn = db.get_connection()?;
    query_tasks(
        &conn,
        &format!(
            "SELECT {} FROM tasks WHERE status_id != (SELECT id FROM status WHERE name = ?1) ORDER BY id",
            TASK_COLUMNS
        ),
        params![StatusName::Completed.as_str()],
    )
}

pub fn list_users(db: &Database) -> Result<Vec<User>, DatabaseError> {
    let conn = db.get_connection()?;
    let mut stmt = conn.prepare("SELECT id, fullname, email FROM users ORDER BY id")?;
    let users = stmt
        .query_map([], User::from_row)?
        .collect::<Result<Vec<User>, _>>()?;
    Ok(users)
}

pub fn list_statuses(db: &Database) -> Result<Vec<Status>, DatabaseError> {
    let conn = db.get_connection()?;
    let mut stmt = conn.prepare("SELECT id, name FROM status ORDER BY id")?;
    let statuses = stmt
        .query_map([], Status::from_row)?
        .collect::<Result<Vec<Status>, _>>()?;
    Ok(statuses)
}

pub fn get_task(db: &Database, task_id: i64) -> Result<Option<Task>, DatabaseError> {
    let conn = db.get_connection()?;
    let mut tasks = query_tasks(
        &conn,
        &format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS),
        params![task_id],
    )?;
    Ok(tasks.pop())
}

fn query_tasks<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Task>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let tasks = stmt
        .query_map(params, Task::from_row)?
        .collect::<Result<Vec<Task>, _>>()?;
    Ok(tasks)
}
