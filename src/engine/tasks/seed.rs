//! Seed data generation for the task schema
//!
//! Statuses and users are insert-or-skip: a conflicting row is left alone
//! and the insert reports that nothing was created. Tasks are plain
//! inserts, so every run adds a fresh batch.

use rand::seq::SliceRandom;
use rand::Rng;
use rusqlite::{params, Connection};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::fake::Faker;
use super::models::{NewTask, StatusName};
use crate::engine::config::SeedConfig;
use crate::engine::database::{Database, DatabaseError};

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("SQL execution error: {0}")]
    SqlError(#[from] rusqlite::Error),
    #[error("Cannot seed tasks: no {0} to assign")]
    EmptyPool(&'static str),
}

/// Attempted vs actually created rows for one seeding step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InsertReport {
    pub attempted: usize,
    pub inserted: usize,
}

impl InsertReport {
    pub fn skipped(&self) -> usize {
        self.attempted - self.inserted
    }

    fn record(&mut self, created: bool) {
        self.attempted += 1;
        if created {
            self.inserted += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub statuses: InsertReport,
    pub users: InsertReport,
    pub tasks: InsertReport,
}

/// Insert a status unless the name is already taken. Returns whether a row was created.
pub fn insert_status(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "INSERT INTO status (name) VALUES (?1) ON CONFLICT DO NOTHING",
        params![name],
    )?;
    Ok(changed == 1)
}

/// Insert a user unless the email is already taken. Returns whether a row was created.
pub fn insert_user(conn: &Connection, fullname: &str, email: &str) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "INSERT INTO users (fullname, email) VALUES (?1, ?2) ON CONFLICT DO NOTHING",
        params![fullname, email],
    )?;
    Ok(changed == 1)
}

/// Insert a task and return its id.
pub fn insert_task(conn: &Connection, task: &NewTask) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO tasks (title, description, status_id, user_id) VALUES (?1, ?2, ?3, ?4)",
        params![task.title, task.description, task.status_id, task.user_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn seed_statuses(db: &Database) -> Result<InsertReport, SeedError> {
    let conn = db.get_connection()?;
    let mut report = InsertReport::default();
    for status in StatusName::ALL {
        let created = insert_status(&conn, status.as_str())?;
        debug!(status = status.as_str(), created, "status insert");
        report.record(created);
    }
    info!(inserted = report.inserted, skipped = report.skipped(), "statuses seeded");
    Ok(report)
}

pub fn seed_users<R: Rng + ?Sized>(
    db: &Database,
    rng: &mut R,
    count: usize,
) -> Result<InsertReport, SeedError> {
    let conn = db.get_connection()?;
    let mut fake = Faker::new(rng);
    let mut report = InsertReport::default();
    for _ in 0..count {
        let fullname = fake.name();
        let email = fake.email();
        let created = insert_user(&conn, &fullname, &email)?;
        debug!(%email, created, "user insert");
        report.record(created);
    }
    info!(inserted = report.inserted, skipped = report.skipped(), "users seeded");
    Ok(report)
}

pub fn seed_tasks<R: Rng + ?Sized>(
    db: &Database,
    rng: &mut R,
    count: usize,
) -> Result<InsertReport, SeedError> {
    let conn = db.get_connection()?;
    let user_ids = select_ids(&conn, "SELECT id FROM users ORDER BY id")?;
    let status_ids = select_ids(&conn, "SELECT id FROM status ORDER BY id")?;

    if count > 0 && user_ids.is_empty() {
        return Err(SeedError::EmptyPool("users"));
    }
    if count > 0 && status_ids.is_empty() {
        return Err(SeedError::EmptyPool("statuses"));
    }

    let mut report = InsertReport::default();
    for _ in 0..count {
        let mut fake = Faker::new(&mut *rng);
        let title = fake.sentence(6);
        let description = fake.text(200);
        let task = NewTask {
            title,
            description,
            status_id: *status_ids.choose(&mut *rng).ok_or(SeedError::EmptyPool("statuses"))?,
            user_id: *user_ids.choose(&mut *rng).ok_or(SeedError::EmptyPool("users"))?,
        };
        let id = insert_task(&conn, &task)?;
        debug!(id, user_id = task.user_id, status_id = task.status_id, "task insert");
        report.record(true);
    }
    info!(inserted = report.inserted, "tasks seeded");
    Ok(report)
}

/// Run all three seeding steps in order. Each step commits on its own.
pub fn seed_all<R: Rng + ?Sized>(
    db: &Database,
    rng: &mut R,
    config: SeedConfig,
) -> Result<SeedReport, SeedError> {
    let statuses = seed_statuses(db)?;
    let users = seed_users(db, rng, config.users)?;
    let tasks = seed_tasks(db, rng, config.tasks)?;
    Ok(SeedReport { statuses, users, tasks })
}

fn select_ids(conn: &Connection, sql: &str) -> rusqlite::Result<Vec<i64>> {
    let mut stmt = conn.prepare(sql)?;
    let ids = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<i64>, _>>()?;
    Ok(ids)
}
