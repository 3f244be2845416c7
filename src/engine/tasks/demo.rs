//! Full setup → seed → query sequence

use rand::Rng;
use serde::Serialize;
use tracing::info;

use super::models::{Task, User};
use super::queries;
use super::schema::create_tables;
use super::seed::{seed_all, SeedError, SeedReport};
use crate::engine::config::SeedConfig;
use crate::engine::database::Database;

pub const DEMO_USER_ID: i64 = 1;
pub const DEMO_TASK_ID: i64 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub seed: SeedReport,
    pub user_id: i64,
    pub user_tasks: Vec<Task>,
    pub new_tasks: Vec<Task>,
    pub task_id: i64,
    pub advanced: bool,
    pub users_without_tasks: Vec<User>,
    pub incomplete_tasks: Vec<Task>,
}

/// Create the schema, seed it and run the five canned queries.
/// Stops at the first failure; whatever was written before it stays.
pub fn run<R: Rng + ?Sized>(
    db: &Database,
    rng: &mut R,
    config: SeedConfig,
) -> Result<DemoReport, SeedError> {
    create_tables(db)?;
    let seed = seed_all(db, rng, config)?;

    let user_tasks = queries::tasks_for_user(db, DEMO_USER_ID)?;
    let new_tasks = queries::new_tasks(db)?;
    let advanced = queries::advance_to_in_progress(db, DEMO_TASK_ID)?;
    let users_without_tasks = queries::users_without_tasks(db)?;
    let incomplete_tasks = queries::incomplete_tasks(db)?;

    info!(
        user_tasks = user_tasks.len(),
        new_tasks = new_tasks.len(),
        idle_users = users_without_tasks.len(),
        incomplete = incomplete_tasks.len(),
        "demo queries finished"
    );

    Ok(DemoReport {
        seed,
        user_id: DEMO_USER_ID,
        user_tasks,
        new_tasks,
        task_id: DEMO_TASK_ID,
        advanced,
        users_without_tasks,
        incomplete_tasks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_demo_on_empty_database() {
        let db = Database::in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        let report = run(&db, &mut rng, SeedConfig { users: 5, tasks: 8 }).unwrap();

        assert_eq!(report.seed.tasks.inserted, 8);
        assert!(report.advanced);
        assert!(report.user_tasks.iter().all(|t| t.user_id == DEMO_USER_ID));
        assert!(report.incomplete_tasks.iter().any(|t| t.id == DEMO_TASK_ID));
    }

    #[test]
    fn test_demo_rerun_adds_tasks_only() {
        let db = Database::in_memory().unwrap();
        let config = SeedConfig { users: 3, tasks: 4 };
        run(&db, &mut StdRng::seed_from_u64(1), config).unwrap();
        let second = run(&db, &mut StdRng::seed_from_u64(1), config).unwrap();

        assert_eq!(second.seed.statuses.inserted, 0);
        assert_eq!(second.seed.users.inserted, 0);
        assert_eq!(db.get_row_count("tasks").unwrap(), 8);
    }
}
