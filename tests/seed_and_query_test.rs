use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use taskcat_lib::engine::config::SeedConfig;
use taskcat_lib::engine::database::Database;
use taskcat_lib::engine::tasks::{queries, schema, seed, NewTask, StatusName};

fn seeded(users: usize, tasks: usize, rng_seed: u64) -> Result<Database, Box<dyn std::error::Error>> {
    let db = Database::in_memory()?;
    schema::create_tables(&db)?;
    seed::seed_all(&db, &mut StdRng::seed_from_u64(rng_seed), SeedConfig { users, tasks })?;
    Ok(db)
}

#[test]
fn test_setup_and_status_seed_are_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::in_memory()?;
    schema::create_tables(&db)?;
    schema::create_tables(&db)?;
    assert_eq!(db.get_tables()?, ["status", "tasks", "users"]);

    seed::seed_statuses(&db)?;
    seed::seed_statuses(&db)?;
    let names: HashSet<String> = queries::list_statuses(&db)?.into_iter().map(|s| s.name).collect();
    assert_eq!(names.len(), 3);
    for status in StatusName::ALL {
        assert!(names.contains(status.as_str()));
    }
    Ok(())
}

#[test]
fn test_user_emails_stay_unique_across_runs() -> Result<(), Box<dyn std::error::Error>> {
    let db = seeded(10, 0, 77)?;
    // Same seed means the second run proposes exactly the same emails.
    let rerun = seed::seed_users(&db, &mut StdRng::seed_from_u64(77), 10)?;
    assert_eq!(rerun.inserted, 0);
    seed::seed_users(&db, &mut StdRng::seed_from_u64(78), 10)?;

    let users = queries::list_users(&db)?;
    let emails: HashSet<&str> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails.len(), users.len());
    for email in &emails {
        let (local, domain) = email.split_once('@').expect("email has @");
        assert!(!local.is_empty() && domain.contains('.'));
    }
    Ok(())
}

#[test]
fn test_task_seeding_is_additive() -> Result<(), Box<dyn std::error::Error>> {
    let db = seeded(5, 20, 1)?;
    assert_eq!(db.get_row_count("tasks")?, 20);

    let report = seed::seed_tasks(&db, &mut StdRng::seed_from_u64(2), 20)?;
    assert_eq!(report.inserted, 20);
    assert_eq!(db.get_row_count("tasks")?, 40);
    Ok(())
}

#[test]
fn test_tasks_reference_existing_rows() -> Result<(), Box<dyn std::error::Error>> {
    let db = seeded(6, 30, 3)?;
    let user_ids: HashSet<i64> = queries::list_users(&db)?.into_iter().map(|u| u.id).collect();
    let status_ids: HashSet<i64> = queries::list_statuses(&db)?.into_iter().map(|s| s.id).collect();

    let conn = db.get_connection()?;
    let mut stmt = conn.prepare("SELECT user_id, status_id FROM tasks")?;
    let pairs = stmt
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(pairs.len(), 30);
    for (user_id, status_id) in pairs {
        assert!(user_ids.contains(&user_id));
        assert!(status_ids.contains(&status_id));
    }
    Ok(())
}

#[test]
fn test_dangling_references_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let db = seeded(1, 0, 4)?;
    let conn = db.get_connection()?;
    let bad_user = NewTask {
        title: "Orphan".into(),
        description: "No owner".into(),
        status_id: 1,
        user_id: 999,
    };
    assert!(seed::insert_task(&conn, &bad_user).is_err());
    Ok(())
}

#[test]
fn test_tasks_for_user_matches_table() -> Result<(), Box<dyn std::error::Error>> {
    let db = seeded(8, 25, 5)?;
    for user in queries::list_users(&db)? {
        let expected = db
            .get_connection()?
            .query_row("SELECT COUNT(*) FROM tasks WHERE user_id = ?1", [user.id], |row| row.get::<_, i64>(0))?;
        let tasks = queries::tasks_for_user(&db, user.id)?;
        assert_eq!(tasks.len() as i64, expected);
        assert!(tasks.iter().all(|t| t.user_id == user.id));
    }
    assert!(queries::tasks_for_user(&db, -1)?.is_empty());
    Ok(())
}

#[test]
fn test_users_without_tasks_shrinks_on_insert() -> Result<(), Box<dyn std::error::Error>> {
    let db = seeded(10, 0, 6)?;
    let idle = queries::users_without_tasks(&db)?;
    assert_eq!(idle.len(), queries::list_users(&db)?.len());

    let target = idle[0].id;
    {
        let conn = db.get_connection()?;
        seed::insert_task(
            &conn,
            &NewTask {
                title: "Feed the cat".into(),
                description: "Twice a day".into(),
                status_id: 1,
                user_id: target,
            },
        )?;
    }

    let idle_after = queries::users_without_tasks(&db)?;
    assert_eq!(idle_after.len(), idle.len() - 1);
    assert!(idle_after.iter().all(|u| u.id != target));
    Ok(())
}

#[test]
fn test_advanced_task_counts_as_incomplete() -> Result<(), Box<dyn std::error::Error>> {
    let db = seeded(3, 10, 8)?;
    for task_id in 1..=10 {
        assert!(queries::advance_to_in_progress(&db, task_id)?);
        let open = queries::incomplete_tasks(&db)?;
        assert!(open.iter().any(|t| t.id == task_id));
    }
    assert!(queries::tasks_with_status(&db, StatusName::Completed)?.is_empty());
    assert_eq!(queries::tasks_with_status(&db, StatusName::InProgress)?.len(), 10);
    Ok(())
}

#[test]
fn test_deleting_user_cascades_to_tasks() -> Result<(), Box<dyn std::error::Error>> {
    let db = seeded(2, 12, 9)?;
    let owned = queries::tasks_for_user(&db, 1)?.len() as u64;
    let before = db.get_row_count("tasks")?;

    db.get_connection()?.execute("DELETE FROM users WHERE id = 1", [])?;

    assert!(queries::tasks_for_user(&db, 1)?.is_empty());
    assert_eq!(db.get_row_count("tasks")?, before - owned);
    Ok(())
}
