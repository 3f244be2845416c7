//! Task schema setup

use tracing::info;

use crate::engine::database::{Database, DatabaseError};

pub const TABLES: [&str; 3] = ["users", "status", "tasks"];

const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        fullname VARCHAR(100) NOT NULL,
        email VARCHAR(100) NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS status (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(50) NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title VARCHAR(100) NOT NULL,
        description TEXT NOT NULL,
        status_id INTEGER NOT NULL REFERENCES status(id),
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
    );
";

/// Create the users/status/tasks tables if they are missing.
pub fn create_tables(db: &Database) -> Result<(), DatabaseError> {
    let conn = db.get_connection()?;
    conn.execute_batch(SCHEMA_SQL)?;
    info!("schema ready: {}", TABLES.join(", "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_twice() {
        let db = Database::in_memory().unwrap();
        create_tables(&db).unwrap();
        let first_tables = db.get_tables().unwrap();
        let first_fks = db.get_foreign_keys("tasks").unwrap();

        create_tables(&db).unwrap();
        assert_eq!(db.get_tables().unwrap(), first_tables);
        assert_eq!(db.get_foreign_keys("tasks").unwrap(), first_fks);

        for table in TABLES {
            assert!(first_tables.iter().any(|t| t == table), "missing {}", table);
        }
    }

    #[test]
    fn test_task_relationships() {
        let db = Database::in_memory().unwrap();
        create_tables(&db).unwrap();

        let fks = db.get_foreign_keys("tasks").unwrap();
        assert_eq!(fks.len(), 2);

        let status_fk = fks.iter().find(|fk| fk.from_column == "status_id").unwrap();
        assert_eq!(status_fk.to_table, "status");
        assert_eq!(status_fk.to_column, "id");

        let user_fk = fks.iter().find(|fk| fk.from_column == "user_id").unwrap();
        assert_eq!(user_fk.to_table, "users");
        assert_eq!(user_fk.on_delete, "CASCADE");
    }

    #[test]
    fn test_task_columns() {
        let db = Database::in_memory().unwrap();
        create_tables(&db).unwrap();

        let columns = db.get_table_schema("tasks").unwrap();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "title", "description", "status_id", "user_id"]);
        assert!(columns[0].pk);
        assert!(columns.iter().filter(|c| c.name.ends_with("_id")).all(|c| c.notnull));
    }
}
