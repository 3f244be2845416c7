//! taskcat-seed - create, seed and query the task schema

use anyhow::Context;
use clap::Parser;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};

use taskcat_lib::engine::{
    cli::formatter::{truncate, Printer},
    cli::{OutputFormat, QueryAction, SeedCli, SeedCommand},
    config::{Config, SeedConfig},
    database::Database,
    logging,
    tasks::{demo, queries, schema, seed, DemoReport, SeedReport, Task, User},
};

fn main() {
    let cli = SeedCli::parse();
    logging::init(logging::level_for(cli.verbose));

    if let Err(e) = run_cli(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_cli(cli: SeedCli) -> anyhow::Result<()> {
    let project_dir = cli.get_project_dir();
    let json = cli.format == OutputFormat::Json;
    let mut out = Printer::stdout();

    match cli.command {
        SeedCommand::Init => cmd_init(&project_dir, json, &mut out)?,
        SeedCommand::Setup => {
            let project = open_project(&project_dir, cli.db)?;
            schema::create_tables(&project.db)?;
            if json {
                println!("{}", serde_json::json!({ "success": true, "tables": schema::TABLES }));
            } else {
                out.success(&format!("Tables ready: {}", schema::TABLES.join(", ")))?;
            }
        }
        SeedCommand::Seed { users, tasks } => {
            let project = open_project(&project_dir, cli.db)?;
            let counts = seed_counts(project.config.seed, users, tasks);
            let report = seed::seed_all(&project.db, &mut rand::thread_rng(), counts)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_seed_report(&mut out, &report)?;
            }
        }
        SeedCommand::Query { action } => {
            let project = open_project(&project_dir, cli.db)?;
            cmd_query(&project.db, action, json, &mut out)?;
        }
        SeedCommand::Status => {
            let project = open_project(&project_dir, cli.db)?;
            cmd_status(&project.db, &project.db_path, json, &mut out)?;
        }
        SeedCommand::Run { users, tasks } => {
            let project = open_project(&project_dir, cli.db)?;
            let counts = seed_counts(project.config.seed, users, tasks);
            let report = demo::run(&project.db, &mut rand::thread_rng(), counts)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_demo_report(&mut out, &report)?;
            }
        }
    }

    Ok(())
}

struct Project {
    config: Config,
    db: Database,
    db_path: PathBuf,
}

fn open_project(project_dir: &Path, db_override: Option<PathBuf>) -> anyhow::Result<Project> {
    let config = Config::load_or_default(project_dir)?;
    let db_path = config.database_path(project_dir, db_override.as_deref());
    let db = Database::new(&db_path)
        .with_context(|| format!("opening database {}", db_path.display()))?;
    Ok(Project { config, db, db_path })
}

fn seed_counts(base: SeedConfig, users: Option<usize>, tasks: Option<usize>) -> SeedConfig {
    SeedConfig {
        users: users.unwrap_or(base.users),
        tasks: tasks.unwrap_or(base.tasks),
    }
}

fn cmd_init(project_dir: &Path, json: bool, out: &mut Printer<Stdout>) -> anyhow::Result<()> {
    let path = Config::default().save(project_dir)?;
    if json {
        println!("{}", serde_json::json!({ "success": true, "config": path.display().to_string() }));
    } else {
        out.success(&format!("Wrote {}", path.display()))?;
    }
    Ok(())
}

fn cmd_query(db: &Database, action: QueryAction, json: bool, out: &mut Printer<Stdout>) -> anyhow::Result<()> {
    match action {
        QueryAction::UserTasks { user_id } => {
            let tasks = queries::tasks_for_user(db, user_id)?;
            emit_tasks(out, json, &format!("Tasks of user {}", user_id), &tasks)?;
        }
        QueryAction::ByStatus { status } => {
            let tasks = queries::tasks_with_status(db, status)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "status": status, "tasks": tasks }))?);
            } else {
                print_tasks(out, &format!("Tasks with status '{}'", status), &tasks)?;
            }
        }
        QueryAction::Advance { task_id } => {
            let updated = queries::advance_to_in_progress(db, task_id)?;
            if json {
                println!("{}", serde_json::json!({ "task_id": task_id, "updated": updated }));
            } else if updated {
                out.success(&format!("Task {} is now in progress", task_id))?;
            } else {
                out.warning(&format!("Task {} not found", task_id))?;
            }
        }
        QueryAction::IdleUsers => {
            let users = queries::users_without_tasks(db)?;
            emit_users(out, json, "Users without tasks", &users)?;
        }
        QueryAction::OpenTasks => {
            let tasks = queries::incomplete_tasks(db)?;
            emit_tasks(out, json, "Tasks not completed", &tasks)?;
        }
    }
    Ok(())
}

fn cmd_status(db: &Database, db_path: &Path, json: bool, out: &mut Printer<Stdout>) -> anyhow::Result<()> {
    let tables = db.get_tables()?;
    let mut counts = Vec::new();
    for table in schema::TABLES {
        if tables.iter().any(|t| t == table) {
            counts.push((table, Some(db.get_row_count(table)?)));
        } else {
            counts.push((table, None));
        }
    }

    if json {
        let rows: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(table, count)| (table.to_string(), serde_json::json!(count)))
            .collect();
        println!("{}", serde_json::json!({
            "database": db_path.display().to_string(),
            "tables": tables,
            "rows": rows,
        }));
    } else {
        out.header("taskcat status")?;
        out.kv("Database", &db_path.display().to_string())?;
        for (table, count) in counts {
            let value = count.map_or_else(|| "(missing)".to_string(), |c| c.to_string());
            out.kv(table, &value)?;
        }
    }
    Ok(())
}

fn emit_tasks(out: &mut Printer<Stdout>, json: bool, title: &str, tasks: &[Task]) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
    } else {
        print_tasks(out, title, tasks)?;
    }
    Ok(())
}

fn emit_users(out: &mut Printer<Stdout>, json: bool, title: &str, users: &[User]) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(users)?);
    } else {
        print_users(out, title, users)?;
    }
    Ok(())
}

fn print_tasks(out: &mut Printer<Stdout>, title: &str, tasks: &[Task]) -> io::Result<()> {
    out.header(&format!("{} ({})", title, tasks.len()))?;
    if tasks.is_empty() {
        return out.item("(none)");
    }
    out.table_header(&["id", "user", "status", "title"])?;
    for task in tasks {
        out.table_row(&[
            &task.id.to_string(),
            &task.user_id.to_string(),
            &task.status_id.to_string(),
            &truncate(&task.title, 60),
        ])?;
    }
    Ok(())
}

fn print_users(out: &mut Printer<Stdout>, title: &str, users: &[User]) -> io::Result<()> {
    out.header(&format!("{} ({})", title, users.len()))?;
    if users.is_empty() {
        return out.item("(none)");
    }
    out.table_header(&["id", "fullname", "email"])?;
    for user in users {
        out.table_row(&[&user.id.to_string(), &user.fullname, &user.email])?;
    }
    Ok(())
}

fn print_seed_report(out: &mut Printer<Stdout>, report: &SeedReport) -> io::Result<()> {
    out.header("Seeded")?;
    for (label, step) in [("statuses", report.statuses), ("users", report.users), ("tasks", report.tasks)] {
        out.kv(label, &format!("{} inserted, {} skipped", step.inserted, step.skipped()))?;
    }
    Ok(())
}

fn print_demo_report(out: &mut Printer<Stdout>, report: &DemoReport) -> io::Result<()> {
    print_seed_report(out, &report.seed)?;
    print_tasks(out, &format!("Tasks of user {}", report.user_id), &report.user_tasks)?;
    print_tasks(out, "Tasks with status 'new'", &report.new_tasks)?;
    out.blank()?;
    if report.advanced {
        out.success(&format!("Task {} is now in progress", report.task_id))?;
    } else {
        out.warning(&format!("Task {} not found", report.task_id))?;
    }
    print_users(out, "Users without tasks", &report.users_without_tasks)?;
    print_tasks(out, "Tasks not completed", &report.incomplete_tasks)
}
