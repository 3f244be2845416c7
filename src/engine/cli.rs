//! taskcat CLI Module
//! Command-line interfaces for the seeder and the cat console

pub mod formatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::tasks::StatusName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "taskcat-seed")]
#[command(version)]
#[command(about = "Create, seed and query the users/status/tasks schema", long_about = None)]
pub struct SeedCli {
    /// Project directory holding taskcat.config.json (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// SQLite database file, overriding the config (relative to the project directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Output format (json for scripting)
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Subcommand, Debug)]
pub enum SeedCommand {
    /// Write a default taskcat.config.json
    Init,

    /// Create the tables if they do not exist
    Setup,

    /// Insert statuses, users and tasks
    Seed {
        /// Users to generate
        #[arg(long)]
        users: Option<usize>,

        /// Tasks to generate
        #[arg(long)]
        tasks: Option<usize>,
    },

    /// Run one of the canned queries
    Query {
        #[command(subcommand)]
        action: QueryAction,
    },

    /// Show tables and row counts
    Status,

    /// Setup, seed and run every query
    Run {
        /// Users to generate
        #[arg(long)]
        users: Option<usize>,

        /// Tasks to generate
        #[arg(long)]
        tasks: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum QueryAction {
    /// Tasks owned by a user
    UserTasks {
        user_id: i64,
    },

    /// Tasks with a given status
    ByStatus {
        #[arg(value_enum, default_value = "new")]
        status: StatusName,
    },

    /// Move a task to "in progress"
    Advance {
        task_id: i64,
    },

    /// Users without any task
    IdleUsers,

    /// Tasks that are not completed
    OpenTasks,
}

#[derive(Parser, Debug)]
#[command(name = "taskcat-cats")]
#[command(version)]
#[command(about = "Interactive CRUD menu over the cat records collection", long_about = None)]
pub struct CatsCli {
    /// Project directory holding taskcat.config.json (defaults to current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Directory holding document databases, overriding the config (relative to the project directory)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn project_dir(project: &Option<PathBuf>) -> PathBuf {
    project
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

impl SeedCli {
    pub fn get_project_dir(&self) -> PathBuf {
        project_dir(&self.project)
    }
}

impl CatsCli {
    pub fn get_project_dir(&self) -> PathBuf {
        project_dir(&self.project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definitions_are_valid() {
        SeedCli::command().debug_assert();
        CatsCli::command().debug_assert();
    }

    #[test]
    fn test_parse_seed_flags() {
        let cli = SeedCli::parse_from(["taskcat-seed", "--format", "json", "seed", "--users", "3"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, SeedCommand::Seed { users: Some(3), tasks: None }));
    }

    #[test]
    fn test_parse_queries() {
        let cli = SeedCli::parse_from(["taskcat-seed", "query", "by-status"]);
        assert!(matches!(
            cli.command,
            SeedCommand::Query { action: QueryAction::ByStatus { status: StatusName::New } }
        ));

        let cli = SeedCli::parse_from(["taskcat-seed", "query", "by-status", "in-progress"]);
        assert!(matches!(
            cli.command,
            SeedCommand::Query { action: QueryAction::ByStatus { status: StatusName::InProgress } }
        ));

        let cli = SeedCli::parse_from(["taskcat-seed", "-p", "/tmp/x", "query", "advance", "4"]);
        assert_eq!(cli.get_project_dir(), PathBuf::from("/tmp/x"));
        assert!(matches!(cli.command, SeedCommand::Query { action: QueryAction::Advance { task_id: 4 } }));
    }

    #[test]
    fn test_parse_cats() {
        let cli = CatsCli::parse_from(["taskcat-cats", "--data-dir", "/var/cats", "-vv"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/var/cats")));
        assert_eq!(cli.verbose, 2);
    }
}
