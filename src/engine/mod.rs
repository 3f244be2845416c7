// taskcat Engine - Core module structure
pub mod config;
pub mod database;
pub mod logging;
pub mod cli;
pub mod tasks;
pub mod nosql;
pub mod cats;

pub use config::Config;
pub use database::Database;
pub use nosql::NoSqlEngine;
