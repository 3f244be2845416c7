//! Task tracker schema
//!
//! Three related tables (`users`, `status`, `tasks`), a seeder that fills
//! them with synthetic rows, and the canned queries run against them.

pub mod models;
pub mod schema;
pub mod fake;
pub mod seed;
pub mod queries;
pub mod demo;

pub use models::{NewTask, Status, StatusName, Task, User};
pub use seed::{InsertReport, SeedError, SeedReport};
pub use demo::DemoReport;
