//! taskcat - task-tracker SQL seeder and cat-records document console

pub mod engine;
