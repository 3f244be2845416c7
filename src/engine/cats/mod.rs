//! Cat records console
//!
//! A menu-driven CRUD front end over one document collection.

pub mod store;
pub mod console;

pub use store::{Cat, CatStore};
pub use console::Console;
