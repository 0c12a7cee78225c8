//! Task configuration loading and schema definitions
//!
//! A task is the authored, static description of one essay exercise.

mod loader;
mod schema;

pub use loader::{Task, TaskFormat};
pub use schema::*;
