//! SQLite persistence backend

mod schema;
mod store;

pub use schema::{SCHEMA_VERSION, init_schema};
pub use store::SqliteImageStore;
