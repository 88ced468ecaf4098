//! BuildHub Storage Layer
//!
//! SQLite-backed key/value settings store. Navigation history and user
//! preferences are kept here as small JSON or scalar values under fixed keys.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
