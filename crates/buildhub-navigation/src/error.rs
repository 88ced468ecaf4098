//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown core tab: {0}")]
    UnknownCoreTab(String),

    #[error("Role {role} may not open category {category}")]
    Forbidden { role: String, category: String },

    #[error("Navigation does not match the registry: {0}")]
    InvalidNavigation(String),

    #[error("Router error: {0}")]
    Router(#[from] crate::address_bar::RouterError),

    #[error("Storage error: {0}")]
    Storage(#[from] buildhub_storage::StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
