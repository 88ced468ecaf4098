//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] buildhub_storage::StorageError),

    #[error("Registry error: {0}")]
    Registry(#[from] buildhub_registry::RegistryError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] buildhub_navigation::NavigationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
