//! Registry error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid registry document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),

    #[error("Tool {tool} registered under both {first} and {second}")]
    DuplicateTool {
        tool: String,
        first: String,
        second: String,
    },

    #[error("Role {role} references unknown category: {category}")]
    UnknownCategory { role: String, category: String },
}
