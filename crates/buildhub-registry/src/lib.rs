//! BuildHub Navigation Registry
//!
//! The static catalog the navigation engine validates against:
//! - Categories, each owning a set of tools
//! - Tools, each offering sub-tools (always including `overview`)
//! - Core tabs, a navigation mode orthogonal to categories
//! - Role access rules mapping a role to the categories it may open

mod catalog;
mod error;
mod registry;

pub use error::RegistryError;
pub use registry::{Category, CoreTab, Registry, RoleAccess, Tool, ALL_CATEGORIES};

pub type Result<T> = std::result::Result<T, RegistryError>;
