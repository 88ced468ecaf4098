//! BuildHub Core
//!
//! Coordination layer for the BuildHub dashboard: configuration, the
//! `Dashboard` container and logging setup.

mod config;
mod dashboard;
mod error;

pub use config::{AnimationConfig, Config, HistoryConfig, UrlConfig};
pub use dashboard::{Dashboard, ANIMATIONS_SETTING};
pub use error::CoreError;

// Re-export core components
pub use buildhub_navigation::{
    AddressBar, AnimationPhase, BreadcrumbItem, HistoryEntry, MemoryAddressBar, MountOptions,
    NavigationAction, NavigationConfig, NavigationController, NavigationError, NavigationEvent,
    NavigationPatch, NavigationSettings, NavigationState, RouterError, ViewParams,
};
pub use buildhub_registry::{Category, CoreTab, Registry, RegistryError, Tool};
pub use buildhub_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
