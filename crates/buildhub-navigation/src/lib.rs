//! BuildHub Navigation Engine
//!
//! Dual-state navigation for the dashboard:
//! - `exploration` tracks what the pointer is previewing
//! - `committed` tracks what content is rendered
//!
//! Gestures move through timed animation phases before they commit.
//! Every commit is recorded in a bounded history and mirrored to the
//! address bar as a shareable deep link.

mod action;
mod address_bar;
mod breadcrumb;
mod config;
mod controller;
mod error;
mod history;
mod settings;
mod state;
mod url;
mod validation;

pub use action::{reduce, NavigationAction};
pub use address_bar::{AddressBar, MemoryAddressBar, RouterError};
pub use breadcrumb::{breadcrumbs, BreadcrumbItem};
pub use config::{NavigationConfig, NavigationPatch, DEFAULT_SUB_TOOL};
pub use controller::{MountOptions, NavigationController, NavigationEvent};
pub use error::NavigationError;
pub use history::{
    history_title, HistoryEntry, HistoryStore, HistoryTracker, HISTORY_CAPACITY,
    HISTORY_STORAGE_KEY,
};
pub use settings::{
    NavigationSettings, DEFAULT_ADDRESS_DEBOUNCE, DEFAULT_EXPLORATION_DELAY,
    DEFAULT_TRANSITION_DURATION,
};
pub use state::{AnimationPhase, AnimationState, LegacyState, NavigationState};
pub use url::{DeepLink, UrlScheme, ViewParams};
pub use validation::{check_access, is_valid_navigation, validate};

pub type Result<T> = std::result::Result<T, NavigationError>;
