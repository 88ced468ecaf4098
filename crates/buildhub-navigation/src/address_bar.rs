//! Address bar abstraction
//!
//! The host (browser shell, webview bridge, test) owns the real address bar.
//! `replace` runs without the controller's state lock held, so an
//! implementation may read the controller or forward the new location back
//! through `handle_address_change`.

use parking_lot::RwLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("navigation rejected: {0}")]
    Rejected(String),

    #[error("router unavailable")]
    Unavailable,
}

pub trait AddressBar: Send + Sync {
    /// Current location, path plus query (`/dashboard?tool=Budget`) or an absolute URL
    fn location(&self) -> String;

    /// Replace the current location without adding a browser history step
    fn replace(&self, location: &str) -> Result<(), RouterError>;
}

/// In-process address bar that records every write.
#[derive(Debug, Default)]
pub struct MemoryAddressBar {
    location: RwLock<String>,
    writes: RwLock<Vec<String>>,
}

impl MemoryAddressBar {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: RwLock::new(location.into()),
            writes: RwLock::new(Vec::new()),
        }
    }

    /// Simulate the user editing the address bar; not recorded as a write.
    pub fn set_location(&self, location: impl Into<String>) {
        *self.location.write() = location.into();
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.read().clone()
    }
}

impl AddressBar for MemoryAddressBar {
    fn location(&self) -> String {
        self.location.read().clone()
    }

    fn replace(&self, location: &str) -> Result<(), RouterError> {
        *self.location.write() = location.to_string();
        self.writes.write().push(location.to_string());
        Ok(())
    }
}
