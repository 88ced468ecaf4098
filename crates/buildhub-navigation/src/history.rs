//! Navigation history
//!
//! A bounded, most-recent-first log of committed navigations. Repeated commits
//! of the same place each get their own entry. Entry urls always use the
//! canonical unprefixed query at the root path, whatever the address bar uses.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use buildhub_storage::Database;

use crate::config::NavigationConfig;
use crate::url::UrlScheme;
use crate::Result;

pub const HISTORY_CAPACITY: usize = 50;

/// Settings key the history log is persisted under.
pub const HISTORY_STORAGE_KEY: &str = "navigation_history";

const ROOT_TITLE: &str = "Overview";
const TITLE_SEPARATOR: &str = " > ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub navigation: NavigationConfig,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// "Financial Management > Financial Hub > overview", or "Overview" when empty.
pub fn history_title(config: &NavigationConfig) -> String {
    let segments: Vec<&str> = config.segments().collect();
    if segments.is_empty() {
        ROOT_TITLE.to_string()
    } else {
        segments.join(TITLE_SEPARATOR)
    }
}

/// Durable home for the history log.
pub trait HistoryStore: Send + Sync {
    fn load(&self) -> Result<Vec<HistoryEntry>>;
    fn save(&self, entries: &[HistoryEntry]) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

impl HistoryStore for Database {
    fn load(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self
            .get_json::<Vec<HistoryEntry>>(HISTORY_STORAGE_KEY)?
            .unwrap_or_default())
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        Ok(self.set_json(HISTORY_STORAGE_KEY, entries)?)
    }

    fn clear(&self) -> Result<()> {
        Ok(self.remove_setting(HISTORY_STORAGE_KEY)?)
    }
}

#[derive(Debug, Clone)]
pub struct HistoryTracker {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryTracker {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Restore a previously saved log, keeping only the newest `capacity` entries.
    pub fn with_entries(entries: Vec<HistoryEntry>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries: VecDeque<HistoryEntry> = entries.into();
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    /// Record a commit of `config`, evicting the oldest entry when full.
    pub fn add_entry(&mut self, config: &NavigationConfig) -> HistoryEntry {
        let entry = HistoryEntry {
            navigation: config.clone(),
            timestamp: Utc::now().timestamp_millis(),
            title: history_title(config),
            url: Some(UrlScheme::default().navigation_url(config)),
        };

        self.entries.push_front(entry.clone());
        self.entries.truncate(self.capacity);
        entry
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for HistoryTracker {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}
