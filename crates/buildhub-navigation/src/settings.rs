//! Controller settings

use std::time::Duration;

use crate::history::HISTORY_CAPACITY;

pub const DEFAULT_EXPLORATION_DELAY: Duration = Duration::from_millis(150);
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(300);
pub const DEFAULT_ADDRESS_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct NavigationSettings {
    /// When false every gesture commits immediately
    pub animations_enabled: bool,
    /// Time spent in `Exploring` before the commit starts
    pub exploration_delay: Duration,
    /// Committing → Committed → Idle, split evenly between the two steps
    pub transition_duration: Duration,
    /// Prepended to every query key written to or read from the address bar
    pub url_prefix: String,
    pub base_path: String,
    /// Quiet period before a committed navigation is pushed to the address bar
    pub address_debounce: Duration,
    /// At least one entry is always kept
    pub history_capacity: usize,
    pub persist_history: bool,
    /// Reject category and core-tab gestures the registry does not know
    pub validate_gestures: bool,
    /// Restrict gestures to the categories this role may open
    pub role: Option<String>,
}

impl NavigationSettings {
    pub fn half_transition(&self) -> Duration {
        self.transition_duration / 2
    }

    /// Settings that commit every gesture synchronously.
    pub fn immediate() -> Self {
        Self {
            animations_enabled: false,
            address_debounce: Duration::ZERO,
            ..Self::default()
        }
    }
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            animations_enabled: true,
            exploration_delay: DEFAULT_EXPLORATION_DELAY,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            url_prefix: String::new(),
            base_path: "/".to_string(),
            address_debounce: DEFAULT_ADDRESS_DEBOUNCE,
            history_capacity: HISTORY_CAPACITY,
            persist_history: true,
            validate_gestures: true,
            role: None,
        }
    }
}
