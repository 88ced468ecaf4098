//! Navigation State
//!
//! Two navigation configurations are tracked side by side:
//! `exploration` follows the pointer, `committed` drives rendered content.
//! The animation phase describes where the commit sequence currently is:
//!
//! ```text
//! Idle
//!   ↓ gesture
//! Exploring
//!   ↓ exploration delay
//! Committing
//!   ↓ half transition
//! Committed
//!   ↓ half transition
//! Idle
//! ```

use serde::{Deserialize, Serialize};

use crate::config::NavigationConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationPhase {
    #[default]
    Idle,
    Exploring,
    Committing,
    Committed,
}

impl AnimationPhase {
    /// Check whether the orchestrator may move from this phase to `target`
    pub fn can_transition_to(&self, target: AnimationPhase) -> bool {
        match (self, target) {
            // Any phase may be interrupted by a new gesture
            (_, AnimationPhase::Exploring) => true,
            (AnimationPhase::Exploring, AnimationPhase::Committing) => true,
            (AnimationPhase::Committing, AnimationPhase::Committed) => true,
            // Tool gestures settle straight from Exploring
            (AnimationPhase::Exploring, AnimationPhase::Idle) => true,
            (AnimationPhase::Committed, AnimationPhase::Idle) => true,
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationPhase::Idle => "idle",
            AnimationPhase::Exploring => "exploring",
            AnimationPhase::Committing => "committing",
            AnimationPhase::Committed => "committed",
        }
    }
}

impl std::fmt::Display for AnimationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AnimationPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(AnimationPhase::Idle),
            "exploring" => Ok(AnimationPhase::Exploring),
            "committing" => Ok(AnimationPhase::Committing),
            "committed" => Ok(AnimationPhase::Committed),
            _ => Err(format!("Unknown animation phase: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationState {
    pub is_navigating: bool,
    pub animation_phase: AnimationPhase,
    pub pending_commit: Option<NavigationConfig>,
}

impl AnimationState {
    /// Not navigating means idle with nothing pending.
    pub fn is_settled(&self) -> bool {
        !self.is_navigating
            && self.animation_phase == AnimationPhase::Idle
            && self.pending_commit.is_none()
    }
}

/// Flat mirror of `committed` for consumers that predate the dual-state model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyState {
    pub expanded_category: Option<String>,
    pub selected_tool: Option<String>,
    pub selected_sub_tool: Option<String>,
    pub selected_core_tab: Option<String>,
}

impl From<&NavigationConfig> for LegacyState {
    fn from(config: &NavigationConfig) -> Self {
        Self {
            expanded_category: config.category.clone(),
            selected_tool: config.tool.clone(),
            selected_sub_tool: config.sub_tool.clone(),
            selected_core_tab: config.core_tab.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub committed: NavigationConfig,
    pub exploration: NavigationConfig,
    pub animation: AnimationState,
    pub legacy: LegacyState,
}

impl NavigationState {
    /// A settled state showing `config`.
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            legacy: LegacyState::from(&config),
            exploration: config.clone(),
            committed: config,
            animation: AnimationState::default(),
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.animation.animation_phase
    }

    pub fn is_navigating(&self) -> bool {
        self.animation.is_navigating
    }
}
