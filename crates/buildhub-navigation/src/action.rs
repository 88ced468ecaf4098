//! Navigation actions and the reducer
//!
//! Every change to a `NavigationState` is one `NavigationAction` applied by
//! [`reduce`]. The reducer is total and free of I/O; timing and side effects
//! belong to the controller.
//!
//! ```text
//! State + Action  →  reduce()  →  New State
//! ```

use crate::config::{NavigationConfig, NavigationPatch};
use crate::state::{AnimationPhase, AnimationState, LegacyState, NavigationState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Merge into `exploration` only
    SetExploration(NavigationPatch),
    /// Begin a timed commit towards the given config
    StartAnimation(NavigationConfig),
    SetAnimationPhase(AnimationPhase),
    /// Make the given config the rendered one
    CommitNavigation(NavigationConfig),
    CompleteAnimation,
    ResetNavigation,
}

impl NavigationAction {
    pub fn name(&self) -> &'static str {
        match self {
            NavigationAction::SetExploration(_) => "SET_EXPLORATION",
            NavigationAction::StartAnimation(_) => "START_ANIMATION",
            NavigationAction::SetAnimationPhase(_) => "SET_ANIMATION_PHASE",
            NavigationAction::CommitNavigation(_) => "COMMIT_NAVIGATION",
            NavigationAction::CompleteAnimation => "COMPLETE_ANIMATION",
            NavigationAction::ResetNavigation => "RESET_NAVIGATION",
        }
    }
}

pub fn reduce(state: NavigationState, action: NavigationAction) -> NavigationState {
    match action {
        NavigationAction::SetExploration(patch) => NavigationState {
            exploration: patch.apply_to(&state.exploration),
            ..state
        },
        NavigationAction::StartAnimation(config) => NavigationState {
            animation: AnimationState {
                is_navigating: true,
                animation_phase: AnimationPhase::Exploring,
                pending_commit: Some(config),
            },
            ..state
        },
        NavigationAction::SetAnimationPhase(phase) => NavigationState {
            animation: AnimationState {
                animation_phase: phase,
                ..state.animation
            },
            ..state
        },
        NavigationAction::CommitNavigation(config) => NavigationState {
            legacy: LegacyState::from(&config),
            exploration: config.clone(),
            committed: config,
            animation: AnimationState {
                pending_commit: None,
                ..state.animation
            },
        },
        NavigationAction::CompleteAnimation => NavigationState {
            animation: AnimationState::default(),
            ..state
        },
        NavigationAction::ResetNavigation => NavigationState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hub() -> NavigationConfig {
        NavigationConfig::for_tool("Financial Management", "Financial Hub")
    }

    #[test]
    fn test_set_exploration_leaves_committed_alone() {
        let state = NavigationState::new(hub());
        let next = reduce(
            state.clone(),
            NavigationAction::SetExploration(
                NavigationPatch::default().category(Some("Field Management")),
            ),
        );
        assert_eq!(next.exploration.category.as_deref(), Some("Field Management"));
        assert_eq!(next.exploration.tool.as_deref(), Some("Financial Hub"));
        assert_eq!(next.committed, state.committed);
        assert_eq!(next.legacy, state.legacy);
        assert_eq!(next.animation, state.animation);
    }

    #[test]
    fn test_start_animation() {
        let next = reduce(
            NavigationState::default(),
            NavigationAction::StartAnimation(hub()),
        );
        assert!(next.animation.is_navigating);
        assert_eq!(next.animation.animation_phase, AnimationPhase::Exploring);
        assert_eq!(next.animation.pending_commit, Some(hub()));
        assert!(next.committed.is_empty());
    }

    #[test]
    fn test_set_phase_keeps_pending_commit() {
        let started = reduce(
            NavigationState::default(),
            NavigationAction::StartAnimation(hub()),
        );
        let next = reduce(
            started,
            NavigationAction::SetAnimationPhase(AnimationPhase::Committing),
        );
        assert_eq!(next.animation.animation_phase, AnimationPhase::Committing);
        assert_eq!(next.animation.pending_commit, Some(hub()));
    }

    #[test]
    fn test_commit_syncs_all_views() {
        let started = reduce(
            NavigationState::default(),
            NavigationAction::StartAnimation(hub()),
        );
        let next = reduce(started, NavigationAction::CommitNavigation(hub()));
        assert_eq!(next.committed, hub());
        assert_eq!(next.exploration, hub());
        assert_eq!(next.legacy, LegacyState::from(&hub()));
        assert!(next.animation.pending_commit.is_none());
        // Phase is the controller's business
        assert!(next.animation.is_navigating);
        assert_eq!(next.animation.animation_phase, AnimationPhase::Exploring);
    }

    #[test]
    fn test_commit_is_idempotent() {
        let configs = [
            NavigationConfig::empty(),
            hub(),
            NavigationConfig::for_core_tab("reports"),
            NavigationConfig::for_category("Closeout"),
        ];
        for config in configs {
            let once = reduce(
                NavigationState::default(),
                NavigationAction::CommitNavigation(config.clone()),
            );
            let twice = reduce(
                once.clone(),
                NavigationAction::CommitNavigation(config.clone()),
            );
            assert_eq!(once.committed, twice.committed);
            assert_eq!(once.exploration, twice.exploration);
            assert_eq!(once.legacy, twice.legacy);
        }
    }

    #[test]
    fn test_complete_animation_settles() {
        let started = reduce(
            NavigationState::default(),
            NavigationAction::StartAnimation(hub()),
        );
        let next = reduce(started, NavigationAction::CompleteAnimation);
        assert!(next.animation.is_settled());
    }

    #[test]
    fn test_reset_clears_everything() {
        let state = reduce(
            NavigationState::new(hub()),
            NavigationAction::StartAnimation(NavigationConfig::for_core_tab("tasks")),
        );
        let next = reduce(state, NavigationAction::ResetNavigation);
        assert_eq!(next, NavigationState::default());
        assert!(next.animation.is_settled());
        assert_eq!(next.legacy, LegacyState::default());
    }

    #[test]
    fn test_action_names() {
        assert_eq!(
            NavigationAction::CommitNavigation(hub()).name(),
            "COMMIT_NAVIGATION"
        );
        assert_eq!(NavigationAction::ResetNavigation.name(), "RESET_NAVIGATION");
    }
}
