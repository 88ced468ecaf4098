//! Navigation Controller
//!
//! Owns a mounted navigation scope: the reducer-held state, the history log
//! and the timers that walk a gesture through its animation phases.
//!
//! Category gestures run explore → commit → settle:
//!
//! ```text
//! t=0                         SET_EXPLORATION, START_ANIMATION   (exploring)
//! t=exploration_delay         SET_ANIMATION_PHASE                (committing)
//! t=+transition/2             COMMIT_NAVIGATION, history         (committed)
//! t=+transition/2             COMPLETE_ANIMATION                 (idle)
//! ```
//!
//! Tool gestures commit and settle together after the exploration delay.
//! Sub-tool and core-tab gestures, and every gesture while animations are
//! off, commit synchronously.
//!
//! Each timed gesture bumps a generation counter and aborts the previous
//! chain. Callbacks re-check the generation under the state lock, so a chain
//! that lost the race can never commit.
//!
//! History persistence and address-bar pushes run after the state lock is
//! released; they always write the latest state at the time they run.

use parking_lot::{Mutex, ReentrantMutex};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use uuid::Uuid;

use buildhub_registry::Registry;

use crate::action::{reduce, NavigationAction};
use crate::address_bar::AddressBar;
use crate::breadcrumb::{breadcrumbs, BreadcrumbItem};
use crate::config::{NavigationConfig, NavigationPatch};
use crate::error::NavigationError;
use crate::history::{HistoryEntry, HistoryStore, HistoryTracker};
use crate::settings::NavigationSettings;
use crate::state::{AnimationPhase, NavigationState};
use crate::url::{DeepLink, UrlScheme, ViewParams};
use crate::validation::{check_access, is_valid_navigation, validate};
use crate::Result;

const EVENT_CAPACITY: usize = 64;

/// Notifications for UI layers that re-render on change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    PhaseChanged {
        from: AnimationPhase,
        to: AnimationPhase,
    },
    Committed(NavigationConfig),
    Reset,
    AddressSynced(String),
    AddressSyncFailed(String),
}

/// Collaborators and seed values for a new scope.
#[derive(Default)]
pub struct MountOptions {
    /// Starting place; fields present in the address bar override it
    pub initial: NavigationConfig,
    pub address_bar: Option<Arc<dyn AddressBar>>,
    pub history_store: Option<Arc<dyn HistoryStore>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Category,
    Tool,
}

struct Inner {
    state: NavigationState,
    view: ViewParams,
    history: HistoryTracker,
    generation: u64,
    /// The running timer chain of the latest category/tool gesture
    pending: Option<JoinHandle<()>>,
    address_sync: Option<JoinHandle<()>>,
    error: Option<String>,
    animations_enabled: bool,
}

/// Writes owed after a state change, run once the state lock is released.
#[must_use]
#[derive(Debug, Clone, Copy, Default)]
struct FollowUp {
    persist_history: bool,
    sync_address: bool,
}

struct Shared {
    scope_id: Uuid,
    registry: Arc<Registry>,
    settings: NavigationSettings,
    scheme: UrlScheme,
    address_bar: Option<Arc<dyn AddressBar>>,
    store: Option<Arc<dyn HistoryStore>>,
    runtime: Option<Handle>,
    events: broadcast::Sender<NavigationEvent>,
    inner: Mutex<Inner>,
    /// Serializes storage and address-bar writes. Re-entrant so an address
    /// bar may call back into the controller from `replace`.
    io: ReentrantMutex<()>,
}

pub struct NavigationController {
    shared: Arc<Shared>,
}

impl NavigationController {
    /// Mount a navigation scope.
    ///
    /// Timed gestures need a tokio runtime; outside one the scope falls back
    /// to synchronous commits.
    pub fn mount(
        registry: Arc<Registry>,
        settings: NavigationSettings,
        options: MountOptions,
    ) -> Self {
        let scope_id = Uuid::new_v4();
        let scheme = UrlScheme::new(settings.url_prefix.clone(), settings.base_path.clone());

        let runtime = Handle::try_current().ok();
        if runtime.is_none() && settings.animations_enabled {
            tracing::warn!(
                scope_id = %scope_id,
                "No async runtime available, navigation will commit without animation"
            );
        }

        let mut initial = options.initial;
        let mut view = ViewParams::default();
        if let Some(bar) = &options.address_bar {
            let location = bar.location();
            let link = scheme.parse(&location);
            if link.navigation.is_empty() {
                view = link.view;
            } else {
                let seeded = initial.overlaid_with(&link.navigation);
                match validate(&registry, &seeded) {
                    Ok(()) => {
                        initial = seeded;
                        view = link.view;
                    }
                    Err(e) => {
                        tracing::warn!(
                            scope_id = %scope_id,
                            location = %location,
                            error = %e,
                            "Ignoring invalid navigation in address bar"
                        );
                    }
                }
            }
        }

        let history = match (&options.history_store, settings.persist_history) {
            (Some(store), true) => match store.load() {
                Ok(entries) => HistoryTracker::with_entries(entries, settings.history_capacity),
                Err(e) => {
                    tracing::warn!(scope_id = %scope_id, error = %e, "Failed to load navigation history");
                    HistoryTracker::new(settings.history_capacity)
                }
            },
            _ => HistoryTracker::new(settings.history_capacity),
        };

        tracing::info!(
            scope_id = %scope_id,
            category = ?initial.category,
            tool = ?initial.tool,
            core_tab = ?initial.core_tab,
            history = history.len(),
            "Mounted navigation scope"
        );

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let inner = Inner {
            state: NavigationState::new(initial),
            view,
            history,
            generation: 0,
            pending: None,
            address_sync: None,
            error: None,
            animations_enabled: settings.animations_enabled,
        };

        Self {
            shared: Arc::new(Shared {
                scope_id,
                registry,
                settings,
                scheme,
                address_bar: options.address_bar,
                store: options.history_store,
                runtime,
                events,
                inner: Mutex::new(inner),
                io: ReentrantMutex::new(()),
            }),
        }
    }

    // === Reads ===

    pub fn scope_id(&self) -> Uuid {
        self.shared.scope_id
    }

    pub fn state(&self) -> NavigationState {
        self.shared.inner.lock().state.clone()
    }

    pub fn committed(&self) -> NavigationConfig {
        self.shared.inner.lock().state.committed.clone()
    }

    /// Most recent first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.shared.inner.lock().history.to_vec()
    }

    pub fn view_params(&self) -> ViewParams {
        self.shared.inner.lock().view.clone()
    }

    /// Last address-bar failure, cleared by the next successful sync.
    pub fn error(&self) -> Option<String> {
        self.shared.inner.lock().error.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.shared.events.subscribe()
    }

    pub fn registry(&self) -> &Registry {
        &self.shared.registry
    }

    pub fn breadcrumbs(&self) -> Vec<BreadcrumbItem> {
        breadcrumbs(&self.shared.inner.lock().state.committed)
    }

    pub fn is_valid_navigation(&self, config: &NavigationConfig) -> bool {
        is_valid_navigation(&self.shared.registry, config)
    }

    pub fn navigation_url(&self, config: &NavigationConfig) -> String {
        self.shared.scheme.navigation_url(config)
    }

    /// Location the address bar should show for the committed state.
    pub fn current_location(&self) -> String {
        let inner = self.shared.inner.lock();
        self.shared.location_for(&inner)
    }

    pub fn animations_enabled(&self) -> bool {
        self.shared.inner.lock().animations_enabled
    }

    pub fn set_animations_enabled(&self, enabled: bool) {
        self.shared.inner.lock().animations_enabled = enabled;
        tracing::info!(scope_id = %self.shared.scope_id, enabled, "Navigation animations toggled");
    }

    // === Gestures ===

    /// Preview a location (hover) without committing it.
    pub fn explore(&self, patch: NavigationPatch) {
        let mut inner = self.shared.inner.lock();
        self.shared
            .dispatch(&mut inner, NavigationAction::SetExploration(patch));
    }

    /// Open a category; tool, sub-tool and core tab are cleared.
    pub fn handle_category_click(&self, category: &str) -> Result<()> {
        let shared = &self.shared;
        if shared.settings.validate_gestures && !shared.registry.category_exists(category) {
            tracing::warn!(scope_id = %shared.scope_id, category, "Ignoring unknown category");
            return Err(NavigationError::UnknownCategory(category.to_string()));
        }

        let target = NavigationConfig::for_category(category);
        shared.check_role(&target)?;
        let follow_up = shared.run_timed(Gesture::Category, target);
        shared.finish(follow_up);
        Ok(())
    }

    /// Open a tool on its `overview` sub-tool, inside the category that owns it.
    pub fn handle_tool_click(&self, tool: &str) -> Result<()> {
        let shared = &self.shared;
        let Some(category) = shared.registry.resolve_tool_category(tool) else {
            tracing::warn!(scope_id = %shared.scope_id, tool, "Ignoring unknown tool");
            return Err(NavigationError::UnknownTool(tool.to_string()));
        };

        let target = NavigationConfig::for_tool(category, tool);
        shared.check_role(&target)?;
        let follow_up = shared.run_timed(Gesture::Tool, target);
        shared.finish(follow_up);
        Ok(())
    }

    /// Switch sub-tool within the committed tool. Commits immediately.
    pub fn handle_sub_tool_click(&self, sub_tool: &str) -> Result<()> {
        let shared = &self.shared;
        let follow_up = {
            let mut inner = shared.inner.lock();
            let target = NavigationConfig::for_sub_tool(&inner.state.committed, sub_tool);
            shared.check_role(&target)?;
            shared.commit_now(&mut inner, target)
        };
        shared.finish(follow_up);
        Ok(())
    }

    /// Open a core tab, leaving the category hierarchy. Commits immediately.
    pub fn handle_core_tab_click(&self, core_tab: &str) -> Result<()> {
        let shared = &self.shared;
        if shared.settings.validate_gestures && !shared.registry.core_tab_exists(core_tab) {
            tracing::warn!(scope_id = %shared.scope_id, core_tab, "Ignoring unknown core tab");
            return Err(NavigationError::UnknownCoreTab(core_tab.to_string()));
        }

        let follow_up = {
            let mut inner = shared.inner.lock();
            shared.commit_now(&mut inner, NavigationConfig::for_core_tab(core_tab))
        };
        shared.finish(follow_up);
        Ok(())
    }

    /// Commit `config` as-is, skipping animation and validation.
    pub fn handle_navigation_commit(&self, config: NavigationConfig) {
        let follow_up = {
            let mut inner = self.shared.inner.lock();
            self.shared.commit_now(&mut inner, config)
        };
        self.shared.finish(follow_up);
    }

    /// Follow an address-bar change made outside the controller.
    ///
    /// A location naming the committed navigation only updates the view
    /// parameters. Invalid locations are rejected without touching state.
    pub fn handle_address_change(&self, location: &str) -> Result<()> {
        let shared = &self.shared;
        let link = shared.scheme.parse(location);

        let follow_up = {
            let mut inner = shared.inner.lock();
            if link.navigation == inner.state.committed {
                if link.view != inner.view {
                    tracing::debug!(scope_id = %shared.scope_id, location, "Following view change from address bar");
                    inner.view = link.view;
                }
                return Ok(());
            }

            validate(&shared.registry, &link.navigation)?;
            shared.check_role(&link.navigation)?;

            tracing::info!(scope_id = %shared.scope_id, location, "Following address bar change");
            shared.settle_on(&mut inner, link.navigation);
            inner.view = link.view;
            shared.record_commit(&mut inner)
        };
        shared.finish(follow_up);
        Ok(())
    }

    /// Back to the overview; pending timers are cancelled and nothing is recorded.
    pub fn reset_navigation(&self) {
        let shared = &self.shared;
        let follow_up = {
            let mut inner = shared.inner.lock();
            shared.cancel_chain(&mut inner);
            shared.dispatch(&mut inner, NavigationAction::ResetNavigation);
            inner.view = ViewParams::default();
            shared.emit(NavigationEvent::Reset);
            FollowUp {
                sync_address: shared.sync_address(&mut inner),
                ..FollowUp::default()
            }
        };
        tracing::info!(scope_id = %shared.scope_id, "Navigation reset");
        shared.finish(follow_up);
    }

    /// Stop any in-flight gesture and settle back onto the committed state.
    pub fn cancel_pending(&self) {
        let shared = &self.shared;
        let mut inner = shared.inner.lock();
        shared.cancel_chain(&mut inner);
        if !inner.state.animation.is_settled() {
            let committed = NavigationPatch::from(&inner.state.committed);
            shared.dispatch(&mut inner, NavigationAction::SetExploration(committed));
            shared.dispatch(&mut inner, NavigationAction::CompleteAnimation);
        }
    }

    // === Deep-link view parameters ===

    pub fn set_page(&self, page: Option<u32>) {
        self.update_view(|view| view.page = page);
    }

    pub fn set_sort(&self, sort: Option<&str>) {
        self.update_view(|view| view.sort = sort.map(str::to_string));
    }

    pub fn set_search(&self, search: Option<&str>) {
        self.update_view(|view| view.search = search.map(str::to_string));
    }

    /// `None` removes the filter.
    pub fn set_filter(&self, key: &str, value: Option<&str>) {
        self.update_view(|view| match value {
            Some(value) => {
                view.filters.insert(key.to_string(), value.to_string());
            }
            None => {
                view.filters.remove(key);
            }
        });
    }

    pub fn clear_filters(&self) {
        self.update_view(|view| view.filters.clear());
    }

    pub fn set_custom(&self, key: &str, value: Option<&str>) {
        self.update_view(|view| match value {
            Some(value) => {
                view.custom.insert(key.to_string(), value.to_string());
            }
            None => {
                view.custom.remove(key);
            }
        });
    }

    fn update_view(&self, f: impl FnOnce(&mut ViewParams)) {
        let follow_up = {
            let mut inner = self.shared.inner.lock();
            f(&mut inner.view);
            FollowUp {
                sync_address: self.shared.sync_address(&mut inner),
                ..FollowUp::default()
            }
        };
        self.shared.finish(follow_up);
    }

    // === History ===

    pub fn clear_history(&self) {
        let shared = &self.shared;
        let _io = shared.io.lock();
        shared.inner.lock().history.clear();
        if let Some(store) = &shared.store {
            if let Err(e) = store.clear() {
                tracing::warn!(scope_id = %shared.scope_id, error = %e, "Failed to clear persisted history");
            }
        }
    }
}

impl Drop for NavigationController {
    fn drop(&mut self) {
        let mut inner = self.shared.inner.lock();
        self.shared.cancel_chain(&mut inner);
        if let Some(task) = inner.address_sync.take() {
            task.abort();
        }
        tracing::debug!(scope_id = %self.shared.scope_id, "Unmounted navigation scope");
    }
}

impl Shared {
    fn emit(&self, event: NavigationEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn dispatch(&self, inner: &mut Inner, action: NavigationAction) {
        let from = inner.state.phase();
        let name = action.name();
        let committed = matches!(action, NavigationAction::CommitNavigation(_));

        inner.state = reduce(std::mem::take(&mut inner.state), action);
        let to = inner.state.phase();

        tracing::debug!(scope_id = %self.scope_id, action = name, phase = %to, "Applied navigation action");

        if from != to {
            if !from.can_transition_to(to) {
                tracing::warn!(scope_id = %self.scope_id, %from, %to, "Unexpected animation phase transition");
            }
            self.emit(NavigationEvent::PhaseChanged { from, to });
        }
        if committed {
            self.emit(NavigationEvent::Committed(inner.state.committed.clone()));
        }
    }

    fn check_role(&self, target: &NavigationConfig) -> Result<()> {
        match &self.settings.role {
            Some(role) => check_access(&self.registry, role, target).inspect_err(|e| {
                tracing::warn!(scope_id = %self.scope_id, error = %e, "Rejected navigation");
            }),
            None => Ok(()),
        }
    }

    /// Invalidate the running chain so none of its callbacks apply.
    fn cancel_chain(&self, inner: &mut Inner) {
        inner.generation += 1;
        if let Some(task) = inner.pending.take() {
            task.abort();
        }
    }

    fn location_for(&self, inner: &Inner) -> String {
        self.scheme.location(&DeepLink {
            navigation: inner.state.committed.clone(),
            view: inner.view.clone(),
        })
    }

    /// COMMIT_NAVIGATION; view parameters belong to one tool or core tab and
    /// are dropped when either changes.
    fn apply_commit(&self, inner: &mut Inner, target: NavigationConfig) {
        let previous = &inner.state.committed;
        if previous.tool != target.tool || previous.core_tab != target.core_tab {
            inner.view = ViewParams::default();
        }
        self.dispatch(inner, NavigationAction::CommitNavigation(target));
    }

    /// Add the history entry for a commit and schedule its writes.
    fn record_commit(self: &Arc<Self>, inner: &mut Inner) -> FollowUp {
        let committed = inner.state.committed.clone();
        let entry = inner.history.add_entry(&committed);

        tracing::info!(scope_id = %self.scope_id, title = %entry.title, "Committed navigation");

        FollowUp {
            persist_history: self.store.is_some() && self.settings.persist_history,
            sync_address: self.sync_address(inner),
        }
    }

    /// Cancel whatever is running and commit `target` with no animation.
    fn settle_on(&self, inner: &mut Inner, target: NavigationConfig) {
        self.cancel_chain(inner);
        self.apply_commit(inner, target);
        if !inner.state.animation.is_settled() {
            self.dispatch(inner, NavigationAction::CompleteAnimation);
        }
    }

    fn commit_now(self: &Arc<Self>, inner: &mut Inner, target: NavigationConfig) -> FollowUp {
        self.settle_on(inner, target);
        self.record_commit(inner)
    }

    fn run_timed(self: &Arc<Self>, gesture: Gesture, target: NavigationConfig) -> FollowUp {
        let mut inner = self.inner.lock();

        let runtime = match &self.runtime {
            Some(runtime) if inner.animations_enabled => runtime.clone(),
            _ => return self.commit_now(&mut inner, target),
        };

        self.cancel_chain(&mut inner);
        let generation = inner.generation;

        tracing::debug!(scope_id = %self.scope_id, ?gesture, generation, "Starting navigation sequence");

        self.dispatch(
            &mut inner,
            NavigationAction::SetExploration(NavigationPatch::from(&target)),
        );
        self.dispatch(&mut inner, NavigationAction::StartAnimation(target.clone()));

        let shared = Arc::clone(self);
        let task = match gesture {
            Gesture::Category => runtime.spawn(shared.category_sequence(generation, target)),
            Gesture::Tool => runtime.spawn(shared.tool_sequence(generation, target)),
        };
        inner.pending = Some(task);
        FollowUp::default()
    }

    async fn category_sequence(self: Arc<Self>, generation: u64, target: NavigationConfig) {
        let half = self.settings.half_transition();

        tokio::time::sleep(self.settings.exploration_delay).await;
        let advanced = self.advance(generation, |shared, inner| {
            shared.dispatch(
                inner,
                NavigationAction::SetAnimationPhase(AnimationPhase::Committing),
            );
            FollowUp::default()
        });
        if !advanced {
            return;
        }

        tokio::time::sleep(half).await;
        let advanced = self.advance(generation, |shared, inner| {
            shared.apply_commit(inner, target);
            shared.dispatch(
                inner,
                NavigationAction::SetAnimationPhase(AnimationPhase::Committed),
            );
            shared.record_commit(inner)
        });
        if !advanced {
            return;
        }

        tokio::time::sleep(half).await;
        self.advance(generation, |shared, inner| {
            shared.dispatch(inner, NavigationAction::CompleteAnimation);
            FollowUp::default()
        });
    }

    async fn tool_sequence(self: Arc<Self>, generation: u64, target: NavigationConfig) {
        tokio::time::sleep(self.settings.exploration_delay).await;
        self.advance(generation, |shared, inner| {
            shared.apply_commit(inner, target);
            shared.dispatch(inner, NavigationAction::CompleteAnimation);
            shared.record_commit(inner)
        });
    }

    /// Run one timed step if its gesture is still the latest.
    fn advance(
        self: &Arc<Self>,
        generation: u64,
        step: impl FnOnce(&Arc<Self>, &mut Inner) -> FollowUp,
    ) -> bool {
        let follow_up = {
            let mut inner = self.inner.lock();
            if inner.generation != generation {
                tracing::debug!(
                    scope_id = %self.scope_id,
                    generation,
                    current = inner.generation,
                    "Dropping stale navigation step"
                );
                return false;
            }
            step(self, &mut *inner)
        };
        self.finish(follow_up);
        true
    }

    /// Schedule an address-bar push. Returns true when it should happen now,
    /// false when there is no address bar or the push was debounced.
    fn sync_address(self: &Arc<Self>, inner: &mut Inner) -> bool {
        if self.address_bar.is_none() {
            return false;
        }
        if let Some(task) = inner.address_sync.take() {
            task.abort();
        }

        let delay = self.settings.address_debounce;
        match &self.runtime {
            Some(runtime) if !delay.is_zero() => {
                let shared = Arc::clone(self);
                inner.address_sync = Some(runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    shared.finish(FollowUp {
                        sync_address: true,
                        ..FollowUp::default()
                    });
                }));
                false
            }
            _ => true,
        }
    }

    /// Perform owed writes. Must be called without the state lock held.
    fn finish(&self, follow_up: FollowUp) {
        if !follow_up.persist_history && !follow_up.sync_address {
            return;
        }

        let _io = self.io.lock();
        if follow_up.persist_history {
            self.persist_history();
        }
        if follow_up.sync_address {
            self.push_address();
        }
    }

    fn persist_history(&self) {
        let Some(store) = &self.store else {
            return;
        };

        let entries = self.inner.lock().history.to_vec();
        if let Err(e) = store.save(&entries) {
            tracing::warn!(scope_id = %self.scope_id, error = %e, "Failed to persist navigation history");
        }
    }

    /// Push the latest committed location, reading it at push time.
    fn push_address(&self) {
        let Some(bar) = &self.address_bar else {
            return;
        };

        let location = {
            let inner = self.inner.lock();
            self.location_for(&inner)
        };
        if bar.location() == location {
            self.inner.lock().error = None;
            return;
        }

        match bar.replace(&location) {
            Ok(()) => {
                tracing::debug!(scope_id = %self.scope_id, location = %location, "Synced address bar");
                self.inner.lock().error = None;
                self.emit(NavigationEvent::AddressSynced(location));
            }
            Err(e) => {
                tracing::warn!(scope_id = %self.scope_id, location = %location, error = %e, "Failed to sync address bar");
                let message = NavigationError::from(e).to_string();
                self.inner.lock().error = Some(message.clone());
                self.emit(NavigationEvent::AddressSyncFailed(message));
            }
        }
    }
}
