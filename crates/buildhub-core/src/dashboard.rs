//! Dashboard state container
//!
//! Owns the database, the registry and the mounted navigation scope.

use std::sync::Arc;

use buildhub_navigation::{AddressBar, MountOptions, NavigationConfig, NavigationController};
use buildhub_registry::{Category, CoreTab, Registry};
use buildhub_storage::Database;

use crate::config::Config;
use crate::Result;

/// Settings key for the per-user animation preference
pub const ANIMATIONS_SETTING: &str = "animations_enabled";

pub struct Dashboard {
    config: Config,
    db: Database,
    registry: Arc<Registry>,
    navigation: NavigationController,
}

impl Dashboard {
    /// Open the configured database and mount navigation on the built-in catalog.
    pub fn new(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_parts(config, db, Registry::builtin(), None)
    }

    pub fn with_parts(
        config: Config,
        db: Database,
        registry: Registry,
        address_bar: Option<Arc<dyn AddressBar>>,
    ) -> Result<Self> {
        config.validate()?;
        let registry = Arc::new(registry);

        if let Some(role) = &config.role {
            if registry.allowed_categories(role).is_empty() {
                tracing::warn!(role = %role, "Role has no accessible categories");
            }
        }

        let navigation = NavigationController::mount(
            Arc::clone(&registry),
            config.navigation_settings(),
            MountOptions {
                initial: NavigationConfig::empty(),
                address_bar,
                history_store: Some(Arc::new(db.clone())),
            },
        );

        Ok(Self {
            config,
            db,
            registry,
            navigation,
        })
    }

    /// Apply persisted user preferences
    pub fn initialize(&self) -> Result<()> {
        if let Some(value) = self.db.get_setting(ANIMATIONS_SETTING)? {
            match value.parse::<bool>() {
                Ok(enabled) => self.navigation.set_animations_enabled(enabled),
                Err(_) => {
                    tracing::warn!(value = %value, "Ignoring malformed animations setting");
                }
            }
        }

        tracing::info!(
            scope_id = %self.navigation.scope_id(),
            role = ?self.config.role,
            "Dashboard initialized"
        );

        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// Categories the configured role may open, in catalog order.
    pub fn visible_categories(&self) -> Vec<&Category> {
        let categories = self.registry.categories();
        match &self.config.role {
            Some(role) => {
                let allowed = self.registry.allowed_categories(role);
                categories
                    .iter()
                    .filter(|c| allowed.contains(&c.name))
                    .collect()
            }
            None => categories.iter().collect(),
        }
    }

    /// Core tabs are available to every role.
    pub fn core_tabs(&self) -> &[CoreTab] {
        self.registry.core_tabs()
    }

    /// Persist the animation preference and apply it to the live scope.
    pub fn set_animations_enabled(&self, enabled: bool) -> Result<()> {
        self.db
            .set_setting(ANIMATIONS_SETTING, &enabled.to_string())?;
        self.navigation.set_animations_enabled(enabled);
        Ok(())
    }
}
