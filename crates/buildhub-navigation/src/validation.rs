//! Registry checks for navigation configs

use buildhub_registry::Registry;

use crate::config::NavigationConfig;
use crate::error::NavigationError;
use crate::Result;

/// Check every set reference against the registry.
///
/// The sub-tool is not checked on its own. A tool must sit under the category
/// that owns it, and a core tab cannot be combined with the hierarchy.
pub fn validate(registry: &Registry, config: &NavigationConfig) -> Result<()> {
    if let Some(category) = &config.category {
        if !registry.category_exists(category) {
            return Err(NavigationError::UnknownCategory(category.clone()));
        }
    }

    if let Some(tool) = &config.tool {
        let owner = registry
            .resolve_tool_category(tool)
            .ok_or_else(|| NavigationError::UnknownTool(tool.clone()))?;
        if config.category.as_deref() != Some(owner) {
            return Err(NavigationError::InvalidNavigation(format!(
                "tool {} belongs to {}",
                tool, owner
            )));
        }
    }

    if let Some(core_tab) = &config.core_tab {
        if !registry.core_tab_exists(core_tab) {
            return Err(NavigationError::UnknownCoreTab(core_tab.clone()));
        }
        if config.category.is_some() || config.tool.is_some() || config.sub_tool.is_some() {
            return Err(NavigationError::InvalidNavigation(format!(
                "core tab {} combined with a category selection",
                core_tab
            )));
        }
    }

    Ok(())
}

pub fn is_valid_navigation(registry: &Registry, config: &NavigationConfig) -> bool {
    validate(registry, config).is_ok()
}

/// Core tabs and the overview are open to every role.
pub fn check_access(registry: &Registry, role: &str, config: &NavigationConfig) -> Result<()> {
    let Some(category) = &config.category else {
        return Ok(());
    };

    if registry.allowed_categories(role).contains(category) {
        Ok(())
    } else {
        Err(NavigationError::Forbidden {
            role: role.to_string(),
            category: category.clone(),
        })
    }
}
