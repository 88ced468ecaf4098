//! Navigation configuration values
//!
//! A `NavigationConfig` names one place in the dashboard. Core tabs and the
//! category/tool/sub-tool hierarchy are mutually exclusive: every constructor
//! below that sets one side clears the other.

use serde::{Deserialize, Serialize};

/// Sub-tool a tool opens on when none is requested.
pub const DEFAULT_SUB_TOOL: &str = "overview";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationConfig {
    pub category: Option<String>,
    pub tool: Option<String>,
    pub sub_tool: Option<String>,
    pub core_tab: Option<String>,
}

impl NavigationConfig {
    /// The "Overview" location: nothing selected.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn for_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// A tool landing on its default sub-tool.
    pub fn for_tool(category: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            tool: Some(tool.into()),
            sub_tool: Some(DEFAULT_SUB_TOOL.to_string()),
            core_tab: None,
        }
    }

    /// Keeps the category and tool of `base`, switches the sub-tool.
    pub fn for_sub_tool(base: &NavigationConfig, sub_tool: impl Into<String>) -> Self {
        Self {
            category: base.category.clone(),
            tool: base.tool.clone(),
            sub_tool: Some(sub_tool.into()),
            core_tab: None,
        }
    }

    pub fn for_core_tab(core_tab: impl Into<String>) -> Self {
        Self {
            core_tab: Some(core_tab.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.tool.is_none()
            && self.sub_tool.is_none()
            && self.core_tab.is_none()
    }

    /// Set fields in display order: category, tool, sub-tool, core tab.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        [&self.category, &self.tool, &self.sub_tool, &self.core_tab]
            .into_iter()
            .filter_map(|field| field.as_deref())
    }

    /// Overlay the fields `other` sets on top of `self`.
    ///
    /// Whichever side of the core-tab / hierarchy split `other` touches wins;
    /// the opposite side is cleared so the result stays exclusive. Within the
    /// hierarchy the highest level `other` sets replaces everything below it,
    /// so a new category never inherits a tool from the old one.
    pub fn overlaid_with(&self, other: &NavigationConfig) -> Self {
        let hierarchy = other.category.is_some() || other.tool.is_some() || other.sub_tool.is_some();

        if other.core_tab.is_some() && !hierarchy {
            return Self::for_core_tab(other.core_tab.clone().unwrap_or_default());
        }

        if !hierarchy {
            return self.clone();
        }

        let (tool, sub_tool) = if other.category.is_some() || other.tool.is_some() {
            (other.tool.clone(), other.sub_tool.clone())
        } else {
            (self.tool.clone(), other.sub_tool.clone())
        };

        Self {
            category: other.category.clone().or_else(|| self.category.clone()),
            tool,
            sub_tool,
            core_tab: None,
        }
    }
}

/// A partial update: `None` leaves a field alone, `Some(value)` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationPatch {
    pub category: Option<Option<String>>,
    pub tool: Option<Option<String>>,
    pub sub_tool: Option<Option<String>>,
    pub core_tab: Option<Option<String>>,
}

impl NavigationPatch {
    pub fn category(mut self, value: Option<&str>) -> Self {
        self.category = Some(value.map(str::to_string));
        self
    }

    pub fn tool(mut self, value: Option<&str>) -> Self {
        self.tool = Some(value.map(str::to_string));
        self
    }

    pub fn sub_tool(mut self, value: Option<&str>) -> Self {
        self.sub_tool = Some(value.map(str::to_string));
        self
    }

    pub fn core_tab(mut self, value: Option<&str>) -> Self {
        self.core_tab = Some(value.map(str::to_string));
        self
    }

    pub fn apply_to(&self, base: &NavigationConfig) -> NavigationConfig {
        NavigationConfig {
            category: self.category.clone().unwrap_or_else(|| base.category.clone()),
            tool: self.tool.clone().unwrap_or_else(|| base.tool.clone()),
            sub_tool: self.sub_tool.clone().unwrap_or_else(|| base.sub_tool.clone()),
            core_tab: self.core_tab.clone().unwrap_or_else(|| base.core_tab.clone()),
        }
    }
}

impl From<&NavigationConfig> for NavigationPatch {
    /// A patch that replaces every field.
    fn from(config: &NavigationConfig) -> Self {
        Self {
            category: Some(config.category.clone()),
            tool: Some(config.tool.clone()),
            sub_tool: Some(config.sub_tool.clone()),
            core_tab: Some(config.core_tab.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_are_exclusive() {
        let tool = NavigationConfig::for_tool("Financial Management", "Financial Hub");
        assert_eq!(tool.sub_tool.as_deref(), Some("overview"));
        assert!(tool.core_tab.is_none());

        let tab = NavigationConfig::for_core_tab("reports");
        assert!(tab.category.is_none() && tab.tool.is_none() && tab.sub_tool.is_none());

        let sub = NavigationConfig::for_sub_tool(&tool, "forecast");
        assert_eq!(sub.tool.as_deref(), Some("Financial Hub"));
        assert_eq!(sub.sub_tool.as_deref(), Some("forecast"));
    }

    #[test]
    fn test_segments_order() {
        let config = NavigationConfig::for_tool("Field Management", "Safety");
        let segments: Vec<&str> = config.segments().collect();
        assert_eq!(segments, vec!["Field Management", "Safety", "overview"]);
        assert_eq!(NavigationConfig::empty().segments().count(), 0);
    }

    #[test]
    fn test_patch_only_touches_named_fields() {
        let base = NavigationConfig::for_tool("Field Management", "Safety");
        let patched = NavigationPatch::default()
            .sub_tool(Some("incidents"))
            .apply_to(&base);
        assert_eq!(patched.category, base.category);
        assert_eq!(patched.sub_tool.as_deref(), Some("incidents"));

        let cleared = NavigationPatch::default().tool(None).apply_to(&base);
        assert!(cleared.tool.is_none());
        assert_eq!(cleared.category, base.category);
    }

    #[test]
    fn test_overlay_prefers_other() {
        let initial = NavigationConfig::for_category("Field Management");
        let from_url = NavigationConfig::for_tool("Financial Management", "Budget");
        assert_eq!(initial.overlaid_with(&from_url), from_url);

        let partial = NavigationConfig {
            tool: Some("Daily Logs".to_string()),
            ..Default::default()
        };
        let merged = initial.overlaid_with(&partial);
        assert_eq!(merged.category.as_deref(), Some("Field Management"));
        assert_eq!(merged.tool.as_deref(), Some("Daily Logs"));
        assert_eq!(merged.sub_tool, None);
    }

    #[test]
    fn test_overlay_resets_levels_below_the_override() {
        let initial = NavigationConfig::for_tool("Field Management", "Safety");

        let merged = initial.overlaid_with(&NavigationConfig::for_category("Closeout"));
        assert_eq!(merged, NavigationConfig::for_category("Closeout"));

        let sub_only = NavigationConfig {
            sub_tool: Some("incidents".to_string()),
            ..Default::default()
        };
        let merged = initial.overlaid_with(&sub_only);
        assert_eq!(merged.category.as_deref(), Some("Field Management"));
        assert_eq!(merged.tool.as_deref(), Some("Safety"));
        assert_eq!(merged.sub_tool.as_deref(), Some("incidents"));
    }

    #[test]
    fn test_overlay_keeps_exclusivity() {
        let initial = NavigationConfig::for_tool("Field Management", "Safety");
        let merged = initial.overlaid_with(&NavigationConfig::for_core_tab("reports"));
        assert_eq!(merged, NavigationConfig::for_core_tab("reports"));

        let back = NavigationConfig::for_core_tab("reports")
            .overlaid_with(&NavigationConfig::for_category("Closeout"));
        assert_eq!(back, NavigationConfig::for_category("Closeout"));

        assert_eq!(initial.overlaid_with(&NavigationConfig::empty()), initial);
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_value(NavigationConfig::for_core_tab("reports")).unwrap();
        assert_eq!(json["coreTab"], "reports");
        assert!(json["subTool"].is_null());
    }
}
