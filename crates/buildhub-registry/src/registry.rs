//! Registry lookups

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::catalog;
use crate::error::RegistryError;
use crate::Result;

/// Wildcard entry in a role's category list granting every category.
pub const ALL_CATEGORIES: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    /// Sub-tools offered inside the tool; `overview` is the landing sub-tool
    #[serde(default)]
    pub sub_tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreTab {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAccess {
    pub role: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RegistryDocument {
    categories: Vec<Category>,
    #[serde(default)]
    core_tabs: Vec<CoreTab>,
    #[serde(default)]
    roles: Vec<RoleAccess>,
}

/// Read-only catalog of valid navigation targets.
#[derive(Debug, Clone)]
pub struct Registry {
    categories: Vec<Category>,
    core_tabs: Vec<CoreTab>,
    roles: Vec<RoleAccess>,
    /// Tool name -> index of its owning category
    tool_index: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry, rejecting catalogs where a name would resolve ambiguously.
    pub fn new(
        categories: Vec<Category>,
        core_tabs: Vec<CoreTab>,
        roles: Vec<RoleAccess>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut owners: HashMap<&str, &str> = HashMap::new();

        for category in &categories {
            if !seen.insert(category.name.as_str()) {
                return Err(RegistryError::DuplicateCategory(category.name.clone()));
            }
            for tool in &category.tools {
                if let Some(first) = owners.insert(tool.name.as_str(), category.name.as_str()) {
                    return Err(RegistryError::DuplicateTool {
                        tool: tool.name.clone(),
                        first: first.to_string(),
                        second: category.name.clone(),
                    });
                }
            }
        }

        for access in &roles {
            for category in &access.categories {
                if category != ALL_CATEGORIES && !seen.contains(category.as_str()) {
                    return Err(RegistryError::UnknownCategory {
                        role: access.role.clone(),
                        category: category.clone(),
                    });
                }
            }
        }

        Ok(Self::assemble(categories, core_tabs, roles))
    }

    /// The construction-management catalog shipped with the dashboard.
    pub fn builtin() -> Self {
        Self::assemble(
            catalog::categories(),
            catalog::core_tabs(),
            catalog::roles(),
        )
    }

    /// Load a catalog from a JSON document with `categories`, `core_tabs` and `roles`.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: RegistryDocument = serde_json::from_str(json)?;
        let registry = Self::new(doc.categories, doc.core_tabs, doc.roles)?;

        tracing::info!(
            categories = registry.categories.len(),
            tools = registry.tool_index.len(),
            core_tabs = registry.core_tabs.len(),
            "Loaded navigation registry"
        );

        Ok(registry)
    }

    fn assemble(
        categories: Vec<Category>,
        core_tabs: Vec<CoreTab>,
        roles: Vec<RoleAccess>,
    ) -> Self {
        let mut tool_index = HashMap::new();
        for (idx, category) in categories.iter().enumerate() {
            for tool in &category.tools {
                tool_index.entry(tool.name.clone()).or_insert(idx);
            }
        }

        Self {
            categories,
            core_tabs,
            roles,
            tool_index,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn core_tabs(&self) -> &[CoreTab] {
        &self.core_tabs
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Name of the category that owns `tool`, if the tool is registered.
    pub fn resolve_tool_category(&self, tool: &str) -> Option<&str> {
        self.tool_index
            .get(tool)
            .map(|&idx| self.categories[idx].name.as_str())
    }

    pub fn category_exists(&self, name: &str) -> bool {
        self.category(name).is_some()
    }

    pub fn tool_exists(&self, name: &str) -> bool {
        self.tool_index.contains_key(name)
    }

    pub fn core_tab_exists(&self, id: &str) -> bool {
        self.core_tabs.iter().any(|t| t.id == id)
    }

    pub fn sub_tools(&self, tool: &str) -> Option<&[String]> {
        let idx = *self.tool_index.get(tool)?;
        self.categories[idx]
            .tools
            .iter()
            .find(|t| t.name == tool)
            .map(|t| t.sub_tools.as_slice())
    }

    /// Categories a role may open. Unknown roles get nothing.
    pub fn allowed_categories(&self, role: &str) -> BTreeSet<String> {
        let Some(access) = self.roles.iter().find(|r| r.role == role) else {
            return BTreeSet::new();
        };

        if access.categories.iter().any(|c| c == ALL_CATEGORIES) {
            return self.categories.iter().map(|c| c.name.clone()).collect();
        }

        access.categories.iter().cloned().collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(name: &str) -> Tool {
        Tool {
            name: name.to_string(),
            sub_tools: vec!["overview".to_string()],
        }
    }

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let builtin = Registry::builtin();
        let checked = Registry::new(
            builtin.categories().to_vec(),
            builtin.core_tabs().to_vec(),
            catalog::roles(),
        );
        assert!(checked.is_ok());
    }

    #[test]
    fn test_resolve_tool_category() {
        let registry = Registry::builtin();
        assert_eq!(
            registry.resolve_tool_category("Financial Hub"),
            Some("Financial Management")
        );
        assert_eq!(registry.resolve_tool_category("NoSuchTool"), None);
    }

    #[test]
    fn test_existence_checks() {
        let registry = Registry::builtin();
        assert!(registry.category_exists("Field Management"));
        assert!(!registry.category_exists("field management"));
        assert!(registry.tool_exists("Daily Logs"));
        assert!(registry.core_tab_exists("reports"));
        assert!(!registry.core_tab_exists("Reports"));
    }

    #[test]
    fn test_every_tool_offers_overview() {
        let registry = Registry::builtin();
        for category in registry.categories() {
            for tool in &category.tools {
                let subs = registry.sub_tools(&tool.name).unwrap();
                assert_eq!(subs.first().map(String::as_str), Some("overview"));
            }
        }
    }

    #[test]
    fn test_allowed_categories() {
        let registry = Registry::builtin();

        let admin = registry.allowed_categories("admin");
        assert_eq!(admin.len(), registry.categories().len());

        let accountant = registry.allowed_categories("accountant");
        assert!(accountant.contains("Financial Management"));
        assert!(!accountant.contains("Field Management"));

        assert!(registry.allowed_categories("visitor").is_empty());
    }

    #[test]
    fn test_duplicate_tool_rejected() {
        let categories = vec![
            Category {
                name: "A".to_string(),
                tools: vec![tool("Shared")],
            },
            Category {
                name: "B".to_string(),
                tools: vec![tool("Shared")],
            },
        ];
        let err = Registry::new(categories, vec![], vec![]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateTool { ref tool, .. } if tool == "Shared"));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let categories = vec![
            Category {
                name: "A".to_string(),
                tools: vec![],
            },
            Category {
                name: "A".to_string(),
                tools: vec![],
            },
        ];
        let err = Registry::new(categories, vec![], vec![]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateCategory(ref name) if name == "A"));
    }

    #[test]
    fn test_role_with_unknown_category_rejected() {
        let roles = vec![RoleAccess {
            role: "viewer".to_string(),
            categories: vec!["Ghost".to_string()],
        }];
        let err = Registry::new(vec![], vec![], roles).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownCategory { .. }));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "categories": [
                { "name": "Site", "tools": [ { "name": "Gate Log", "sub_tools": ["overview", "entries"] } ] }
            ],
            "core_tabs": [ { "id": "home", "label": "Home" } ],
            "roles": [ { "role": "guard", "categories": ["*"] } ]
        }"#;
        let registry = Registry::from_json(json).unwrap();
        assert_eq!(registry.resolve_tool_category("Gate Log"), Some("Site"));
        assert!(registry.core_tab_exists("home"));
        assert_eq!(
            registry.allowed_categories("guard").into_iter().collect::<Vec<_>>(),
            vec!["Site".to_string()]
        );
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            Registry::from_json("{\"categories\": 3}"),
            Err(RegistryError::Parse(_))
        ));
    }
}
