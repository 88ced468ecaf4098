//! Breadcrumbs derived from the committed navigation

use serde::Serialize;

use crate::config::NavigationConfig;

pub const ROOT_LABEL: &str = "Overview";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    pub label: String,
    /// Where clicking the crumb navigates to
    pub navigation: NavigationConfig,
    pub clickable: bool,
}

impl BreadcrumbItem {
    fn link(label: &str, navigation: NavigationConfig) -> Self {
        Self {
            label: label.to_string(),
            navigation,
            clickable: true,
        }
    }

    fn current(label: &str, navigation: NavigationConfig) -> Self {
        Self {
            label: label.to_string(),
            navigation,
            clickable: false,
        }
    }
}

/// Overview, then category, tool, sub-tool and core tab, whichever are set.
/// Sub-tool and core-tab crumbs are the current page and are not clickable.
pub fn breadcrumbs(committed: &NavigationConfig) -> Vec<BreadcrumbItem> {
    let mut items = vec![BreadcrumbItem::link(ROOT_LABEL, NavigationConfig::empty())];

    if let Some(category) = &committed.category {
        items.push(BreadcrumbItem::link(
            category,
            NavigationConfig::for_category(category.as_str()),
        ));
    }

    if let Some(tool) = &committed.tool {
        items.push(BreadcrumbItem::link(
            tool,
            NavigationConfig {
                category: committed.category.clone(),
                tool: Some(tool.clone()),
                sub_tool: None,
                core_tab: None,
            },
        ));
    }

    if let Some(sub_tool) = &committed.sub_tool {
        items.push(BreadcrumbItem::current(
            sub_tool,
            NavigationConfig::for_sub_tool(committed, sub_tool.as_str()),
        ));
    }

    if let Some(core_tab) = &committed.core_tab {
        items.push(BreadcrumbItem::current(
            core_tab,
            NavigationConfig::for_core_tab(core_tab.as_str()),
        ));
    }

    items
}
