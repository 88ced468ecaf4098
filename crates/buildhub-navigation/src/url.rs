//! Query-string wire format
//!
//! A committed navigation and its view parameters travel in the address bar as
//! query pairs. Every key carries the configured prefix (empty by default):
//!
//! ```text
//! {p}category  {p}tool  {p}subTool  {p}coreTab
//! {p}page  {p}sort  {p}search  {p}filter_<key>  {p}custom_<key>
//! ```
//!
//! Keys appear only for set values. `{p}sub` and `{p}view` are still read as
//! aliases of `subTool` and `coreTab` so older shared links keep working.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::{form_urlencoded, Url};

use crate::config::NavigationConfig;

const FILTER_PREFIX: &str = "filter_";
const CUSTOM_PREFIX: &str = "custom_";

/// Per-view state that rides along with the navigation in shared links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewParams {
    pub page: Option<u32>,
    pub sort: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
    #[serde(default)]
    pub custom: BTreeMap<String, String>,
}

impl ViewParams {
    pub fn is_empty(&self) -> bool {
        self.page.is_none()
            && self.sort.is_none()
            && self.search.is_none()
            && self.filters.is_empty()
            && self.custom.is_empty()
    }
}

/// Everything an address-bar location encodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepLink {
    pub navigation: NavigationConfig,
    pub view: ViewParams,
}

#[derive(Debug, Clone)]
pub struct UrlScheme {
    prefix: String,
    base_path: String,
}

impl UrlScheme {
    pub fn new(prefix: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            base_path: base_path.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Query string (without `?`) for a navigation and its view parameters.
    pub fn query(&self, link: &DeepLink) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        let nav = &link.navigation;

        let fields = [
            ("category", &nav.category),
            ("tool", &nav.tool),
            ("subTool", &nav.sub_tool),
            ("coreTab", &nav.core_tab),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                serializer.append_pair(&self.key(name), value);
            }
        }

        let view = &link.view;
        if let Some(page) = view.page {
            serializer.append_pair(&self.key("page"), &page.to_string());
        }
        if let Some(sort) = &view.sort {
            serializer.append_pair(&self.key("sort"), sort);
        }
        if let Some(search) = &view.search {
            serializer.append_pair(&self.key("search"), search);
        }
        for (name, value) in &view.filters {
            serializer.append_pair(&self.key(&format!("{FILTER_PREFIX}{name}")), value);
        }
        for (name, value) in &view.custom {
            serializer.append_pair(&self.key(&format!("{CUSTOM_PREFIX}{name}")), value);
        }

        serializer.finish()
    }

    /// Full location: base path, then `?query` when anything is set.
    pub fn location(&self, link: &DeepLink) -> String {
        let query = self.query(link);
        if query.is_empty() {
            self.base_path.clone()
        } else {
            format!("{}?{}", self.base_path, query)
        }
    }

    pub fn navigation_url(&self, config: &NavigationConfig) -> String {
        self.location(&DeepLink {
            navigation: config.clone(),
            view: ViewParams::default(),
        })
    }

    /// Decode a location. Unknown, foreign-prefixed and empty parameters are ignored.
    pub fn parse(&self, location: &str) -> DeepLink {
        let query = extract_query(location);
        let mut link = DeepLink::default();
        let mut sub_alias = None;
        let mut view_alias = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let Some(name) = key.strip_prefix(self.prefix.as_str()) else {
                continue;
            };
            let value = value.into_owned();

            match name {
                "category" => link.navigation.category = Some(value),
                "tool" => link.navigation.tool = Some(value),
                "subTool" => link.navigation.sub_tool = Some(value),
                "coreTab" => link.navigation.core_tab = Some(value),
                "sub" => sub_alias = Some(value),
                "view" => view_alias = Some(value),
                "page" => match value.parse::<u32>() {
                    Ok(page) => link.view.page = Some(page),
                    Err(_) => tracing::debug!(page = %value, "Ignoring non-numeric page parameter"),
                },
                "sort" => link.view.sort = Some(value),
                "search" => link.view.search = Some(value),
                other => {
                    if let Some(filter) = other.strip_prefix(FILTER_PREFIX) {
                        link.view.filters.insert(filter.to_string(), value);
                    } else if let Some(custom) = other.strip_prefix(CUSTOM_PREFIX) {
                        link.view.custom.insert(custom.to_string(), value);
                    }
                }
            }
        }

        if link.navigation.sub_tool.is_none() {
            link.navigation.sub_tool = sub_alias;
        }
        if link.navigation.core_tab.is_none() {
            link.navigation.core_tab = view_alias;
        }

        link
    }
}

impl Default for UrlScheme {
    fn default() -> Self {
        Self::new("", "/")
    }
}

/// Query part of an absolute URL, a path with a query, or a bare query.
fn extract_query(location: &str) -> String {
    if location.contains("://") {
        if let Ok(url) = Url::parse(location) {
            return url.query().unwrap_or_default().to_string();
        }
    }

    let without_fragment = location.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((_, query)) => query.to_string(),
        None if !without_fragment.starts_with('/') && without_fragment.contains('=') => {
            without_fragment.to_string()
        }
        None => String::new(),
    }
}
