//! Built-in construction-management catalog

use crate::registry::{Category, CoreTab, RoleAccess, Tool, ALL_CATEGORIES};

const CATEGORIES: &[(&str, &[(&str, &[&str])])] = &[
    (
        "Project Management",
        &[
            ("Project Hub", &["overview", "milestones", "team", "settings"]),
            ("Schedule", &["overview", "gantt", "lookahead", "baseline"]),
            ("Document Control", &["overview", "drawings", "specifications", "transmittals"]),
            ("RFIs", &["overview", "open", "answered", "log"]),
            ("Submittals", &["overview", "register", "packages", "reviews"]),
        ],
    ),
    (
        "Financial Management",
        &[
            ("Financial Hub", &["overview", "cash-flow", "commitments", "forecast"]),
            ("Budget", &["overview", "line-items", "modifications", "snapshots"]),
            ("Change Orders", &["overview", "potential", "approved", "log"]),
            ("Invoicing", &["overview", "owner", "subcontractor", "retention"]),
            ("Cost Forecasting", &["overview", "trends", "variance"]),
        ],
    ),
    (
        "Field Management",
        &[
            ("Daily Logs", &["overview", "manpower", "weather", "deliveries"]),
            ("Punch List", &["overview", "open", "ready-for-review", "closed"]),
            ("Inspections", &["overview", "scheduled", "results", "templates"]),
            ("Safety", &["overview", "incidents", "observations", "toolbox-talks"]),
            ("Equipment", &["overview", "inventory", "maintenance"]),
        ],
    ),
    (
        "Preconstruction",
        &[
            ("Bid Management", &["overview", "packages", "bidders", "leveling"]),
            ("Estimating", &["overview", "takeoff", "assemblies", "pricing"]),
            ("Prequalification", &["overview", "applications", "scorecards"]),
        ],
    ),
    (
        "Closeout",
        &[
            ("Warranties", &["overview", "register", "claims"]),
            ("As-Builts", &["overview", "markups", "final-set"]),
            ("Turnover", &["overview", "manuals", "training"]),
        ],
    ),
];

const CORE_TABS: &[(&str, &str)] = &[
    ("dashboard", "Dashboard"),
    ("tasks", "My Tasks"),
    ("reports", "Reports"),
    ("calendar", "Calendar"),
    ("directory", "Directory"),
];

const ROLES: &[(&str, &[&str])] = &[
    ("admin", &[ALL_CATEGORIES]),
    (
        "project_manager",
        &[
            "Project Management",
            "Financial Management",
            "Field Management",
            "Preconstruction",
            "Closeout",
        ],
    ),
    ("superintendent", &["Project Management", "Field Management"]),
    ("accountant", &["Financial Management"]),
    ("estimator", &["Preconstruction", "Financial Management"]),
];

pub(crate) fn categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .map(|(name, tools)| Category {
            name: name.to_string(),
            tools: tools
                .iter()
                .map(|(tool, subs)| Tool {
                    name: tool.to_string(),
                    sub_tools: subs.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        })
        .collect()
}

pub(crate) fn core_tabs() -> Vec<CoreTab> {
    CORE_TABS
        .iter()
        .map(|(id, label)| CoreTab {
            id: id.to_string(),
            label: label.to_string(),
        })
        .collect()
}

pub(crate) fn roles() -> Vec<RoleAccess> {
    ROLES
        .iter()
        .map(|(role, categories)| RoleAccess {
            role: role.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        })
        .collect()
}
