// src/console/nav.rs

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavSection {
    pub label: &'static str,
    pub href: &'static str,
}

pub const SECTIONS: [NavSection; 5] = [
    NavSection { label: "Events", href: "/events" },
    NavSection { label: "Store", href: "/store" },
    NavSection { label: "Orders", href: "/orders" },
    NavSection { label: "Members", href: "/members" },
    NavSection { label: "Settings", href: "/settings" },
];

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShellView {
    pub display_name: String,
    pub email: String,
    pub sections: Vec<NavItem>,
}

/// Seção ativa: a que tem o href como prefixo do caminho atual.
pub fn active_section(path: &str) -> Option<&'static NavSection> {
    SECTIONS.iter().find(|s| {
        path == s.href
            || path
                .strip_prefix(s.href)
                .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('?'))
    })
}

pub fn nav_items(path: &str) -> Vec<NavItem> {
    let active = active_section(path);
    SECTIONS
        .iter()
        .map(|s| NavItem {
            label: s.label,
            href: s.href,
            active: active.is_some_and(|a| a.href == s.href),
        })
        .collect()
}
