use serde::{Deserialize, Serialize};

/// Id of the optional `<script type="application/json">` element that
/// overrides [`SiteConfig`] fields for a page.
pub const CONFIG_ELEMENT_ID: &str = "vibe-config";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ParentGroupRule {
    /// Regex matched against an active anchor's `href`.
    pub marker: String,
    pub group: String,
}

impl ParentGroupRule {
    fn new(marker: &str, group: &str) -> Self {
        Self {
            marker: marker.to_string(),
            group: group.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub sidebar_url: String,
    pub sidebar_container_id: String,
    pub main_content_class: String,
    pub theme_storage_key: String,
    pub mini_storage_key: String,
    pub submenu_delay_ms: u64,
    pub active_classes: Vec<String>,
    pub inactive_classes: Vec<String>,
    pub parent_groups: Vec<ParentGroupRule>,
    pub sidebar_error_html: String,
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            sidebar_url: "/partials/sidebar.html".to_string(),
            sidebar_container_id: "sidebar-container".to_string(),
            main_content_class: "main-content".to_string(),
            theme_storage_key: "theme".to_string(),
            mini_storage_key: "arisan_sidebar_mini".to_string(),
            submenu_delay_ms: 150,
            active_classes: split_classes(
                "bg-brand-50 text-brand-600 dark:bg-brand-500/10 dark:text-brand-400 font-medium",
            ),
            inactive_classes: split_classes(
                "text-slate-600 dark:text-slate-400 hover:bg-slate-50 dark:hover:bg-slate-800 hover:text-slate-900 dark:hover:text-slate-200",
            ),
            parent_groups: vec![
                ParentGroupRule::new("components/", "core"),
                ParentGroupRule::new("forms/", "forms"),
                ParentGroupRule::new("tables/", "tables"),
                ParentGroupRule::new("charts/", "charts"),
                ParentGroupRule::new("pages/", "pages"),
            ],
            sidebar_error_html:
                "<div class=\"p-4 text-sm text-red-500\">Failed to load sidebar.</div>".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parses a JSON override on top of the defaults. Missing fields keep
    /// their default values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads the page's embedded override, falling back to defaults when the
    /// element is absent or malformed.
    pub fn from_document() -> Self {
        let Some(text) = leptos::prelude::document()
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };
        match Self::from_json(&text) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring malformed #{CONFIG_ELEMENT_ID}: {err}");
                Self::default()
            }
        }
    }

    pub fn main_content_selector(&self) -> String {
        format!(".{}", self.main_content_class)
    }

    pub fn sidebar_anchor_selector(&self) -> String {
        format!("#{} a", self.sidebar_container_id)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

fn split_classes(classes: &str) -> Vec<String> {
    classes.split_whitespace().map(str::to_string).collect()
}
