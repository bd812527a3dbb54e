use leptos::prelude::*;
use leptos::web_sys::Element;
use regex::Regex;
use wasm_bindgen::JsCast;

use crate::config::SiteConfig;

/// An anchor the highlighter can restyle.
pub trait SidebarLink {
    /// Raw `href` attribute, not the resolved URL.
    fn href(&self) -> Option<String>;
    fn swap_classes(&self, remove: &[String], add: &[String]);
}

impl SidebarLink for Element {
    fn href(&self) -> Option<String> {
        self.get_attribute("href")
    }

    fn swap_classes(&self, remove: &[String], add: &[String]) {
        let classes = self.class_list();
        for class in remove {
            if classes.remove_1(class).is_err() {
                log::warn!("could not remove class `{class}` from sidebar link");
            }
        }
        for class in add {
            if classes.add_1(class).is_err() {
                log::warn!("could not add class `{class}` to sidebar link");
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightReport {
    /// Number of anchors that matched the path.
    pub active_links: usize,
    /// Group of the last active anchor carrying a known marker.
    pub parent_group: Option<String>,
    /// Every group hit during the scan, in document order.
    pub matched_groups: Vec<String>,
}

impl HighlightReport {
    /// True when active anchors disagree on which group to expand.
    pub fn is_ambiguous(&self) -> bool {
        self.matched_groups
            .iter()
            .any(|group| Some(group) != self.parent_group.as_ref())
    }
}

pub fn href_matches(path: &str, href: &str) -> bool {
    !href.is_empty() && href != "#" && path.ends_with(href)
}

pub struct Highlighter {
    groups: Vec<(Regex, String)>,
    active: Vec<String>,
    inactive: Vec<String>,
    anchor_selector: String,
}

impl Highlighter {
    pub fn new(config: &SiteConfig) -> Self {
        let groups = config
            .parent_groups
            .iter()
            .filter_map(|rule| match Regex::new(&rule.marker) {
                Ok(re) => Some((re, rule.group.clone())),
                Err(err) => {
                    log::warn!("skipping parent group `{}`: {err}", rule.group);
                    None
                }
            })
            .collect();
        Self {
            groups,
            active: config.active_classes.clone(),
            inactive: config.inactive_classes.clone(),
            anchor_selector: config.sidebar_anchor_selector(),
        }
    }

    fn group_for(&self, href: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(re, _)| re.is_match(href))
            .map(|(_, group)| group.as_str())
    }

    /// Restyles every link for `path`. Later matches overwrite the parent
    /// group of earlier ones.
    pub fn apply_to<L: SidebarLink>(&self, path: &str, links: &[L]) -> HighlightReport {
        let mut report = HighlightReport::default();
        for link in links {
            link.swap_classes(&self.active, &self.inactive);
            let Some(href) = link.href() else {
                continue;
            };
            if !href_matches(path, &href) {
                continue;
            }
            link.swap_classes(&self.inactive, &self.active);
            report.active_links += 1;
            if let Some(group) = self.group_for(&href) {
                report.parent_group = Some(group.to_string());
                report.matched_groups.push(group.to_string());
            }
        }
        if report.is_ambiguous() {
            log::warn!(
                "active links span groups {:?}; expanding {:?}",
                report.matched_groups,
                report.parent_group
            );
        }
        report
    }

    /// Restyles the anchors of the live sidebar.
    pub fn highlight(&self, path: &str) -> HighlightReport {
        let links = sidebar_anchors(&self.anchor_selector);
        let report = self.apply_to(path, &links);
        log::debug!(
            "highlighted {} link(s) for {path}, group {:?}",
            report.active_links,
            report.parent_group
        );
        report
    }
}

fn sidebar_anchors(selector: &str) -> Vec<Element> {
    let Ok(nodes) = document().query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn current_path() -> String {
    window().location().pathname().unwrap_or_else(|_| "/".to_string())
}
