use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::SiteConfig;
use crate::host::BrowserHost;
use crate::page_loader::PagePhase;
use crate::sidebar::SidebarStore;
use crate::theme::{self, ThemeStore};
use crate::{logging, nav, sidebar_loader, tokens};

/// Reactive root: every binding and loader reads and writes through it.
#[derive(Clone, Copy)]
pub struct UiStore {
    pub theme: ThemeStore,
    pub sidebar: SidebarStore,
    pub page: RwSignal<PagePhase>,
}

impl UiStore {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            theme: ThemeStore::new(&config.theme_storage_key),
            sidebar: SidebarStore::new(
                &config.mini_storage_key,
                Duration::from_millis(config.submenu_delay_ms),
            ),
            page: RwSignal::new(PagePhase::Idle),
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = SiteConfig::from_document();
    logging::init(config.log_level());
    tokens::install();
    let initial = theme::apply_initial(&config.theme_storage_key);
    log::debug!("starting with {} theme", initial.as_str());

    let store = UiStore::new(&config);
    store.sidebar.persist_mini_mode();
    store.theme.follow_system_preference();

    Effect::new(move |_| {
        match store.page.get() {
            PagePhase::Loaded {
                path,
                parent_group: Some(group),
            } => log::debug!("{path} belongs to menu group `{group}`"),
            PagePhase::Failed { url, error } => {
                log::warn!("falling back to full load of {url}: {error}")
            }
            _ => {}
        }
    });

    let owner = Owner::current().unwrap_or_else(Owner::new);
    let host = Rc::new(BrowserHost::new(config, store, owner));
    host.mount_shell();
    nav::install(host.clone(), store);

    spawn_local(async move {
        let phase = sidebar_loader::load_sidebar(&*host).await;
        log::debug!("sidebar finished: {phase:?}");
    });
}
