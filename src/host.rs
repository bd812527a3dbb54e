use std::cell::RefCell;

use leptos::prelude::*;
use leptos::web_sys::{DomParser, Element, HtmlElement, HtmlScriptElement, SupportedType};
use wasm_bindgen::prelude::*;

use crate::app::UiStore;
use crate::bindings;
use crate::config::SiteConfig;
use crate::error::LoadError;
use crate::highlight::{current_path, Highlighter};
use crate::page_loader::{PageHost, ParsedPage};
use crate::sidebar_loader::SidebarHost;

/// Holds the owner of one mounted subtree; replacing it disposes of the
/// previous subtree's effects.
#[derive(Default)]
pub struct BindingSlot(RefCell<Option<Owner>>);

impl BindingSlot {
    pub fn replace(&self, fresh: Owner) {
        if let Some(previous) = self.0.replace(Some(fresh)) {
            previous.cleanup();
        }
    }
}

/// The live browser document, shared by both loaders.
pub struct BrowserHost {
    config: SiteConfig,
    highlighter: Highlighter,
    store: UiStore,
    owner: Owner,
    shell_bindings: BindingSlot,
    content_bindings: BindingSlot,
    sidebar_bindings: BindingSlot,
}

impl BrowserHost {
    pub fn new(config: SiteConfig, store: UiStore, owner: Owner) -> Self {
        Self {
            highlighter: Highlighter::new(&config),
            config,
            store,
            owner,
            shell_bindings: BindingSlot::default(),
            content_bindings: BindingSlot::default(),
            sidebar_bindings: BindingSlot::default(),
        }
    }

    fn main_content(&self) -> Option<Element> {
        document()
            .query_selector(&self.config.main_content_selector())
            .ok()
            .flatten()
    }

    fn sidebar_container(&self) -> Option<Element> {
        document().get_element_by_id(&self.config.sidebar_container_id)
    }

    /// Binds whatever the static page shell already contains. The initial
    /// main content goes first, into the slot the next swap disposes of; the
    /// shell mount then skips its already marked elements.
    pub fn mount_shell(&self) {
        if let Some(main) = self.main_content() {
            self.remount(&self.content_bindings, &main);
        }
        let Some(body) = document().body() else {
            return;
        };
        self.remount(&self.shell_bindings, &body);
    }

    fn remount(&self, slot: &BindingSlot, root: &Element) {
        slot.replace(bindings::mount(root, self.store, &self.owner));
    }
}

fn recreate_script(old: &Element) -> Result<HtmlScriptElement, LoadError> {
    let script: HtmlScriptElement = document()
        .create_element("script")
        .map_err(LoadError::dom)?
        .unchecked_into();
    let attrs = old.attributes();
    for i in 0..attrs.length() {
        if let Some(attr) = attrs.item(i) {
            script
                .set_attribute(&attr.name(), &attr.value())
                .map_err(LoadError::dom)?;
        }
    }
    // dynamically inserted external scripts default to async
    script.set_async(false);
    script.set_text_content(old.text_content().as_deref());
    Ok(script)
}

impl PageHost for BrowserHost {
    type Fragment = Element;

    fn main_content_selector(&self) -> String {
        self.config.main_content_selector()
    }

    fn has_main_content(&self) -> bool {
        self.main_content().is_some()
    }

    fn set_busy(&self) {
        let Some(el) = self.main_content().and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
            return;
        };
        let style = el.style();
        for (property, value) in [("opacity", "0.5"), ("pointer-events", "none")] {
            if let Err(err) = style.set_property(property, value) {
                log::warn!("could not set {property} on main content: {}", LoadError::dom(err));
            }
        }
    }

    fn parse_page(&self, html: &str) -> Result<ParsedPage<Element>, LoadError> {
        let parsed = DomParser::new()
            .map_err(LoadError::dom)?
            .parse_from_string(html, SupportedType::TextHtml)
            .map_err(LoadError::dom)?;
        let selector = self.config.main_content_selector();
        let fragment = parsed
            .query_selector(&selector)
            .map_err(LoadError::dom)?
            .ok_or(LoadError::MissingFragment { selector })?;
        Ok(ParsedPage {
            title: parsed.title(),
            fragment,
        })
    }

    fn set_title(&self, title: &str) {
        document().set_title(title);
    }

    fn replace_main_content(&self, fragment: &Element) -> Result<(), LoadError> {
        let current = self.main_content().ok_or_else(|| LoadError::MissingFragment {
            selector: self.config.main_content_selector(),
        })?;
        current
            .replace_with_with_node_1(fragment)
            .map_err(LoadError::dom)
    }

    fn current_path(&self) -> String {
        current_path()
    }

    fn push_history(&self, url: &str) -> Result<(), LoadError> {
        window()
            .history()
            .map_err(LoadError::dom)?
            .push_state_with_url(&JsValue::NULL, "", Some(url))
            .map_err(LoadError::dom)
    }

    fn highlight(&self, path: &str) -> Option<String> {
        self.highlighter.highlight(path).parent_group
    }

    fn run_scripts(&self, fragment: &Element) -> Result<usize, LoadError> {
        let body = document()
            .body()
            .ok_or_else(|| LoadError::Dom("document has no body".to_string()))?;
        let scripts = fragment
            .query_selector_all("script")
            .map_err(LoadError::dom)?;
        let mut count = 0;
        for i in 0..scripts.length() {
            let Some(old) = scripts.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let script = recreate_script(&old)?;
            body.append_child(&script).map_err(LoadError::dom)?;
            count += 1;
        }
        Ok(count)
    }

    fn mount(&self, fragment: &Element) {
        self.remount(&self.content_bindings, fragment);
    }

    fn navigate_hard(&self, url: &str) {
        if let Err(err) = window().location().set_href(url) {
            log::error!("full navigation to {url} failed: {}", LoadError::dom(err));
        }
    }
}

impl SidebarHost for BrowserHost {
    fn sidebar_url(&self) -> String {
        self.config.sidebar_url.clone()
    }

    fn error_html(&self) -> String {
        self.config.sidebar_error_html.clone()
    }

    fn set_sidebar_html(&self, html: &str) -> Result<(), LoadError> {
        let container = self.sidebar_container().ok_or_else(|| LoadError::MissingFragment {
            selector: format!("#{}", self.config.sidebar_container_id),
        })?;
        container.set_inner_html(html);
        Ok(())
    }

    fn highlight_current(&self) -> Option<String> {
        self.highlighter.highlight(&current_path()).parent_group
    }

    fn mount_sidebar(&self) {
        if let Some(container) = self.sidebar_container() {
            self.remount(&self.sidebar_bindings, &container);
        }
    }

    fn force_open(&self, group: &str) {
        self.store.sidebar.force_open(group);
    }
}
