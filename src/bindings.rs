//! Declarative `data-*` bindings, mounted explicitly over a subtree after it
//! enters the document.
//!
//! Recognized attributes:
//!
//! - `data-action="toggle-sidebar" | "toggle-mini" | "toggle-theme"`
//! - `data-submenu-toggle="<id>"` and `data-submenu="<id>"`
//! - `data-show-when` / `data-hide-when` with `sidebar-open`, `sidebar-mini`,
//!   `dark` or `light`
//! - `data-class-when="<state>:<classes>"`
//! - `data-icon-picker` (optionally with `data-icon-target="<input id>"`)
//! - `data-format="rupiah"`

use leptos::prelude::*;
use leptos::web_sys::{Element, HtmlElement, MouseEvent};
use wasm_bindgen::prelude::*;

use crate::app::UiStore;
use crate::format::{format_rupiah, parse_amount};
use crate::icons::IconPicker;

const MOUNTED_ATTR: &str = "data-vibe-mounted";
const BOUND_SELECTOR: &str = "[data-action],[data-submenu-toggle],[data-submenu],\
    [data-show-when],[data-hide-when],[data-class-when],[data-icon-picker],[data-format]";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ToggleSidebar,
    ToggleMini,
    ToggleTheme,
}

impl Action {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "toggle-sidebar" => Some(Self::ToggleSidebar),
            "toggle-mini" => Some(Self::ToggleMini),
            "toggle-theme" => Some(Self::ToggleTheme),
            _ => None,
        }
    }

    fn run(self, store: UiStore) {
        match self {
            Self::ToggleSidebar => store.sidebar.toggle_sidebar(),
            Self::ToggleMini => store.sidebar.toggle_mini(),
            Self::ToggleTheme => store.theme.toggle(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundState {
    SidebarOpen,
    SidebarMini,
    Dark,
    Light,
}

impl BoundState {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "sidebar-open" => Some(Self::SidebarOpen),
            "sidebar-mini" => Some(Self::SidebarMini),
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    fn holds(self, store: UiStore) -> bool {
        match self {
            Self::SidebarOpen => store.sidebar.mobile_open(),
            Self::SidebarMini => store.sidebar.mini_mode(),
            Self::Dark => store.theme.is_dark(),
            Self::Light => !store.theme.is_dark(),
        }
    }
}

/// Splits `"sidebar-mini:w-20 px-2"` into its state and classes.
pub fn parse_class_when(value: &str) -> Option<(BoundState, Vec<String>)> {
    let (state, classes) = value.split_once(':')?;
    let state = BoundState::parse(state)?;
    let classes: Vec<String> = classes.split_whitespace().map(str::to_string).collect();
    if classes.is_empty() {
        return None;
    }
    Some((state, classes))
}

/// Binds every unmounted element under (and including) `root`. The returned
/// owner holds the effects; cleaning it up stops them.
pub fn mount(root: &Element, store: UiStore, parent: &Owner) -> Owner {
    let owner = parent.child();
    owner.with(|| {
        let mut bound = 0;
        for el in bound_elements(root) {
            if el.has_attribute(MOUNTED_ATTR) {
                continue;
            }
            bind_element(&el, store);
            if el.set_attribute(MOUNTED_ATTR, "").is_err() {
                log::warn!("could not mark <{}> as mounted", el.tag_name().to_lowercase());
            }
            bound += 1;
        }
        log::debug!("mounted bindings on {bound} element(s)");
    });
    owner
}

fn bound_elements(root: &Element) -> Vec<Element> {
    let mut out = Vec::new();
    if root.matches(BOUND_SELECTOR).unwrap_or(false) {
        out.push(root.clone());
    }
    if let Ok(nodes) = root.query_selector_all(BOUND_SELECTOR) {
        out.extend(
            (0..nodes.length())
                .filter_map(|i| nodes.item(i))
                .filter_map(|node| node.dyn_into::<Element>().ok()),
        );
    }
    out
}

fn bind_element(el: &Element, store: UiStore) {
    if let Some(value) = el.get_attribute("data-action") {
        match Action::parse(&value) {
            Some(action) => on_click(el, move || action.run(store)),
            None => log::warn!("unknown data-action `{value}`"),
        }
    }
    if let Some(id) = el.get_attribute("data-submenu-toggle") {
        on_click(el, move || store.sidebar.toggle_submenu(&id));
    }
    if let Some(id) = el.get_attribute("data-submenu") {
        bind_visibility(el, move || store.sidebar.is_submenu_open(&id));
    }
    if let Some(state) = el.get_attribute("data-show-when").and_then(|v| BoundState::parse(&v)) {
        bind_visibility(el, move || state.holds(store));
    }
    if let Some(state) = el.get_attribute("data-hide-when").and_then(|v| BoundState::parse(&v)) {
        bind_visibility(el, move || !state.holds(store));
    }
    if let Some(value) = el.get_attribute("data-class-when") {
        match parse_class_when(&value) {
            Some((state, classes)) => bind_classes(el, state, classes, store),
            None => log::warn!("malformed data-class-when `{value}`"),
        }
    }
    if el.has_attribute("data-icon-picker") {
        mount_icon_picker(el);
    }
    if el.get_attribute("data-format").as_deref() == Some("rupiah") {
        if let Some(amount) = el.text_content().as_deref().and_then(parse_amount) {
            el.set_text_content(Some(&format_rupiah(amount)));
        }
    }
}

fn on_click(el: &Element, mut handler: impl FnMut() + 'static) {
    let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
        e.prevent_default();
        handler();
    });
    if el
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("could not bind click on <{}>", el.tag_name().to_lowercase());
    }
    closure.forget();
}

fn bind_visibility(el: &Element, visible: impl Fn() -> bool + 'static) {
    let Some(el) = el.dyn_ref::<HtmlElement>().cloned() else {
        return;
    };
    Effect::new(move |_| el.set_hidden(!visible()));
}

fn bind_classes(el: &Element, state: BoundState, classes: Vec<String>, store: UiStore) {
    let el = el.clone();
    Effect::new(move |_| {
        let on = state.holds(store);
        let list = el.class_list();
        for class in &classes {
            if list.toggle_with_force(class, on).is_err() {
                log::warn!("could not toggle class `{class}`");
            }
        }
    });
}

fn mount_icon_picker(el: &Element) {
    let Some(parent) = el.dyn_ref::<HtmlElement>().cloned() else {
        return;
    };
    let target = el.get_attribute("data-icon-target");
    leptos::mount::mount_to(parent, move || view! { <IconPicker target=target /> }).forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_actions() {
        assert_eq!(Action::parse("toggle-mini"), Some(Action::ToggleMini));
        assert_eq!(Action::parse(" toggle-theme "), Some(Action::ToggleTheme));
        assert_eq!(Action::parse("explode"), None);
    }

    #[test]
    fn parses_class_when() {
        let (state, classes) = parse_class_when("sidebar-mini:w-20 px-2").unwrap();
        assert_eq!(state, BoundState::SidebarMini);
        assert_eq!(classes, vec!["w-20", "px-2"]);
    }

    #[test]
    fn rejects_malformed_class_when() {
        assert!(parse_class_when("sidebar-mini").is_none());
        assert!(parse_class_when("sidebar-mini:   ").is_none());
        assert!(parse_class_when("sometimes:w-20").is_none());
    }

    #[test]
    fn parses_bound_states() {
        assert_eq!(BoundState::parse("dark"), Some(BoundState::Dark));
        assert_eq!(BoundState::parse("sidebar-open"), Some(BoundState::SidebarOpen));
        assert_eq!(BoundState::parse("open"), None);
    }
}
