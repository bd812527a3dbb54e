use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::web_sys::{Element, HtmlAnchorElement, MouseEvent};
use wasm_bindgen::prelude::*;

use crate::app::UiStore;
use crate::highlight::current_path;
use crate::page_loader::{self, PageHost, PagePhase};

/// A same-origin page the loader may fetch in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationTarget(String);

impl NavigationTarget {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The parts of a clicked anchor that decide interception.
#[derive(Clone, Copy, Debug)]
pub struct ClickedAnchor<'a> {
    pub href: Option<&'a str>,
    pub target: Option<&'a str>,
    pub hostname: &'a str,
}

impl ClickedAnchor<'_> {
    /// Returns the target to load in place, or `None` to let the browser
    /// handle the click.
    pub fn intercept(&self, current_hostname: &str) -> Option<NavigationTarget> {
        let href = self.href?;
        if href.is_empty() || href.starts_with('#') || href.starts_with("mailto:") {
            return None;
        }
        if self.target == Some("_blank") {
            return None;
        }
        if self.hostname != current_hostname {
            return None;
        }
        if !href.ends_with(".html") && href != "/" {
            return None;
        }
        Some(NavigationTarget(href.to_string()))
    }
}

/// Loads `url` in place and records each phase on the store.
pub async fn navigate<H: PageHost>(host: &H, store: UiStore, url: &str) {
    let phase = page_loader::begin(host, url);
    store.page.set(phase.clone());
    if !matches!(phase, PagePhase::Loading { .. }) {
        return;
    }
    let phase = page_loader::finish(host, url).await;
    store.page.set(phase);
}

fn enclosing_anchor(event: &MouseEvent) -> Option<HtmlAnchorElement> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest("a")
        .ok()??
        .dyn_into::<HtmlAnchorElement>()
        .ok()
}

/// Installs the document-level click interceptor and the `popstate`
/// handler. Both live for the rest of the page.
pub fn install<H: PageHost + 'static>(host: Rc<H>, store: UiStore) {
    let click_host = host.clone();
    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
        let Some(anchor) = enclosing_anchor(&e) else {
            return;
        };
        let href = anchor.get_attribute("href");
        let target = anchor.get_attribute("target");
        let hostname = anchor.hostname();
        let clicked = ClickedAnchor {
            href: href.as_deref(),
            target: target.as_deref(),
            hostname: &hostname,
        };
        let current_hostname = window().location().hostname().unwrap_or_default();
        let Some(target) = clicked.intercept(&current_hostname) else {
            return;
        };
        e.prevent_default();
        let host = click_host.clone();
        spawn_local(async move {
            navigate(&*host, store, target.as_str()).await;
        });
    });
    if document()
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .is_err()
    {
        log::error!("could not install click interceptor; links will reload the page");
    }
    on_click.forget();

    let on_popstate = Closure::<dyn FnMut(leptos::web_sys::PopStateEvent)>::new(
        move |_: leptos::web_sys::PopStateEvent| {
            let host = host.clone();
            let path = current_path();
            log::debug!("history moved to {path}");
            spawn_local(async move {
                navigate(&*host, store, &path).await;
            });
        },
    );
    if window()
        .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())
        .is_err()
    {
        log::error!("could not install popstate handler");
    }
    on_popstate.forget();
}
