//! Thin wrappers over `window.localStorage`. Reads and writes never fail
//! loudly: a missing or locked storage behaves like an empty one.

use leptos::web_sys::Storage;

fn local_storage() -> Option<Storage> {
    leptos::web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn get(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

pub fn set(key: &str, value: &str) {
    let Some(storage) = local_storage() else {
        log::warn!("localStorage unavailable, `{key}` not persisted");
        return;
    };
    if storage.set_item(key, value).is_err() {
        log::warn!("failed to persist `{key}`");
    }
}
