use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::storage;

pub const DARK_CLASS: &str = "dark";
const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeFlag {
    Light,
    Dark,
}

impl ThemeFlag {
    /// A stored `"dark"` wins, any other stored value means light, and an
    /// empty slot defers to the system color scheme.
    pub fn resolve(stored: Option<&str>, prefers_dark: bool) -> Self {
        match stored {
            Some("dark") => Self::Dark,
            Some(_) => Self::Light,
            None if prefers_dark => Self::Dark,
            None => Self::Light,
        }
    }

    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggled(self) -> Self {
        Self::from_dark(!self.is_dark())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

fn apply_to_document(flag: ThemeFlag) {
    let Some(root) = document().document_element() else {
        return;
    };
    let classes = root.class_list();
    let result = if flag.is_dark() {
        classes.add_1(DARK_CLASS)
    } else {
        classes.remove_1(DARK_CLASS)
    };
    if result.is_err() {
        log::warn!("could not switch document theme to {}", flag.as_str());
    }
}

fn document_is_dark() -> bool {
    document()
        .document_element()
        .is_some_and(|root| root.class_list().contains(DARK_CLASS))
}

fn system_prefers_dark() -> bool {
    window()
        .match_media(DARK_SCHEME_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

/// Resolves the stored or system theme and applies it before anything
/// renders.
pub fn apply_initial(storage_key: &str) -> ThemeFlag {
    let stored = storage::get(storage_key);
    let flag = ThemeFlag::resolve(stored.as_deref(), system_prefers_dark());
    apply_to_document(flag);
    flag
}

/// Dark-mode flag of the reactive root.
#[derive(Clone, Copy)]
pub struct ThemeStore {
    is_dark: RwSignal<bool>,
    storage_key: StoredValue<String>,
}

impl ThemeStore {
    /// Mirrors whatever class the document carries at construction time.
    pub fn new(storage_key: &str) -> Self {
        Self {
            is_dark: RwSignal::new(document_is_dark()),
            storage_key: StoredValue::new(storage_key.to_string()),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark.get()
    }

    pub fn set_dark(&self, dark: bool) {
        let flag = ThemeFlag::from_dark(dark);
        self.is_dark.set(dark);
        apply_to_document(flag);
        self.storage_key
            .with_value(|key| storage::set(key, flag.as_str()));
    }

    pub fn toggle(&self) {
        let next = ThemeFlag::from_dark(self.is_dark.get_untracked()).toggled();
        self.set_dark(next.is_dark());
    }

    /// Follows live color-scheme changes for as long as the user has not
    /// stored an explicit choice.
    pub fn follow_system_preference(&self) {
        let Ok(Some(query)) = window().match_media(DARK_SCHEME_QUERY) else {
            return;
        };
        let is_dark = self.is_dark;
        let storage_key = self.storage_key;
        let closure = Closure::<dyn FnMut(leptos::web_sys::MediaQueryListEvent)>::new(
            move |e: leptos::web_sys::MediaQueryListEvent| {
                if storage_key.with_value(|key| storage::get(key)).is_some() {
                    return;
                }
                let flag = ThemeFlag::from_dark(e.matches());
                log::debug!("system color scheme changed to {}", flag.as_str());
                is_dark.set(flag.is_dark());
                apply_to_document(flag);
            },
        );
        if query
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("could not watch {DARK_SCHEME_QUERY}");
        }
        closure.forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_value_wins_over_system_scheme() {
        assert_eq!(ThemeFlag::resolve(Some("dark"), false), ThemeFlag::Dark);
        assert_eq!(ThemeFlag::resolve(Some("light"), true), ThemeFlag::Light);
    }

    #[test]
    fn unrecognized_stored_value_means_light() {
        assert_eq!(ThemeFlag::resolve(Some("sepia"), true), ThemeFlag::Light);
    }

    #[test]
    fn empty_slot_follows_system_scheme() {
        assert_eq!(ThemeFlag::resolve(None, true), ThemeFlag::Dark);
        assert_eq!(ThemeFlag::resolve(None, false), ThemeFlag::Light);
    }

    #[test]
    fn toggling_round_trips_storage_strings() {
        let flag = ThemeFlag::Light.toggled();
        assert_eq!(flag, ThemeFlag::Dark);
        assert_eq!(flag.as_str(), "dark");
        assert_eq!(flag.toggled().as_str(), "light");
    }
}
