use std::collections::HashMap;
use std::time::Duration;

use leptos::prelude::*;

use crate::storage;

/// What a submenu toggle did to the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmenuToggle {
    /// The submenu flag was flipped in place.
    Applied { open: bool },
    /// Mini mode was left; the flip must follow once the sidebar has widened.
    Deferred { id: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarState {
    pub mobile_open: bool,
    pub mini_mode: bool,
    open_menus: HashMap<String, bool>,
}

impl SidebarState {
    pub fn new(mini_mode: bool) -> Self {
        Self {
            mini_mode,
            ..Self::default()
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.mobile_open = !self.mobile_open;
    }

    pub fn toggle_mini(&mut self) {
        self.mini_mode = !self.mini_mode;
        if self.mini_mode {
            self.open_menus.clear();
        }
    }

    pub fn toggle_submenu(&mut self, id: &str) -> SubmenuToggle {
        if self.mini_mode {
            self.mini_mode = false;
            return SubmenuToggle::Deferred { id: id.to_string() };
        }
        SubmenuToggle::Applied {
            open: self.flip_submenu(id),
        }
    }

    /// Flips one submenu and returns its new state.
    pub fn flip_submenu(&mut self, id: &str) -> bool {
        let open = !self.is_submenu_open(id);
        self.open_menus.insert(id.to_string(), open);
        open
    }

    /// Sets a submenu open without toggling; used when a freshly loaded
    /// sidebar must reveal the active link's group.
    pub fn force_open(&mut self, id: &str) {
        self.open_menus.insert(id.to_string(), true);
    }

    pub fn is_submenu_open(&self, id: &str) -> bool {
        self.open_menus.get(id).copied().unwrap_or(false)
    }

    pub fn open_menu_count(&self) -> usize {
        self.open_menus.values().filter(|open| **open).count()
    }
}

/// Runs a task once a delay has passed.
pub type Defer = fn(Box<dyn FnOnce()>, Duration);

fn defer_with_timeout(task: Box<dyn FnOnce()>, delay: Duration) {
    set_timeout(task, delay);
}

/// Storage value to write when the mini flag moves from `previous` to
/// `mini`; nothing on the first run or when it did not change.
fn mini_flag_write(previous: Option<bool>, mini: bool) -> Option<&'static str> {
    match previous {
        Some(prev) if prev != mini => Some(if mini { "true" } else { "false" }),
        _ => None,
    }
}

/// Reactive wrapper around [`SidebarState`] that persists mini mode and
/// schedules deferred submenu flips.
#[derive(Clone, Copy)]
pub struct SidebarStore {
    state: RwSignal<SidebarState>,
    mini_key: StoredValue<String>,
    submenu_delay: Duration,
    defer: Defer,
}

impl SidebarStore {
    pub fn new(mini_key: &str, submenu_delay: Duration) -> Self {
        let mini = storage::get(mini_key).as_deref() == Some("true");
        Self::with_state(
            SidebarState::new(mini),
            mini_key,
            submenu_delay,
            defer_with_timeout,
        )
    }

    pub fn with_state(
        state: SidebarState,
        mini_key: &str,
        submenu_delay: Duration,
        defer: Defer,
    ) -> Self {
        Self {
            state: RwSignal::new(state),
            mini_key: StoredValue::new(mini_key.to_string()),
            submenu_delay,
            defer,
        }
    }

    /// Writes the mini flag to storage whenever it changes.
    pub fn persist_mini_mode(&self) {
        let state = self.state;
        let mini_key = self.mini_key;
        Effect::new(move |previous: Option<bool>| {
            let mini = state.with(|s| s.mini_mode);
            if let Some(value) = mini_flag_write(previous, mini) {
                mini_key.with_value(|key| storage::set(key, value));
            }
            mini
        });
    }

    pub fn mobile_open(&self) -> bool {
        self.state.with(|s| s.mobile_open)
    }

    pub fn mini_mode(&self) -> bool {
        self.state.with(|s| s.mini_mode)
    }

    pub fn is_submenu_open(&self, id: &str) -> bool {
        self.state.with(|s| s.is_submenu_open(id))
    }

    pub fn toggle_sidebar(&self) {
        self.state.update(SidebarState::toggle_sidebar);
    }

    pub fn toggle_mini(&self) {
        let closed = self.state.with_untracked(SidebarState::open_menu_count);
        self.state.update(SidebarState::toggle_mini);
        if self.state.with_untracked(|s| s.mini_mode) && closed > 0 {
            log::debug!("mini mode closed {closed} submenu(s)");
        }
    }

    pub fn toggle_submenu(&self, id: &str) {
        let mut outcome = None;
        self.state.update(|s| outcome = Some(s.toggle_submenu(id)));
        if let Some(SubmenuToggle::Deferred { id }) = outcome {
            let state = self.state;
            (self.defer)(
                Box::new(move || {
                    state.update(|s| {
                        s.flip_submenu(&id);
                    })
                }),
                self.submenu_delay,
            );
        }
    }

    pub fn force_open(&self, id: &str) {
        self.state.update(|s| s.force_open(id));
    }
}
