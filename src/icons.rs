use leptos::prelude::*;
use leptos::web_sys::HtmlInputElement;
use wasm_bindgen::JsCast;

pub const ICON_NAMES: &[&str] = &[
    "home", "dashboard", "user", "users", "settings", "search", "bell", "mail", "inbox",
    "calendar", "clock", "chart-bar", "chart-pie", "chart-line", "table", "list", "grid",
    "folder", "file", "file-text", "image", "camera", "video", "music", "download", "upload",
    "cloud", "lock", "unlock", "key", "shield", "heart", "star", "bookmark", "tag", "cart",
    "credit-card", "wallet", "currency", "gift", "truck", "map", "map-pin", "globe", "link",
    "external-link", "edit", "trash", "copy", "plus", "minus", "check", "x", "info",
    "alert-triangle", "help", "sun", "moon", "menu", "chevron-down", "chevron-up",
    "chevron-left", "chevron-right", "arrow-left", "arrow-right", "refresh", "filter", "logout",
];

/// Case-insensitive substring filter; an empty query keeps every name.
pub fn filter_icons(query: &str) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    ICON_NAMES
        .iter()
        .copied()
        .filter(|name| needle.is_empty() || name.contains(needle.as_str()))
        .collect()
}

fn write_target(target_id: &str, name: &str) {
    let Some(input) = document()
        .get_element_by_id(target_id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        log::warn!("icon target #{target_id} is not an input");
        return;
    };
    input.set_value(name);
}

#[component]
pub fn IconPicker(
    /// Id of an input that receives the chosen name.
    target: Option<String>,
) -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let (selected, set_selected) = signal(None::<&'static str>);
    let matches = Memo::new(move |_| filter_icons(&query.get()));

    let choose = move |name: &'static str| {
        set_selected.set(Some(name));
        if let Some(target_id) = &target {
            write_target(target_id, name);
        }
    };

    view! {
        <div class="icon-picker flex flex-col gap-2">
            <input
                type="search"
                class="rounded-md border border-slate-200 dark:border-dark-border bg-white dark:bg-dark-surface px-3 py-2 text-sm"
                placeholder="Search icons..."
                prop:value=move || query.get()
                on:input=move |e| set_query.set(event_target_value(&e))
            />
            <div class="grid grid-cols-4 gap-2 max-h-64 overflow-y-auto">
                {move || {
                    let choose = choose.clone();
                    matches.get().into_iter().map(move |name| {
                        let choose = choose.clone();
                        let is_selected = move || selected.get() == Some(name);
                        view! {
                            <button
                                type="button"
                                class=move || if is_selected() {
                                    "rounded-md px-2 py-1 text-xs bg-brand-500 text-white"
                                } else {
                                    "rounded-md px-2 py-1 text-xs text-slate-600 dark:text-slate-300 hover:bg-brand-50 dark:hover:bg-brand-500/10"
                                }
                                on:click=move |_| choose(name)
                            >
                                {name}
                            </button>
                        }
                    }).collect::<Vec<_>>()
                }}
            </div>
            <Show when=move || matches.with(|m| m.is_empty())>
                <p class="text-sm text-slate-400">"No icons found."</p>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_lists_everything() {
        assert_eq!(filter_icons("").len(), ICON_NAMES.len());
        assert_eq!(filter_icons("   ").len(), ICON_NAMES.len());
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let hits = filter_icons("CHEVRON");
        assert_eq!(
            hits,
            vec!["chevron-down", "chevron-up", "chevron-left", "chevron-right"]
        );
        assert!(filter_icons("chart").iter().all(|n| n.starts_with("chart-")));
    }

    #[test]
    fn unmatched_query_is_empty() {
        assert!(filter_icons("zzz").is_empty());
    }
}
