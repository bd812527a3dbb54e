mod app;
mod bindings;
mod config;
mod error;
mod fetch;
mod format;
mod highlight;
mod host;
mod icons;
mod logging;
mod nav;
mod page_loader;
mod sidebar;
mod sidebar_loader;
mod storage;
mod theme;
mod tokens;

use app::*;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
    mount_to_body(|| view! { <App/> })
}
