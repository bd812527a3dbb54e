use crate::error::LoadError;
use crate::fetch::fetch_text;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarPhase {
    Loaded { parent_group: Option<String> },
    Failed { error: LoadError },
}

/// The sidebar container as seen by the loader.
pub trait SidebarHost {
    fn sidebar_url(&self) -> String;
    fn error_html(&self) -> String;
    fn set_sidebar_html(&self, html: &str) -> Result<(), LoadError>;
    /// Highlights against the current location.
    fn highlight_current(&self) -> Option<String>;
    fn mount_sidebar(&self);
    fn force_open(&self, group: &str);
}

/// Injects a fetched sidebar, or the inline error message when the fetch
/// failed.
pub fn complete<H: SidebarHost>(host: &H, fetched: Result<String, LoadError>) -> SidebarPhase {
    let html = match fetched {
        Ok(html) => html,
        Err(error) => {
            log::error!("sidebar load failed: {error}");
            if let Err(err) = host.set_sidebar_html(&host.error_html()) {
                log::error!("could not show sidebar error: {err}");
            }
            return SidebarPhase::Failed { error };
        }
    };
    if let Err(error) = host.set_sidebar_html(&html) {
        log::error!("could not inject sidebar: {error}");
        return SidebarPhase::Failed { error };
    }
    let parent_group = host.highlight_current();
    host.mount_sidebar();
    if let Some(group) = &parent_group {
        host.force_open(group);
    }
    SidebarPhase::Loaded { parent_group }
}

pub async fn load_sidebar<H: SidebarHost>(host: &H) -> SidebarPhase {
    let url = host.sidebar_url();
    log::debug!("fetching sidebar from {url}");
    let fetched = fetch_text(&url).await;
    complete(host, fetched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const ERROR_HTML: &str = "<p>Failed to load sidebar.</p>";

    #[derive(Default)]
    struct FakeSidebar {
        content: RefCell<String>,
        group: Option<String>,
        calls: RefCell<Vec<String>>,
        container_missing: bool,
    }

    impl SidebarHost for FakeSidebar {
        fn sidebar_url(&self) -> String {
            "/partials/sidebar.html".to_string()
        }

        fn error_html(&self) -> String {
            ERROR_HTML.to_string()
        }

        fn set_sidebar_html(&self, html: &str) -> Result<(), LoadError> {
            if self.container_missing {
                return Err(LoadError::MissingFragment {
                    selector: "#sidebar-container".to_string(),
                });
            }
            *self.content.borrow_mut() = html.to_string();
            Ok(())
        }

        fn highlight_current(&self) -> Option<String> {
            self.calls.borrow_mut().push("highlight".to_string());
            self.group.clone()
        }

        fn mount_sidebar(&self) {
            self.calls.borrow_mut().push("mount".to_string());
        }

        fn force_open(&self, group: &str) {
            self.calls.borrow_mut().push(format!("open:{group}"));
        }
    }

    #[test]
    fn not_found_renders_error_and_skips_mount() {
        let host = FakeSidebar::default();
        let phase = complete(
            &host,
            Err(LoadError::Status {
                url: host.sidebar_url(),
                status: 404,
            }),
        );
        assert!(matches!(phase, SidebarPhase::Failed { .. }));
        assert_eq!(*host.content.borrow(), ERROR_HTML);
        assert!(host.calls.borrow().is_empty());
    }

    #[test]
    fn network_error_renders_error() {
        let host = FakeSidebar::default();
        complete(
            &host,
            Err(LoadError::Network {
                url: host.sidebar_url(),
                message: "offline".to_string(),
            }),
        );
        assert_eq!(*host.content.borrow(), ERROR_HTML);
    }

    #[test]
    fn success_highlights_mounts_then_opens_group() {
        let host = FakeSidebar {
            group: Some("core".to_string()),
            ..FakeSidebar::default()
        };
        let phase = complete(&host, Ok("<nav>links</nav>".to_string()));
        assert_eq!(
            phase,
            SidebarPhase::Loaded {
                parent_group: Some("core".to_string())
            }
        );
        assert_eq!(*host.content.borrow(), "<nav>links</nav>");
        assert_eq!(*host.calls.borrow(), vec!["highlight", "mount", "open:core"]);
    }

    #[test]
    fn success_without_group_opens_nothing() {
        let host = FakeSidebar::default();
        complete(&host, Ok("<nav></nav>".to_string()));
        assert_eq!(*host.calls.borrow(), vec!["highlight", "mount"]);
    }

    #[test]
    fn missing_container_stops_before_mount() {
        let host = FakeSidebar {
            container_missing: true,
            ..FakeSidebar::default()
        };
        let phase = complete(&host, Ok("<nav></nav>".to_string()));
        assert!(matches!(phase, SidebarPhase::Failed { .. }));
        assert!(host.calls.borrow().is_empty());
    }
}
