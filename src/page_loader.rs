//! In-place page swapping.
//!
//! A navigation fetches the target document, lifts its main-content element
//! out and swaps it for the live one. Any failure falls back to a full
//! browser navigation so the page is never left half updated.

use crate::error::LoadError;
use crate::fetch::fetch_text;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PagePhase {
    #[default]
    Idle,
    Loading {
        url: String,
    },
    Loaded {
        path: String,
        parent_group: Option<String>,
    },
    Failed {
        url: String,
        error: LoadError,
    },
}

/// A fetched document reduced to what the swap needs.
pub struct ParsedPage<F> {
    pub title: String,
    pub fragment: F,
}

/// The live document as seen by the page loader.
pub trait PageHost {
    type Fragment;

    fn main_content_selector(&self) -> String;
    fn has_main_content(&self) -> bool;
    fn set_busy(&self);
    /// Parses without running scripts; errors when the fragment is absent.
    fn parse_page(&self, html: &str) -> Result<ParsedPage<Self::Fragment>, LoadError>;
    fn set_title(&self, title: &str);
    /// Swaps the whole main-content node, container included.
    fn replace_main_content(&self, fragment: &Self::Fragment) -> Result<(), LoadError>;
    fn current_path(&self) -> String;
    fn push_history(&self, url: &str) -> Result<(), LoadError>;
    fn highlight(&self, path: &str) -> Option<String>;
    /// Re-creates the fragment's scripts so they run; returns how many.
    fn run_scripts(&self, fragment: &Self::Fragment) -> Result<usize, LoadError>;
    fn mount(&self, fragment: &Self::Fragment);
    fn navigate_hard(&self, url: &str);
}

/// Enters the loading state, or falls back to a full navigation when the
/// current document has nowhere to swap content into.
pub fn begin<H: PageHost>(host: &H, url: &str) -> PagePhase {
    if !host.has_main_content() {
        log::warn!("no main content in current page, navigating to {url}");
        host.navigate_hard(url);
        return PagePhase::Failed {
            url: url.to_string(),
            error: LoadError::MissingFragment {
                selector: host.main_content_selector(),
            },
        };
    }
    host.set_busy();
    PagePhase::Loading {
        url: url.to_string(),
    }
}

/// Applies a fetch result. Errors end in a full navigation to `url`.
pub fn complete<H: PageHost>(host: &H, url: &str, fetched: Result<String, LoadError>) -> PagePhase {
    match fetched.and_then(|html| swap(host, url, &html)) {
        Ok(phase) => phase,
        Err(error) => {
            log::error!("in-place load of {url} failed: {error}");
            host.navigate_hard(url);
            PagePhase::Failed {
                url: url.to_string(),
                error,
            }
        }
    }
}

fn swap<H: PageHost>(host: &H, url: &str, html: &str) -> Result<PagePhase, LoadError> {
    let page = host.parse_page(html)?;
    host.set_title(&page.title);
    host.replace_main_content(&page.fragment)?;
    if host.current_path() != url {
        host.push_history(url)?;
    }
    let path = host.current_path();
    let parent_group = host.highlight(&path);

    // Scripts may define globals the bindings read, so they go first.
    let scripts = host.run_scripts(&page.fragment)?;
    host.mount(&page.fragment);
    log::info!("loaded {path} in place ({scripts} script(s))");

    Ok(PagePhase::Loaded { path, parent_group })
}

/// Fetches `url` and completes a load started with [`begin`].
pub async fn finish<H: PageHost>(host: &H, url: &str) -> PagePhase {
    let fetched = fetch_text(url).await;
    complete(host, url, fetched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::highlight::{Highlighter, SidebarLink};
    use crate::nav::ClickedAnchor;
    use std::cell::RefCell;

    impl SidebarLink for String {
        fn href(&self) -> Option<String> {
            Some(self.clone())
        }

        fn swap_classes(&self, _remove: &[String], _add: &[String]) {}
    }

    /// Stands in for the browser: pages are plain strings and the fragment
    /// is whatever sits between the marker tags.
    struct FakeHost {
        has_main: bool,
        path: RefCell<String>,
        title: RefCell<String>,
        calls: RefCell<Vec<String>>,
        links: Vec<String>,
        highlighter: Highlighter,
    }

    impl FakeHost {
        fn at(path: &str) -> Self {
            Self {
                has_main: true,
                path: RefCell::new(path.to_string()),
                title: RefCell::new("Home".to_string()),
                calls: RefCell::new(Vec::new()),
                links: vec![
                    "/index.html".to_string(),
                    "/components/buttons.html".to_string(),
                ],
                highlighter: Highlighter::new(&SiteConfig::default()),
            }
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.borrow_mut().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl PageHost for FakeHost {
        type Fragment = String;

        fn main_content_selector(&self) -> String {
            ".main-content".to_string()
        }

        fn has_main_content(&self) -> bool {
            self.has_main
        }

        fn set_busy(&self) {
            self.record("busy");
        }

        fn parse_page(&self, html: &str) -> Result<ParsedPage<String>, LoadError> {
            let missing = || LoadError::MissingFragment {
                selector: self.main_content_selector(),
            };
            let start = html.find("<main>").ok_or_else(missing)?;
            let end = html.find("</main>").ok_or_else(missing)?;
            let title = html
                .split_once("<title>")
                .and_then(|(_, rest)| rest.split_once("</title>"))
                .map(|(title, _)| title.to_string())
                .unwrap_or_default();
            Ok(ParsedPage {
                title,
                fragment: html[start + 6..end].to_string(),
            })
        }

        fn set_title(&self, title: &str) {
            *self.title.borrow_mut() = title.to_string();
        }

        fn replace_main_content(&self, fragment: &String) -> Result<(), LoadError> {
            self.record(format!("replace:{fragment}"));
            Ok(())
        }

        fn current_path(&self) -> String {
            self.path.borrow().clone()
        }

        fn push_history(&self, url: &str) -> Result<(), LoadError> {
            self.record(format!("push:{url}"));
            *self.path.borrow_mut() = url.to_string();
            Ok(())
        }

        fn highlight(&self, path: &str) -> Option<String> {
            self.record(format!("highlight:{path}"));
            self.highlighter.apply_to(path, &self.links).parent_group
        }

        fn run_scripts(&self, fragment: &String) -> Result<usize, LoadError> {
            let count = fragment.matches("<script>").count();
            self.record(format!("scripts:{count}"));
            Ok(count)
        }

        fn mount(&self, _fragment: &String) {
            self.record("mount");
        }

        fn navigate_hard(&self, url: &str) {
            self.record(format!("hard:{url}"));
        }
    }

    const BUTTONS_PAGE: &str = "<html><title>Buttons</title><body>\
        <main><h1>Buttons</h1><script>init()</script></main></body></html>";

    #[test]
    fn click_to_loaded_page() {
        let clicked = ClickedAnchor {
            href: Some("/components/buttons.html"),
            target: None,
            hostname: "example.com",
        };
        let target = clicked.intercept("example.com").unwrap();

        let host = FakeHost::at("/index.html");
        let url = target.as_str();
        assert_eq!(
            begin(&host, url),
            PagePhase::Loading {
                url: url.to_string()
            }
        );
        let phase = complete(&host, url, Ok(BUTTONS_PAGE.to_string()));

        assert_eq!(
            phase,
            PagePhase::Loaded {
                path: "/components/buttons.html".to_string(),
                parent_group: Some("core".to_string()),
            }
        );
        assert_eq!(*host.title.borrow(), "Buttons");
        assert_eq!(host.current_path(), "/components/buttons.html");
        assert_eq!(
            host.calls(),
            vec![
                "busy",
                "replace:<h1>Buttons</h1><script>init()</script>",
                "push:/components/buttons.html",
                "highlight:/components/buttons.html",
                "scripts:1",
                "mount",
            ]
        );
    }

    #[test]
    fn same_path_is_not_pushed_again() {
        let host = FakeHost::at("/components/buttons.html");
        let url = "/components/buttons.html";
        begin(&host, url);
        complete(&host, url, Ok(BUTTONS_PAGE.to_string()));
        assert!(!host.calls().iter().any(|c| c.starts_with("push:")));
    }

    #[test]
    fn response_without_main_content_falls_back_to_full_navigation() {
        let host = FakeHost::at("/index.html");
        let url = "/broken.html";
        begin(&host, url);
        let phase = complete(&host, url, Ok("<html><body>nothing</body></html>".to_string()));

        assert!(matches!(
            phase,
            PagePhase::Failed {
                error: LoadError::MissingFragment { .. },
                ..
            }
        ));
        assert_eq!(host.calls(), vec!["busy", "hard:/broken.html"]);
        assert_eq!(*host.title.borrow(), "Home");
    }

    #[test]
    fn http_error_falls_back_to_full_navigation() {
        let host = FakeHost::at("/index.html");
        let url = "/missing.html";
        begin(&host, url);
        let phase = complete(
            &host,
            url,
            Err(LoadError::Status {
                url: url.to_string(),
                status: 404,
            }),
        );
        assert!(matches!(phase, PagePhase::Failed { .. }));
        assert_eq!(host.calls().last().map(String::as_str), Some("hard:/missing.html"));
    }

    #[test]
    fn page_without_main_content_navigates_without_fetching() {
        let mut host = FakeHost::at("/index.html");
        host.has_main = false;
        let phase = begin(&host, "/components/buttons.html");
        assert!(matches!(phase, PagePhase::Failed { .. }));
        assert_eq!(host.calls(), vec!["hard:/components/buttons.html"]);
    }
}
