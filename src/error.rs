use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures a loader can hit between issuing a fetch and splicing the result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The request never produced a response.
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },
    /// The server answered with a non-success status.
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    /// The fetched document lacks the element the loader splices in.
    #[error("fetched document has no element matching `{selector}`")]
    MissingFragment { selector: String },
    /// A DOM call threw.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl LoadError {
    pub fn dom(value: JsValue) -> Self {
        Self::Dom(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_request() {
        let err = LoadError::Status {
            url: "/partials/sidebar.html".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "request to /partials/sidebar.html returned HTTP 404"
        );

        let err = LoadError::MissingFragment {
            selector: ".main-content".to_string(),
        };
        assert!(err.to_string().contains(".main-content"));
    }
}
