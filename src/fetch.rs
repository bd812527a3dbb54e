use gloo_net::http::Request;

use crate::error::LoadError;

/// `GET`s `url` and returns the body of a successful response.
pub async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let network = |err: gloo_net::Error| LoadError::Network {
        url: url.to_string(),
        message: err.to_string(),
    };
    let response = Request::get(url).send().await.map_err(network)?;
    if !response.ok() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    response.text().await.map_err(network)
}
