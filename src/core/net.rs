// src/core/net.rs
// Blocking HTTP GET; one request per run.

use std::io::Read;

use thiserror::Error;
use tracing::debug;

use crate::config::consts::USER_AGENT;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Http { url: String, #[source] source: Box<ureq::Error> },
    #[error("cannot read response body from {url}")]
    Body { url: String, #[source] source: std::io::Error },
}

/// GET `url` and return the body as text. Non-2xx statuses are errors.
pub fn http_get(url: &str) -> Result<String, FetchError> {
    debug!(url, "GET");
    let resp = ureq::get(url)
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| FetchError::Http { url: url.to_string(), source: Box::new(e) })?;

    let status = resp.status();
    let mut body = Vec::new();
    resp.into_reader()
        .read_to_end(&mut body)
        .map_err(|source| FetchError::Body { url: url.to_string(), source })?;
    debug!(url, status, bytes = body.len(), "response");

    // The page is served as UTF-8; stray bytes are not worth failing the run over.
    Ok(String::from_utf8_lossy(&body).into_owned())
}
