//! Container engine endpoint parsing.
//!
//! Engine URLs in the slave map use the Docker client notation (`tcp://host:2375`).
//! They are mapped onto HTTP base URLs:
//! - `tcp://` and `http://` -> `http://`
//! - `https://` is kept
//! - no scheme is read as `tcp://`
//! - `unix://`, `npipe://` and anything else are rejected

use reqwest::Url;

use crate::error::EngineError;

/// Parse an engine URL into an HTTP base URL whose path ends with `/`.
pub fn parse_engine_url(engine_url: &str) -> Result<Url, EngineError> {
    let trimmed = engine_url.trim();
    let (scheme, rest) = trimmed.split_once("://").unwrap_or(("tcp", trimmed));

    let scheme = match scheme.to_ascii_lowercase().as_str() {
        "tcp" | "http" => "http",
        "https" => "https",
        _ => return Err(EngineError::UnsupportedEndpoint(engine_url.to_string())),
    };
    if rest.is_empty() {
        return Err(EngineError::InvalidEndpoint {
            url: engine_url.to_string(),
            reason: "missing host".into(),
        });
    }

    let mut url = Url::parse(&format!("{scheme}://{rest}")).map_err(|e| {
        EngineError::InvalidEndpoint {
            url: engine_url.to_string(),
            reason: e.to_string(),
        }
    })?;

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
