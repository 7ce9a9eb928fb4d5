//! HTTP access to the registry metadata API.
//!
//! Everything goes through the [`HttpClient`] seam so callers can wrap or
//! replace the transport.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Issues a single GET for `url` and returns the whole response body.
///
/// # Errors
///
/// Fails if `url` does not parse, the request cannot be sent, or the server
/// answers with a non-success status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid request URL '{url}'"))?,
    );

    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("GET {url} failed"))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("GET {url} returned status {status}: {body}");
    }

    let bytes = resp.bytes().await?;
    debug!(url, bytes = bytes.len(), "Response body received");
    Ok(bytes.to_vec())
}
