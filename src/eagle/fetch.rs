//! Remote library retrieval.
//!
//! The remote repository is the last candidate in every search path. A
//! fetch is a single attempt bounded by a timeout; any failure (timeout,
//! connection error, HTTP status, unreadable body) means "not available
//! here" and the search moves on.

use std::io::Read;
use std::time::Duration;

use super::element::decode_text;

/// Default timeout for one remote fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest remote body accepted. The biggest public EAGLE libraries are a
/// few megabytes.
pub const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Retrieves documents by URL.
pub trait RemoteFetcher {
    /// Returns the document body, or `None` if it could not be retrieved.
    fn fetch(&self, url: &str) -> Option<String>;
}

/// HTTP(S) fetcher backed by `ureq`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("eagle-parts/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl RemoteFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Option<String> {
        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url, error = %e, "Remote fetch failed");
                return None;
            }
        };
        let body = read_limited(response.into_reader(), MAX_BODY_BYTES, url)?;
        Some(decode_text(&body).into_owned())
    }
}

/// Reads at most `limit` bytes; a longer or unreadable body is rejected.
fn read_limited(reader: impl Read, limit: u64, url: &str) -> Option<Vec<u8>> {
    let mut body = Vec::new();
    if let Err(e) = reader.take(limit + 1).read_to_end(&mut body) {
        tracing::warn!(url, error = %e, "Remote body unreadable");
        return None;
    }
    if body.len() as u64 > limit {
        tracing::warn!(url, limit, "Remote library exceeds size limit");
        return None;
    }
    Some(body)
}

/// Fetcher for offline use; nothing is ever available.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineFetcher;

impl RemoteFetcher for OfflineFetcher {
    fn fetch(&self, url: &str) -> Option<String> {
        tracing::debug!(url, "Remote access disabled");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_never_returns() {
        assert_eq!(OfflineFetcher.fetch("https://example.com/rcl.lbr"), None);
    }

    #[test]
    fn body_within_limit_is_read() {
        let body = read_limited(&b"<eagle/>"[..], 8, "mem").unwrap();
        assert_eq!(body, b"<eagle/>");
    }

    #[test]
    fn oversized_body_is_rejected() {
        assert_eq!(read_limited(&b"<eagle/>"[..], 7, "mem"), None);
    }

    #[test]
    fn unreachable_host_is_unavailable() {
        // Port 9 on localhost: refused immediately, no network needed.
        let fetcher = HttpFetcher::new(Duration::from_millis(500));
        assert_eq!(fetcher.fetch("http://127.0.0.1:9/rcl.lbr"), None);
    }
}
