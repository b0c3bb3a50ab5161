//! Remote resource fetching.
//!
//! One GET per call with a fixed client header and timeout. Nothing is
//! retried; callers decide whether a failure aborts the run or only drops
//! one item.

use std::io::Read;
use std::time::Duration;
use thiserror::Error;

/// User-Agent sent with every request
pub const USER_AGENT: &str = "AbyssTracker-data-bot/1.0";

/// Per-request timeout
pub const TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("failed reading body of {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of remote resources.
///
/// `fetch_json` decodes whatever `fetch_bytes` returns, so implementors
/// normally only provide the latter.
pub trait Fetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    fn fetch_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let bytes = self.fetch_bytes(url)?;
        serde_json::from_slice(&bytes).map_err(|source| FetchError::Json {
            url: url.to_string(),
            source,
        })
    }
}

/// Blocking HTTP fetcher
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(TIMEOUT)
            .user_agent(USER_AGENT)
            .build();
        HttpFetcher { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.agent.get(url).call().map_err(|e| FetchError::Http {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        // into_reader() has no size cap, unlike into_string()
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|source| FetchError::Io {
                url: url.to_string(),
                source,
            })?;
        Ok(body)
    }
}
