//! Ordered fallback over candidate archive sources.

use tracing::{debug, info, warn};

use super::http::HttpClient;
use crate::error::{AcquireError, AcquireResult, SourceFailure};

/// A complete archive payload held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedArchive {
    /// The source that produced the payload.
    pub url: String,
    /// Raw archive bytes.
    pub bytes: Vec<u8>,
}

/// Fetches one archive from the first source that delivers it.
///
/// Sources are tried strictly in order. A failed attempt (network error,
/// timeout, non-success status, oversized body) moves on to the next source;
/// no source is retried.
#[derive(Debug)]
pub struct MultiSourceFetcher<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> MultiSourceFetcher<C> {
    /// Create a fetcher over the given transport.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The underlying transport.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Return the payload of the first source that succeeds.
    ///
    /// # Errors
    ///
    /// [`AcquireError::AllSourcesExhausted`] when every source failed (or the
    /// list is empty). No partial data is returned.
    pub async fn fetch(&self, sources: &[String]) -> AcquireResult<FetchedArchive> {
        let mut failures = Vec::with_capacity(sources.len());

        for (index, url) in sources.iter().enumerate() {
            debug!(url = %url, attempt = index + 1, of = sources.len(), "Trying source");

            match self.client.get(url).await {
                Ok(bytes) => {
                    info!(url = %url, bytes = bytes.len(), "Archive downloaded");
                    return Ok(FetchedArchive {
                        url: url.clone(),
                        bytes,
                    });
                }
                Err(error) => {
                    warn!(url = %url, error = %error, "Source failed, trying next");
                    failures.push(SourceFailure {
                        url: url.clone(),
                        error,
                    });
                }
            }
        }

        Err(AcquireError::AllSourcesExhausted {
            attempted: sources.len(),
            failures,
        })
    }
}
