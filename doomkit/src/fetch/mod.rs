//! Archive download with source fallback.
//!
//! # Architecture
//!
//! ```text
//! MultiSourceFetcher ──► HttpClient (trait)
//!   (ordered sources)       ├── ReqwestClient     (real network)
//!                           └── MockHttpClient    (tests)
//! ```
//!
//! Shareware mirrors come and go, so resilience comes from trying several
//! alternatives once each rather than retrying a single flaky source.

mod fetcher;
mod http;

pub use fetcher::{FetchedArchive, MultiSourceFetcher};
pub use http::{BoxFuture, HttpClient, ReqwestClient};

#[cfg(test)]
pub use http::tests::MockHttpClient;
