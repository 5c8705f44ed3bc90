//! Byte fetching for MTSP manifests.
//!
//! The decoder never talks to the network itself; it asks a [`Fetcher`] for
//! the bytes behind a manifest locator. This crate ships an HTTP fetcher
//! built on `ureq`, a `file://` fetcher, a scheme-dispatching fetcher that
//! combines the two, and an in-memory fetcher for tests and embedding.

pub mod config;
pub mod file;
pub mod http;
pub mod memory;
pub mod scheme;

pub use config::FetchConfig;
pub use file::FileFetcher;
pub use http::HttpFetcher;
pub use memory::MemoryFetcher;
pub use scheme::SchemeFetcher;

use thiserror::Error;
use url::Url;

/// Header carrying the manifest version this client understands.
pub const VERSION_HEADER: &str = "X-Mtsp-Version";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unsupported locator scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("manifest at {locator} exceeds {limit} bytes")]
    TooLarge { locator: String, limit: u64 },
    #[error("fetch config error: {0}")]
    Config(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Source of manifest bytes.
pub trait Fetcher: Send + Sync {
    /// Download the full body behind `locator`.
    fn fetch(&self, locator: &Url) -> Result<Vec<u8>, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    fn fetch(&self, locator: &Url) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(locator)
    }
}

impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    fn fetch(&self, locator: &Url) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(locator)
    }
}
