use crate::{FetchError, Fetcher};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use url::Url;

/// Serves manifests from memory. Useful for tests and for embedding bundled
/// manifests without a network round trip.
#[derive(Default)]
pub struct MemoryFetcher {
    documents: Mutex<HashMap<Url, Vec<u8>>>,
    requests: AtomicUsize,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(self, locator: &Url, body: impl Into<Vec<u8>>) -> Self {
        self.insert(locator, body);
        self
    }

    pub fn insert(&self, locator: &Url, body: impl Into<Vec<u8>>) {
        let mut documents = self
            .documents
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        documents.insert(locator.clone(), body.into());
    }

    /// Number of `fetch` calls served so far, hits and misses alike.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, locator: &Url) -> Result<Vec<u8>, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let documents = self
            .documents
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        documents
            .get(locator)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(locator.to_string()))
    }
}
