use crate::{FetchConfig, FetchError, Fetcher, FileFetcher, HttpFetcher};
use url::Url;

/// Routes `http`/`https` locators to [`HttpFetcher`] and `file` locators to
/// [`FileFetcher`].
pub struct SchemeFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SchemeFetcher {
    pub fn new(config: FetchConfig) -> Self {
        let file = FileFetcher::new(config.max_manifest_bytes);
        Self {
            http: HttpFetcher::new(config),
            file,
        }
    }

    pub fn supports(scheme: &str) -> bool {
        matches!(scheme, "http" | "https" | "file")
    }
}

impl Default for SchemeFetcher {
    fn default() -> Self {
        Self::new(FetchConfig::default())
    }
}

impl Fetcher for SchemeFetcher {
    fn fetch(&self, locator: &Url) -> Result<Vec<u8>, FetchError> {
        match locator.scheme() {
            "http" | "https" => self.http.fetch(locator),
            "file" => self.file.fetch(locator),
            other => Err(FetchError::UnsupportedScheme(other.to_owned())),
        }
    }
}
