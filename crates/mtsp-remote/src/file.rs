use crate::config::DEFAULT_MAX_MANIFEST_BYTES;
use crate::{FetchError, Fetcher};
use std::io::Read;
use url::Url;

/// Reads manifests from `file://` locators.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    max_bytes: u64,
}

impl Default for FileFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MANIFEST_BYTES)
    }
}

impl FileFetcher {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl Fetcher for FileFetcher {
    fn fetch(&self, locator: &Url) -> Result<Vec<u8>, FetchError> {
        if locator.scheme() != "file" {
            return Err(FetchError::UnsupportedScheme(locator.scheme().to_owned()));
        }
        let path = locator
            .to_file_path()
            .map_err(|()| FetchError::NotFound(locator.to_string()))?;
        tracing::debug!("reading {}", path.display());

        let file = match std::fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FetchError::NotFound(locator.to_string()));
            }
            Err(e) => return Err(FetchError::Io(e)),
        };

        let mut body = Vec::new();
        file.take(self.max_bytes.saturating_add(1)).read_to_end(&mut body)?;
        if body.len() as u64 > self.max_bytes {
            return Err(FetchError::TooLarge {
                locator: locator.to_string(),
                limit: self.max_bytes,
            });
        }
        Ok(body)
    }
}
