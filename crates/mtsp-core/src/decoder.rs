use crate::store::ContainerStore;
use crate::DecodeError;
use mtsp_remote::Fetcher;
use mtsp_schema::{derive_manifest_locator, parse_manifest, Container};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Fetches, parses, and publishes MTSP containers.
///
/// Accepts any locator a user might paste (`.../index.html`, `.../`,
/// `.../index.mtsp`) and stores each decoded container under the locator it
/// was requested with.
pub struct Decoder {
    fetcher: Box<dyn Fetcher>,
    store: Arc<ContainerStore>,
}

impl Decoder {
    pub fn new(fetcher: impl Fetcher + 'static) -> Self {
        Self::with_store(fetcher, Arc::new(ContainerStore::new()))
    }

    /// Create a decoder that publishes into an existing store.
    pub fn with_store(fetcher: impl Fetcher + 'static, store: Arc<ContainerStore>) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            store,
        }
    }

    pub fn store(&self) -> &Arc<ContainerStore> {
        &self.store
    }

    /// Decode the container behind `locator` and publish it.
    ///
    /// Every failure aborts the whole decode; the store is only touched on
    /// success.
    pub fn decode(&self, locator: &Url) -> Result<Container, DecodeError> {
        let manifest = derive_manifest_locator(locator)
            .ok_or_else(|| DecodeError::ManifestLocatorNotFound(locator.to_string()))?;
        info!("decoding container from {manifest}");

        let bytes = self
            .fetcher
            .fetch(&manifest)
            .map_err(|source| DecodeError::ManifestUnavailable {
                locator: manifest.to_string(),
                source,
            })?;
        debug!("fetched {} bytes from {manifest}", bytes.len());

        let container = match parse_manifest(&bytes, &manifest) {
            Ok(c) => c,
            Err(e) => {
                warn!("rejected manifest {manifest}: {e}");
                return Err(e.into());
            }
        };

        self.store.publish(locator.clone(), container.clone());
        Ok(container)
    }

    /// Parse `input` as a locator, then [`Decoder::decode`] it.
    pub fn decode_str(&self, input: &str) -> Result<Container, DecodeError> {
        let locator = Url::parse(input).map_err(|source| DecodeError::InvalidLocator {
            input: input.to_owned(),
            source,
        })?;
        self.decode(&locator)
    }

    /// Decode the container that `label` in `from` links to.
    pub fn follow(&self, from: &Container, label: &str) -> Result<Container, DecodeError> {
        let target = from
            .navigation_target(label)
            .ok_or_else(|| DecodeError::NavigationLabelNotFound(label.to_owned()))?;
        debug!("following navigation '{label}' to {target}");
        self.decode(target)
    }
}
