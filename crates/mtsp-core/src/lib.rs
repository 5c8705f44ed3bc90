//! Decoder orchestration for MTSP containers.
//!
//! This crate ties the pure schema layer to a byte [`Fetcher`]: the
//! [`Decoder`] maps a requested locator to its manifest, fetches it, parses
//! it, and publishes the resulting container into a [`ContainerStore`] that
//! other parts of an application can observe through subscriptions.

pub mod decoder;
pub mod store;

pub use decoder::Decoder;
pub use mtsp_remote::Fetcher;
pub use store::{ContainerStore, StoreEvent};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid locator '{input}': {source}")]
    InvalidLocator {
        input: String,
        #[source]
        source: url::ParseError,
    },
    #[error("no manifest locator can be derived from {0}")]
    ManifestLocatorNotFound(String),
    #[error("manifest unavailable at {locator}: {source}")]
    ManifestUnavailable {
        locator: String,
        #[source]
        source: mtsp_remote::FetchError,
    },
    #[error("manifest error: {0}")]
    Manifest(#[from] mtsp_schema::ManifestError),
    #[error("no navigation link labelled '{0}'")]
    NavigationLabelNotFound(String),
}
