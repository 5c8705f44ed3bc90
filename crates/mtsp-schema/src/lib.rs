//! Manifest parsing, the container model, and locator resolution for MTSP.
//!
//! This crate is the pure layer of the decoder: it turns the bytes of an
//! `.mtsp` manifest into a validated [`Container`] (`parse_manifest`), and
//! maps arbitrary locators and manifest-relative paths onto absolute URLs
//! (`derive_manifest_locator`, `resolve_file`, `resolve_navigation`). Nothing
//! here performs I/O.

pub mod locator;
pub mod manifest;
pub mod types;

pub use locator::{
    derive_manifest_locator, resolve_file, resolve_navigation, split_navigation,
    DEFAULT_BASENAME, MANIFEST_EXTENSION,
};
pub use manifest::{
    parse_manifest, parse_manifest_str, ManifestError, Unrecognised, NAVIGATION_SEPARATOR,
    SUPPORTED_VERSION,
};
pub use types::Container;
pub use url::Url;
