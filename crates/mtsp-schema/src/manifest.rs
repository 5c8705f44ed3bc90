use crate::locator::{resolve_file, resolve_navigation, split_navigation};
use crate::types::Container;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;
use url::Url;

const HOST_DIRECTIVE: &str = "#METASPACE_HOST";
const VERSION_DIRECTIVE: &str = "#METASPACE_VERSION";
const NAME_DIRECTIVE: &str = "#METASPACE_NAME";
const PREVIEW_PATH_DIRECTIVE: &str = "#METASPACE_PREVIEW_PATH";
const SCENE_PATH_DIRECTIVE: &str = "#METASPACE_3D_PATH";
const NAVIGATION_DIRECTIVE: &str = "#METASPACE_NAVIGATION";

/// Separates the label from the path in a navigation entry.
pub const NAVIGATION_SEPARATOR: &str = " -> ";

/// The only manifest version this decoder understands.
pub const SUPPORTED_VERSION: u32 = 1;

/// Why a manifest was rejected as not being a usable MTSP manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unrecognised {
    MissingHost,
    UnsupportedVersion(Option<u32>),
    MissingName,
}

impl fmt::Display for Unrecognised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHost => write!(f, "missing {HOST_DIRECTIVE} line"),
            Self::UnsupportedVersion(Some(v)) => {
                write!(f, "unsupported version {v}, expected {SUPPORTED_VERSION}")
            }
            Self::UnsupportedVersion(None) => write!(f, "missing or malformed version"),
            Self::MissingName => write!(f, "missing or empty name"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManifestError {
    #[error("manifest is not valid UTF-8: {0}")]
    NotReadable(#[source] std::str::Utf8Error),
    #[error("manifest not recognised: {0}")]
    NotRecognised(Unrecognised),
    #[error("manifest has no resolvable preview image path")]
    NoPreviewLocator,
    #[error("manifest has no resolvable 3D scene path")]
    NoSceneLocator,
    #[error("navigation label not recognised in '{0}'")]
    NavigationKeyNotRecognised(String),
    #[error("navigation path not recognised in '{0}', expected '<label> -> <path>'")]
    NavigationPathNotRecognised(String),
}

/// Raw directive values collected from the `#` lines of a manifest.
#[derive(Debug, Default)]
struct Directives<'a> {
    host: bool,
    version: Option<u32>,
    name: Option<&'a str>,
    preview_path: Option<&'a str>,
    scene_path: Option<&'a str>,
    navigation: Vec<&'a str>,
}

impl<'a> Directives<'a> {
    fn scan(text: &'a str) -> Self {
        let mut directives = Self::default();

        for line in text.lines().filter(|line| line.starts_with('#')) {
            if line == HOST_DIRECTIVE {
                directives.host = true;
                continue;
            }

            let key = line.split_once(':').map_or(line, |(key, _)| key);
            match key {
                VERSION_DIRECTIVE => directives.version = logged(line, int_value(line)),
                NAME_DIRECTIVE => directives.name = logged(line, string_value(line)),
                PREVIEW_PATH_DIRECTIVE => {
                    directives.preview_path = logged(line, string_value(line));
                }
                SCENE_PATH_DIRECTIVE => directives.scene_path = logged(line, string_value(line)),
                NAVIGATION_DIRECTIVE => {
                    if let Some(entry) = logged(line, string_value(line)) {
                        directives.navigation.push(entry);
                    }
                }
                _ => {}
            }
        }

        directives
    }
}

fn logged<T>(line: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        debug!("ignoring malformed directive: {line}");
    }
    value
}

/// The single value of a `#KEY:value` line. `None` unless there is exactly one `:`.
fn directive_value(line: &str) -> Option<&str> {
    let mut parts = line.split(':');
    parts.next()?;
    let value = parts.next()?;
    parts.next().is_none().then_some(value)
}

/// Integer value of a directive line; `None` if the line is malformed or not a number.
fn int_value(line: &str) -> Option<u32> {
    directive_value(line)?.parse().ok()
}

/// String value of a directive line with its surrounding quotes removed.
fn string_value(line: &str) -> Option<&str> {
    directive_value(line).map(|value| value.trim_matches('"'))
}

/// Parse the bytes of a manifest located at `manifest`.
///
/// Relative paths inside the manifest are resolved against the directory of
/// `manifest`. The first problem found aborts the parse.
pub fn parse_manifest(bytes: &[u8], manifest: &Url) -> Result<Container, ManifestError> {
    let text = std::str::from_utf8(bytes).map_err(ManifestError::NotReadable)?;
    parse_manifest_str(text, manifest)
}

pub fn parse_manifest_str(text: &str, manifest: &Url) -> Result<Container, ManifestError> {
    let directives = Directives::scan(text);

    if !directives.host {
        return Err(ManifestError::NotRecognised(Unrecognised::MissingHost));
    }
    if directives.version != Some(SUPPORTED_VERSION) {
        return Err(ManifestError::NotRecognised(
            Unrecognised::UnsupportedVersion(directives.version),
        ));
    }
    let name = directives
        .name
        .filter(|name| !name.is_empty())
        .ok_or(ManifestError::NotRecognised(Unrecognised::MissingName))?;

    let preview_image =
        resolve_file(directives.preview_path, manifest).ok_or(ManifestError::NoPreviewLocator)?;
    let scene =
        resolve_file(directives.scene_path, manifest).ok_or(ManifestError::NoSceneLocator)?;

    let mut navigation = BTreeMap::new();
    for entry in directives.navigation {
        let (label, target) = navigation_link(entry, manifest)?;
        if let Some(previous) = navigation.insert(label.to_owned(), target) {
            debug!("navigation label '{label}' redefined, replacing {previous}");
        }
    }

    Ok(Container::new(name, preview_image, scene, navigation))
}

fn navigation_link<'a>(entry: &'a str, manifest: &Url) -> Result<(&'a str, Url), ManifestError> {
    let not_recognised = || ManifestError::NavigationPathNotRecognised(entry.to_owned());

    let (label, _) = split_navigation(entry, NAVIGATION_SEPARATOR).ok_or_else(not_recognised)?;
    let target =
        resolve_navigation(entry, NAVIGATION_SEPARATOR, manifest).ok_or_else(not_recognised)?;
    if label.is_empty() {
        return Err(ManifestError::NavigationKeyNotRecognised(entry.to_owned()));
    }
    Ok((label, target))
}
