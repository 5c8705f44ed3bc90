//! The decoded container record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// A fully validated MTSP container.
///
/// Built by [`crate::parse_manifest`] or read back from its serialized form,
/// so every locator is absolute. The record is a plain value: cloning,
/// equality and hashing all go through its fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Container {
    name: String,
    preview_image: Url,
    scene: Url,
    navigation: BTreeMap<String, Url>,
}

impl Container {
    pub(crate) fn new(
        name: impl Into<String>,
        preview_image: Url,
        scene: Url,
        navigation: BTreeMap<String, Url>,
    ) -> Self {
        Self {
            name: name.into(),
            preview_image,
            scene,
            navigation,
        }
    }

    /// User-facing name of the metaspace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Image shown while the scene itself is not presented.
    pub fn preview_image(&self) -> &Url {
        &self.preview_image
    }

    /// The 3D scene file, typically `.usdz`.
    pub fn scene(&self) -> &Url {
        &self.scene
    }

    /// Labelled links to neighbouring containers.
    pub fn navigation(&self) -> &BTreeMap<String, Url> {
        &self.navigation
    }

    pub fn navigation_target(&self, label: &str) -> Option<&Url> {
        self.navigation.get(label)
    }
}
