//! Purchasable product variants and the host events that announce them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::MediaId;
use crate::error::GalleryError;

/// Option name to option value, e.g. `{"Color": "Red", "Size": "M"}`.
pub type SelectedOptions = BTreeMap<String, String>;

/// Reference from a variant to the media it should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub id: MediaId,
}

/// A purchasable product configuration, in the storefront's JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub options: SelectedOptions,
    #[serde(default)]
    pub featured_image: Option<MediaRef>,
}

fn default_available() -> bool {
    true
}

impl Variant {
    /// Create an available variant from `(name, value)` pairs.
    pub fn new<'a>(options: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            id: None,
            available: true,
            options: options
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            featured_image: None,
        }
    }

    /// Builder: reference the media this variant displays.
    pub fn with_image(mut self, id: impl Into<MediaId>) -> Self {
        self.featured_image = Some(MediaRef { id: id.into() });
        self
    }

    /// Builder: mark as sold out.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// The media this variant displays, if any.
    pub fn image_ref(&self) -> Option<&MediaId> {
        self.featured_image.as_ref().map(|r| &r.id)
    }

    /// Every selected option is present on this variant with the same value.
    pub fn matches(&self, selected: &SelectedOptions) -> bool {
        selected
            .iter()
            .all(|(name, value)| self.options.get(name) == Some(value))
    }
}

/// Detail payload of a `variant:changed` host event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostVariantEvent {
    #[serde(default)]
    pub selected_options: Option<SelectedOptions>,
    #[serde(default)]
    pub variant: Option<Variant>,
}

/// What a host variant event asks the gallery to do.
#[derive(Debug, Clone, PartialEq)]
pub enum VariantChange {
    /// Resolve against the known variants
    SelectedOptions(SelectedOptions),
    /// Show this variant's image directly
    Variant(Variant),
}

impl HostVariantEvent {
    /// Decode an event detail from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, GalleryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pick the change the payload describes. Selected options win when both are present.
    pub fn into_change(self) -> Result<VariantChange, GalleryError> {
        match (self.selected_options, self.variant) {
            (Some(selected), _) => Ok(VariantChange::SelectedOptions(selected)),
            (None, Some(variant)) => Ok(VariantChange::Variant(variant)),
            (None, None) => Err(GalleryError::invalid_payload(
                "expected `selectedOptions` or `variant` in event detail",
            )),
        }
    }
}
