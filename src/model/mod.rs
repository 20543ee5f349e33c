//! Data models for the gallery: images and purchasable variants.

mod image;
mod variant;

pub use image::{GalleryImage, MediaId};
pub use variant::{HostVariantEvent, MediaRef, SelectedOptions, Variant, VariantChange};
