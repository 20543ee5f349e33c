//! thumbnav - product image gallery navigator
//!
//! Index state, circular navigation and variant-driven image selection for a
//! storefront thumbnail gallery, with a browser binding for WASM and a native
//! scenario replay tool.

pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod keybindings;
pub mod layout;
pub mod model;
pub mod navigator;
pub mod replay;
pub mod resolver;
pub mod state;
pub mod surface;

pub use config::{GalleryConfig, LogLevel, SwipeConvention};
pub use error::GalleryError;
pub use input::{InputAction, InputAdapter};
pub use model::{GalleryImage, MediaId, SelectedOptions, Variant};
pub use navigator::{GalleryCommand, GalleryNavigator, ImageChanged, ObserverId, VariantOutcome};
pub use surface::{GallerySurface, RecordingSurface};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
