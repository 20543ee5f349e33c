//! Gallery state management.

mod gallery;

pub use gallery::{GalleryState, apply_order, display_order};
