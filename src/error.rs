//! Error types for gallery operations.
//!
//! None of these ever escape the navigator as a failure of a navigation call:
//! out-of-range indices and unmatched variants are absorbed as no-ops, missing
//! host elements disable the feature that needed them. They exist so callers
//! and logs can say *why* nothing happened.

use thiserror::Error;

/// Errors that can occur while driving a gallery.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GalleryError {
    /// Requested index is outside the image sequence
    #[error("Invalid image index {index} for gallery of {len} images")]
    InvalidIndex {
        /// The requested index as the host supplied it
        index: i64,
        /// Number of images in the gallery
        len: usize,
    },

    /// No available variant matches the selected options
    #[error("No available variant matches the selected options")]
    NoMatchingVariant,

    /// A host element a feature depends on is absent
    #[error("Missing host element: {element}")]
    MissingHostElement {
        /// Description or selector of the missing element
        element: String,
    },

    /// The rendered surface disagrees with the navigator state
    #[error("Surface shows active indices {active:?}, expected only {expected}")]
    StateMismatch {
        /// Index the navigator considers current
        expected: usize,
        /// Indices the surface reports as active
        active: Vec<usize>,
    },

    /// Host event payload could not be decoded
    #[error("Invalid host payload: {message}")]
    InvalidPayload {
        /// Description of the decoding error
        message: String,
    },
}

impl GalleryError {
    /// Create an invalid index error.
    pub fn invalid_index(index: i64, len: usize) -> Self {
        Self::InvalidIndex { index, len }
    }

    /// Create a missing host element error.
    pub fn missing_host_element(element: impl Into<String>) -> Self {
        Self::MissingHostElement {
            element: element.into(),
        }
    }

    /// Create an invalid payload error.
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_payload(err.to_string())
    }
}
