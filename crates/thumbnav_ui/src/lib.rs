//! thumbnav_ui - host-agnostic input and geometry primitives
//!
//! Browser and native hosts translate their raw events into these types before
//! handing them to the gallery input adapter.

mod event;
mod geometry;

pub use event::{Event, Key, KeyParseError, Modifiers, MouseButton};
pub use geometry::{Bounds, Point};
