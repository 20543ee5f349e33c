//! The seam between the navigator and whatever renders the gallery.
//!
//! The browser binding implements [`GallerySurface`] over DOM elements; the
//! native replay tool and the tests use [`RecordingSurface`].

use thumbnav_ui::Bounds;

/// Rendering side of one gallery: image/thumbnail pairs and the thumbnail
/// scroll container.
pub trait GallerySurface {
    /// Toggle the active presentation of the pair at `index`.
    ///
    /// Activating sets the active class on both members, `aria-selected="true"`
    /// and `tabindex="0"` on the thumbnail, and clears any inline `display`
    /// on the main image. Deactivating reverses the class and ARIA state and
    /// sets `tabindex="-1"`. Indices without a rendered pair are ignored.
    fn set_active(&mut self, index: usize, active: bool);

    /// Whether the pair at `index` is currently presented as active.
    fn is_active(&self, index: usize) -> bool;

    /// Bounding box of the thumbnail at `index`, if it is rendered.
    fn thumbnail_bounds(&self, index: usize) -> Option<Bounds>;

    /// Visible rect of the thumbnail scroll container, or `None` if there is none.
    fn scroll_viewport(&self) -> Option<Bounds>;

    /// Scroll the container so the thumbnail at `index` becomes visible.
    fn scroll_into_view(&mut self, index: usize);
}

/// In-memory surface that records every side effect.
///
/// Thumbnails are laid out as a vertical strip starting at the origin; the
/// optional viewport moves like `scrollIntoView({ block: "nearest" })`.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    active: Vec<bool>,
    thumbnails: Vec<Bounds>,
    viewport: Option<Bounds>,
    /// Every `set_active` call in order
    pub activations: Vec<(usize, bool)>,
    /// Every `scroll_into_view` call in order
    pub scroll_requests: Vec<usize>,
}

impl RecordingSurface {
    /// A surface with `len` pairs, no thumbnail geometry and no scroll container.
    pub fn new(len: usize) -> Self {
        Self {
            active: vec![false; len],
            ..Default::default()
        }
    }

    /// Builder: lay thumbnails out as a vertical strip of `size`-sized squares
    /// separated by `gap`.
    pub fn with_thumbnail_strip(mut self, size: f32, gap: f32) -> Self {
        self.thumbnails = (0..self.active.len())
            .map(|i| Bounds::new(0.0, i as f32 * (size + gap), size, size))
            .collect();
        self
    }

    /// Builder: add a scroll container showing `bounds`.
    pub fn with_viewport(mut self, bounds: Bounds) -> Self {
        self.viewport = Some(bounds);
        self
    }

    /// Indices currently presented as active.
    pub fn active_indices(&self) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter_map(|(i, active)| active.then_some(i))
            .collect()
    }

    /// Force a pair's state without recording, to simulate host drift.
    #[cfg(test)]
    pub(crate) fn force_active(&mut self, index: usize, active: bool) {
        if let Some(slot) = self.active.get_mut(index) {
            *slot = active;
        }
    }
}

impl GallerySurface for RecordingSurface {
    fn set_active(&mut self, index: usize, active: bool) {
        if let Some(slot) = self.active.get_mut(index) {
            *slot = active;
            self.activations.push((index, active));
        }
    }

    fn is_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    fn thumbnail_bounds(&self, index: usize) -> Option<Bounds> {
        let thumb = self.thumbnails.get(index)?;
        // Report in viewport coordinates, like getBoundingClientRect
        let offset = self.viewport.map_or(0.0, |vp| vp.y);
        Some(Bounds::new(thumb.x, thumb.y - offset, thumb.width, thumb.height))
    }

    fn scroll_viewport(&self) -> Option<Bounds> {
        self.viewport.map(|vp| Bounds::new(vp.x, 0.0, vp.width, vp.height))
    }

    fn scroll_into_view(&mut self, index: usize) {
        self.scroll_requests.push(index);
        let (Some(viewport), Some(thumb)) = (self.viewport.as_mut(), self.thumbnails.get(index))
        else {
            return;
        };
        if thumb.y < viewport.y {
            viewport.y = thumb.y;
        } else if thumb.bottom() > viewport.bottom() {
            viewport.y = thumb.bottom() - viewport.height;
        }
    }
}
