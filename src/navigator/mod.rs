//! The gallery navigator: owns the active index of one gallery and keeps the
//! rendered surface in step with it.
//!
//! Every transition goes through [`GalleryNavigator::switch_to`]. Requests for
//! the current index or an index outside the gallery are silent no-ops, which
//! makes redundant calls from overlapping input sources harmless.

#[cfg(test)]
mod tests;

use serde::Serialize;

use crate::error::GalleryError;
use crate::model::{GalleryImage, MediaId, SelectedOptions, Variant, VariantChange};
use crate::resolver::{self, OptionAvailability};
use crate::state::GalleryState;
use crate::surface::GallerySurface;

/// Notification emitted after every successful transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageChanged {
    pub previous_index: usize,
    pub current_index: usize,
    /// Media shown at `current_index`
    pub current_image: MediaId,
}

/// Navigation request, as produced by the input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryCommand {
    SwitchTo(usize),
    Next,
    Prev,
    First,
    Last,
}

/// Result of applying a variant selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantOutcome {
    /// The gallery moved to the variant's image
    Switched(ImageChanged),
    /// The variant's image was already showing
    AlreadyShown(usize),
    /// Nothing matched; the gallery is unchanged
    NoMatch,
}

/// Handle returned by [`GalleryNavigator::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&ImageChanged)>;

/// Stateful controller over one gallery's images.
pub struct GalleryNavigator<S: GallerySurface> {
    state: GalleryState,
    variants: Vec<Variant>,
    surface: S,
    observers: Vec<(ObserverId, Observer)>,
    next_observer_id: u64,
    /// Logged once; the scroll container rarely appears later
    reported_missing_viewport: bool,
}

impl<S: GallerySurface> GalleryNavigator<S> {
    /// Build a navigator and bring the surface in line with the initial index.
    ///
    /// Image availability is derived from `variants` before the state is built.
    pub fn new(mut images: Vec<GalleryImage>, variants: Vec<Variant>, surface: S) -> Self {
        resolver::derive_image_availability(&mut images, &variants);
        let state = GalleryState::from_images(images);

        let mut navigator = Self {
            state,
            variants,
            surface,
            observers: Vec::new(),
            next_observer_id: 0,
            reported_missing_viewport: false,
        };
        navigator.sync_surface();

        log::info!(
            "Gallery ready: {} images, {} variants, showing {}",
            navigator.state.len(),
            navigator.variants.len(),
            navigator.state.progress()
        );
        navigator
    }

    /// Current active index (0 for an empty gallery).
    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    pub fn image_count(&self) -> usize {
        self.state.len()
    }

    pub fn current_image(&self) -> Option<&GalleryImage> {
        self.state.current_image()
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Register a callback run after every transition, in subscription order.
    pub fn subscribe(&mut self, observer: impl FnMut(&ImageChanged) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Make `index` the active image.
    ///
    /// Returns the emitted notification, or `None` if `index` is already
    /// current or out of range.
    pub fn switch_to(&mut self, index: usize) -> Option<ImageChanged> {
        if index == self.state.current_index() {
            log::trace!("switch_to({}) ignored: already current", index);
            return None;
        }

        let Some(previous_index) = self.state.set_current(index) else {
            log::debug!(
                "switch_to ignored: {}",
                GalleryError::invalid_index(index as i64, self.state.len())
            );
            return None;
        };

        self.surface.set_active(previous_index, false);
        self.surface.set_active(index, true);
        self.reveal_thumbnail(index);

        let current_image = self
            .state
            .current_image()
            .map(|image| image.media_id.clone())?;
        let event = ImageChanged {
            previous_index,
            current_index: index,
            current_image,
        };

        log::debug!(
            "Image changed {} -> {} ({})",
            previous_index,
            index,
            self.state.progress()
        );
        self.notify(&event);
        Some(event)
    }

    /// Move forward, wrapping from the last image to the first.
    pub fn next(&mut self) -> Option<ImageChanged> {
        let index = self.state.next_index()?;
        self.switch_to(index)
    }

    /// Move back, wrapping from the first image to the last.
    pub fn prev(&mut self) -> Option<ImageChanged> {
        let index = self.state.prev_index()?;
        self.switch_to(index)
    }

    pub fn go_to_first(&mut self) -> Option<ImageChanged> {
        self.switch_to(0)
    }

    pub fn go_to_last(&mut self) -> Option<ImageChanged> {
        let index = self.state.last_index()?;
        self.switch_to(index)
    }

    /// Apply a command from the input adapter.
    pub fn execute(&mut self, command: GalleryCommand) -> Option<ImageChanged> {
        match command {
            GalleryCommand::SwitchTo(index) => self.switch_to(index),
            GalleryCommand::Next => self.next(),
            GalleryCommand::Prev => self.prev(),
            GalleryCommand::First => self.go_to_first(),
            GalleryCommand::Last => self.go_to_last(),
        }
    }

    /// Show the image of the first available variant matching `selected`.
    pub fn apply_selected_options(&mut self, selected: &SelectedOptions) -> VariantOutcome {
        let resolved =
            resolver::resolve_image_index(selected, &self.variants, self.state.images());
        self.show_resolved(resolved)
    }

    /// Show the image a host-provided variant references.
    pub fn apply_variant(&mut self, variant: &Variant) -> VariantOutcome {
        let resolved = resolver::image_index_for_variant(variant, self.state.images());
        self.show_resolved(resolved)
    }

    /// Apply a decoded `variant:changed` payload.
    pub fn apply_change(&mut self, change: &VariantChange) -> VariantOutcome {
        match change {
            VariantChange::SelectedOptions(selected) => self.apply_selected_options(selected),
            VariantChange::Variant(variant) => self.apply_variant(variant),
        }
    }

    /// Option values still purchasable, for hiding sold-out swatches.
    pub fn option_availability(&self) -> OptionAvailability {
        OptionAvailability::from_variants(&self.variants)
    }

    /// Re-apply active/inactive presentation to every pair without notifying.
    ///
    /// Hosts call this after replacing gallery markup in place.
    pub fn sync_surface(&mut self) {
        if self.state.is_empty() {
            return;
        }
        let current = self.state.current_index();
        for index in 0..self.state.len() {
            self.surface.set_active(index, index == current);
        }
    }

    /// Check that the surface shows exactly the current pair as active.
    pub fn verify(&self) -> Result<(), GalleryError> {
        if self.state.is_empty() {
            return Ok(());
        }
        let expected = self.state.current_index();
        let active: Vec<usize> = (0..self.state.len())
            .filter(|index| self.surface.is_active(*index))
            .collect();

        if active == [expected] {
            Ok(())
        } else {
            Err(GalleryError::StateMismatch { expected, active })
        }
    }

    fn show_resolved(&mut self, resolved: Option<usize>) -> VariantOutcome {
        let Some(index) = resolved else {
            log::debug!("Variant change ignored: {}", GalleryError::NoMatchingVariant);
            return VariantOutcome::NoMatch;
        };
        match self.switch_to(index) {
            Some(event) => VariantOutcome::Switched(event),
            None => VariantOutcome::AlreadyShown(index),
        }
    }

    /// Scroll the thumbnail into its container unless it is already fully visible.
    fn reveal_thumbnail(&mut self, index: usize) {
        let Some(viewport) = self.surface.scroll_viewport() else {
            if !self.reported_missing_viewport {
                log::debug!(
                    "Scroll-into-view disabled: {}",
                    GalleryError::missing_host_element("thumbnail scroll container")
                );
                self.reported_missing_viewport = true;
            }
            return;
        };
        let Some(bounds) = self.surface.thumbnail_bounds(index) else {
            return;
        };
        if !viewport.contains(&bounds) {
            self.surface.scroll_into_view(index);
        }
    }

    fn notify(&mut self, event: &ImageChanged) {
        for (_, observer) in self.observers.iter_mut() {
            observer(event);
        }
    }
}
