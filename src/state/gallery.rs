//! Index state for one gallery instance.

use crate::model::GalleryImage;

/// Ordered images plus the active index.
///
/// The image list is fixed after construction; `current_index` is always a
/// valid index when the list is non-empty and 0 otherwise.
#[derive(Clone, Debug)]
pub struct GalleryState {
    images: Vec<GalleryImage>,
    current_index: usize,
}

impl GalleryState {
    /// Build state from host images, ordered by their ordinal position.
    ///
    /// Adopts the first image the host already marked active, else index 0.
    pub fn from_images(images: Vec<GalleryImage>) -> Self {
        let order = display_order(&images);
        let images = apply_order(images, &order);

        let current_index = images
            .iter()
            .position(|image| image.initially_active)
            .unwrap_or(0);

        let active_count = images.iter().filter(|image| image.initially_active).count();
        if active_count > 1 {
            log::warn!(
                "Host marked {} images active, adopting index {}",
                active_count,
                current_index
            );
        }

        Self {
            images,
            current_index,
        }
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Get the current image.
    pub fn current_image(&self) -> Option<&GalleryImage> {
        self.images.get(self.current_index)
    }

    pub fn get(&self, index: usize) -> Option<&GalleryImage> {
        self.images.get(index)
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.images.len()
    }

    /// Index after the current one, wrapping around.
    pub fn next_index(&self) -> Option<usize> {
        if self.images.is_empty() {
            return None;
        }
        Some((self.current_index + 1) % self.images.len())
    }

    /// Index before the current one, wrapping around.
    pub fn prev_index(&self) -> Option<usize> {
        if self.images.is_empty() {
            return None;
        }
        Some(if self.current_index == 0 {
            self.images.len() - 1
        } else {
            self.current_index - 1
        })
    }

    pub fn last_index(&self) -> Option<usize> {
        self.images.len().checked_sub(1)
    }

    /// Move the active index. Returns the previous index, or `None` when
    /// `index` is out of range (state untouched).
    pub(crate) fn set_current(&mut self, index: usize) -> Option<usize> {
        if !self.contains_index(index) {
            return None;
        }
        let previous = self.current_index;
        self.current_index = index;
        Some(previous)
    }

    /// Get progress string like "3/15".
    pub fn progress(&self) -> String {
        if self.images.is_empty() {
            return "0/0".to_string();
        }
        format!("{}/{}", self.current_index + 1, self.images.len())
    }
}

/// Host indices of `images` in display order (stable by ordinal position).
///
/// Surfaces that keep elements in host order reorder them with this same
/// permutation, so navigator index `k` names the same pair on both sides.
pub fn display_order(images: &[GalleryImage]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..images.len()).collect();
    order.sort_by_key(|&i| images[i].position);
    order
}

/// Rearrange host-ordered `items` into display order.
pub fn apply_order<T>(items: Vec<T>, order: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order
        .iter()
        .filter_map(|&i| slots.get_mut(i).and_then(Option::take))
        .collect()
}
