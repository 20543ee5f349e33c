//! Variant resolution: which image a variant selection should show, and which
//! option values can still be bought.

use std::collections::BTreeSet;

use crate::model::{GalleryImage, MediaId, SelectedOptions, Variant};

/// Find the index of the image showing `id`.
///
/// Exact media id matches win over ids found inside an image URL.
pub fn image_index_for_media(images: &[GalleryImage], id: &MediaId) -> Option<usize> {
    images
        .iter()
        .position(|image| image.media_id == *id)
        .or_else(|| images.iter().position(|image| image.matches_media(id)))
}

/// First available variant whose options are a superset of `selected`.
pub fn find_variant<'a>(selected: &SelectedOptions, variants: &'a [Variant]) -> Option<&'a Variant> {
    variants
        .iter()
        .filter(|variant| variant.available)
        .find(|variant| variant.matches(selected))
}

/// Resolve a selection to the image index of the first matching available variant.
///
/// Returns `None` when no variant matches, when the matching variant has no
/// featured image, or when that image is not part of this gallery. `None` is
/// never folded into index 0.
pub fn resolve_image_index(
    selected: &SelectedOptions,
    variants: &[Variant],
    images: &[GalleryImage],
) -> Option<usize> {
    let variant = find_variant(selected, variants)?;
    let media = variant.image_ref()?;
    image_index_for_media(images, media)
}

/// Image index for a variant the host handed over directly.
pub fn image_index_for_variant(variant: &Variant, images: &[GalleryImage]) -> Option<usize> {
    image_index_for_media(images, variant.image_ref()?)
}

/// Recompute each image's `available` flag from variant membership.
///
/// An image referenced only by sold-out variants is unavailable; images no
/// variant references stay available.
pub fn derive_image_availability(images: &mut [GalleryImage], variants: &[Variant]) {
    let mut referenced = vec![false; images.len()];
    let mut available = vec![false; images.len()];
    for variant in variants {
        let Some(index) = variant
            .image_ref()
            .and_then(|id| image_index_for_media(images, id))
        else {
            continue;
        };
        referenced[index] = true;
        available[index] |= variant.available;
    }
    for (i, image) in images.iter_mut().enumerate() {
        image.available = !referenced[i] || available[i];
    }
}

/// Option values that appear on at least one available variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionAvailability {
    values: BTreeSet<String>,
}

impl OptionAvailability {
    pub fn from_variants(variants: &[Variant]) -> Self {
        let values = variants
            .iter()
            .filter(|variant| variant.available)
            .flat_map(|variant| variant.options.values().cloned())
            .collect();
        Self { values }
    }

    /// Whether an option swatch with this value should stay visible.
    pub fn is_available(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(pairs: &[(&str, &str)]) -> SelectedOptions {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn images(n: usize) -> Vec<GalleryImage> {
        (0..n).map(|i| GalleryImage::new(format!("m{i}").as_str(), i)).collect()
    }

    fn color_variants() -> Vec<Variant> {
        vec![
            Variant::new([("color", "red")]).with_image("m2"),
            Variant::new([("color", "blue")]).with_image("m0"),
        ]
    }

    #[test]
    fn test_resolves_matching_variant() {
        let images = images(4);
        let variants = color_variants();

        assert_eq!(
            resolve_image_index(&selected(&[("color", "blue")]), &variants, &images),
            Some(0)
        );
        assert_eq!(
            resolve_image_index(&selected(&[("color", "red")]), &variants, &images),
            Some(2)
        );
    }

    #[test]
    fn test_unknown_value_is_no_match() {
        let images = images(4);
        let variants = color_variants();

        assert_eq!(
            resolve_image_index(&selected(&[("color", "green")]), &variants, &images),
            None
        );
    }

    #[test]
    fn test_skips_unavailable_variants() {
        let images = images(4);
        let variants = vec![
            Variant::new([("color", "red")]).with_image("m1").unavailable(),
            Variant::new([("color", "red"), ("size", "L")]).with_image("m3"),
        ];

        assert_eq!(
            resolve_image_index(&selected(&[("color", "red")]), &variants, &images),
            Some(3)
        );
    }

    #[test]
    fn test_variant_without_image_or_unknown_image() {
        let images = images(2);
        let variants = vec![
            Variant::new([("color", "red")]),
            Variant::new([("color", "blue")]).with_image("elsewhere"),
        ];

        assert_eq!(
            resolve_image_index(&selected(&[("color", "red")]), &variants, &images),
            None
        );
        assert_eq!(
            resolve_image_index(&selected(&[("color", "blue")]), &variants, &images),
            None
        );
    }

    #[test]
    fn test_media_lookup_prefers_exact_id() {
        let images = vec![
            GalleryImage::new("a", 0).with_src("//cdn/files/55.jpg"),
            GalleryImage::new("55", 1),
        ];
        assert_eq!(image_index_for_media(&images, &MediaId::from(55_u64)), Some(1));
        assert_eq!(
            image_index_for_media(&images[..1], &MediaId::from(55_u64)),
            Some(0)
        );
    }

    #[test]
    fn test_derive_image_availability() {
        let mut images = images(3);
        let variants = vec![
            Variant::new([("color", "red")]).with_image("m0").unavailable(),
            Variant::new([("color", "blue")]).with_image("m1").unavailable(),
            Variant::new([("color", "teal")]).with_image("m1"),
        ];

        derive_image_availability(&mut images, &variants);

        assert!(!images[0].available);
        assert!(images[1].available);
        assert!(images[2].available);
    }

    #[test]
    fn test_sold_out_variant_marks_only_its_exact_image() {
        let mut images = vec![
            GalleryImage::new("1", 0),
            GalleryImage::new("x", 1).with_src("//cdn/files/shirt_1.jpg"),
        ];
        let variants = vec![Variant::new([("color", "red")]).with_image("1").unavailable()];

        derive_image_availability(&mut images, &variants);

        assert!(!images[0].available);
        assert!(images[1].available);
    }

    #[test]
    fn test_option_availability() {
        let variants = vec![
            Variant::new([("color", "red"), ("size", "S")]),
            Variant::new([("color", "blue"), ("size", "M")]).unavailable(),
        ];
        let availability = OptionAvailability::from_variants(&variants);

        assert!(availability.is_available("red"));
        assert!(availability.is_available("S"));
        assert!(!availability.is_available("blue"));
        assert!(!availability.is_available("M"));
        assert_eq!(availability.len(), 2);
    }
}
