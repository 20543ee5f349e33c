//! Gallery image data model.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Storefront media identifier.
///
/// Storefronts emit these as numbers or strings depending on the endpoint, so
/// both deserialize into the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MediaId(String);

impl MediaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for MediaId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for MediaId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for MediaId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => MediaId::from(n),
            RawId::Text(s) => MediaId(s),
        })
    }
}

/// One image/thumbnail pair as the host reported it at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Storefront media identity
    pub media_id: MediaId,
    /// Ordinal position the host assigned (data-index)
    pub position: usize,
    /// Image source URL, used to match variants whose media id only appears in the URL
    #[serde(default)]
    pub src: Option<String>,
    /// False when every variant showing this image is sold out
    #[serde(default = "default_available")]
    pub available: bool,
    /// Whether the host rendered this pair as active before the navigator existed
    #[serde(default)]
    pub initially_active: bool,
}

fn default_available() -> bool {
    true
}

impl GalleryImage {
    /// Create an available, inactive image at the given position.
    pub fn new(media_id: impl Into<MediaId>, position: usize) -> Self {
        Self {
            media_id: media_id.into(),
            position,
            src: None,
            available: true,
            initially_active: false,
        }
    }

    /// Builder: set the source URL.
    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Builder: mark as already active on the host.
    pub fn active(mut self) -> Self {
        self.initially_active = true;
        self
    }

    /// Whether this image is the one identified by `id`, either directly or by
    /// the id appearing in its source URL.
    pub fn matches_media(&self, id: &MediaId) -> bool {
        self.media_id == *id
            || self
                .src
                .as_deref()
                .is_some_and(|src| !id.as_str().is_empty() && src.contains(id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_id_accepts_numbers_and_strings() {
        let a: MediaId = serde_json::from_str("123456").unwrap();
        let b: MediaId = serde_json::from_str("\"123456\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "123456");
    }

    #[test]
    fn test_matches_media_by_src() {
        let image = GalleryImage::new("gid-1", 0)
            .with_src("//cdn.example.com/files/shirt_987.jpg?v=1");

        assert!(image.matches_media(&MediaId::from("gid-1")));
        assert!(image.matches_media(&MediaId::from(987_u64)));
        assert!(!image.matches_media(&MediaId::from(654_u64)));
        assert!(!image.matches_media(&MediaId::from("")));
    }

    #[test]
    fn test_deserialize_defaults() {
        let image: GalleryImage =
            serde_json::from_str(r#"{ "media_id": 7, "position": 2 }"#).unwrap();
        assert!(image.available);
        assert!(!image.initially_active);
        assert_eq!(image.src, None);
    }
}
