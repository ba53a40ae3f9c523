//! Image reference - url of an externally stored photo plus optional thumbnail
//!
//! Image bytes never pass through the domain; uploads happen elsewhere and
//! only the resulting urls are stored here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub thumbnail_url: Option<String>,
}

impl ImageRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            thumbnail_url: None,
        }
    }

    /// Build from raw parts, dropping a blank thumbnail
    pub fn from_parts(url: impl Into<String>, thumbnail_url: Option<String>) -> Self {
        Self {
            url: url.into(),
            thumbnail_url: thumbnail_url.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        let thumbnail_url = thumbnail_url.into();
        if !thumbnail_url.trim().is_empty() {
            self.thumbnail_url = Some(thumbnail_url);
        }
        self
    }

    /// Whether this reference points at an actual image
    pub fn is_usable(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_thumbnail_is_dropped() {
        let image = ImageRef::from_parts("https://img/a.jpg", Some("  ".to_string()));
        assert_eq!(image.thumbnail_url, None);

        let image = ImageRef::new("https://img/a.jpg").with_thumbnail("");
        assert_eq!(image.thumbnail_url, None);
    }

    #[test]
    fn test_is_usable() {
        assert!(ImageRef::new("https://img/a.jpg").is_usable());
        assert!(!ImageRef::new("").is_usable());
        assert!(!ImageRef::new("   ").is_usable());
    }
}
