//! Poster URL helpers.
//!
//! TMDB returns relative image paths such as `/abc123.jpg`; they only load
//! when prefixed with the image host and a size token.

use std::fmt;

/// Image host base URL (no trailing slash).
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Returned for records without a poster.
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/240x360?text=No+Image";

/// Image size token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// 500px wide. Used for card grids and the detail panel.
    W500,
    /// Full resolution. Used for the hero carousel.
    Original,
}

impl ImageSize {
    /// Returns the path segment TMDB expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W500 => "w500",
            Self::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a loadable poster URL, or the placeholder when `path` is absent or empty.
#[must_use]
pub fn poster_url(path: Option<&str>, size: ImageSize) -> String {
    match path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) if p.starts_with('/') => format!("{IMAGE_BASE_URL}/{size}{p}"),
        Some(p) => format!("{IMAGE_BASE_URL}/{size}/{p}"),
        None => String::from(PLACEHOLDER_POSTER_URL),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_url_w500() {
        // Arrange & Act
        let url = poster_url(Some("/kqjL17yufvn9OVLyXYpvtyrFfak.jpg"), ImageSize::W500);

        // Assert
        assert_eq!(
            url,
            "https://image.tmdb.org/t/p/w500/kqjL17yufvn9OVLyXYpvtyrFfak.jpg"
        );
    }

    #[test]
    fn test_poster_url_original() {
        // Arrange & Act
        let url = poster_url(Some("/a.jpg"), ImageSize::Original);

        // Assert
        assert_eq!(url, "https://image.tmdb.org/t/p/original/a.jpg");
    }

    #[test]
    fn test_poster_url_without_leading_slash() {
        // Arrange & Act
        let url = poster_url(Some("a.jpg"), ImageSize::W500);

        // Assert
        assert_eq!(url, "https://image.tmdb.org/t/p/w500/a.jpg");
    }

    #[test]
    fn test_poster_url_missing_path_is_placeholder() {
        // Arrange & Act & Assert
        assert_eq!(poster_url(None, ImageSize::W500), PLACEHOLDER_POSTER_URL);
        assert_eq!(poster_url(Some(""), ImageSize::Original), PLACEHOLDER_POSTER_URL);
    }
}
