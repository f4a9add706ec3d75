//! Detail routes: `/detail/{movie|tv}/{id}`.

use std::fmt;
use std::str::FromStr;

use cinescope_api::tmdb::{MediaType, ParseMediaTypeError};

/// Route path prefix.
const PREFIX: &str = "/detail/";

/// Navigation target for the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetailRoute {
    /// `movie` or `tv`.
    pub media_type: MediaType,
    /// TMDB id.
    pub id: u64,
}

impl DetailRoute {
    /// Creates a route.
    #[must_use]
    pub const fn new(media_type: MediaType, id: u64) -> Self {
        Self { media_type, id }
    }
}

impl fmt::Display for DetailRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}/{}", self.media_type, self.id)
    }
}

/// Error returned when a path is not a detail route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteParseError {
    /// Path does not look like `/detail/{type}/{id}`.
    #[error("not a detail route: {0}")]
    Malformed(String),
    /// Media type segment is neither `movie` nor `tv`.
    #[error(transparent)]
    MediaType(#[from] ParseMediaTypeError),
    /// Id segment is not a non-negative integer.
    #[error("invalid id in detail route: {0}")]
    InvalidId(String),
}

impl FromStr for DetailRoute {
    type Err = RouteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(PREFIX)
            .ok_or_else(|| RouteParseError::Malformed(String::from(s)))?;
        let (kind, id) = rest
            .split_once('/')
            .ok_or_else(|| RouteParseError::Malformed(String::from(s)))?;
        let media_type = kind.parse::<MediaType>()?;
        let id = id
            .parse::<u64>()
            .map_err(|_| RouteParseError::InvalidId(String::from(id)))?;
        Ok(Self { media_type, id })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_display_movie_route() {
        // Arrange & Act
        let route = DetailRoute::new(MediaType::Movie, 1_022_789);

        // Assert
        assert_eq!(route.to_string(), "/detail/movie/1022789");
    }

    #[test]
    fn test_parse_tv_route() {
        // Arrange & Act
        let route: DetailRoute = "/detail/tv/218843".parse().unwrap();

        // Assert
        assert_eq!(route, DetailRoute::new(MediaType::Tv, 218_843));
    }

    #[test]
    fn test_parse_rejects_unknown_media_type() {
        // Arrange & Act
        let result = "/detail/person/1".parse::<DetailRoute>();

        // Assert
        assert!(matches!(result, Err(RouteParseError::MediaType(_))));
    }

    #[test]
    fn test_parse_rejects_bad_id_and_prefix() {
        // Arrange & Act & Assert
        assert_eq!(
            "/detail/movie/abc".parse::<DetailRoute>(),
            Err(RouteParseError::InvalidId(String::from("abc")))
        );
        assert!(matches!(
            "/movie/1".parse::<DetailRoute>(),
            Err(RouteParseError::Malformed(_))
        ));
        assert!(matches!(
            "/detail/movie".parse::<DetailRoute>(),
            Err(RouteParseError::Malformed(_))
        ));
    }
}
