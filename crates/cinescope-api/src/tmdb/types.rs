//! TMDB API response types and request parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// --- Media type ---

/// Movie or TV show. Also the first segment of a detail route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// A movie (`movie/...` endpoints).
    Movie,
    /// A TV show (`tv/...` endpoints).
    Tv,
}

impl MediaType {
    /// Returns the URL token (`movie` or `tv`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a media type token is neither `movie` nor `tv`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown media type: {0} (expected \"movie\" or \"tv\")")]
pub struct ParseMediaTypeError(pub String);

impl FromStr for MediaType {
    type Err = ParseMediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            other => Err(ParseMediaTypeError(String::from(other))),
        }
    }
}

// --- List responses ---

/// Paged list envelope shared by `movie/popular`, `discover/movie` and `discover/tv`.
///
/// Only `results` is consumed; pagination metadata is kept for logging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaPage {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Records on this page.
    pub results: Vec<MediaRecord>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A single movie or TV show entry from a list endpoint.
///
/// Movies carry `title` / `original_title`, shows carry `name`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaRecord {
    /// TMDB id. Unique within one list only.
    pub id: u64,
    /// Original movie title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Localized movie title.
    #[serde(default)]
    pub title: Option<String>,
    /// Show name.
    #[serde(default)]
    pub name: Option<String>,
    /// Synopsis.
    #[serde(default)]
    pub overview: Option<String>,
    /// Relative poster path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Relative backdrop path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Movie release date (YYYY-MM-DD).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Show first air date (YYYY-MM-DD).
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Vote count.
    #[serde(default)]
    pub vote_count: Option<u32>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: Option<f64>,
}

impl MediaRecord {
    /// Returns the movie-style title (`original_title`, else `title`), if any.
    #[must_use]
    pub fn movie_title(&self) -> Option<&str> {
        non_empty(self.original_title.as_deref()).or_else(|| non_empty(self.title.as_deref()))
    }

    /// Returns the show-style title (`name`), if any.
    #[must_use]
    pub fn show_title(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    /// Returns the title used for display and search: movie-style, else show-style, else `""`.
    #[must_use]
    pub fn effective_title(&self) -> &str {
        self.movie_title().or_else(|| self.show_title()).unwrap_or("")
    }

    /// Returns the synopsis when present and non-empty.
    #[must_use]
    pub fn overview(&self) -> Option<&str> {
        non_empty(self.overview.as_deref())
    }

    /// Infers the media type from which title field is populated.
    #[must_use]
    pub fn inferred_media_type(&self) -> MediaType {
        if self.movie_title().is_some() {
            MediaType::Movie
        } else {
            MediaType::Tv
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}

// --- Details ---

/// Response from `movie/{id}` or `tv/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaDetails {
    /// TMDB id.
    pub id: u64,
    /// Movie title.
    #[serde(default)]
    pub title: Option<String>,
    /// Original movie title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Show name.
    #[serde(default)]
    pub name: Option<String>,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Synopsis.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release status (e.g. "Released", "Returning Series").
    #[serde(default)]
    pub status: Option<String>,
    /// Movie release date.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Show first air date.
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Movie runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Number of seasons (shows only).
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    /// Number of episodes (shows only).
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Relative poster path.
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MediaDetails {
    /// Returns the display title for either media type.
    #[must_use]
    pub fn display_title(&self) -> &str {
        [&self.original_title, &self.title, &self.name]
            .into_iter()
            .find_map(|t| non_empty(t.as_deref()))
            .unwrap_or("")
    }
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}

// --- Request parameters ---

/// Parameters for `movie/popular`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopularParams {
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (default: 1).
    pub page: u32,
}

impl Default for PopularParams {
    fn default() -> Self {
        Self {
            language: String::from("en-US"),
            page: 1,
        }
    }
}

/// Parameters for `discover/movie` filtered by language and origin region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverMovieParams {
    /// Response language (e.g. "id-ID").
    pub language: String,
    /// Region (ISO 3166-1). Also used as the origin country filter.
    pub region: String,
    /// Result page (default: 1).
    pub page: u32,
}

impl DiscoverMovieParams {
    /// Creates params for the given language and region.
    pub fn new(language: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            region: region.into(),
            page: 1,
        }
    }
}

/// Parameters for `discover/tv` filtered by origin country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverTvParams {
    /// Response language (default: "en-US").
    pub language: String,
    /// Origin country filter (default: "ID").
    pub origin_country: String,
    /// Result page (default: 5).
    pub page: u32,
}

impl Default for DiscoverTvParams {
    fn default() -> Self {
        Self {
            language: String::from("en-US"),
            origin_country: String::from("ID"),
            page: 5,
        }
    }
}
