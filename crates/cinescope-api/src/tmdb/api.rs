//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::types::{
    DiscoverMovieParams, DiscoverTvParams, MediaDetails, MediaPage, MediaType, PopularParams,
};
use crate::Result;

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches popular movies (`movie/popular`).
    ///
    /// # Errors
    ///
    /// Returns `Network`, `Remote` or `Decode` when the call fails.
    async fn popular_movies(&self, params: &PopularParams) -> Result<MediaPage>;

    /// Fetches movies filtered by language and origin region (`discover/movie`).
    ///
    /// # Errors
    ///
    /// Returns `Network`, `Remote` or `Decode` when the call fails.
    async fn discover_movies(&self, params: &DiscoverMovieParams) -> Result<MediaPage>;

    /// Fetches TV shows filtered by origin country (`discover/tv`).
    ///
    /// # Errors
    ///
    /// Returns `Network`, `Remote` or `Decode` when the call fails.
    async fn discover_tv(&self, params: &DiscoverTvParams) -> Result<MediaPage>;

    /// Fetches full details for one movie or show.
    ///
    /// # Errors
    ///
    /// Returns `Network`, `Remote` or `Decode` when the call fails.
    async fn media_details(
        &self,
        media_type: MediaType,
        id: u64,
        language: &str,
    ) -> Result<MediaDetails>;
}
