//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 list and detail endpoints.

mod api;
mod client;
mod credential;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, TmdbClient, TmdbClientBuilder};
pub use credential::{Credential, SharedToken};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    DiscoverMovieParams, DiscoverTvParams, Genre, MediaDetails, MediaPage, MediaRecord,
    MediaType, ParseMediaTypeError, PopularParams, TmdbErrorResponse,
};
