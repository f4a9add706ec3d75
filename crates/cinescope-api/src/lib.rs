//! TMDB API gateway for cinescope.
//!
//! The only crate in the workspace that talks to the network. Provides the
//! TMDB client, response types, poster URL helpers, and the error taxonomy
//! shared by the rest of the workspace.

mod error;
/// Poster URL construction.
pub mod image;
/// TMDB API client.
pub mod tmdb;

pub use error::{Error, Result};
pub use reqwest::StatusCode;
