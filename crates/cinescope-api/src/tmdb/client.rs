//! `TmdbClient` - TMDB API client implementation.

use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::credential::Credential;
use super::types::{
    DiscoverMovieParams, DiscoverTvParams, MediaDetails, MediaPage, MediaType, PopularParams,
    TmdbErrorResponse,
};
use crate::{Error, Result};

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// TMDB API client.
///
/// Failures are surfaced as-is: no retry, no backoff, no timeout override.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer token source, resolved per request.
    credential: Credential,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    credential: Credential,
    user_agent: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            credential: Credential::None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (config, or wiremock in tests).
    ///
    /// A missing trailing slash is added so relative paths join under it.
    #[must_use]
    pub fn base_url(mut self, mut url: Url) -> Self {
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.base_url = Some(url);
        self
    }

    /// Sets where the bearer token is read from (default: none).
    #[must_use]
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = credential;
        self
    }

    /// Sets the User-Agent (default: `cinescope-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - the default base URL fails to parse.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).map_err(|source| Error::InvalidUrl {
                path: String::from(DEFAULT_BASE_URL),
                source,
            })?,
        };

        let user_agent = self.user_agent.unwrap_or_else(|| {
            String::from(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        });

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .map_err(|source| Error::Network {
                path: String::new(),
                source,
            })?;

        Ok(TmdbClient {
            http_client,
            base_url,
            credential: self.credential,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns the base URL requests are joined onto.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request with optional Bearer auth and query params.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.base_url.join(path).map_err(|source| Error::InvalidUrl {
            path: String::from(path),
            source,
        })?;

        let mut request = self.http_client.get(url).query(query);
        match self.credential.resolve() {
            Some(token) => request = request.bearer_auth(token),
            None => tracing::warn!("no TMDB API token configured; sending unauthenticated request"),
        }
        let request = request.build().map_err(|source| Error::Network {
            path: String::from(path),
            source,
        })?;

        tracing::debug!(url = %request.url(), "TMDB API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|source| Error::Network {
                path: String::from(path),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| Error::Network {
            path: String::from(path),
            source,
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<TmdbErrorResponse>(&body) {
                Ok(e) => {
                    tracing::debug!(status_code = e.status_code, "TMDB error body");
                    e.status_message
                }
                Err(_) => body,
            };
            return Err(Error::Remote { status, message });
        }

        serde_json::from_str(&body).map_err(|source| Error::Decode {
            path: String::from(path),
            source,
        })
    }
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn popular_movies(&self, params: &PopularParams) -> Result<MediaPage> {
        let query = [
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
        ];
        self.get_json("movie/popular", &query).await
    }

    #[instrument(skip_all, fields(language = %params.language, region = %params.region))]
    async fn discover_movies(&self, params: &DiscoverMovieParams) -> Result<MediaPage> {
        let query = [
            ("include_adult", String::from("false")),
            ("include_video", String::from("false")),
            ("language", params.language.clone()),
            ("region", params.region.clone()),
            ("sort_by", String::from("popularity.desc")),
            ("with_origin_country", params.region.clone()),
            ("page", params.page.to_string()),
        ];
        self.get_json("discover/movie", &query).await
    }

    #[instrument(skip_all, fields(origin_country = %params.origin_country))]
    async fn discover_tv(&self, params: &DiscoverTvParams) -> Result<MediaPage> {
        let query = [
            ("include_adult", String::from("false")),
            ("include_null_first_air_dates", String::from("false")),
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("sort_by", String::from("popularity.desc")),
            ("with_origin_country", params.origin_country.clone()),
        ];
        self.get_json("discover/tv", &query).await
    }

    #[instrument(skip_all, fields(media_type = %media_type, id = id))]
    async fn media_details(
        &self,
        media_type: MediaType,
        id: u64,
        language: &str,
    ) -> Result<MediaDetails> {
        let path = format!("{media_type}/{id}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }
}
