//! Dataset containers: Popular, Region and `TvRegion`.
//!
//! Each store owns one list of records and refreshes it through the gateway.
//! A successful refresh replaces the list wholesale. A failed refresh is
//! logged and swallowed; the previous list stays in place.
#![allow(clippy::future_not_send)]

use std::fmt;
use std::future::Future;

use cinescope_api::tmdb::{
    DiscoverMovieParams, DiscoverTvParams, LocalTmdbApi, MediaPage, MediaRecord, PopularParams,
};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Which dataset a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Popular movies.
    Popular,
    /// Movies filtered by language and origin region.
    Region,
    /// TV shows filtered by origin country.
    TvRegion,
}

impl Category {
    /// Human-readable row label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popular => "Popular Movies",
            Self::Region => "Regional Movies",
            Self::TvRegion => "Regional TV",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Popular => "popular",
            Self::Region => "region",
            Self::TvRegion => "tv_region",
        };
        f.write_str(name)
    }
}

/// Outcome of the most recent refresh.
///
/// Does not change what `records()` returns; it only lets views tell a first
/// load apart from stale data kept after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Never refreshed, or every refresh so far was cancelled.
    #[default]
    Pending,
    /// The last refresh succeeded.
    Ready,
    /// The last refresh failed; records are from an earlier success, if any.
    Stale,
}

/// Records plus load state. Shared by the three stores.
#[derive(Debug)]
pub struct Dataset {
    category: Category,
    records: Vec<MediaRecord>,
    state: LoadState,
}

impl Dataset {
    /// Creates an empty dataset for `category`.
    #[must_use]
    pub const fn new(category: Category) -> Self {
        Self {
            category,
            records: Vec::new(),
            state: LoadState::Pending,
        }
    }

    /// Returns the current records.
    #[must_use]
    pub fn records(&self) -> &[MediaRecord] {
        &self.records
    }

    /// Returns the load state.
    #[must_use]
    pub const fn state(&self) -> LoadState {
        self.state
    }

    /// Applies a fetch outcome.
    ///
    /// `Ok` replaces the records. `Err` is logged and leaves the records untouched.
    pub fn apply(&mut self, outcome: cinescope_api::Result<Vec<MediaRecord>>) {
        match outcome {
            Ok(records) => {
                tracing::debug!(
                    category = %self.category,
                    count = records.len(),
                    "dataset replaced"
                );
                self.records = records;
                self.state = LoadState::Ready;
            }
            Err(err) => {
                tracing::error!(
                    category = %self.category,
                    error = %err,
                    kept = self.records.len(),
                    "failed to refresh dataset; keeping previous records"
                );
                self.state = LoadState::Stale;
            }
        }
    }

    /// Awaits `fetch` unless `cancel` fires first, then applies the outcome.
    ///
    /// A cancelled refresh drops the in-flight request and changes nothing.
    async fn refresh_with<F>(&mut self, cancel: &CancellationToken, fetch: F)
    where
        F: Future<Output = cinescope_api::Result<MediaPage>>,
    {
        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("refresh cancelled; discarding result");
                return;
            }
            outcome = fetch => outcome,
        };
        self.apply(outcome.map(|page| page.results));
    }
}

/// Popular movies store.
#[derive(Debug)]
pub struct PopularStore {
    params: PopularParams,
    data: Dataset,
}

impl PopularStore {
    /// Creates an empty store that fetches with `params`.
    #[must_use]
    pub const fn new(params: PopularParams) -> Self {
        Self {
            params,
            data: Dataset::new(Category::Popular),
        }
    }

    /// Fetches popular movies and replaces the list on success.
    ///
    /// Failures are logged, not returned.
    #[instrument(skip_all, fields(category = %Category::Popular))]
    pub async fn refresh<A: LocalTmdbApi>(&mut self, api: &A, cancel: &CancellationToken) {
        let fetch = api.popular_movies(&self.params);
        self.data.refresh_with(cancel, fetch).await;
    }

    /// Returns the current records.
    #[must_use]
    pub fn records(&self) -> &[MediaRecord] {
        self.data.records()
    }

    /// Returns the load state.
    #[must_use]
    pub const fn state(&self) -> LoadState {
        self.data.state()
    }
}

impl Default for PopularStore {
    fn default() -> Self {
        Self::new(PopularParams::default())
    }
}

/// Language and region pair used by the Region store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFilter {
    /// Response language (e.g. "id-ID").
    pub language: String,
    /// Region and origin country (ISO 3166-1).
    pub region: String,
}

impl RegionFilter {
    /// Creates a filter.
    pub fn new(language: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            region: region.into(),
        }
    }

    fn to_params(&self) -> DiscoverMovieParams {
        DiscoverMovieParams::new(self.language.clone(), self.region.clone())
    }
}

impl Default for RegionFilter {
    fn default() -> Self {
        Self::new("id-ID", "ID")
    }
}

/// Region-filtered movies store. Remembers the last filter it used.
#[derive(Debug)]
pub struct RegionStore {
    filter: RegionFilter,
    data: Dataset,
}

impl RegionStore {
    /// Creates an empty store with an initial filter.
    #[must_use]
    pub const fn new(filter: RegionFilter) -> Self {
        Self {
            filter,
            data: Dataset::new(Category::Region),
        }
    }

    /// Fetches region-filtered movies and replaces the list on success.
    ///
    /// A `Some` filter overwrites the stored one before the fetch; `None`
    /// repeats the last filter. Failures are logged, not returned.
    #[instrument(skip_all, fields(category = %Category::Region))]
    pub async fn refresh<A: LocalTmdbApi>(
        &mut self,
        api: &A,
        filter: Option<RegionFilter>,
        cancel: &CancellationToken,
    ) {
        if let Some(filter) = filter {
            self.filter = filter;
        }
        let params = self.filter.to_params();
        tracing::debug!(language = %params.language, region = %params.region, "refreshing");
        let fetch = api.discover_movies(&params);
        self.data.refresh_with(cancel, fetch).await;
    }

    /// Returns the filter the next argument-less refresh will use.
    #[must_use]
    pub const fn filter(&self) -> &RegionFilter {
        &self.filter
    }

    /// Returns the current records.
    #[must_use]
    pub fn records(&self) -> &[MediaRecord] {
        self.data.records()
    }

    /// Returns the load state.
    #[must_use]
    pub const fn state(&self) -> LoadState {
        self.data.state()
    }
}

impl Default for RegionStore {
    fn default() -> Self {
        Self::new(RegionFilter::default())
    }
}

/// Region-filtered TV shows store.
#[derive(Debug)]
pub struct TvRegionStore {
    params: DiscoverTvParams,
    data: Dataset,
}

impl TvRegionStore {
    /// Creates an empty store that fetches with `params`.
    #[must_use]
    pub const fn new(params: DiscoverTvParams) -> Self {
        Self {
            params,
            data: Dataset::new(Category::TvRegion),
        }
    }

    /// Fetches TV shows and replaces the list on success.
    ///
    /// Failures are logged, not returned.
    #[instrument(skip_all, fields(category = %Category::TvRegion))]
    pub async fn refresh<A: LocalTmdbApi>(&mut self, api: &A, cancel: &CancellationToken) {
        let fetch = api.discover_tv(&self.params);
        self.data.refresh_with(cancel, fetch).await;
    }

    /// Returns the current records.
    #[must_use]
    pub fn records(&self) -> &[MediaRecord] {
        self.data.records()
    }

    /// Returns the load state.
    #[must_use]
    pub const fn state(&self) -> LoadState {
        self.data.state()
    }
}

impl Default for TvRegionStore {
    fn default() -> Self {
        Self::new(DiscoverTvParams::default())
    }
}
