//! `Catalog`: the three stores bundled for injection into views.
#![allow(clippy::future_not_send)]

use cinescope_api::tmdb::{LocalTmdbApi, MediaRecord};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::dataset::{PopularStore, RegionFilter, RegionStore, TvRegionStore};
use crate::lookup::{LookupError, Sources};

/// The three dataset stores.
///
/// Constructed explicitly and passed to whoever needs it; there is no global
/// instance. Each store keeps its own lifecycle.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Popular movies.
    pub popular: PopularStore,
    /// Region-filtered movies.
    pub region: RegionStore,
    /// Region-filtered TV shows.
    pub tv: TvRegionStore,
}

impl Catalog {
    /// Bundles three stores.
    #[must_use]
    pub const fn new(popular: PopularStore, region: RegionStore, tv: TvRegionStore) -> Self {
        Self {
            popular,
            region,
            tv,
        }
    }

    /// Refreshes all three stores concurrently.
    ///
    /// `region_filter` is forwarded to the Region store. Each refresh
    /// succeeds or fails independently.
    #[instrument(skip_all)]
    pub async fn refresh_all<A: LocalTmdbApi>(
        &mut self,
        api: &A,
        region_filter: Option<RegionFilter>,
        cancel: &CancellationToken,
    ) {
        let Self {
            popular,
            region,
            tv,
        } = self;
        tokio::join!(
            popular.refresh(api, cancel),
            region.refresh(api, region_filter, cancel),
            tv.refresh(api, cancel),
        );
        tracing::info!(
            popular = popular.records().len(),
            region = region.records().len(),
            tv = tv.records().len(),
            "catalog refreshed"
        );
    }

    /// Borrows the current contents of all three stores.
    #[must_use]
    pub fn sources(&self) -> Sources<'_> {
        Sources {
            popular: self.popular.records(),
            region: self.region.records(),
            tv: self.tv.records(),
        }
    }

    /// Returns the first record with `id`, scanning Popular, Region, `TvRegion`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::NotFound` when no store holds the id.
    pub fn find_by_id(&self, id: u64) -> Result<&MediaRecord, LookupError> {
        self.sources().find_by_id(id)
    }

    /// Case-insensitive title search across all stores.
    #[must_use]
    pub fn search_by_title(&self, query: &str) -> Vec<&MediaRecord> {
        self.sources().search_by_title(query)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use cinescope_api::StatusCode;

    use super::*;
    use crate::card::cards;
    use crate::testing::{MockApi, movie, page, record, remote_error, show};
    use cinescope_api::tmdb::MediaType;

    #[tokio::test]
    async fn test_refresh_all_scenario() {
        // Arrange
        let api = MockApi::default();
        api.push_popular(Ok(page(vec![movie(1, "A", "x")])));
        api.push_region(Ok(page(vec![movie(2, "B", "")])));
        api.push_tv(Ok(page(vec![show(1, "C", "y")])));
        let mut catalog = Catalog::default();

        // Act
        catalog
            .refresh_all(&api, None, &CancellationToken::new())
            .await;

        // Assert
        assert_eq!(catalog.find_by_id(1).unwrap().effective_title(), "A");
        assert!(cards(catalog.region.records(), MediaType::Movie).is_empty());
        let hits = catalog.search_by_title("b");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[tokio::test]
    async fn test_refresh_all_failures_are_independent() {
        // Arrange
        let api = MockApi::default();
        api.push_popular(Ok(page(vec![record(1, "A")])));
        api.push_region(Err(remote_error(StatusCode::UNAUTHORIZED)));
        api.push_tv(Ok(page(vec![show(3, "C", "y")])));
        let mut catalog = Catalog::default();

        // Act
        catalog
            .refresh_all(&api, Some(RegionFilter::new("en-US", "ID")), &CancellationToken::new())
            .await;

        // Assert
        assert_eq!(catalog.popular.records().len(), 1);
        assert!(catalog.region.records().is_empty());
        assert_eq!(catalog.tv.records().len(), 1);
        assert_eq!(catalog.region.filter(), &RegionFilter::new("en-US", "ID"));
    }

    #[test]
    fn test_empty_catalog_lookup_is_not_found() {
        // Arrange
        let catalog = Catalog::default();

        // Act & Assert
        assert_eq!(catalog.find_by_id(1), Err(LookupError::NotFound(1)));
        assert!(catalog.search_by_title("a").is_empty());
    }
}
