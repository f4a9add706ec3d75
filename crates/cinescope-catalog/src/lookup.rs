//! Cross-dataset aggregation and lookup.
//!
//! The three lists are concatenated in a fixed order: Popular, Region,
//! `TvRegion`. Ids are not unique across lists, so `find_by_id` returns the
//! first match in that order.

use cinescope_api::tmdb::MediaRecord;

/// Lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No dataset holds a record with this id.
    #[error("no record with id {0}")]
    NotFound(u64),
}

/// Borrowed view of the three datasets' current contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sources<'a> {
    /// Popular movies.
    pub popular: &'a [MediaRecord],
    /// Region-filtered movies.
    pub region: &'a [MediaRecord],
    /// Region-filtered TV shows.
    pub tv: &'a [MediaRecord],
}

impl<'a> Sources<'a> {
    /// Iterates Popular, then Region, then `TvRegion`.
    pub fn all(self) -> impl Iterator<Item = &'a MediaRecord> {
        self.popular
            .iter()
            .chain(self.region.iter())
            .chain(self.tv.iter())
    }

    /// Returns the first record with `id`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::NotFound` when no dataset holds the id.
    pub fn find_by_id(self, id: u64) -> Result<&'a MediaRecord, LookupError> {
        self.all()
            .find(|r| r.id == id)
            .ok_or(LookupError::NotFound(id))
    }

    /// Returns every record whose effective title contains `query`, ignoring case.
    ///
    /// An empty query matches everything; callers decide whether to search at all.
    #[must_use]
    pub fn search_by_title(self, query: &str) -> Vec<&'a MediaRecord> {
        let needle = query.to_lowercase();
        self.all()
            .filter(|r| r.effective_title().to_lowercase().contains(&needle))
            .collect()
    }
}
