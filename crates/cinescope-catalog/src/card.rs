//! Card view models for the row, search and hero views.

use cinescope_api::image::{ImageSize, poster_url};
use cinescope_api::tmdb::{MediaRecord, MediaType};

use crate::route::DetailRoute;

/// One rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// TMDB id.
    pub id: u64,
    /// Effective title.
    pub title: String,
    /// Synopsis (empty for search hits without one).
    pub overview: String,
    /// Loadable poster URL or the placeholder.
    pub poster_url: String,
    /// Where selecting the card navigates.
    pub route: DetailRoute,
}

impl Card {
    /// Builds a card linking to `media_type`.
    #[must_use]
    pub fn from_record(record: &MediaRecord, media_type: MediaType, size: ImageSize) -> Self {
        Self {
            id: record.id,
            title: String::from(record.effective_title()),
            overview: String::from(record.overview().unwrap_or_default()),
            poster_url: poster_url(record.poster_path.as_deref(), size),
            route: DetailRoute::new(media_type, record.id),
        }
    }
}

/// Builds row cards, skipping records without an overview.
///
/// Order follows `records`.
#[must_use]
pub fn cards(records: &[MediaRecord], media_type: MediaType) -> Vec<Card> {
    records
        .iter()
        .filter(|r| r.overview().is_some())
        .map(|r| Card::from_record(r, media_type, ImageSize::W500))
        .collect()
}

/// Builds search hit cards. Nothing is filtered; the media type is inferred
/// from which title field is set.
#[must_use]
pub fn search_cards(hits: &[&MediaRecord]) -> Vec<Card> {
    hits.iter()
        .map(|r| Card::from_record(r, r.inferred_media_type(), ImageSize::W500))
        .collect()
}

/// Builds hero carousel slides from popular movies. Slides keep every record.
#[must_use]
pub fn hero_slides(records: &[MediaRecord]) -> Vec<Card> {
    records
        .iter()
        .map(|r| Card::from_record(r, MediaType::Movie, ImageSize::Original))
        .collect()
}
