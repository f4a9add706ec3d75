//! Dataset containers, cross-dataset lookup and view models for cinescope.
//!
//! Each [`dataset`] store owns one list of media records and refreshes it
//! through the gateway. [`lookup`] unions the three lists for id lookup and
//! title search. [`card`], [`route`] and [`carousel`] hold the pure pieces
//! the views render from.

/// Card view models.
pub mod card;
/// Hero carousel rotation.
pub mod carousel;
mod catalog;
/// Dataset containers.
pub mod dataset;
/// Cross-dataset aggregation and lookup.
pub mod lookup;
/// Detail routes.
pub mod route;
#[cfg(test)]
mod testing;

pub use catalog::Catalog;
pub use dataset::{Category, LoadState, PopularStore, RegionFilter, RegionStore, TvRegionStore};
pub use lookup::{LookupError, Sources};
