//! In-memory `LocalTmdbApi` for unit tests.
#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::collections::VecDeque;

use cinescope_api::tmdb::{
    DiscoverMovieParams, DiscoverTvParams, LocalTmdbApi, MediaDetails, MediaPage, MediaRecord,
    MediaType, PopularParams,
};
use cinescope_api::{Error, StatusCode};

type Queue = RefCell<VecDeque<cinescope_api::Result<MediaPage>>>;

/// Scripted API: each call pops the next queued response for its endpoint.
#[derive(Debug, Default)]
pub struct MockApi {
    popular: Queue,
    region: Queue,
    tv: Queue,
    region_calls: RefCell<Vec<DiscoverMovieParams>>,
}

impl MockApi {
    pub fn push_popular(&self, response: cinescope_api::Result<MediaPage>) {
        self.popular.borrow_mut().push_back(response);
    }

    pub fn push_region(&self, response: cinescope_api::Result<MediaPage>) {
        self.region.borrow_mut().push_back(response);
    }

    pub fn push_tv(&self, response: cinescope_api::Result<MediaPage>) {
        self.tv.borrow_mut().push_back(response);
    }

    pub fn region_calls(&self) -> Vec<DiscoverMovieParams> {
        self.region_calls.borrow().clone()
    }

    fn pop(queue: &Queue) -> cinescope_api::Result<MediaPage> {
        queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(remote_error(StatusCode::NOT_FOUND)))
    }
}

impl LocalTmdbApi for MockApi {
    async fn popular_movies(&self, _params: &PopularParams) -> cinescope_api::Result<MediaPage> {
        Self::pop(&self.popular)
    }

    async fn discover_movies(
        &self,
        params: &DiscoverMovieParams,
    ) -> cinescope_api::Result<MediaPage> {
        self.region_calls.borrow_mut().push(params.clone());
        Self::pop(&self.region)
    }

    async fn discover_tv(&self, _params: &DiscoverTvParams) -> cinescope_api::Result<MediaPage> {
        Self::pop(&self.tv)
    }

    async fn media_details(
        &self,
        _media_type: MediaType,
        _id: u64,
        _language: &str,
    ) -> cinescope_api::Result<MediaDetails> {
        Err(remote_error(StatusCode::NOT_FOUND))
    }
}

pub fn remote_error(status: StatusCode) -> Error {
    Error::Remote {
        status,
        message: String::from("scripted failure"),
    }
}

pub fn page(results: Vec<MediaRecord>) -> MediaPage {
    MediaPage {
        page: 1,
        results,
        ..MediaPage::default()
    }
}

/// Movie-style record with a non-empty overview.
pub fn record(id: u64, title: &str) -> MediaRecord {
    MediaRecord {
        id,
        original_title: Some(String::from(title)),
        overview: Some(format!("{title} overview")),
        ..MediaRecord::default()
    }
}

/// Show-style record.
pub fn show(id: u64, name: &str, overview: &str) -> MediaRecord {
    MediaRecord {
        id,
        name: Some(String::from(name)),
        overview: Some(String::from(overview)),
        ..MediaRecord::default()
    }
}

/// Movie-style record with an explicit overview.
pub fn movie(id: u64, title: &str, overview: &str) -> MediaRecord {
    MediaRecord {
        id,
        original_title: Some(String::from(title)),
        overview: Some(String::from(overview)),
        ..MediaRecord::default()
    }
}
