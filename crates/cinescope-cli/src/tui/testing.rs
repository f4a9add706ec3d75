//! Fixed-page `LocalTmdbApi` for browser tests.

use std::future;

use cinescope_api::tmdb::{
    DiscoverMovieParams, DiscoverTvParams, LocalTmdbApi, MediaDetails, MediaPage, MediaRecord,
    MediaType, PopularParams,
};
use cinescope_api::{Error, StatusCode};

/// Serves one fixed page per list endpoint.
///
/// An endpoint left as `None` never answers.
#[derive(Debug, Default)]
pub struct StubApi {
    pub popular: Option<Vec<MediaRecord>>,
    pub region: Option<Vec<MediaRecord>>,
    pub tv: Option<Vec<MediaRecord>>,
}

impl StubApi {
    /// Stub where every list endpoint answers.
    pub const fn answering(
        popular: Vec<MediaRecord>,
        region: Vec<MediaRecord>,
        tv: Vec<MediaRecord>,
    ) -> Self {
        Self {
            popular: Some(popular),
            region: Some(region),
            tv: Some(tv),
        }
    }

    async fn serve(records: Option<&Vec<MediaRecord>>) -> cinescope_api::Result<MediaPage> {
        let Some(records) = records else {
            return future::pending().await;
        };
        Ok(MediaPage {
            page: 1,
            results: records.clone(),
            ..MediaPage::default()
        })
    }
}

impl LocalTmdbApi for StubApi {
    async fn popular_movies(&self, _: &PopularParams) -> cinescope_api::Result<MediaPage> {
        Self::serve(self.popular.as_ref()).await
    }

    async fn discover_movies(&self, _: &DiscoverMovieParams) -> cinescope_api::Result<MediaPage> {
        Self::serve(self.region.as_ref()).await
    }

    async fn discover_tv(&self, _: &DiscoverTvParams) -> cinescope_api::Result<MediaPage> {
        Self::serve(self.tv.as_ref()).await
    }

    async fn media_details(
        &self,
        _: MediaType,
        _: u64,
        _: &str,
    ) -> cinescope_api::Result<MediaDetails> {
        Err(Error::Remote {
            status: StatusCode::NOT_FOUND,
            message: String::from("stub"),
        })
    }
}

pub fn movie(id: u64, title: &str, overview: &str) -> MediaRecord {
    MediaRecord {
        id,
        original_title: Some(String::from(title)),
        overview: Some(String::from(overview)),
        ..MediaRecord::default()
    }
}

pub fn show(id: u64, name: &str, overview: &str) -> MediaRecord {
    MediaRecord {
        id,
        name: Some(String::from(name)),
        overview: Some(String::from(overview)),
        ..MediaRecord::default()
    }
}
