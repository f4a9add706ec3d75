//! Browser state: screen, focus, search overlay and carousel position.

use cinescope_api::image::ImageSize;
use cinescope_api::tmdb::{MediaRecord, MediaType};
use cinescope_catalog::card::{Card, cards, hero_slides, search_cards};
use cinescope_catalog::carousel::Carousel;
use cinescope_catalog::route::DetailRoute;
use cinescope_catalog::{
    Catalog, Category, LoadState, LookupError, PopularStore, RegionStore, TvRegionStore,
};

/// Card rows on the home screen, top to bottom.
pub const ROWS: [Category; 3] = [Category::Popular, Category::Region, Category::TvRegion];

/// Which screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Hero carousel plus the three card rows.
    Home,
    /// One record, looked up by id.
    Detail(DetailRoute),
}

/// Input mode for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search overlay text input.
    Search,
}

/// A store handed back by its mount refresh.
#[derive(Debug)]
pub enum LoadedStore {
    /// Popular movies.
    Popular(PopularStore),
    /// Region-filtered movies.
    Region(RegionStore),
    /// Region-filtered TV shows.
    TvRegion(TvRegionStore),
}

impl LoadedStore {
    /// Category of the wrapped store.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Popular(_) => Category::Popular,
            Self::Region(_) => Category::Region,
            Self::TvRegion(_) => Category::TvRegion,
        }
    }
}

/// State for the browser TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    /// Loaded datasets. Each store is empty and `Pending` until its refresh completes.
    pub catalog: Catalog,
    /// Current screen.
    pub screen: Screen,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search query text.
    pub query: String,
    /// Focused row index into [`ROWS`].
    pub row_cursor: usize,
    /// Focused card per row.
    pub card_cursors: [usize; 3],
    /// Highlighted search result.
    pub search_cursor: usize,
    /// Hero slide position.
    pub carousel: Carousel,
}

impl BrowserState {
    /// Creates a state on the home screen.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            screen: Screen::Home,
            input_mode: InputMode::Normal,
            query: String::new(),
            row_cursor: 0,
            card_cursors: [0; 3],
            search_cursor: 0,
            carousel: Carousel::default(),
        }
    }

    /// Swaps in a store whose refresh has finished.
    ///
    /// Only the row backed by that store is reset; the other rows keep their
    /// cursors.
    pub fn apply_loaded(&mut self, loaded: LoadedStore) {
        let category = loaded.category();
        match loaded {
            LoadedStore::Popular(store) => self.catalog.popular = store,
            LoadedStore::Region(store) => self.catalog.region = store,
            LoadedStore::TvRegion(store) => self.catalog.tv = store,
        }
        tracing::debug!(%category, state = ?self.row_state(category), "store loaded");
        if let Some(row) = ROWS.iter().position(|c| *c == category)
            && let Some(cursor) = self.card_cursors.get_mut(row)
        {
            *cursor = 0;
        }
        self.search_cursor = 0;
    }

    /// Cards for the row showing `category`.
    #[must_use]
    pub fn row_cards(&self, category: Category) -> Vec<Card> {
        match category {
            Category::Popular => cards(self.catalog.popular.records(), MediaType::Movie),
            Category::Region => cards(self.catalog.region.records(), MediaType::Movie),
            Category::TvRegion => cards(self.catalog.tv.records(), MediaType::Tv),
        }
    }

    /// Load state of the store behind `category`.
    #[must_use]
    pub const fn row_state(&self, category: Category) -> LoadState {
        match category {
            Category::Popular => self.catalog.popular.state(),
            Category::Region => self.catalog.region.state(),
            Category::TvRegion => self.catalog.tv.state(),
        }
    }

    /// Hero carousel slides.
    #[must_use]
    pub fn slides(&self) -> Vec<Card> {
        hero_slides(self.catalog.popular.records())
    }

    /// Whether the carousel timer should run.
    #[must_use]
    pub fn carousel_active(&self) -> bool {
        self.screen == Screen::Home && !self.catalog.popular.records().is_empty()
    }

    /// Advances the hero carousel by one slide.
    pub fn advance_carousel(&mut self) {
        let len = self.catalog.popular.records().len();
        self.carousel.advance(len);
    }

    /// Steps the hero carousel back by one slide.
    pub fn rewind_carousel(&mut self) {
        let len = self.catalog.popular.records().len();
        self.carousel.back(len);
    }

    /// Focuses the row above.
    pub const fn move_up(&mut self) {
        self.row_cursor = self.row_cursor.saturating_sub(1);
    }

    /// Focuses the row below.
    pub fn move_down(&mut self) {
        if self.row_cursor.saturating_add(1) < ROWS.len() {
            self.row_cursor = self.row_cursor.saturating_add(1);
        }
    }

    /// Moves the card cursor left within the focused row.
    pub fn move_left(&mut self) {
        if let Some(cursor) = self.card_cursors.get_mut(self.row_cursor) {
            *cursor = cursor.saturating_sub(1);
        }
    }

    /// Moves the card cursor right within the focused row.
    pub fn move_right(&mut self) {
        let len = self.focused_row_cards().len();
        if let Some(cursor) = self.card_cursors.get_mut(self.row_cursor)
            && cursor.saturating_add(1) < len
        {
            *cursor = cursor.saturating_add(1);
        }
    }

    /// Category of the focused row.
    #[must_use]
    pub fn focused_category(&self) -> Category {
        ROWS.get(self.row_cursor)
            .copied()
            .unwrap_or(Category::Popular)
    }

    /// Cursor within the row at `row`.
    #[must_use]
    pub fn card_cursor(&self, row: usize) -> usize {
        self.card_cursors.get(row).copied().unwrap_or(0)
    }

    fn focused_row_cards(&self) -> Vec<Card> {
        self.row_cards(self.focused_category())
    }

    /// Navigates to the focused card's detail route.
    pub fn open_focused(&mut self) {
        let cursor = self.card_cursor(self.row_cursor);
        if let Some(card) = self.focused_row_cards().get(cursor) {
            self.navigate(card.route);
        }
    }

    /// Navigates to the current hero slide's detail route.
    pub fn open_hero(&mut self) {
        let slides = self.slides();
        if let Some(card) = self
            .carousel
            .current(slides.len())
            .and_then(|i| slides.get(i))
        {
            self.navigate(card.route);
        }
    }

    /// Shows the detail screen for `route`.
    pub fn navigate(&mut self, route: DetailRoute) {
        tracing::debug!(%route, "navigate");
        self.screen = Screen::Detail(route);
    }

    /// Returns to the home screen.
    pub fn back_home(&mut self) {
        self.screen = Screen::Home;
    }

    /// Opens the search overlay.
    pub fn open_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.search_cursor = 0;
    }

    /// Closes the search overlay and clears the query.
    pub fn close_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.query.clear();
        self.search_cursor = 0;
    }

    /// Appends a character to the query.
    pub fn query_push(&mut self, c: char) {
        self.query.push(c);
        self.search_cursor = 0;
    }

    /// Removes the last character of the query.
    pub fn query_pop(&mut self) {
        self.query.pop();
        self.search_cursor = 0;
    }

    /// Search hits for the current query. Empty queries are not searched.
    #[must_use]
    pub fn search_results(&self) -> Vec<Card> {
        if self.query.is_empty() {
            return Vec::new();
        }
        search_cards(&self.catalog.search_by_title(&self.query))
    }

    /// Moves the search highlight up.
    pub const fn search_up(&mut self) {
        self.search_cursor = self.search_cursor.saturating_sub(1);
    }

    /// Moves the search highlight down.
    pub fn search_down(&mut self) {
        if self.search_cursor.saturating_add(1) < self.search_results().len() {
            self.search_cursor = self.search_cursor.saturating_add(1);
        }
    }

    /// Navigates to the highlighted search hit and clears the query.
    pub fn select_search_result(&mut self) {
        let route = self
            .search_results()
            .get(self.search_cursor)
            .map(|card| card.route);
        if let Some(route) = route {
            self.close_search();
            self.navigate(route);
        }
    }

    /// Looks up the record shown on the detail screen.
    ///
    /// Returns `None` when not on the detail screen.
    #[must_use]
    pub fn detail(&self) -> Option<Result<&MediaRecord, LookupError>> {
        match self.screen {
            Screen::Detail(route) => Some(self.catalog.find_by_id(route.id)),
            Screen::Home => None,
        }
    }

    /// Poster URL of the record on the detail screen, if it resolves.
    #[must_use]
    pub fn detail_poster_url(&self) -> Option<String> {
        let Screen::Detail(route) = self.screen else {
            return None;
        };
        let record = self.catalog.find_by_id(route.id).ok()?;
        Some(Card::from_record(record, route.media_type, ImageSize::Original).poster_url)
    }
}
