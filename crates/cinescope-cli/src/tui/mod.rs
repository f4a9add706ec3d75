//! Browser TUI: terminal setup and the async event loop.
//!
//! Uses `ratatui` + `crossterm` for rendering. The loop selects over terminal
//! events, the carousel timer and the three mount-time store refreshes.
#![allow(clippy::future_not_send)]

/// Browser state types.
pub mod state;
#[cfg(test)]
mod testing;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use cinescope_api::tmdb::LocalTmdbApi;
use cinescope_catalog::carousel::CarouselTimer;
use cinescope_catalog::route::DetailRoute;
use cinescope_catalog::{Catalog, RegionFilter};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use self::state::{BrowserState, InputMode, LoadedStore, Screen};

/// What the event loop does after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Keep running.
    Continue,
    /// Leave the browser.
    Quit,
    /// Open the detail poster in the system browser.
    OpenPoster,
}

/// Runs the browser TUI until the user quits.
///
/// Each store of `catalog` is refreshed once on mount, with `region_filter`
/// for the Region store, and its row updates as soon as that refresh ends.
/// Quitting cancels the refreshes still running; a late result is discarded.
/// `start` opens a detail route instead of the home screen.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
#[instrument(skip_all)]
pub async fn run_browser<A: LocalTmdbApi>(
    api: &A,
    catalog: Catalog,
    region_filter: RegionFilter,
    carousel_interval: Duration,
    start: Option<DetailRoute>,
) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let cancel = CancellationToken::new();
    let result = run_event_loop(
        &mut terminal,
        api,
        catalog,
        region_filter,
        carousel_interval,
        start,
        &cancel,
    )
    .await;
    cancel.cancel();

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Starts one refresh per store. Each yields its store as soon as it finishes.
fn mount_refreshes<'a, A: LocalTmdbApi>(
    api: &'a A,
    catalog: Catalog,
    region_filter: RegionFilter,
    cancel: &CancellationToken,
) -> FuturesUnordered<LocalBoxFuture<'a, LoadedStore>> {
    let Catalog {
        mut popular,
        mut region,
        mut tv,
    } = catalog;
    let refreshes = FuturesUnordered::new();

    let token = cancel.clone();
    refreshes.push(
        async move {
            popular.refresh(api, &token).await;
            LoadedStore::Popular(popular)
        }
        .boxed_local(),
    );
    let token = cancel.clone();
    refreshes.push(
        async move {
            region.refresh(api, Some(region_filter), &token).await;
            LoadedStore::Region(region)
        }
        .boxed_local(),
    );
    let token = cancel.clone();
    refreshes.push(
        async move {
            tv.refresh(api, &token).await;
            LoadedStore::TvRegion(tv)
        }
        .boxed_local(),
    );
    refreshes
}

/// Main event loop.
async fn run_event_loop<A: LocalTmdbApi>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    api: &A,
    catalog: Catalog,
    region_filter: RegionFilter,
    carousel_interval: Duration,
    start: Option<DetailRoute>,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut state = BrowserState::new(Catalog::default());
    if let Some(route) = start {
        state.navigate(route);
    }
    let mut timer = CarouselTimer::new(carousel_interval);
    let mut events = EventStream::new();
    let mut refreshes = mount_refreshes(api, catalog, region_filter, cancel);

    loop {
        terminal
            .draw(|frame| ui::draw(frame, &state))
            .context("failed to draw TUI")?;
        timer.sync(state.carousel_active());

        tokio::select! {
            Some(loaded) = refreshes.next() => state.apply_loaded(loaded),
            () = timer.tick() => state.advance_carousel(),
            event = events.next() => {
                let Some(event) = event else {
                    return Ok(());
                };
                if let Event::Key(key) = event.context("failed to read event")?
                    && key.kind == KeyEventKind::Press
                {
                    match handle_key(&mut state, key) {
                        Action::Quit => return Ok(()),
                        Action::OpenPoster => open_poster(&state),
                        Action::Continue => {}
                    }
                }
            }
        }
    }
}

/// Opens the detail poster URL in the system browser.
fn open_poster(state: &BrowserState) {
    let Some(url) = state.detail_poster_url() else {
        return;
    };
    match open::that_detached(&url) {
        Ok(()) => tracing::info!(url = %url, "opened poster"),
        Err(e) => tracing::warn!(url = %url, error = %e, "failed to open poster"),
    }
}

/// Dispatches a key press by input mode and screen.
fn handle_key(state: &mut BrowserState, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    match (state.input_mode, state.screen) {
        (InputMode::Search, _) => {
            handle_search_input(state, key.code);
            Action::Continue
        }
        (InputMode::Normal, Screen::Home) => handle_home_input(state, key.code),
        (InputMode::Normal, Screen::Detail(_)) => handle_detail_input(state, key.code),
    }
}

/// Handles key input in the search overlay.
fn handle_search_input(state: &mut BrowserState, key: KeyCode) {
    match key {
        KeyCode::Esc => state.close_search(),
        KeyCode::Enter => state.select_search_result(),
        KeyCode::Backspace => state.query_pop(),
        KeyCode::Up => state.search_up(),
        KeyCode::Down => state.search_down(),
        KeyCode::Char(c) => state.query_push(c),
        _ => {}
    }
}

/// Handles key input on the home screen.
fn handle_home_input(state: &mut BrowserState, key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::Left | KeyCode::Char('h') => state.move_left(),
        KeyCode::Right | KeyCode::Char('l') => state.move_right(),
        KeyCode::Enter => state.open_focused(),
        KeyCode::Char('f') => state.open_hero(),
        KeyCode::Char('[') => state.rewind_carousel(),
        KeyCode::Char(']') => state.advance_carousel(),
        KeyCode::Char('/') => state.open_search(),
        _ => {}
    }
    Action::Continue
}

/// Handles key input on the detail screen.
fn handle_detail_input(state: &mut BrowserState, key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => state.back_home(),
        KeyCode::Char('o') => return Action::OpenPoster,
        KeyCode::Char('/') => state.open_search(),
        _ => {}
    }
    Action::Continue
}
