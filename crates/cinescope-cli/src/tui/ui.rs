//! TUI rendering logic for the browser.

use cinescope_api::tmdb::MediaRecord;
use cinescope_catalog::card::Card;
use cinescope_catalog::route::DetailRoute;
use cinescope_catalog::{Category, LoadState, LookupError};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use super::state::{BrowserState, InputMode, ROWS, Screen};

/// Placeholder shown while a row has nothing to render.
const LOADING: &str = "Loading...";

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);
    match state.screen {
        Screen::Home => draw_home(frame, chunks[1], state),
        Screen::Detail(route) => draw_detail(frame, chunks[1], state, route),
    }
    draw_footer(frame, chunks[2], state);

    if state.input_mode == InputMode::Search {
        draw_search_overlay(frame, frame.area(), state);
    }
}

/// Draws the title bar.
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let location = match state.screen {
        Screen::Home => String::from("/"),
        Screen::Detail(route) => route.to_string(),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "cinescope",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(location, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Draws the hero carousel and the three card rows.
#[allow(clippy::indexing_slicing)]
fn draw_home(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // hero
            Constraint::Min(4),    // popular
            Constraint::Min(4),    // region
            Constraint::Min(4),    // tv
        ])
        .split(area);

    draw_hero(frame, chunks[0], state);
    for (i, category) in ROWS.iter().enumerate() {
        draw_row(frame, chunks[i.saturating_add(1)], state, i, *category);
    }
}

/// Draws the current hero slide.
fn draw_hero(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let slides = state.slides();
    let current = state
        .carousel
        .current(slides.len())
        .and_then(|i| slides.get(i).map(|card| (i, card)));

    let Some((index, card)) = current else {
        let block = Block::default().borders(Borders::ALL).title(" Featured ");
        frame.render_widget(Paragraph::new(LOADING).block(block), area);
        return;
    };

    let lines = vec![
        Line::from(Span::styled(
            card.title.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(card.overview.clone()),
        Line::from(Span::styled(
            card.poster_url.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let title = format!(
        " Featured {}/{} ",
        index.saturating_add(1),
        slides.len()
    );
    let hero = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(hero, area);
}

/// Draws one card row, or the loading placeholder until its store has loaded.
fn draw_row(frame: &mut Frame, area: Rect, state: &BrowserState, row: usize, category: Category) {
    let is_active = state.row_cursor == row && state.input_mode == InputMode::Normal;
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", category.label()));

    // Pending and Stale render alike: failures stay in the log.
    let cards = state.row_cards(category);
    if cards.is_empty() {
        let body = if state.row_state(category) == LoadState::Ready {
            Paragraph::default()
        } else {
            Paragraph::new(LOADING)
        };
        frame.render_widget(body.block(block), area);
        return;
    }

    let cursor = state.card_cursor(row);
    let mut spans = Vec::with_capacity(cards.len().saturating_mul(2));
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }
        let style = if i == cursor && is_active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(card.title.clone(), style));
    }

    let focused_overview = cards
        .get(cursor)
        .map_or_else(String::new, |card| card.overview.clone());
    let body = Paragraph::new(vec![
        Line::from(spans),
        Line::from(Span::styled(
            focused_overview,
            Style::default().fg(Color::Gray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(block);
    frame.render_widget(body, area);
}

/// Draws the detail panel for `route`.
fn draw_detail(frame: &mut Frame, area: Rect, state: &BrowserState, route: DetailRoute) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Detail ");

    let body = match state.detail() {
        Some(Ok(record)) => detail_lines(record, route),
        Some(Err(LookupError::NotFound(_))) | None => not_found_lines(),
    };
    frame.render_widget(
        Paragraph::new(body).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

/// Lines for a resolved record.
fn detail_lines(record: &MediaRecord, route: DetailRoute) -> Vec<Line<'static>> {
    let card = Card::from_record(
        record,
        route.media_type,
        cinescope_api::image::ImageSize::Original,
    );
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            card.title,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Type: ", label),
            Span::raw(route.media_type.to_string()),
            Span::styled("  ID: ", label),
            Span::raw(record.id.to_string()),
        ]),
    ];
    if let Some(date) = record
        .release_date
        .as_deref()
        .or(record.first_air_date.as_deref())
    {
        lines.push(Line::from(vec![
            Span::styled("Date: ", label),
            Span::raw(String::from(date)),
        ]));
    }
    if let Some(vote) = record.vote_average {
        lines.push(Line::from(vec![
            Span::styled("Rating: ", label),
            Span::raw(format!("{vote:.1}")),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(
        record.overview().map_or_else(String::new, String::from),
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Poster: ", label),
        Span::raw(card.poster_url),
    ]));
    lines
}

/// Lines for an id no dataset holds.
fn not_found_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Item Not Found",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from("The requested item could not be found."),
        Line::from(""),
        Line::from("Press Esc to go back home."),
    ]
}

/// Draws the search overlay centered over `area`.
#[allow(clippy::indexing_slicing)]
fn draw_search_overlay(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let popup = centered_rect(area, 70, 70);
    frame.render_widget(Clear, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(popup);

    let input = Paragraph::new(state.query.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(" Search "));
    frame.render_widget(input, chunks[0]);

    let results_block = Block::default().borders(Borders::ALL).title(" Results ");
    if state.query.is_empty() {
        let hint = Paragraph::new("Type to search titles.")
            .style(Style::default().fg(Color::DarkGray))
            .block(results_block);
        frame.render_widget(hint, chunks[1]);
        return;
    }

    let results = state.search_results();
    if results.is_empty() {
        frame.render_widget(
            Paragraph::new("No results found.").block(results_block),
            chunks[1],
        );
        return;
    }

    let items: Vec<ListItem> = results
        .iter()
        .map(|card| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<6}", card.route.media_type),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(card.title.clone()),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(results_block)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("\u{25b8} ");
    let mut list_state = ListState::default().with_selected(Some(state.search_cursor));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

/// Returns a rectangle of `percent_x` by `percent_y` centered in `area`.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(vertical);
    popup
}

/// Draws the key help footer.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let help = match (state.input_mode, state.screen) {
        (InputMode::Search, _) => "Type: search  \u{2191}\u{2193}: move  Enter: open  Esc: close",
        (InputMode::Normal, Screen::Home) => {
            "\u{2191}\u{2193}: row  \u{2190}\u{2192}: card  Enter: open  f: featured  [ ]: slide  /: search  q: quit"
        }
        (InputMode::Normal, Screen::Detail(_)) => "o: open poster  Esc: back  /: search  q: quit",
    };
    let footer = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use cinescope_api::tmdb::MediaType;
    use cinescope_catalog::Catalog;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::tui::testing::{StubApi, movie, show};

    fn render(state: &BrowserState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| draw(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_home_renders_loading_rows() {
        // Arrange
        let state = BrowserState::new(Catalog::default());

        // Act
        let screen = render(&state);

        // Assert
        assert!(screen.contains("Popular Movies"));
        assert!(screen.contains("Regional TV"));
        assert!(screen.contains("Loading..."));
    }

    #[tokio::test]
    async fn test_loaded_row_without_overviews_renders_empty() {
        // Arrange
        let api = StubApi::answering(
            vec![movie(1, "Alpha", "a")],
            vec![movie(2, "Bravo", "")],
            vec![show(3, "Charlie", "c")],
        );
        let mut catalog = Catalog::default();
        catalog
            .refresh_all(&api, None, &CancellationToken::new())
            .await;
        let state = BrowserState::new(catalog);

        // Act
        let screen = render(&state);

        // Assert
        assert!(screen.contains("Regional Movies"));
        assert!(!screen.contains("Loading..."));
        assert!(!screen.contains("Bravo"));
        assert!(screen.contains("Charlie"));
    }

    #[test]
    fn test_detail_unknown_id_renders_not_found() {
        // Arrange
        let mut state = BrowserState::new(Catalog::default());
        state.navigate(DetailRoute::new(MediaType::Movie, 42));

        // Act
        let screen = render(&state);

        // Assert
        assert!(screen.contains("Item Not Found"));
        assert!(screen.contains("/detail/movie/42"));
    }

    #[test]
    fn test_search_overlay_no_results() {
        // Arrange
        let mut state = BrowserState::new(Catalog::default());
        state.open_search();
        state.query_push('x');

        // Act
        let screen = render(&state);

        // Assert
        assert!(screen.contains("No results found."));
    }
}
