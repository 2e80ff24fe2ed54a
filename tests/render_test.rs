//! Whole-screen rendering tests using ratatui's TestBackend.

mod common;

use common::*;
use ratatui::{backend::TestBackend, Terminal};
use zews::adapters::mock::MockHttpClient;
use zews::app::{App, AppMessage};
use zews::models::PublicationsResponse;
use zews::route::Route;
use zews::ui::{self, ClickAction};

fn loaded_app(route: Route, body: serde_json::Value) -> App {
    let mut app = app_with(&MockHttpClient::new(), route.clone());
    let generation = app.begin_navigation(route.clone());
    let response: PublicationsResponse = serde_json::from_value(body).unwrap();
    app.handle_message(AppMessage::PageLoaded {
        generation,
        route,
        response,
    });
    app
}

fn render(app: &mut App, width: u16, height: u16) -> Vec<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect()
}

fn screen_contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

#[test]
fn test_grid_shows_cards_and_page_bar() {
    let mut app = loaded_app(Route::Page(1), page_json(25, 1, 25, 100));
    let rows = render(&mut app, 120, 40);

    assert!(screen_contains(&rows, "ZEWS"));
    assert!(screen_contains(&rows, "/page/1"));
    assert!(screen_contains(&rows, "Publication 1"));
    assert!(screen_contains(&rows, "#forex"));
    assert!(screen_contains(&rows, "cover image"));
    assert!(screen_contains(&rows, "Next ›"));
    assert!(screen_contains(&rows, "[1]"));
    assert_eq!(app.grid_columns, 3);
}

#[test]
fn test_single_page_has_no_page_bar() {
    let mut app = loaded_app(Route::Page(1), page_json(3, 1, 25, 3));
    let rows = render(&mut app, 100, 30);
    assert!(screen_contains(&rows, "Publication 3"));
    assert!(!screen_contains(&rows, "Next ›"));
    assert!(!screen_contains(&rows, "‹ Prev"));
}

#[test]
fn test_empty_page_message() {
    let mut app = loaded_app(
        Route::Page(1),
        serde_json::json!({
            "result": [],
            "pagination": { "pageNumber": 1, "pageSize": 25, "total": 0 }
        }),
    );
    let rows = render(&mut app, 80, 24);
    assert!(screen_contains(&rows, "No publications found"));
    assert!(!screen_contains(&rows, "Next ›"));
}

#[test]
fn test_error_message_rendered() {
    let mut app = app_with(&MockHttpClient::new(), Route::Page(1));
    let generation = app.begin_navigation(Route::Page(1));
    app.handle_message(AppMessage::PageLoadFailed {
        generation,
        route: Route::Page(1),
        error: "connection refused".to_string(),
    });
    let rows = render(&mut app, 100, 24);
    assert!(screen_contains(
        &rows,
        "Failed to fetch publications. Please try again later."
    ));
    assert!(!screen_contains(&rows, "connection refused"));
}

#[test]
fn test_loading_state_rendered() {
    let mut app = app_with(&MockHttpClient::new(), Route::Page(1));
    app.begin_navigation(Route::Page(1));
    let rows = render(&mut app, 80, 24);
    assert!(screen_contains(&rows, "Loading publications"));
}

#[test]
fn test_overlay_renders_sanitized_body() {
    let mut app = loaded_app(Route::Page(1), page_json(2, 1, 25, 2));
    app.open_publication(1);
    let rows = render(&mut app, 100, 30);

    assert!(screen_contains(&rows, "Publication 2"));
    assert!(screen_contains(&rows, "Body of Publication 2"));
    assert!(screen_contains(&rows, "https://cdn.test/2.png"));
    assert!(!screen_contains(&rows, "alert"));
    assert!(screen_contains(&rows, "[x]"));
}

#[test]
fn test_overlay_links_are_clickable() {
    let body = serde_json::json!({
        "result": [{
            "id": 1,
            "attributes": {
                "title": "Linked",
                "content": "<p>Read <a href=\"https://x.test/a\">this</a>.</p>"
            }
        }],
        "pagination": { "pageNumber": 1, "pageSize": 25, "total": 1 }
    });
    let mut app = loaded_app(Route::Page(1), body);
    app.open_publication(0);
    let rows = render(&mut app, 100, 30);

    assert!(screen_contains(&rows, "this[1]"));
    assert!(screen_contains(&rows, "[1] https://x.test/a"));

    let link_row = rows
        .iter()
        .position(|row| row.contains("[1] https://x.test/a"))
        .unwrap() as u16;
    let row = &rows[link_row as usize];
    let byte_index = row.find("[1] https").unwrap();
    let link_col = row[..byte_index].chars().count() as u16;
    assert_eq!(
        app.hit_registry.hit_test(link_col, link_row),
        Some(ClickAction::OpenLink(1))
    );

    // Outside the card closes
    assert_eq!(
        app.hit_registry.hit_test(0, 0),
        Some(ClickAction::CloseOverlay)
    );
}

#[test]
fn test_clicking_card_opens_overlay() {
    let mut app = loaded_app(Route::Page(1), page_json(4, 1, 25, 4));
    render(&mut app, 120, 40);

    let action = app.hit_registry.hit_test(45, 3);
    assert_eq!(action, Some(ClickAction::OpenPublication(1)));
    ui::handle_click_action(&mut app, ClickAction::OpenPublication(1));
    assert_eq!(app.overlay.as_ref().map(|o| o.index), Some(1));

    ui::handle_click_action(&mut app, ClickAction::CloseOverlay);
    assert!(!app.is_overlay_open());
}

#[test]
fn test_tag_route_header_shows_filter() {
    let route = Route::TagPage {
        tag: "forex".to_string(),
        page: 1,
    };
    let mut app = loaded_app(route, page_json(2, 1, 25, 2));
    let rows = render(&mut app, 100, 30);
    assert!(screen_contains(&rows, "/tag/forex/page/1"));
    assert!(screen_contains(&rows, "#forex ✕"));
}

#[test]
fn test_narrow_terminal_single_column() {
    let mut app = loaded_app(Route::Page(1), page_json(5, 1, 25, 5));
    let rows = render(&mut app, 40, 20);
    assert_eq!(app.grid_columns, 1);
    assert!(screen_contains(&rows, "Publication 1"));
}
