//! Message and key handling for the App.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, AppMessage, LoadState};

/// Lines moved per scroll step in the overlay
const SCROLL_STEP: u16 = 1;
const PAGE_SCROLL_STEP: u16 = 10;

impl App {
    /// Handle a fetch result.
    ///
    /// Results from a navigation that has since been superseded are dropped.
    pub fn handle_message(&mut self, msg: AppMessage) {
        if msg.generation() != self.generation {
            tracing::debug!(
                "Discarding stale response for {} (generation {}, current {})",
                msg.route(),
                msg.generation(),
                self.generation
            );
            return;
        }

        self.mark_dirty();
        match msg {
            AppMessage::PageLoaded {
                route, response, ..
            } => {
                tracing::info!(
                    "Loaded {}: {} publications, page {} of {} items",
                    route,
                    response.result.len(),
                    response.pagination.page_number,
                    response.pagination.total
                );
                self.publications = response.result;
                self.pagination.apply(response.pagination);
                self.selected = 0;
                self.grid_offset = 0;
                self.load_state = LoadState::Loaded;

                let total_pages = self.pagination.total_pages();
                if total_pages > 0 && route.page() > total_pages {
                    tracing::info!(
                        "Page {} is past the last page {}, redirecting",
                        route.page(),
                        total_pages
                    );
                    self.navigate(route.with_page(total_pages));
                }
            }
            AppMessage::PageLoadFailed { route, error, .. } => {
                tracing::warn!("Failed to load {}: {}", route, error);
                self.publications.clear();
                self.overlay = None;
                self.load_state = LoadState::fetch_failed();
            }
        }
    }

    /// Handle a key press. Returns `true` when the key was consumed.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.overlay.is_some() {
            return self.handle_overlay_key(key);
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Left | KeyCode::Char('h') => self.select_prev(),
            KeyCode::Right | KeyCode::Char('l') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_up(),
            KeyCode::Down | KeyCode::Char('j') => self.select_down(),
            KeyCode::Enter | KeyCode::Char(' ') => self.open_selected(),
            KeyCode::Char('n') | KeyCode::PageDown | KeyCode::Char(']') => {
                self.next_page();
            }
            KeyCode::Char('p') | KeyCode::PageUp | KeyCode::Char('[') => {
                self.prev_page();
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.first_page();
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.last_page();
            }
            KeyCode::Char('t') => self.filter_by_current_tag(),
            KeyCode::Char('T') | KeyCode::Backspace => self.clear_tag_filter(),
            KeyCode::Char('r') => self.reload(),
            _ => return false,
        }
        true
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => self.close_overlay(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_overlay_down(SCROLL_STEP),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_overlay_up(SCROLL_STEP),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_overlay_down(PAGE_SCROLL_STEP),
            KeyCode::PageUp => self.scroll_overlay_up(PAGE_SCROLL_STEP),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_overlay_up(u16::MAX),
            KeyCode::End | KeyCode::Char('G') => self.scroll_overlay_down(u16::MAX),
            KeyCode::Char('t') => self.filter_by_current_tag(),
            KeyCode::Char(c @ '1'..='9') => {
                let number = c as usize - '0' as usize;
                self.open_link(number);
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::adapters::MockHttpClient;
    use crate::config::ViewerConfig;
    use crate::models::PublicationsResponse;
    use crate::route::Route;

    fn app() -> App {
        App::with_http(
            ViewerConfig::default(),
            Arc::new(MockHttpClient::new()),
            Route::default(),
        )
    }

    fn page(count: usize, page_number: u32, total: u32) -> PublicationsResponse {
        let result: Vec<_> = (0..count)
            .map(|i| {
                json!({
                    "id": i + 1,
                    "attributes": {
                        "title": format!("Publication {}", i + 1),
                        "content": format!("<p>Body {} <a href=\"https://x.test/{}\">link</a></p>", i + 1, i + 1),
                        "tags": { "data": [ { "id": 1, "attributes": { "name": "forex" } } ] }
                    }
                })
            })
            .collect();
        serde_json::from_value(json!({
            "result": result,
            "pagination": { "pageNumber": page_number, "pageSize": 25, "total": total }
        }))
        .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_loaded_message_populates_state() {
        let mut app = app();
        let generation = app.begin_navigation(Route::Page(1));
        app.handle_message(AppMessage::PageLoaded {
            generation,
            route: Route::Page(1),
            response: page(3, 1, 100),
        });
        assert_eq!(app.load_state, LoadState::Loaded);
        assert_eq!(app.publications.len(), 3);
        assert_eq!(app.pagination.total_pages(), 4);
    }

    #[test]
    fn test_stale_message_is_discarded() {
        let mut app = app();
        let old = app.begin_navigation(Route::Page(1));
        let current = app.begin_navigation(Route::Page(2));
        assert_ne!(old, current);

        app.handle_message(AppMessage::PageLoaded {
            generation: old,
            route: Route::Page(1),
            response: page(3, 1, 100),
        });
        assert_eq!(app.load_state, LoadState::Loading);
        assert!(app.publications.is_empty());

        app.handle_message(AppMessage::PageLoadFailed {
            generation: old,
            route: Route::Page(1),
            error: "boom".to_string(),
        });
        assert_eq!(app.load_state, LoadState::Loading);
    }

    #[test]
    fn test_failure_sets_fixed_message_and_clears_list() {
        let mut app = app();
        let generation = app.begin_navigation(Route::Page(1));
        app.handle_message(AppMessage::PageLoaded {
            generation,
            route: Route::Page(1),
            response: page(2, 1, 2),
        });
        let generation = app.begin_navigation(Route::Page(1));
        app.handle_message(AppMessage::PageLoadFailed {
            generation,
            route: Route::Page(1),
            error: "connection refused".to_string(),
        });
        assert_eq!(
            app.load_state.error(),
            Some("Failed to fetch publications. Please try again later.")
        );
        assert!(app.publications.is_empty());
    }

    #[test]
    fn test_navigation_clears_error_and_overlay() {
        let mut app = app();
        let generation = app.begin_navigation(Route::Page(1));
        app.handle_message(AppMessage::PageLoaded {
            generation,
            route: Route::Page(1),
            response: page(2, 1, 2),
        });
        app.open_publication(1);
        assert!(app.is_overlay_open());

        app.begin_navigation(Route::Page(1));
        assert!(!app.is_overlay_open());
        assert_eq!(app.selected, 0);
        assert!(app.load_state.error().is_none());
    }

    #[test]
    fn test_grid_keys_move_selection() {
        let mut app = app();
        let generation = app.begin_navigation(Route::Page(1));
        app.handle_message(AppMessage::PageLoaded {
            generation,
            route: Route::Page(1),
            response: page(6, 1, 6),
        });
        app.grid_columns = 3;

        app.handle_key_event(key(KeyCode::Right));
        assert_eq!(app.selected, 1);
        app.handle_key_event(key(KeyCode::Down));
        assert_eq!(app.selected, 4);
        app.handle_key_event(key(KeyCode::Down));
        assert_eq!(app.selected, 4);
        app.handle_key_event(key(KeyCode::Up));
        assert_eq!(app.selected, 1);
        app.handle_key_event(key(KeyCode::Left));
        app.handle_key_event(key(KeyCode::Left));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_overlay_keys() {
        let mut app = app();
        let generation = app.begin_navigation(Route::Page(1));
        app.handle_message(AppMessage::PageLoaded {
            generation,
            route: Route::Page(1),
            response: page(2, 1, 2),
        });

        app.handle_key_event(key(KeyCode::Right));
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.overlay.as_ref().map(|o| o.index), Some(1));
        assert_eq!(app.link_target(1).as_deref(), Some("https://x.test/2"));
        assert_eq!(app.link_target(2), None);
        assert_eq!(app.link_target(0), None);

        // 'q' closes the overlay instead of quitting
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(!app.is_overlay_open());
        assert!(!app.should_quit);

        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_page_keys_rejected_at_bounds() {
        let mut app = app();
        let generation = app.begin_navigation(Route::Page(1));
        app.handle_message(AppMessage::PageLoaded {
            generation,
            route: Route::Page(1),
            response: page(1, 1, 1),
        });
        let before = app.generation();
        app.handle_key_event(key(KeyCode::Char('n')));
        app.handle_key_event(key(KeyCode::Char('p')));
        assert_eq!(app.generation(), before);
        assert_eq!(app.load_state, LoadState::Loaded);
    }

    #[test]
    fn test_ctrl_c_quits_from_overlay() {
        let mut app = app();
        let generation = app.begin_navigation(Route::Page(1));
        app.handle_message(AppMessage::PageLoaded {
            generation,
            route: Route::Page(1),
            response: page(1, 1, 1),
        });
        app.open_selected();
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
