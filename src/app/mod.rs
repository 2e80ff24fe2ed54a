//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`LoadState`] - Fetch lifecycle of the current route
//! - [`ArticleOverlay`] - The publication open in the overlay
//! - [`AppMessage`] - Messages for async communication

mod handlers;
mod messages;
mod navigation;
mod types;

pub use messages::AppMessage;
pub use types::{ArticleOverlay, LoadState, DEFAULT_ARTICLE_WIDTH};

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{PageQuery, PublicationsClient};
use crate::config::ViewerConfig;
use crate::error::FetchError;
use crate::models::Publication;
use crate::pagination::PaginationState;
use crate::route::Route;
use crate::traits::HttpClient;
use crate::ui::HitAreaRegistry;

/// Ticks between spinner frames while a page is loading
const SPINNER_TICKS: u64 = 6;

/// Represents the state of the viewer
pub struct App {
    pub config: ViewerConfig,
    client: PublicationsClient,
    /// Route currently shown (or being loaded)
    pub route: Route,
    pub load_state: LoadState,
    /// Publications of the current page, replaced wholesale on every load
    pub publications: Vec<Publication>,
    pub pagination: PaginationState,
    /// Index of the highlighted card
    pub selected: usize,
    /// Index of the first card row drawn in the grid
    pub grid_offset: usize,
    /// Cards per row in the last drawn grid
    pub grid_columns: usize,
    /// Card rows that fit in the last drawn grid
    pub grid_rows: usize,
    pub overlay: Option<ArticleOverlay>,
    /// Incremented on every navigation; responses from older generations are dropped
    generation: u64,
    /// Receiver for fetch results (taken by the event loop)
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender handed to every spawned fetch task
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Clickable regions registered during the last render
    pub hit_registry: HitAreaRegistry,
    pub should_quit: bool,
    pub needs_redraw: bool,
    pub tick_count: u64,
    pub terminal_width: u16,
    pub terminal_height: u16,
}

impl App {
    pub fn new(config: ViewerConfig, client: PublicationsClient, route: Route) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let pagination = PaginationState::new(config.page_size);

        Self {
            config,
            client,
            route,
            load_state: LoadState::Idle,
            publications: Vec::new(),
            pagination,
            selected: 0,
            grid_offset: 0,
            grid_columns: 1,
            grid_rows: 1,
            overlay: None,
            generation: 0,
            message_rx: Some(message_rx),
            message_tx,
            hit_registry: HitAreaRegistry::new(),
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            terminal_width: 80,
            terminal_height: 24,
        }
    }

    /// Build an app backed by the reqwest client described by `config`.
    pub fn from_config(config: ViewerConfig, route: Route) -> Result<Self, FetchError> {
        let client = PublicationsClient::from_config(&config)?;
        Ok(Self::new(config, client, route))
    }

    /// Build an app over any [`HttpClient`] (used with the mock client in tests).
    pub fn with_http(config: ViewerConfig, http: Arc<dyn HttpClient>, route: Route) -> Self {
        let client = PublicationsClient::new(&config, http);
        Self::new(config, client, route)
    }

    pub fn client(&self) -> &PublicationsClient {
        &self.client
    }

    /// Generation of the most recent navigation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Load the initial route.
    pub fn start(&mut self) {
        let route = self.route.clone();
        self.navigate(route);
    }

    /// Switch to `route` and fetch it in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn navigate(&mut self, route: Route) {
        let generation = self.begin_navigation(route.clone());
        let query = PageQuery::for_route(&route, self.config.page_size);
        let client = self.client.clone();
        let tx = self.message_tx.clone();

        tokio::spawn(async move {
            let message = match client.fetch_page(&query).await {
                Ok(response) => AppMessage::PageLoaded {
                    generation,
                    route,
                    response,
                },
                Err(err) => AppMessage::PageLoadFailed {
                    generation,
                    route,
                    error: format!("{} [{}]", err, err.error_code()),
                },
            };
            // The receiver is gone only when the app is shutting down
            let _ = tx.send(message);
        });
    }

    /// Enter `Loading` for `route` and return the new generation.
    ///
    /// Clears the previous page, any error, the overlay and the grid
    /// position. Switching tag filter also forgets the previous total.
    pub fn begin_navigation(&mut self, route: Route) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        tracing::debug!(
            "Navigating to {} (generation {})",
            route,
            self.generation
        );

        if route.tag() != self.route.tag() {
            self.pagination.total = 0;
        }
        self.pagination.page_number = route.page();
        self.route = route;
        self.load_state = LoadState::Loading;
        self.publications.clear();
        self.overlay = None;
        self.selected = 0;
        self.grid_offset = 0;
        self.mark_dirty();
        self.generation
    }

    /// Re-fetch the current route.
    pub fn reload(&mut self) {
        let route = self.route.clone();
        self.navigate(route);
    }

    pub fn selected_publication(&self) -> Option<&Publication> {
        self.publications.get(self.selected)
    }

    /// The publication shown in the overlay, if any.
    pub fn overlay_publication(&self) -> Option<&Publication> {
        self.overlay
            .as_ref()
            .and_then(|overlay| self.publications.get(overlay.index))
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.load_state.is_loading() && self.tick_count % SPINNER_TICKS == 0 {
            self.mark_dirty();
        }
    }

    pub fn update_terminal_dimensions(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
        self.mark_dirty();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
