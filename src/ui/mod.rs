//! UI rendering for the viewer.
//!
//! Layout, top to bottom: header, card grid (or a loading/error/empty
//! state), page bar, key hints. The article overlay is drawn last so it sits
//! on top of everything else.

mod cards;
mod footer;
mod header;
mod helpers;
mod interaction;
mod overlay;
mod page_bar;
mod states;
pub mod theme;

pub use cards::{card_details, grid_columns, grid_rows, scroll_offset, tag_line, CARD_HEIGHT};
pub use helpers::truncate_string;
pub use interaction::{handle_click_action, ClickAction, HitArea, HitAreaRegistry};
pub use overlay::header_lines;
pub use page_bar::{bar_items, BarItem};

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, LoadState};

/// Render the whole viewer.
pub fn render(frame: &mut Frame, app: &mut App) {
    app.hit_registry.clear();

    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(page_bar::height(&app.pagination)),
            Constraint::Length(1),
        ])
        .split(area);

    header::render(frame, chunks[0], app);

    match app.load_state.clone() {
        LoadState::Idle | LoadState::Loading => {
            states::render_loading(frame, chunks[1], app.tick_count)
        }
        LoadState::Error(message) => states::render_error(frame, chunks[1], &message),
        LoadState::Loaded if app.publications.is_empty() => states::render_empty(frame, chunks[1]),
        LoadState::Loaded => cards::render(frame, chunks[1], app),
    }

    if matches!(app.load_state, LoadState::Loaded) {
        page_bar::render(frame, chunks[2], app);
    }
    footer::render(frame, chunks[3], app);

    if app.overlay.is_some() {
        overlay::render(frame, area, app);
    }
}
