//! Click action handler.
//!
//! Translates actions dispatched from the hit area registry into App state
//! mutations.

use super::hit_area::ClickAction;
use crate::app::App;

/// Handle a click action by updating App state.
pub fn handle_click_action(app: &mut App, action: ClickAction) {
    app.mark_dirty();

    match action {
        ClickAction::OpenPublication(index) => {
            tracing::debug!("Click: OpenPublication({})", index);
            app.open_publication(index);
        }
        ClickAction::CloseOverlay => {
            tracing::debug!("Click: CloseOverlay");
            app.close_overlay();
        }
        ClickAction::GoToPage(page) => {
            tracing::debug!("Click: GoToPage({})", page);
            app.handle_page_change(page);
        }
        ClickAction::PrevPage => {
            app.prev_page();
        }
        ClickAction::NextPage => {
            app.next_page();
        }
        ClickAction::FilterTag(tag) => {
            tracing::debug!("Click: FilterTag({})", tag);
            app.filter_by_tag(&tag);
        }
        ClickAction::ClearTagFilter => {
            app.clear_tag_filter();
        }
        ClickAction::OpenLink(number) => {
            app.open_link(number);
        }
    }
}
