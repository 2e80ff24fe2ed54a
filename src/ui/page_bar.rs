//! Page bar: Prev, the visible page window, Next.
//!
//! Not drawn at all when there is at most one page.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::interaction::ClickAction;
use super::theme::{COLOR_ACCENT, COLOR_ACTIVE_PAGE, COLOR_DIM};
use crate::app::App;
use crate::pagination::{PageItem, PaginationState};

const PREV_LABEL: &str = "‹ Prev";
const NEXT_LABEL: &str = "Next ›";
const ELLIPSIS: &str = "…";

/// A labelled segment of the bar and what clicking it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarItem {
    pub label: String,
    pub style: Style,
    pub action: Option<ClickAction>,
}

/// Segments of the bar for `state`, empty when controls are hidden.
pub fn bar_items(state: &PaginationState, max_visible: u32) -> Vec<BarItem> {
    if !state.shows_controls() {
        return Vec::new();
    }

    let enabled = Style::default().fg(COLOR_ACCENT);
    let disabled = Style::default().fg(COLOR_DIM);
    let mut items = Vec::new();

    items.push(BarItem {
        label: PREV_LABEL.to_string(),
        style: if state.has_prev() { enabled } else { disabled },
        action: state.has_prev().then_some(ClickAction::PrevPage),
    });

    for item in state.window(max_visible) {
        items.push(match item {
            PageItem::Page(page) if page == state.page_number => BarItem {
                label: format!("[{}]", page),
                style: Style::default()
                    .fg(COLOR_ACTIVE_PAGE)
                    .add_modifier(Modifier::BOLD),
                action: None,
            },
            PageItem::Page(page) => BarItem {
                label: page.to_string(),
                style: enabled,
                action: Some(ClickAction::GoToPage(page)),
            },
            PageItem::Ellipsis => BarItem {
                label: ELLIPSIS.to_string(),
                style: disabled,
                action: None,
            },
        });
    }

    items.push(BarItem {
        label: NEXT_LABEL.to_string(),
        style: if state.has_next() { enabled } else { disabled },
        action: state.has_next().then_some(ClickAction::NextPage),
    });

    items
}

/// Rows the bar needs for `state`.
pub fn height(state: &PaginationState) -> u16 {
    if state.shows_controls() {
        1
    } else {
        0
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let items = bar_items(&app.pagination, app.config.max_visible_pages);
    if items.is_empty() || area.height == 0 {
        return;
    }

    let total_width: usize =
        items.iter().map(|item| item.label.width()).sum::<usize>() + 2 * (items.len() - 1);
    let mut x = area.x + (area.width.saturating_sub(total_width as u16)) / 2;

    let mut spans = Vec::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
            x += 2;
        }
        let width = item.label.width() as u16;
        if let Some(action) = item.action {
            app.hit_registry
                .register(Rect::new(x, area.y, width, 1), action);
        }
        x += width;
        spans.push(Span::styled(item.label, item.style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(ratatui::layout::Alignment::Center),
        area,
    );
}
