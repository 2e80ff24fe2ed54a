//! Header: app name, current route and the active tag filter.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::interaction::ClickAction;
use super::theme::{COLOR_DIM, COLOR_HEADER, COLOR_TAG};
use crate::app::App;

pub const TITLE: &str = "ZEWS";

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    if area.height == 0 {
        return;
    }

    let mut spans = vec![
        Span::styled(
            format!(" {} ", TITLE),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.route.to_path(), Style::default().fg(COLOR_DIM)),
    ];

    if let Some(tag) = app.route.tag() {
        let prefix_width: usize = spans.iter().map(|span| span.content.width()).sum();
        let badge = format!("#{} ✕", tag);
        let x = area.x + prefix_width as u16 + 2;
        app.hit_registry.register(
            Rect::new(x, area.y, badge.width() as u16, 1),
            ClickAction::ClearTagFilter,
        );
        spans.push(Span::raw("  "));
        spans.push(Span::styled(badge, Style::default().fg(COLOR_TAG)));
    }

    if app.pagination.total > 0 {
        spans.push(Span::styled(
            format!(
                "  page {} of {} · {} publications",
                app.pagination.page_number,
                app.pagination.total_pages(),
                app.pagination.total
            ),
            Style::default().fg(COLOR_DIM),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
