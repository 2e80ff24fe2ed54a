//! Key hints along the bottom edge.

use ratatui::{layout::Rect, style::Style, text::Line, widgets::Paragraph, Frame};

use super::theme::COLOR_DIM;
use crate::app::App;

pub fn hint(app: &App) -> &'static str {
    if app.is_overlay_open() {
        " esc close · ↑↓ scroll · 1-9 link · t tag · ctrl+c quit"
    } else if app.route.tag().is_some() {
        " ←↑↓→ select · enter open · n/p page · t tag · T all · r reload · q quit"
    } else {
        " ←↑↓→ select · enter open · n/p page · t tag · r reload · q quit"
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(
        Paragraph::new(Line::styled(hint(app), Style::default().fg(COLOR_DIM))),
        area,
    );
}
