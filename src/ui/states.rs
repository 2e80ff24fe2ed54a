//! Loading, error and empty states for the grid area.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::Paragraph,
    Frame,
};

use super::helpers::spinner_frame;
use super::theme::{COLOR_DIM, COLOR_ERROR};

fn render_centered(frame: &mut Frame, area: Rect, text: Text<'static>) {
    let height = text.lines.len() as u16;
    let y_offset = area.height.saturating_sub(height) / 2;
    let centered = Rect::new(area.x, area.y + y_offset, area.width, height.min(area.height));
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), centered);
}

pub fn render_loading(frame: &mut Frame, area: Rect, tick: u64) {
    let text = Text::from(Line::raw(format!("{} Loading publications...", spinner_frame(tick))));
    render_centered(frame, area, text);
}

pub fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let text = Text::from(vec![
        Line::styled(
            message.to_string(),
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled("press r to retry", Style::default().fg(COLOR_DIM)),
    ]);
    render_centered(frame, area, text);
}

pub fn render_empty(frame: &mut Frame, area: Rect) {
    let text = Text::from(Line::styled(
        "No publications found",
        Style::default().fg(COLOR_DIM),
    ));
    render_centered(frame, area, text);
}
