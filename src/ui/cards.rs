//! Publication card grid.
//!
//! Cards are laid out left to right, top to bottom. The grid scrolls by
//! whole rows so the selected card is always visible.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::helpers::{inner_rect, truncate_string};
use super::interaction::ClickAction;
use super::theme::{COLOR_BORDER, COLOR_DIM, COLOR_IMAGE, COLOR_SELECTED, COLOR_TAG};
use crate::app::App;
use crate::dates::{format_date, show_updated};
use crate::models::Publication;

/// Total card height including its border
pub const CARD_HEIGHT: u16 = 8;

/// Narrowest card before the grid drops a column
pub const MIN_CARD_WIDTH: u16 = 32;

pub const MAX_COLUMNS: u16 = 3;

/// Columns that fit in `width`.
pub fn grid_columns(width: u16) -> usize {
    (width / MIN_CARD_WIDTH).clamp(1, MAX_COLUMNS) as usize
}

/// Card rows that fit in `height`.
pub fn grid_rows(height: u16) -> usize {
    (height / CARD_HEIGHT).max(1) as usize
}

/// First visible row so that `selected` stays on screen.
pub fn scroll_offset(selected: usize, columns: usize, rows: usize, current: usize) -> usize {
    let row = selected / columns.max(1);
    let rows = rows.max(1);
    if row < current {
        row
    } else if row >= current + rows {
        row + 1 - rows
    } else {
        current
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let columns = grid_columns(area.width);
    let rows = grid_rows(area.height);
    app.grid_columns = columns;
    app.grid_rows = rows;
    app.grid_offset = scroll_offset(app.selected, columns, rows, app.grid_offset);

    let card_width = area.width / columns as u16;
    let first = app.grid_offset * columns;
    let last = (first + rows * columns).min(app.publications.len());

    for index in first..last {
        let slot = index - first;
        let column = (slot % columns) as u16;
        let row = (slot / columns) as u16;
        let card_area = Rect::new(
            area.x + column * card_width,
            area.y + row * CARD_HEIGHT,
            card_width,
            CARD_HEIGHT.min(area.height.saturating_sub(row * CARD_HEIGHT)),
        );

        let selected = index == app.selected;
        render_card(frame, card_area, &app.publications[index], selected);
        app.hit_registry
            .register(card_area, ClickAction::OpenPublication(index));
        register_tag_areas(app, card_area, index);
    }
}

fn render_card(frame: &mut Frame, area: Rect, publication: &Publication, selected: bool) {
    let border_style = if selected {
        Style::default().fg(COLOR_SELECTED)
    } else {
        Style::default().fg(COLOR_BORDER)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(block, area);

    let inner = inner_rect(area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut title_style = Style::default().add_modifier(Modifier::BOLD);
    if selected {
        title_style = title_style.fg(COLOR_SELECTED);
    }
    let title = Paragraph::new(Line::styled(publication.title().to_string(), title_style))
        .wrap(Wrap { trim: true });
    frame.render_widget(title, Rect::new(inner.x, inner.y, inner.width, inner.height.min(2)));

    let details = card_details(publication, inner.width as usize);
    let details_area = Rect::new(
        inner.x,
        inner.y + 2,
        inner.width,
        inner.height.saturating_sub(2),
    );
    frame.render_widget(Paragraph::new(details), details_area);
}

/// Image indicator, dates and tags below the title.
pub fn card_details(publication: &Publication, width: usize) -> Vec<Line<'static>> {
    let dim = Style::default().fg(COLOR_DIM);
    let mut lines = Vec::new();

    lines.push(match publication.image_url() {
        Some(_) => Line::styled("▣ cover image", Style::default().fg(COLOR_IMAGE)),
        None => Line::raw(""),
    });

    let published = publication.published_at();
    let updated = publication.updated_at();
    lines.push(match published {
        Some(published) => Line::styled(format_date(published), dim),
        None => Line::raw(""),
    });
    match updated {
        Some(updated) if show_updated(published, Some(updated)) => {
            lines.push(Line::styled(
                truncate_string(&format!("Updated: {}", format_date(updated)), width),
                dim,
            ));
        }
        _ => lines.push(Line::raw("")),
    }

    lines.push(tag_line(&publication.tag_names(), width));
    lines
}

/// `#tag` badges separated by a space, cut at `width`.
pub fn tag_line(tags: &[&str], width: usize) -> Line<'static> {
    let mut spans = Vec::new();
    let mut used = 0;
    for tag in tags {
        let badge = format!("#{}", tag);
        let needed = badge.width() + usize::from(!spans.is_empty());
        if used + needed > width {
            break;
        }
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        used += needed;
        spans.push(Span::styled(badge, Style::default().fg(COLOR_TAG)));
    }
    Line::from(spans)
}

/// Tag badges are clickable; they sit on the last details line.
fn register_tag_areas(app: &mut App, card_area: Rect, index: usize) {
    let inner = inner_rect(card_area);
    // title (2) + image + published + updated
    let y = inner.y + 5;
    if inner.height < 6 {
        return;
    }
    let tags: Vec<String> = app.publications[index]
        .tag_names()
        .iter()
        .map(|tag| tag.to_string())
        .collect();

    let mut x = inner.x;
    let right = inner.x + inner.width;
    for tag in tags {
        let width = (tag.width() + 1) as u16;
        if x + width > right {
            break;
        }
        app.hit_registry
            .register(Rect::new(x, y, width, 1), ClickAction::FilterTag(tag));
        x += width + 1;
    }
}
