//! Article overlay.
//!
//! Rendered last so it sits on top of the grid. Clicking outside the card
//! or on the close marker closes it; link references in the link list are
//! clickable.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::cards::tag_line;
use super::helpers::{centered_rect, inner_rect};
use super::interaction::ClickAction;
use super::theme::{COLOR_ACCENT, COLOR_DIALOG_BG, COLOR_DIM, COLOR_IMAGE};
use crate::app::App;
use crate::content::RenderedArticle;
use crate::dates::{format_date, show_updated};
use crate::models::Publication;

const CLOSE_MARKER: &str = "[x]";

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let Some(index) = app.overlay.as_ref().map(|overlay| overlay.index) else {
        return;
    };
    let Some(publication) = app.publications.get(index) else {
        return;
    };

    let card_area = centered_rect(90, 90, area);
    let inner = inner_rect(card_area);
    let content_area = Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height,
    );
    let mut lines = header_lines(publication, content_area.width as usize);
    let header_len = lines.len();
    let content = publication.content().to_string();

    register_backdrop(app, area, card_area);

    frame.render_widget(Clear, card_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_ACCENT))
        .title_bottom(Line::styled(
            " Esc close · ↑↓ scroll · 1-9 open link · t filter by tag ",
            Style::default().fg(COLOR_DIM),
        ))
        .style(Style::default().bg(COLOR_DIALOG_BG));
    frame.render_widget(block, card_area);

    let close_x = card_area.right().saturating_sub(CLOSE_MARKER.len() as u16 + 1);
    let close_area = Rect::new(close_x, card_area.y, CLOSE_MARKER.len() as u16, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(CLOSE_MARKER, Style::default().fg(COLOR_ACCENT))),
        close_area,
    );
    app.hit_registry.register(close_area, ClickAction::CloseOverlay);

    if content_area.width == 0 || content_area.height == 0 {
        return;
    }

    let Some(overlay) = app.overlay.as_mut() else {
        return;
    };
    let article = overlay.article(&content, content_area.width);
    let links_start = header_len + article.lines.len() + 2;
    lines.extend(body_lines(article));
    let link_count = article.links.len();

    let total = lines.len() as u16;
    overlay.set_max_scroll(total.saturating_sub(content_area.height));
    let scroll = overlay.scroll;

    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), content_area);

    for number in 1..=link_count {
        let line = (links_start + number - 1) as u16;
        if line < scroll || line - scroll >= content_area.height {
            continue;
        }
        let y = content_area.y + line - scroll;
        app.hit_registry.register(
            Rect::new(content_area.x, y, content_area.width, 1),
            ClickAction::OpenLink(number),
        );
    }
}

/// Title, cover image, dates and tags.
pub fn header_lines(publication: &Publication, width: usize) -> Vec<Line<'static>> {
    let dim = Style::default().fg(COLOR_DIM);
    let mut lines = vec![Line::styled(
        publication.title().to_string(),
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(url) = publication.image_url() {
        lines.push(Line::from(vec![
            Span::styled("▣ ", Style::default().fg(COLOR_IMAGE)),
            Span::styled(url.to_string(), dim),
        ]));
    }

    let published = publication.published_at();
    if let Some(published) = published {
        lines.push(Line::styled(format_date(published), dim));
    }
    if let Some(updated) = publication.updated_at() {
        if show_updated(published, Some(updated)) {
            lines.push(Line::styled(format!("Updated: {}", format_date(updated)), dim));
        }
    }

    let tags = publication.tag_names();
    if !tags.is_empty() {
        lines.push(tag_line(&tags, width));
    }
    lines.push(Line::raw(""));
    lines
}

/// Article body followed by the numbered link list.
fn body_lines(article: &RenderedArticle) -> Vec<Line<'static>> {
    let mut lines = article.lines.clone();
    if article.links.is_empty() {
        return lines;
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Links",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    for (i, link) in article.links.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", i + 1), Style::default().fg(COLOR_DIM)),
            Span::raw(link.clone()),
        ]));
    }
    lines
}

/// Everything outside the card closes the overlay.
fn register_backdrop(app: &mut App, area: Rect, card: Rect) {
    let above = Rect::new(area.x, area.y, area.width, card.y.saturating_sub(area.y));
    let below = Rect::new(
        area.x,
        card.bottom(),
        area.width,
        area.bottom().saturating_sub(card.bottom()),
    );
    let left = Rect::new(area.x, card.y, card.x.saturating_sub(area.x), card.height);
    let right = Rect::new(
        card.right(),
        card.y,
        area.right().saturating_sub(card.right()),
        card.height,
    );
    for rect in [above, below, left, right] {
        app.hit_registry.register(rect, ClickAction::CloseOverlay);
    }
}
