//! Type definitions for the application state.
//!
//! - [`LoadState`] - Where the current page fetch stands
//! - [`ArticleOverlay`] - The open publication, its scroll position and layout

use crate::content::{render_html, RenderedArticle};
use crate::error::FETCH_FAILED_MESSAGE;

/// Width used to lay out an article before the overlay has been drawn.
pub const DEFAULT_ARTICLE_WIDTH: u16 = 80;

/// Fetch lifecycle of the current route.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// User-facing message; never shown alongside loaded data
    Error(String),
}

impl LoadState {
    pub fn fetch_failed() -> Self {
        LoadState::Error(FETCH_FAILED_MESSAGE.to_string())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// The single open publication.
#[derive(Debug, Clone, Default)]
pub struct ArticleOverlay {
    /// Index into the current page's publications
    pub index: usize,
    pub scroll: u16,
    /// Last scroll offset that still shows content, updated on render
    pub max_scroll: u16,
    layout: Option<(u16, RenderedArticle)>,
}

impl ArticleOverlay {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Lay out `content` at `width`, reusing the previous layout when the
    /// width is unchanged.
    pub fn article(&mut self, content: &str, width: u16) -> &RenderedArticle {
        if self.layout.as_ref().map(|(cached, _)| *cached) != Some(width) {
            self.layout = None;
        }
        let (_, article) = self
            .layout
            .get_or_insert_with(|| (width, render_html(content, width)));
        article
    }

    /// Link targets of the current layout, laying out at the default width
    /// when nothing has been drawn yet.
    pub fn links(&mut self, content: &str) -> &[String] {
        let width = self
            .layout
            .as_ref()
            .map(|(width, _)| *width)
            .unwrap_or(DEFAULT_ARTICLE_WIDTH);
        &self.article(content, width).links
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn set_max_scroll(&mut self, max_scroll: u16) {
        self.max_scroll = max_scroll;
        self.scroll = self.scroll.min(max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_error() {
        assert_eq!(
            LoadState::fetch_failed().error(),
            Some("Failed to fetch publications. Please try again later.")
        );
        assert_eq!(LoadState::Loaded.error(), None);
        assert!(LoadState::Loading.is_loading());
    }

    #[test]
    fn test_overlay_layout_is_cached_per_width() {
        let mut overlay = ArticleOverlay::new(0);
        let narrow = overlay.article("<p>one two three four</p>", 10).lines.len();
        let wide = overlay.article("<p>one two three four</p>", 60).lines.len();
        assert!(narrow > wide);
        assert_eq!(wide, 1);
    }

    #[test]
    fn test_overlay_links_without_render() {
        let mut overlay = ArticleOverlay::new(0);
        let links = overlay.links(r#"<a href="https://x.test">x</a>"#);
        assert_eq!(links, ["https://x.test".to_string()]);
    }

    #[test]
    fn test_overlay_scroll_clamped() {
        let mut overlay = ArticleOverlay::new(0);
        overlay.set_max_scroll(5);
        overlay.scroll_down(3);
        overlay.scroll_down(3);
        assert_eq!(overlay.scroll, 5);
        overlay.scroll_up(10);
        assert_eq!(overlay.scroll, 0);
        overlay.scroll = 5;
        overlay.set_max_scroll(2);
        assert_eq!(overlay.scroll, 2);
    }
}
