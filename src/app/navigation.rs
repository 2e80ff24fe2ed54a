//! Navigation methods for the App.

use crate::pagination::PageChange;
use crate::route::Route;

use super::{App, ArticleOverlay};

impl App {
    /// Request a page of the current route.
    ///
    /// Out-of-range requests, and any request while a page is still
    /// loading, are rejected without touching any state. Accepted requests
    /// reset the grid to the top and start a fetch.
    pub fn handle_page_change(&mut self, requested: u32) -> PageChange {
        if self.load_state.is_loading() {
            tracing::debug!("Page {} rejected while loading {}", requested, self.route);
            return PageChange::Rejected;
        }
        let change = self.pagination.handle_page_change(requested);
        match change {
            PageChange::Accepted(page) => {
                let route = self.route.with_page(page);
                self.navigate(route);
            }
            PageChange::Rejected => {
                tracing::debug!(
                    "Page {} rejected ({} pages)",
                    requested,
                    self.pagination.total_pages()
                );
            }
        }
        change
    }

    pub fn next_page(&mut self) -> PageChange {
        if !self.pagination.has_next() {
            return PageChange::Rejected;
        }
        self.handle_page_change(self.pagination.page_number + 1)
    }

    pub fn prev_page(&mut self) -> PageChange {
        if !self.pagination.has_prev() {
            return PageChange::Rejected;
        }
        self.handle_page_change(self.pagination.page_number - 1)
    }

    pub fn first_page(&mut self) -> PageChange {
        if self.pagination.page_number == 1 {
            return PageChange::Rejected;
        }
        self.handle_page_change(1)
    }

    pub fn last_page(&mut self) -> PageChange {
        let last = self.pagination.total_pages();
        if last == self.pagination.page_number {
            return PageChange::Rejected;
        }
        self.handle_page_change(last)
    }

    /// Show page 1 of `tag`.
    pub fn filter_by_tag(&mut self, tag: &str) {
        if self.route.tag() == Some(tag) && self.route.page() == 1 {
            return;
        }
        let route = self.route.with_tag(Some(tag));
        self.navigate(route);
    }

    /// Filter by the first tag of the open or selected publication.
    pub fn filter_by_current_tag(&mut self) {
        let publication = self
            .overlay_publication()
            .or_else(|| self.selected_publication());
        let tag = publication
            .and_then(|publication| publication.tag_names().first().map(|tag| tag.to_string()));
        if let Some(tag) = tag {
            self.filter_by_tag(&tag);
        }
    }

    /// Back to the unfiltered list.
    pub fn clear_tag_filter(&mut self) {
        if self.route.tag().is_none() {
            return;
        }
        self.navigate(Route::Page(1));
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.publications.len() {
            self.selected += 1;
            self.mark_dirty();
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.mark_dirty();
        }
    }

    pub fn select_down(&mut self) {
        let columns = self.grid_columns.max(1);
        if self.selected + columns < self.publications.len() {
            self.selected += columns;
            self.mark_dirty();
        }
    }

    pub fn select_up(&mut self) {
        let columns = self.grid_columns.max(1);
        if self.selected >= columns {
            self.selected -= columns;
            self.mark_dirty();
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.publications.len() {
            self.selected = index;
            self.mark_dirty();
        }
    }

    /// Open `index` in the overlay, replacing whatever was open.
    pub fn open_publication(&mut self, index: usize) {
        if index >= self.publications.len() {
            return;
        }
        self.selected = index;
        self.overlay = Some(ArticleOverlay::new(index));
        tracing::debug!("Opened publication {}", self.publications[index].id);
        self.mark_dirty();
    }

    pub fn open_selected(&mut self) {
        self.open_publication(self.selected);
    }

    pub fn close_overlay(&mut self) {
        if self.overlay.take().is_some() {
            self.mark_dirty();
        }
    }

    pub fn is_overlay_open(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn scroll_overlay_down(&mut self, lines: u16) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.scroll_down(lines);
            self.needs_redraw = true;
        }
    }

    pub fn scroll_overlay_up(&mut self, lines: u16) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.scroll_up(lines);
            self.needs_redraw = true;
        }
    }

    /// Target of link reference `[number]` in the open article.
    pub fn link_target(&mut self, number: usize) -> Option<String> {
        let index = self.overlay.as_ref()?.index;
        let content = self.publications.get(index)?.content().to_string();
        let overlay = self.overlay.as_mut()?;
        let links = overlay.links(&content);
        number
            .checked_sub(1)
            .and_then(|slot| links.get(slot))
            .cloned()
    }

    /// Open link reference `[number]` in the system browser.
    pub fn open_link(&mut self, number: usize) {
        let Some(url) = self.link_target(number) else {
            return;
        };
        match webbrowser::open(&url) {
            Ok(()) => tracing::info!("Opened {} in browser", url),
            Err(err) => tracing::warn!("Failed to open {}: {}", url, err),
        }
    }
}
