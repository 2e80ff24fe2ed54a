//! Pagination window computation and page-change validation.

use crate::models::PaginationMeta;

/// Pages shown around the current page when no other width is configured.
pub const DEFAULT_MAX_VISIBLE: u32 = 3;

/// One slot in the rendered page bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Compute the ordered page bar for `current` out of `total_pages`.
///
/// Page 1 and the last page are always present. Between them sits a window
/// of up to `max_visible` pages centred on `current`, trimmed to
/// `[2, total_pages - 1]`. An ellipsis marks each gap between the window and
/// the first or last page.
pub fn visible_window(current: u32, total_pages: u32, max_visible: u32) -> Vec<PageItem> {
    if total_pages == 0 {
        return Vec::new();
    }
    if total_pages == 1 {
        return vec![PageItem::Page(1)];
    }

    let current = current.clamp(1, total_pages);
    let width = max_visible.max(1);
    let before = (width - 1) / 2;
    let after = width - 1 - before;

    let range_start = current.saturating_sub(before).max(2);
    let range_end = current.saturating_add(after).min(total_pages - 1);

    let mut items = vec![PageItem::Page(1)];
    if range_start > 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((range_start..=range_end).map(PageItem::Page));
    if range_end < total_pages - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total_pages));
    items
}

/// Outcome of a page-change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    /// The current page moved; a fetch for this page is required.
    Accepted(u32),
    /// Out of range; nothing changed.
    Rejected,
}

/// Current page, page size and server-reported total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page_number: u32,
    pub page_size: u32,
    pub total: u32,
}

impl PaginationState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_number: 1,
            page_size,
            total: 0,
        }
    }

    /// `ceil(total / page_size)`, zero when the page size is zero.
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    /// Replace state with what the server reported for a loaded page.
    ///
    /// A zero page size in the response keeps the session's page size. The
    /// page number is clamped to `[1, total_pages]` whenever there are pages.
    pub fn apply(&mut self, meta: PaginationMeta) {
        if meta.page_size > 0 {
            self.page_size = meta.page_size;
        }
        self.total = meta.total;
        let total_pages = self.total_pages();
        self.page_number = if total_pages > 0 {
            meta.page_number.clamp(1, total_pages)
        } else {
            meta.page_number.max(1)
        };
    }

    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages()
    }

    /// Whether the page bar is rendered at all.
    pub fn shows_controls(&self) -> bool {
        self.total_pages() > 1
    }

    /// Validate and apply a requested page.
    pub fn handle_page_change(&mut self, requested: u32) -> PageChange {
        if requested < 1 || requested > self.total_pages() {
            return PageChange::Rejected;
        }
        self.page_number = requested;
        PageChange::Accepted(requested)
    }

    pub fn window(&self, max_visible: u32) -> Vec<PageItem> {
        visible_window(self.page_number, self.total_pages(), max_visible)
    }
}
