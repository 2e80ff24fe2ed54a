//! Hit area system for mouse interactions.
//!
//! Components register hit areas during rendering, and the event loop
//! queries the registry to determine what action to take on a click.

use ratatui::layout::Rect;

/// Represents an action that can be triggered by clicking a hit area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Open the publication at this index of the current page
    OpenPublication(usize),
    /// Close the article overlay
    CloseOverlay,
    /// Request a page of the current route
    GoToPage(u32),
    PrevPage,
    NextPage,
    /// Show page 1 of a tag
    FilterTag(String),
    /// Back to the unfiltered list
    ClearTagFilter,
    /// Open link reference `[n]` of the open article
    OpenLink(usize),
}

/// A clickable region with an associated action.
#[derive(Debug, Clone)]
pub struct HitArea {
    pub rect: Rect,
    pub action: ClickAction,
}

impl HitArea {
    pub fn new(rect: Rect, action: ClickAction) -> Self {
        Self { rect, action }
    }

    /// Check if a point is within this hit area.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.rect.x
            && x < self.rect.x + self.rect.width
            && y >= self.rect.y
            && y < self.rect.y + self.rect.height
    }
}

/// Registry for managing hit areas across the UI.
///
/// Hit areas are registered during rendering and cleared at the start of each
/// render cycle.
#[derive(Debug, Default)]
pub struct HitAreaRegistry {
    /// All registered hit areas (later registrations sit on top)
    areas: Vec<HitArea>,
}

impl HitAreaRegistry {
    pub fn new() -> Self {
        Self { areas: Vec::new() }
    }

    /// Clear all registered areas. Call this at the start of each render cycle.
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn register(&mut self, rect: Rect, action: ClickAction) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        self.areas.push(HitArea::new(rect, action));
    }

    /// Action of the topmost area containing the point.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ClickAction> {
        self.areas
            .iter()
            .rev()
            .find(|area| area.contains(x, y))
            .map(|area| area.action.clone())
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn areas(&self) -> &[HitArea] {
        &self.areas
    }
}
