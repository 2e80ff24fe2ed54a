//! Color theme constants for the viewer.

use ratatui::style::Color;

/// Border color for cards and panels
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Border of the highlighted card
pub const COLOR_SELECTED: Color = Color::Cyan;

pub const COLOR_ACCENT: Color = Color::White;

pub const COLOR_HEADER: Color = Color::White;

/// Dim text for dates and hints
pub const COLOR_DIM: Color = Color::DarkGray;

pub const COLOR_TAG: Color = Color::Yellow;

pub const COLOR_IMAGE: Color = Color::Magenta;

pub const COLOR_ERROR: Color = Color::Red;

/// Current page in the page bar
pub const COLOR_ACTIVE_PAGE: Color = Color::Cyan;

/// Background of the article overlay
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);
