//! Zews - a terminal viewer for CMS publications
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod content;
pub mod dates;
pub mod error;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod route;
pub mod terminal;
pub mod traits;
pub mod ui;
