//! Error types for the viewer.
//!
//! - [`FetchError`] - anything that prevents a page of publications from loading
//! - [`ConfigError`] - invalid configuration from the environment or CLI
//! - [`RouteError`] - a path that does not match any known route
//!
//! Fetch failures all surface to the user as [`FETCH_FAILED_MESSAGE`]; the
//! variants only exist so the log file records the cause.

mod config;
mod fetch;
mod route;

pub use config::ConfigError;
pub use fetch::{FetchError, FETCH_FAILED_MESSAGE};
pub use route::RouteError;
