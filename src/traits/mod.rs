//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP GET operations against the publications API

pub mod http;

pub use http::{Headers, HttpClient, HttpError, Response};
