//! Client for the content-management publications endpoint.

mod client;

pub use client::{PageQuery, PublicationsClient};
