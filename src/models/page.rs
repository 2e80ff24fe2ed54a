use serde::{Deserialize, Serialize};

use super::{deserialize_nullable, Publication};

/// Pagination block reported by the server alongside each page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total: u32,
}

/// Body of `GET /content-management/v1/publications`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PublicationsResponse {
    /// Missing or null `result` is an empty page
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub result: Vec<Publication>,
    #[serde(default)]
    pub pagination: PaginationMeta,
}
