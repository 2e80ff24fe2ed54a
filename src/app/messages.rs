//! AppMessage enum for async communication within the application.

use crate::models::PublicationsResponse;
use crate::route::Route;

/// Messages received from spawned fetch tasks.
///
/// Every message carries the generation of the navigation that started the
/// fetch; the app applies it only if no newer navigation has happened since.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A page of publications arrived
    PageLoaded {
        generation: u64,
        route: Route,
        response: PublicationsResponse,
    },
    /// The fetch failed at the transport, status or decoding level
    PageLoadFailed {
        generation: u64,
        route: Route,
        /// Internal cause, for logs only
        error: String,
    },
}

impl AppMessage {
    pub fn generation(&self) -> u64 {
        match self {
            AppMessage::PageLoaded { generation, .. } => *generation,
            AppMessage::PageLoadFailed { generation, .. } => *generation,
        }
    }

    pub fn route(&self) -> &Route {
        match self {
            AppMessage::PageLoaded { route, .. } => route,
            AppMessage::PageLoadFailed { route, .. } => route,
        }
    }
}
