use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route matches {0:?}")]
    NoMatch(String),

    #[error("invalid page number {0:?}")]
    InvalidPage(String),

    #[error("tag is not valid UTF-8 after decoding: {0:?}")]
    InvalidTag(String),
}
