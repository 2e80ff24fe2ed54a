use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: String, value: String },

    #[error("{name} must be an http(s) URL, got {value:?}")]
    InvalidUrl { name: String, value: String },
}
