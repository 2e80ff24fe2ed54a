//! Viewer configuration.
//!
//! Values come from defaults, then the environment, then CLI flags, each
//! layer overriding the previous one.
//!
//! # Example
//!
//! ```ignore
//! use zews::config::ViewerConfig;
//!
//! let config = ViewerConfig::default()
//!     .with_api_base_url("http://localhost:1337")
//!     .with_page_size(10);
//! ```

use std::time::Duration;

use crate::error::ConfigError;
use crate::pagination::DEFAULT_MAX_VISIBLE;

pub const DEFAULT_API_BASE_URL: &str = "https://api.qa.zfx.com";
pub const PUBLICATIONS_PATH: &str = "/content-management/v1/publications";
pub const DEFAULT_FIELDS: &str =
    "image.url,tags.name,content,title,customDate,createdAt,publishedAt,updatedAt";
pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const DEFAULT_TAG_PARAM: &str = "tagName";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_API_URL: &str = "ZEWS_API_URL";
pub const ENV_PAGE_SIZE: &str = "ZEWS_PAGE_SIZE";
pub const ENV_TAG_PARAM: &str = "ZEWS_TAG_PARAM";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Scheme and host of the content-management API, without a trailing slash
    pub api_base_url: String,
    /// Comma-separated field projection sent as `fields`
    pub fields: String,
    /// Page size requested for every page of the session
    pub page_size: u32,
    /// Query parameter that carries the tag filter
    pub tag_param: String,
    /// Width of the page window around the current page
    pub max_visible_pages: u32,
    /// Request timeout; `None` leaves requests unbounded
    pub http_timeout: Option<Duration>,
    /// Default filter directive for the log file (`RUST_LOG` overrides)
    pub log_level: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            fields: DEFAULT_FIELDS.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            tag_param: DEFAULT_TAG_PARAM.to_string(),
            max_visible_pages: DEFAULT_MAX_VISIBLE,
            http_timeout: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `ZEWS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    pub fn with_lookup<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = parse_base_url(ENV_API_URL, &url)?;
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE) {
            self.page_size = parse_positive(ENV_PAGE_SIZE, &size)?;
        }
        if let Some(param) = lookup(ENV_TAG_PARAM) {
            if !param.trim().is_empty() {
                self.tag_param = param.trim().to_string();
            }
        }
        Ok(self)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = fields.into();
        self
    }

    pub fn with_tag_param(mut self, param: impl Into<String>) -> Self {
        self.tag_param = param.into();
        self
    }

    pub fn with_max_visible_pages(mut self, max_visible: u32) -> Self {
        self.max_visible_pages = max_visible.max(1);
        self
    }

    pub fn with_http_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Full endpoint URL, without query string.
    pub fn publications_url(&self) -> String {
        format!("{}{}", self.api_base_url, PUBLICATIONS_PATH)
    }
}

pub(crate) fn parse_positive(name: &str, raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

pub(crate) fn parse_base_url(name: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.trim_end_matches('/').to_string())
    } else {
        Err(ConfigError::InvalidUrl {
            name: name.to_string(),
            value: raw.to_string(),
        })
    }
}
