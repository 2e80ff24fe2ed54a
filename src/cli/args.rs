//! Command-line arguments.

use clap::Parser;

use crate::config::{parse_base_url, parse_positive, ViewerConfig};
use crate::error::ConfigError;
use crate::route::Route;

/// Flags that shape a TUI session.
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(
    name = "zews",
    version,
    about = "Terminal reader for a paginated publications feed",
    long_about = "Terminal reader for a paginated publications feed.\n\nExamples:\n  zews\n  zews /tag/forex/page/2\n  zews --api-url http://localhost:1337 --page-size 12\n\nZEWS_API_URL and ZEWS_PAGE_SIZE set the defaults that --api-url and --page-size override."
)]
pub struct RunOptions {
    #[arg(
        value_name = "ROUTE",
        help = "Route to open: /page/N or /tag/TAG/page/N (default: /page/1)."
    )]
    pub route: Option<String>,

    #[arg(
        long = "api-url",
        value_name = "URL",
        value_parser = api_url,
        help_heading = "Source",
        help = "Content API base URL (env: ZEWS_API_URL)."
    )]
    pub api_url: Option<String>,

    #[arg(
        long = "page-size",
        value_name = "N",
        value_parser = page_size,
        help_heading = "Source",
        help = "Publications per page (env: ZEWS_PAGE_SIZE)."
    )]
    pub page_size: Option<u32>,

    #[arg(
        short = 't',
        long = "tag",
        value_name = "TAG",
        help_heading = "Navigation",
        help = "Show only publications with TAG."
    )]
    pub tag: Option<String>,

    #[arg(
        short = 'p',
        long = "page",
        value_name = "N",
        value_parser = page_number,
        help_heading = "Navigation",
        help = "Open page N."
    )]
    pub page: Option<u32>,

    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        help_heading = "Output",
        help = "Log filter when RUST_LOG is unset (default: info)."
    )]
    pub log_level: Option<String>,
}

fn api_url(raw: &str) -> Result<String, ConfigError> {
    parse_base_url("--api-url", raw)
}

fn page_size(raw: &str) -> Result<u32, ConfigError> {
    parse_positive("--page-size", raw)
}

fn page_number(raw: &str) -> Result<u32, ConfigError> {
    parse_positive("--page", raw)
}

impl RunOptions {
    /// Apply CLI overrides on top of an already-loaded configuration.
    pub fn apply_to(&self, mut config: ViewerConfig) -> ViewerConfig {
        if let Some(url) = &self.api_url {
            config = config.with_api_base_url(url.clone());
        }
        if let Some(page_size) = self.page_size {
            config = config.with_page_size(page_size);
        }
        if let Some(level) = &self.log_level {
            config = config.with_log_level(level.clone());
        }
        config
    }

    /// The route to open first. `--tag`/`--page` override the positional route.
    pub fn initial_route(&self) -> Route {
        let base = self
            .route
            .as_deref()
            .map(Route::resolve)
            .unwrap_or_default();
        let base = match &self.tag {
            Some(tag) => base.with_tag(Some(tag.as_str())),
            None => base,
        };
        match self.page {
            Some(page) => base.with_page(page),
            None => base,
        }
    }
}

/// Parse command-line arguments, program name first.
///
/// `--help` and `--version` come back as errors whose kind says so; the
/// binary lets clap print and exit for those.
///
/// ```
/// use zews::cli::args::parse_args;
/// use zews::route::Route;
///
/// let options = parse_args(["zews", "--tag", "forex"]).unwrap();
/// assert_eq!(
///     options.initial_route(),
///     Route::TagPage { tag: "forex".to_string(), page: 1 }
/// );
/// ```
pub fn parse_args<I, T>(args: I) -> Result<RunOptions, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    RunOptions::try_parse_from(args)
}
