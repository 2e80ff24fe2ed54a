//! Route parsing for the viewer's address space.
//!
//! Two shapes are recognised:
//!
//! - `/page/:pageNumber`
//! - `/tag/:tag/page/:pageNumber`
//!
//! The root path `/` redirects to `/page/1`. Tags are percent-encoded in
//! paths and decoded in [`Route`].

use std::fmt;

use crate::error::RouteError;

/// A parsed route. Page numbers are always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Page(u32),
    TagPage { tag: String, page: u32 },
}

impl Default for Route {
    fn default() -> Self {
        Route::Page(1)
    }
}

impl Route {
    /// Parse a path. `/` and the empty string are the root redirect.
    pub fn parse(path: &str) -> Result<Route, RouteError> {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Route::default()),
            ["page", page] => Ok(Route::Page(parse_page(page)?)),
            ["tag", tag, "page", page] => {
                let tag = urlencoding::decode(tag)
                    .map_err(|_| RouteError::InvalidTag((*tag).to_string()))?
                    .into_owned();
                Ok(Route::TagPage {
                    tag,
                    page: parse_page(page)?,
                })
            }
            // `/tag/:tag` without a page is treated as its first page
            ["tag", tag] => {
                let tag = urlencoding::decode(tag)
                    .map_err(|_| RouteError::InvalidTag((*tag).to_string()))?
                    .into_owned();
                Ok(Route::TagPage { tag, page: 1 })
            }
            _ => Err(RouteError::NoMatch(trimmed.to_string())),
        }
    }

    /// Parse a path, falling back to `/page/1` when it does not match.
    pub fn resolve(path: &str) -> Route {
        match Route::parse(path) {
            Ok(route) => route,
            Err(err) => {
                tracing::warn!("{}; redirecting to /page/1", err);
                Route::default()
            }
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            Route::Page(page) => *page,
            Route::TagPage { page, .. } => *page,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Route::Page(_) => None,
            Route::TagPage { tag, .. } => Some(tag.as_str()),
        }
    }

    /// Same route shape, different page.
    pub fn with_page(&self, page: u32) -> Route {
        match self {
            Route::Page(_) => Route::Page(page),
            Route::TagPage { tag, .. } => Route::TagPage {
                tag: tag.clone(),
                page,
            },
        }
    }

    /// Switch to page 1 of a tag, or back to the unfiltered list with `None`.
    pub fn with_tag(&self, tag: Option<&str>) -> Route {
        match tag {
            Some(tag) => Route::TagPage {
                tag: tag.to_string(),
                page: 1,
            },
            None => Route::Page(1),
        }
    }

    pub fn to_path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Page(page) => write!(f, "/page/{}", page),
            Route::TagPage { tag, page } => {
                write!(f, "/tag/{}/page/{}", urlencoding::encode(tag), page)
            }
        }
    }
}

fn parse_page(raw: &str) -> Result<u32, RouteError> {
    match raw.parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(RouteError::InvalidPage(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_redirects_to_first_page() {
        assert_eq!(Route::parse("/").unwrap(), Route::Page(1));
        assert_eq!(Route::parse("").unwrap(), Route::Page(1));
    }

    #[test]
    fn test_parse_page_route() {
        assert_eq!(Route::parse("/page/7").unwrap(), Route::Page(7));
        assert_eq!(Route::parse("/page/7/").unwrap(), Route::Page(7));
    }

    #[test]
    fn test_parse_tag_route_decodes_tag() {
        assert_eq!(
            Route::parse("/tag/central%20banks/page/2").unwrap(),
            Route::TagPage {
                tag: "central banks".to_string(),
                page: 2
            }
        );
    }

    #[test]
    fn test_parse_tag_without_page() {
        assert_eq!(
            Route::parse("/tag/fx").unwrap(),
            Route::TagPage {
                tag: "fx".to_string(),
                page: 1
            }
        );
    }

    #[test]
    fn test_invalid_pages() {
        assert_eq!(
            Route::parse("/page/0"),
            Err(RouteError::InvalidPage("0".to_string()))
        );
        assert_eq!(
            Route::parse("/page/abc"),
            Err(RouteError::InvalidPage("abc".to_string()))
        );
        assert_eq!(
            Route::parse("/page/-3"),
            Err(RouteError::InvalidPage("-3".to_string()))
        );
    }

    #[test]
    fn test_unknown_route() {
        assert!(matches!(Route::parse("/articles/1"), Err(RouteError::NoMatch(_))));
    }

    #[test]
    fn test_resolve_falls_back_to_first_page() {
        assert_eq!(Route::resolve("/nope"), Route::Page(1));
        assert_eq!(Route::resolve("/page/x"), Route::Page(1));
        assert_eq!(Route::resolve("/page/3"), Route::Page(3));
    }

    #[test]
    fn test_display_encodes_tag() {
        let route = Route::TagPage {
            tag: "central banks".to_string(),
            page: 3,
        };
        assert_eq!(route.to_path(), "/tag/central%20banks/page/3");
        assert_eq!(Route::parse(&route.to_path()).unwrap(), route);
        assert_eq!(Route::Page(4).to_string(), "/page/4");
    }

    #[test]
    fn test_with_page_and_with_tag() {
        let route = Route::TagPage {
            tag: "fx".to_string(),
            page: 1,
        };
        assert_eq!(route.with_page(5).page(), 5);
        assert_eq!(route.with_page(5).tag(), Some("fx"));
        assert_eq!(Route::Page(9).with_tag(Some("oil")).to_path(), "/tag/oil/page/1");
        assert_eq!(route.with_tag(None), Route::Page(1));
    }
}
