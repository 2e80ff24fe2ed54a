use std::sync::Arc;

use crate::adapters::ReqwestHttpClient;
use crate::config::ViewerConfig;
use crate::error::FetchError;
use crate::models::PublicationsResponse;
use crate::route::Route;
use crate::traits::{Headers, HttpClient};

/// Parameters of one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page_number: u32,
    pub page_size: u32,
    pub tag: Option<String>,
}

impl PageQuery {
    pub fn for_route(route: &Route, page_size: u32) -> Self {
        Self {
            page_number: route.page(),
            page_size,
            tag: route.tag().map(str::to_string),
        }
    }
}

/// Issues one GET per page view and decodes the `{ result, pagination }` body.
#[derive(Clone)]
pub struct PublicationsClient {
    http: Arc<dyn HttpClient>,
    endpoint: String,
    fields: String,
    tag_param: String,
}

impl std::fmt::Debug for PublicationsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicationsClient")
            .field("endpoint", &self.endpoint)
            .field("fields", &self.fields)
            .field("tag_param", &self.tag_param)
            .finish()
    }
}

impl PublicationsClient {
    pub fn new(config: &ViewerConfig, http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            endpoint: config.publications_url(),
            fields: config.fields.clone(),
            tag_param: config.tag_param.clone(),
        }
    }

    /// Production client backed by reqwest, honouring the configured timeout.
    pub fn from_config(config: &ViewerConfig) -> Result<Self, FetchError> {
        let http = match config.http_timeout {
            Some(timeout) => ReqwestHttpClient::with_timeout(timeout)?,
            None => ReqwestHttpClient::new(),
        };
        Ok(Self::new(config, Arc::new(http)))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full request URL for `query`.
    pub fn page_url(&self, query: &PageQuery) -> String {
        let mut url = format!(
            "{}?fields={}&pageSize={}&pageNumber={}",
            self.endpoint,
            urlencoding::encode(&self.fields),
            query.page_size,
            query.page_number
        );
        if let Some(tag) = &query.tag {
            url.push('&');
            url.push_str(&urlencoding::encode(&self.tag_param));
            url.push('=');
            url.push_str(&urlencoding::encode(tag));
        }
        url
    }

    pub async fn fetch_page(&self, query: &PageQuery) -> Result<PublicationsResponse, FetchError> {
        let url = self.page_url(query);
        tracing::debug!(url = %url, "fetching publications page");

        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        let response = self.http.get(&url, &headers).await?;
        if !response.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FetchError::Status {
                status: response.status,
                body,
            });
        }

        let page: PublicationsResponse = response.json()?;
        tracing::info!(
            page_number = page.pagination.page_number,
            total = page.pagination.total,
            count = page.result.len(),
            "publications page loaded"
        );
        Ok(page)
    }
}
