//! Mock HTTP client for testing.
//!
//! Responses are matched by exact URL, then by URL prefix, then fall back to
//! the default response. Every request is recorded for later assertions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Headers,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Fail at the transport level
    Error(HttpError),
    /// Return the response after sleeping, to exercise out-of-order completion
    Delayed(Duration, Response),
}

/// Mock HTTP client for testing.
///
/// ```ignore
/// let client = MockHttpClient::new();
/// client.set_default_response(MockResponse::Success(Response::json_body(&body)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a URL or URL prefix.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, url: &str, headers: &Headers) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        // Longest prefix wins so that specific page URLs beat the bare endpoint
        let prefix_match = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone());
        if prefix_match.is_some() {
            return prefix_match;
        }

        self.default_response.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request(url, headers);

        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Delayed(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_exact_match_and_recording() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://api.test/a",
            MockResponse::Success(Response::new(200, Bytes::from("a"))),
        );

        let response = client.get("https://api.test/a", &Headers::new()).await.unwrap();
        assert_eq!(response.text().unwrap(), "a");

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://api.test/a");
    }

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://api.test/",
            MockResponse::Success(Response::new(200, Bytes::from("short"))),
        );
        client.set_response(
            "https://api.test/items?page=2",
            MockResponse::Success(Response::new(200, Bytes::from("long"))),
        );

        let response = client
            .get("https://api.test/items?page=2&x=1", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.text().unwrap(), "long");
    }

    #[tokio::test]
    async fn test_error_and_missing_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://api.test/down",
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );

        let err = client.get("https://api.test/down", &Headers::new()).await.unwrap_err();
        assert!(matches!(err, HttpError::ConnectionFailed(_)));

        let err = client.get("https://other.test/", &Headers::new()).await.unwrap_err();
        assert!(matches!(err, HttpError::Other(_)));
    }

    #[tokio::test]
    async fn test_clear_requests() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Success(Response::new(204, Bytes::new())));
        let _ = client.get("https://api.test/x", &Headers::new()).await;
        client.clear_requests();
        assert!(client.get_requests().is_empty());
    }
}
