// src/fetch/client.rs
use crate::utils::error::FetchError;
use async_trait::async_trait;
use reqwest::header;

pub const DEFAULT_USER_AGENT: &str = concat!("page_qa/", env!("CARGO_PKG_VERSION"));

/// Anything that can turn a URL into raw document text.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetches pages over HTTP(S) with reqwest.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    /// Downloads a page and returns its body as text.
    /// Network failures and non-2xx statuses both surface as `FetchError`.
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| FetchError::InvalidUrl(url.to_string(), e.to_string()))?;

        tracing::info!("Downloading document from: {}", parsed);

        let response = self.client.get(parsed)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,text/plain,*/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            return Err(FetchError::Http(status));
        }

        let body = response.text().await?;
        tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/article"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Hello</h1>"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT).unwrap();
        let body = fetcher.fetch(&format!("{}/article", server.uri())).await.unwrap();
        assert_eq!(body, "<h1>Hello</h1>");
    }

    #[tokio::test]
    async fn test_fetch_maps_non_success_status_to_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT).unwrap();
        let result = fetcher.fetch(&format!("{}/missing", server.uri())).await;
        match result {
            Err(FetchError::Http(status)) => assert_eq!(status, reqwest::StatusCode::NOT_FOUND),
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_rejects_invalid_url() {
        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT).unwrap();
        let result = tokio_test::block_on(fetcher.fetch("not a url"));
        assert!(matches!(result, Err(FetchError::InvalidUrl(..))));
    }
}
