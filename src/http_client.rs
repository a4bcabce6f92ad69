use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use thiserror::Error;
use url::Url;

use crate::config::SearchConfig;
use crate::query::Query;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";

/// A single GET against the results endpoint, built fresh for every call.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    url: Url,
    query_param: String,
}

impl SearchRequest {
    pub fn new(config: &SearchConfig, query: &Query) -> Self {
        let mut url = config.endpoint.clone();
        url.query_pairs_mut()
            .append_pair(&config.query_param, query.as_str());
        Self {
            url,
            query_param: config.query_param.clone(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The value sent for the query parameter, decoded.
    pub fn query_value(&self) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(name, _)| name == self.query_param.as_str())
            .map(|(_, value)| value.into_owned())
    }
}

pub struct HttpClient {
    client: Client,
    max_response_size: usize,
}

impl HttpClient {
    pub fn new(config: &SearchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

        // One request per search; nothing is kept alive between calls.
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            client,
            max_response_size: config.max_response_size,
        })
    }

    pub async fn fetch(&self, request: &SearchRequest) -> Result<String, FetchError> {
        let mut response = self.client.get(request.url().clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpError(status.as_u16()));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_response_size as u64 {
                return Err(FetchError::TooLarge(content_length));
            }
        }

        // Chunked responses carry no length, so the cap is enforced while reading.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let received = body.len() + chunk.len();
            if received > self.max_response_size {
                return Err(FetchError::TooLarge(received as u64));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    HttpError(u16),
    #[error("Response too large: {0} bytes")]
    TooLarge(u64),
    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(#[source] reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err)
        } else {
            FetchError::RequestError(err)
        }
    }
}
