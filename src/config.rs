use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://www.bing.com/news/search";
pub const DEFAULT_QUERY_PARAM: &str = "q";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/123.0 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONTAINER_ID: &str = "algocore";
pub const DEFAULT_URL_ATTRIBUTE: &str = "url";
pub const MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024;

/// Everything a search call needs to know about the remote results page.
///
/// The defaults target Bing News: the results container is the element with
/// `id="algocore"` and every result entry carries its link in a `url`
/// attribute. Tests point `endpoint` at a local server and shrink `timeout`.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub endpoint: Url,
    pub query_param: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub container_id: String,
    pub url_attribute: String,
    pub max_response_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            query_param: DEFAULT_QUERY_PARAM.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            url_attribute: DEFAULT_URL_ATTRIBUTE.to_string(),
            max_response_size: MAX_RESPONSE_SIZE,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>) -> Self {
        self.query_param = name.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }

    pub fn with_url_attribute(mut self, name: impl Into<String>) -> Self {
        self.url_attribute = name.into();
        self
    }

    pub fn with_max_response_size(mut self, bytes: usize) -> Self {
        self.max_response_size = bytes;
        self
    }
}
