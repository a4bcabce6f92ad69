use std::sync::Arc;

use tracing::Level;

use crate::config::SearchConfig;
use crate::error::{ErrorKind, SearchError};
use crate::http_client::{HttpClient, SearchRequest};
use crate::observer::{SearchObserver, TracingObserver};
use crate::parser::{ResultSelectors, parse_results};
use crate::query::Query;

/// Fetches a results page for a query and pulls the result URLs out of it.
///
/// Every call makes at most one request and never retries. Failures are
/// reported to the observer and collapse to `None` in [`search`](Self::search);
/// [`try_search`](Self::try_search) exposes them as [`SearchError`] instead.
pub struct SearchFetcher {
    config: SearchConfig,
    client: HttpClient,
    selectors: ResultSelectors,
    observer: Arc<dyn SearchObserver>,
}

impl SearchFetcher {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let client = HttpClient::new(&config)?;
        let selectors = ResultSelectors::new(&config.container_id, &config.url_attribute)?;
        Ok(Self {
            config,
            client,
            selectors,
            observer: Arc::new(TracingObserver),
        })
    }

    pub fn with_defaults() -> Result<Self, SearchError> {
        Self::new(SearchConfig::default())
    }

    pub fn with_observer(mut self, observer: Arc<dyn SearchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Runs a search, returning `None` on any failure.
    pub async fn search(&self, query: &str) -> Option<Vec<String>> {
        match self.try_search(query).await {
            Ok(urls) => Some(urls),
            Err(err) => {
                self.report_failure(query, &err);
                None
            }
        }
    }

    /// Blocking form of [`search`](Self::search).
    ///
    /// Drives the search on a private current-thread runtime. Calling this
    /// from inside an async runtime is reported and yields `None`.
    pub fn search_blocking(&self, query: &str) -> Option<Vec<String>> {
        if tokio::runtime::Handle::try_current().is_ok() {
            self.observer.report(
                Level::ERROR,
                "Blocking search called from within an async runtime",
                &[("query", format!("{query:?}"))],
            );
            return None;
        }

        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                self.observer.report(
                    Level::ERROR,
                    "Failed to start runtime for blocking search",
                    &[("error", e.to_string())],
                );
                return None;
            }
        };

        runtime.block_on(self.search(query))
    }

    pub async fn try_search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let query = Query::parse(query)?;
        let request = SearchRequest::new(&self.config, &query);
        self.observer.report(
            Level::DEBUG,
            "Sending search request",
            &[("url", request.url().to_string())],
        );

        let body = self.client.fetch(&request).await?;

        let parsed = parse_results(&body, &self.selectors)?;
        if !parsed.container_found {
            return Err(SearchError::StructureMismatch {
                container_id: self.config.container_id.clone(),
            });
        }

        self.observer.report(
            Level::INFO,
            "Extracted URLs for query",
            &[
                ("count", parsed.urls.len().to_string()),
                ("query", query.to_string()),
            ],
        );
        Ok(parsed.urls)
    }

    fn report_failure(&self, query: &str, err: &SearchError) {
        let (level, message) = match err.kind() {
            ErrorKind::InvalidInput => (Level::WARN, "Invalid or empty query provided"),
            ErrorKind::FetchFailure => (Level::ERROR, "Failed to fetch search results"),
            ErrorKind::StructureMismatch => (Level::ERROR, "Results page did not match expected layout"),
        };
        self.observer.report(
            level,
            message,
            &[("query", format!("{query:?}")), ("error", err.to_string())],
        );
    }
}

/// Searches with the default configuration, blocking the caller.
pub fn search_news(query: &str) -> Option<Vec<String>> {
    match SearchFetcher::with_defaults() {
        Ok(fetcher) => fetcher.search_blocking(query),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build search fetcher");
            None
        }
    }
}
