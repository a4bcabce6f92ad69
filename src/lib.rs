//! Scrape result URLs from a news search results page.
//!
//! ```no_run
//! let urls = newsfetch::search_news("Kurt Cobain");
//! println!("{urls:?}");
//! ```

pub mod config;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod observer;
pub mod parser;
pub mod query;

pub use config::SearchConfig;
pub use error::{ErrorKind, SearchError};
pub use fetcher::{SearchFetcher, search_news};
pub use http_client::{FetchError, SearchRequest};
pub use observer::{RecordingObserver, Report, SearchObserver, TracingObserver};
pub use parser::{ParseError, ParsedResults};
pub use query::Query;
