//! Unofficial client for the person search of cuitonline.com.
//!
//! Search results are scraped from static HTML into [`cuitonline::Person`]
//! records. Each record can be enriched on demand with the fields of its
//! detail page, fetched at most once.

use url::Url;

pub mod cuitonline;
pub mod extract;
pub mod http;

mod error;

#[cfg(test)]
mod testing;

pub use error::{Result, ScraperError};
pub use extract::{extract, Extract};
pub use http::HttpFetcher;

/// Source of HTML pages.
///
/// Implementations must fail with an error for non-success responses rather
/// than returning the error page body.
#[async_trait::async_trait]
pub trait Fetcher {
    async fn get(&self, url: &Url) -> Result<String>;
}
