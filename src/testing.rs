use crate::{Fetcher, Result, ScraperError};
use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

/// Serves fixture files by URL and counts requests. Unknown URLs answer 404.
#[derive(Debug, Default)]
pub(crate) struct FixtureFetcher {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
}

impl FixtureFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, url: impl AsRef<str>, path: &str) -> Self {
        let html = fs::read_to_string(path).expect("Invalid file path");
        self.pages.insert(url.as_ref().to_string(), html);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Fetcher for FixtureFetcher {
    async fn get(&self, url: &Url) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| ScraperError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}
