mod person;

pub use person::{Person, PersonDetails, PersonType, PersonView};

use crate::{Fetcher, Result, ScraperError};
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

pub const BASE_URL: &str = "https://www.cuitonline.com";
const SEARCH_PATH: &str = "search.php";
const PERSON_FILTER: &str = "persona:fisica";

const E: &str = "Invalid selector";
lazy_static! {
    static ref HIT: Selector = Selector::parse(".hit").expect(E);
}

/// Search client for cuitonline.com.
#[derive(Debug, Clone)]
pub struct CuitOnline<F> {
    base_url: String,
    fetcher: F,
}

impl<F: Fetcher> CuitOnline<F> {
    pub fn new(fetcher: F) -> Self {
        CuitOnline {
            base_url: BASE_URL.to_string(),
            fetcher,
        }
    }

    /// Client for a mirror of the site rooted at `base_url`.
    pub fn with_base_url(fetcher: F, base_url: &str) -> Result<Self> {
        Url::parse(base_url)?;
        Ok(CuitOnline {
            base_url: base_url.trim_end_matches('/').to_string(),
            fetcher,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn search_url(&self, term: &str, page: u32) -> Result<Url> {
        let page = page.to_string();
        let url = Url::parse_with_params(
            &format!("{}/{}", self.base_url, SEARCH_PATH),
            &[("q", term), ("f5[]", PERSON_FILTER), ("pn", page.as_str())],
        )?;
        Ok(url)
    }

    /// Natural persons matching `term` on results page `page`, in the order
    /// the site lists them. A page past the last one yields an empty list.
    pub async fn search(&self, term: &str, page: u32) -> Result<Vec<Person>> {
        let url = self.search_url(term, page)?;
        debug!("Search {:?} page {}: {}", term, page, url);
        let html = self.fetcher.get(&url).await?;

        let persons = {
            let doc = Html::parse_document(&html);
            self.parse_results(&doc)?
        };

        if persons.is_empty() {
            warn!("No results for {:?} on page {}", term, page);
        } else {
            info!("[page {}] {} results for {:?}", page, persons.len(), term);
        }
        Ok(persons)
    }

    /// Builds one [`Person`] per hit. Fails on the first malformed hit.
    pub fn parse_results(&self, doc: &Html) -> Result<Vec<Person>> {
        doc.select(&HIT)
            .map(|hit| Person::from_hit(hit, &self.base_url))
            .collect()
    }
}

/// A search term walked page by page.
///
/// Only the current page is held: moving to the next page replaces the
/// results instead of accumulating them.
#[derive(Debug)]
pub struct SearchSession<'c, F> {
    client: &'c CuitOnline<F>,
    term: String,
    page: u32,
    results: Vec<Person>,
}

impl<'c, F: Fetcher> SearchSession<'c, F> {
    /// Runs the search for `term` starting at `page`. Pages start at 1.
    pub async fn start(
        client: &'c CuitOnline<F>,
        term: impl Into<String>,
        page: u32,
    ) -> Result<Self> {
        if page == 0 {
            return Err(ScraperError::PageOutOfRange(0));
        }
        let term = term.into();
        let results = client.search(&term, page).await?;
        Ok(SearchSession {
            client,
            term,
            page,
            results,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn results(&self) -> &[Person] {
        &self.results
    }

    /// Moves to the following page, replacing the current results.
    ///
    /// The page counter advances before the fetch: if the fetch fails the
    /// session is left on the new page with the previous results.
    pub async fn next_page(&mut self) -> Result<&[Person]> {
        self.page = self
            .page
            .checked_add(1)
            .ok_or(ScraperError::PageOutOfRange(u64::from(self.page) + 1))?;
        self.results = self.client.search(&self.term, self.page).await?;
        Ok(&self.results)
    }

    /// Loads the detail page of every current result, one at a time.
    pub async fn load_details(&mut self) -> Result<()> {
        for person in &mut self.results {
            person.details(self.client.fetcher()).await?;
        }
        Ok(())
    }

    pub fn views(&self) -> Vec<PersonView<'_>> {
        self.results.iter().map(Person::view).collect()
    }

    /// Current results as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.views())?)
    }

    /// What the command line prints: the JSON results, a blank line and the
    /// current page.
    pub fn report(&self) -> Result<String> {
        Ok(format!("{}\n\nPágina Actual: {}", self.to_json()?, self.page))
    }
}
