use crate::{extract, Extract, Fetcher, Result, ScraperError};
use lazy_regex::regex;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::fmt;
use tracing::debug;
use url::Url;

const E: &str = "Invalid selector";
lazy_static! {
    static ref NAME: Selector = Selector::parse(".denominacion h2").expect(E);
    static ref CUIT: Selector = Selector::parse(".linea-cuit-persona .cuit").expect(E);
    static ref LINK: Selector = Selector::parse(".denominacion a").expect(E);
    static ref LI: Selector = Selector::parse("li").expect(E);
    static ref SPAN: Selector = Selector::parse("span").expect(E);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PersonType {
    #[serde(rename = "física")]
    Fisica,
    #[serde(rename = "jurídica")]
    Juridica,
}

impl fmt::Display for PersonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonType::Fisica => write!(f, "física"),
            PersonType::Juridica => write!(f, "jurídica"),
        }
    }
}

/// Fields only available on a person's detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonDetails {
    #[serde(rename = "genero")]
    pub gender: Option<String>,
    #[serde(rename = "direccion")]
    pub street_address: Option<String>,
    #[serde(rename = "provincia")]
    pub province: Option<String>,
    #[serde(rename = "localidad")]
    pub locality: Option<String>,
    #[serde(rename = "nacionalidad")]
    pub nationality: Option<String>,
    /// Simplified tax regime category, as printed on the page.
    pub monotributo: Option<String>,
    #[serde(rename = "empleador")]
    pub employer: bool,
}

impl PersonDetails {
    pub fn from_document(doc: &Html) -> Self {
        let root = doc.root_element();
        let itemprop = |value| {
            extract(
                root,
                &Extract::Attribute {
                    name: "itemprop",
                    value,
                },
            )
        };
        let labelled = |label| {
            extract(
                root,
                &Extract::Labelled {
                    item: &LI,
                    label,
                    value: &SPAN,
                },
            )
        };

        PersonDetails {
            gender: itemprop("gender"),
            street_address: itemprop("streetAddress"),
            province: itemprop("addressRegion"),
            locality: itemprop("addressLocality"),
            nationality: itemprop("nationality"),
            monotributo: labelled("Monotributista"),
            employer: labelled("Empleador").as_deref() == Some("Sí"),
        }
    }
}

/// One search hit.
///
/// Identity fields are fixed at construction. Detail fields are fetched from
/// [`Person::url`] the first time [`Person::details`] is called and kept for
/// the lifetime of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: String,
    cuit: String,
    person_type: PersonType,
    url: String,
    details: Option<PersonDetails>,
}

impl Person {
    pub fn new(
        name: impl Into<String>,
        cuit: impl Into<String>,
        person_type: PersonType,
        url: impl Into<String>,
    ) -> Self {
        Person {
            name: name.into(),
            cuit: cuit.into(),
            person_type,
            url: url.into(),
            details: None,
        }
    }

    /// Builds a record from one `.hit` element of the results page.
    pub fn from_hit(hit: ElementRef<'_>, base_url: &str) -> Result<Self> {
        let name =
            extract(hit, &Extract::Selector(&NAME)).ok_or(ScraperError::MissingField("nombre"))?;
        let cuit =
            extract(hit, &Extract::Selector(&CUIT)).ok_or(ScraperError::MissingField("cuit"))?;
        let href = hit
            .select(&LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or(ScraperError::MissingField("url"))?;

        Ok(Person::new(
            name,
            cuit,
            PersonType::Fisica,
            format!("{}/{}", base_url, href),
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cuit(&self) -> &str {
        &self.cuit
    }

    pub fn person_type(&self) -> PersonType {
        self.person_type
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// National ID embedded in the CUIT, for natural persons only.
    pub fn dni(&self) -> Option<u64> {
        if self.person_type != PersonType::Fisica {
            return None;
        }
        regex!(r"^\s*\d{2}-(\d{1,8})-\d\s*$")
            .captures(&self.cuit)
            .and_then(|c| c[1].parse().ok())
    }

    /// Details if they were already loaded. Never fetches.
    pub fn cached_details(&self) -> Option<&PersonDetails> {
        self.details.as_ref()
    }

    /// Details of this person, fetching the detail page on first use.
    pub async fn details<F: Fetcher + ?Sized>(
        &mut self,
        fetcher: &F,
    ) -> Result<&PersonDetails> {
        let details = match self.details.take() {
            Some(details) => details,
            None => self.fetch_details(fetcher).await?,
        };
        Ok(&*self.details.insert(details))
    }

    async fn fetch_details<F: Fetcher + ?Sized>(&self, fetcher: &F) -> Result<PersonDetails> {
        let url = Url::parse(&self.url)?;
        debug!("Load details of {} from {}", self.cuit, url);
        let html = fetcher.get(&url).await?;

        let doc = Html::parse_document(&html);
        Ok(PersonDetails::from_document(&doc))
    }

    /// Serializable snapshot of the record. Detail fields are included only
    /// when already loaded.
    pub fn view(&self) -> PersonView<'_> {
        PersonView {
            name: &self.name,
            cuit: &self.cuit,
            person_type: self.person_type,
            url: &self.url,
            dni: self.dni(),
            details: self.details.as_ref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PersonView<'a> {
    #[serde(rename = "nombre")]
    pub name: &'a str,
    pub cuit: &'a str,
    #[serde(rename = "tipo_persona")]
    pub person_type: PersonType,
    pub url: &'a str,
    pub dni: Option<u64>,
    #[serde(flatten)]
    pub details: Option<&'a PersonDetails>,
}
