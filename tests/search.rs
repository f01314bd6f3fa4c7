use cuit_scraper::cuitonline::{CuitOnline, PersonType, SearchSession};
use cuit_scraper::{Fetcher, Result, ScraperError};
use pretty_assertions::assert_eq;
use std::sync::Mutex;
use url::Url;

/// Answers every search with the two-hit fixture and every detail page with
/// the full detail fixture, recording the URLs asked for.
#[derive(Default)]
struct Site {
    visited: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl Fetcher for Site {
    async fn get(&self, url: &Url) -> Result<String> {
        self.visited.lock().unwrap().push(url.to_string());
        let path = match url.path() {
            "/search.php" => "tests/htmls/search.html",
            p if p.starts_with("/detalle/") => "tests/htmls/detail.html",
            _ => {
                return Err(ScraperError::Status {
                    url: url.to_string(),
                    status: 404,
                })
            }
        };
        Ok(std::fs::read_to_string(path).expect("Invalid file path"))
    }
}

#[tokio::test]
async fn search_juan_perez_first_page() {
    let client = CuitOnline::new(Site::default());
    let session = SearchSession::start(&client, "Juan Perez", 1).await.unwrap();

    assert_eq!(session.term(), "Juan Perez");
    assert_eq!(session.page(), 1);
    assert_eq!(session.results().len(), 2);
    for person in session.results() {
        assert!(!person.name().is_empty());
        assert!(!person.cuit().is_empty());
        assert!(person.url().starts_with("https://www.cuitonline.com/detalle/"));
        assert_eq!(person.person_type(), PersonType::Fisica);
    }
    assert_eq!(session.results()[0].name(), "PEREZ JUAN");
    assert_eq!(session.results()[1].name(), "PEREZ JUAN CARLOS");

    let visited = client.fetcher().visited.lock().unwrap().clone();
    assert_eq!(
        visited,
        vec!["https://www.cuitonline.com/search.php?q=Juan+Perez&f5%5B%5D=persona%3Afisica&pn=1"]
    );
}

#[tokio::test]
async fn json_output_with_and_without_details() {
    let client = CuitOnline::new(Site::default());
    let mut session = SearchSession::start(&client, "Juan Perez", 1).await.unwrap();

    let before = serde_json::to_value(session.views()).unwrap();
    assert_eq!(
        before[0],
        serde_json::json!({
            "nombre": "PEREZ JUAN",
            "cuit": "20-12345678-3",
            "tipo_persona": "física",
            "url": "https://www.cuitonline.com/detalle/20123456783/perez-juan.html",
            "dni": 12345678,
        })
    );

    session.load_details().await.unwrap();
    let after = serde_json::to_value(session.views()).unwrap();
    assert_eq!(after[1]["dni"], 23456789);
    assert_eq!(after[1]["genero"], "Masculino");
    assert_eq!(after[1]["monotributo"], "Sí");
    assert_eq!(after[1]["empleador"], true);
    assert_eq!(client.fetcher().visited.lock().unwrap().len(), 3);

    let printed = session.to_json().unwrap();
    assert!(printed.starts_with("[\n  {"));
    assert!(printed.contains("\"tipo_persona\": \"física\""));
}

#[tokio::test]
async fn next_page_advances_counter() {
    let client = CuitOnline::new(Site::default());
    let mut session = SearchSession::start(&client, "Juan Perez", 4).await.unwrap();

    session.next_page().await.unwrap();

    assert_eq!(session.page(), 5);
    // Same fixture for every page: replaced, not appended.
    assert_eq!(session.results().len(), 2);
    let visited = client.fetcher().visited.lock().unwrap().clone();
    assert!(visited[1].ends_with("&pn=5"));
}
