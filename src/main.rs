use clap::Parser;
use cuit_scraper::cuitonline::{CuitOnline, SearchSession, BASE_URL};
use cuit_scraper::HttpFetcher;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

/// Search people on CUIT Online.
#[derive(Parser, Debug)]
#[command(name = "cuit-scraper", version, about)]
struct Cli {
    /// Search term (name, CUIT, DNI, ...)
    term: String,

    /// Results page to start from
    #[arg(
        short,
        long = "pagina",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pagina: u32,

    /// Also fetch the detail page of every result
    #[arg(short, long = "detalles")]
    detalles: bool,

    /// Site root, for mirrors or local fixtures
    #[arg(long, default_value = BASE_URL)]
    base_url: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let cli = Cli::parse();

    let client = CuitOnline::with_base_url(HttpFetcher::new()?, &cli.base_url)?;
    let mut session = SearchSession::start(&client, cli.term.as_str(), cli.pagina).await?;

    if cli.detalles {
        info!("Loading details of {} results", session.results().len());
        session.load_details().await?;
    }

    println!("{}", session.report()?);

    Ok(())
}
