use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use futures::stream::{self, StreamExt};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use profile_common::Config;
use profile_scraper::chrome::ChromeSession;
use profile_scraper::{ProfileScraper, ScrapeOptions};

#[derive(Parser)]
#[command(name = "profile-scraper", about = "Scrape professional profile pages into JSON")]
struct Cli {
    /// Profile URLs to scrape
    #[arg(required = true)]
    urls: Vec<String>,

    /// Total pacing delay around the expand step, in ms (0 disables it)
    #[arg(long)]
    pacing_ms: Option<u64>,

    /// Also open the contact-info overlay
    #[arg(long)]
    contact: bool,

    /// Max profiles scraped at once, each on its own page
    #[arg(long)]
    concurrency: Option<usize>,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let options = ScrapeOptions::builder()
        .pacing(Duration::from_millis(cli.pacing_ms.unwrap_or(config.pacing_ms)))
        .include_contact(cli.contact || config.include_contact)
        .auth(config.credentials())
        .build();

    let concurrency = cli.concurrency.unwrap_or(config.concurrency).max(1);
    let cookies = config.cookies();
    let session = ChromeSession::connect(&config.page_backend).await?;
    let scraper = ProfileScraper::default();

    info!(urls = cli.urls.len(), concurrency, "Scraping profiles");

    let (session_ref, cookies_ref, options_ref, scraper_ref) =
        (&session, cookies.as_slice(), &options, &scraper);
    let results: Vec<_> = stream::iter(cli.urls.iter())
        .map(|url| async move {
            let result = scraper_ref
                .scrape_profile(session_ref, cookies_ref, url, options_ref)
                .await;
            (url, result)
        })
        .buffered(concurrency)
        .collect()
        .await;

    let total = results.len();
    let mut profiles = Vec::with_capacity(total);
    for (url, result) in results {
        match result {
            Ok(profile) => profiles.push(profile),
            Err(e) => error!(url = url.as_str(), error = %format!("{e:#}"), "Profile scrape failed"),
        }
    }
    let failed = total - profiles.len();

    let json = serde_json::to_string_pretty(&profiles)?;
    match &cli.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{json}"),
    }

    session.close().await?;
    info!(scraped = profiles.len(), failed, "Done");

    if failed > 0 {
        anyhow::bail!("{failed} of {total} profiles failed");
    }
    Ok(())
}
