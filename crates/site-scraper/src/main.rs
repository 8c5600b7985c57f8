use site_scraper::config::Config;
use site_scraper::error::ScrapeError;
use site_scraper::http_client::HttpClient;
use site_scraper::pipeline;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "site_scraper=info,site_scrape=info";

async fn scrape() -> Result<pipeline::RunSummary, ScrapeError> {
    let config = Config::from_env()?;
    tracing::info!("Initializing scraper for directory: {:?}", config.target_dir);

    let client = HttpClient::new(&config.user_agent).map_err(ScrapeError::ClientInitError)?;
    pipeline::run(&config, &client).await
}

// Handled failures are logged and the process still exits normally.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match scrape().await {
        Ok(summary) => {
            tracing::info!(
                "Scraping complete: {} records written to {:?}",
                summary.records,
                summary.output
            );
        }
        Err(e) => {
            tracing::error!("Scraping failed: {}", e);
        }
    }
}
