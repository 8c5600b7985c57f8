use std::path::PathBuf;

use reqwest::StatusCode;
use scraper::Html;

use crate::config::{Config, Settings, load_settings};
use crate::error::ScrapeError;
use crate::extract::{Record, extract, parse_selector};
use crate::http_client::HttpClient;
use crate::output::write_results;
use crate::robots;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub records: usize,
}

/// Runs one scrape: load settings, check robots.txt, fetch, extract, write.
///
/// Any error ends the run. `result.json` is only written once extraction
/// has completed.
pub async fn run(config: &Config, client: &HttpClient) -> Result<RunSummary, ScrapeError> {
    let settings = load_settings(config)?;
    tracing::info!(
        "Loaded settings from {:?}: url={} selector={}",
        config.setting_path(),
        settings.url,
        settings.selector
    );

    robots::check(client, &settings.url, &config.robots_agent).await?;
    tracing::info!("Crawling {} is permitted", settings.url);

    let document = fetch_page(client, &settings.url).await?;
    let records = extract_records(config, &settings, &document);

    let output = config.result_path();
    write_results(&output, &records)?;
    tracing::info!("Saved {} records to {:?}", records.len(), output);

    Ok(RunSummary {
        output,
        records: records.len(),
    })
}

async fn fetch_page(client: &HttpClient, url: &str) -> Result<Html, ScrapeError> {
    tracing::info!("Fetching page: {}", url);

    let response = client
        .fetch(url)
        .await
        .map_err(|source| ScrapeError::PageFetchError {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(ScrapeError::PageHttpStatusError {
            url: url.to_string(),
            status,
        });
    }

    let html = response
        .text()
        .await
        .map_err(|source| ScrapeError::PageParseError {
            url: url.to_string(),
            source,
        })?;
    tracing::debug!("Fetched {} bytes from {}", html.len(), url);

    Ok(Html::parse_document(&html))
}

fn extract_records(config: &Config, settings: &Settings, document: &Html) -> Vec<Record> {
    match parse_selector(&settings.selector) {
        Some(selector) => extract(document, &selector, &settings.url, config.href_match),
        None => Vec::new(),
    }
}
