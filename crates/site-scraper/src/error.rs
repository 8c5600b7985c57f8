use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Terminal failures of a scrape run.
///
/// Every variant ends the run. Problems with a single matched element never
/// surface here; the extractor drops that element and carries on.
#[derive(Error, Debug, Diagnostic)]
pub enum ScrapeError {
    #[error("TARGET_PATH is not set")]
    #[diagnostic(
        code(site_scraper::config::missing_path),
        help("Set TARGET_PATH to the directory containing setting.json.")
    )]
    ConfigMissingPath,
    #[error("Failed to access target directory {path:?}: {source}")]
    #[diagnostic(code(site_scraper::config::target_unavailable))]
    TargetPathUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Target path {0:?} is not a directory")]
    #[diagnostic(code(site_scraper::config::not_directory))]
    PathNotDirectory(PathBuf),
    #[error("Setting file {0:?} does not exist")]
    #[diagnostic(
        code(site_scraper::config::setting_missing),
        help(r#"Create setting.json with {{"url": "...", "selector": "..."}}."#)
    )]
    SettingFileMissing(PathBuf),
    #[error("Setting file {0:?} is a directory")]
    #[diagnostic(code(site_scraper::config::setting_is_directory))]
    SettingFileIsDirectory(PathBuf),
    #[error("Failed to read setting file {path:?}: {source}")]
    #[diagnostic(code(site_scraper::config::setting_unreadable))]
    SettingFileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode setting file {path:?}: {source}")]
    #[diagnostic(code(site_scraper::config::decode))]
    ConfigDecodeError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid setting file {path:?}: {source}")]
    #[diagnostic(code(site_scraper::config::validation))]
    ConfigValidationError {
        path: PathBuf,
        source: ValidationError,
    },
    #[error("Crawl permission check failed: {0}")]
    #[diagnostic(code(site_scraper::robots))]
    RobotsCheckError(#[from] RobotsError),
    #[error("Failed to initialize HTTP client: {0}")]
    #[diagnostic(code(site_scraper::fetch::client))]
    ClientInitError(reqwest::Error),
    #[error("HTTP request failed for {url}: {source}")]
    #[diagnostic(code(site_scraper::fetch::request))]
    PageFetchError { url: String, source: reqwest::Error },
    #[error("HTTP status {status} for {url}")]
    #[diagnostic(code(site_scraper::fetch::status))]
    PageHttpStatusError {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Failed to parse HTML from {url}: {source}")]
    #[diagnostic(code(site_scraper::parse))]
    PageParseError { url: String, source: reqwest::Error },
    #[error("Failed to encode results: {0}")]
    #[diagnostic(code(site_scraper::output::encode))]
    ResultEncodeError(serde_json::Error),
    #[error("Failed to create result file {path:?}: {source}")]
    #[diagnostic(code(site_scraper::output::create))]
    ResultFileCreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write result file {path:?}: {source}")]
    #[diagnostic(code(site_scraper::output::write))]
    ResultWriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("url is not set")]
    MissingUrl,
    #[error("selector is not set")]
    MissingSelector,
}

#[derive(Error, Debug)]
pub enum RobotsError {
    #[error(transparent)]
    UrlParse(#[from] UrlParseError),
    #[error("Failed to fetch {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },
    #[error(
        "Crawling {url} is not permitted{}",
        .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
    )]
    Disallowed {
        url: String,
        status: Option<reqwest::StatusCode>,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlParseError {
    #[error("Failed to parse URL {url}: {source}")]
    Invalid {
        url: String,
        source: url::ParseError,
    },
    #[error("URL {url} has no host")]
    MissingHost { url: String },
}
