//! Single-page scraper that turns selector matches into JSON records.
//!
//! A run reads `setting.json` from a target directory, checks the site's
//! robots.txt, fetches the configured page, collects the link target and
//! text of every element matching the selector, and writes the records to
//! `result.json` in the same directory.
//!
//! # Features
//!
//! - robots.txt compliance (403/5xx deny, missing or unreadable rules allow)
//! - CSS selector extraction in document order
//! - Origin-relative href resolution
//! - Whitespace-normalized titles
//!
//! # Usage
//!
//! ```rust,ignore
//! use site_scraper::{config::Config, http_client::HttpClient, pipeline};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new("/srv/sites/example");
//!     let client = HttpClient::new(&config.user_agent)?;
//!     let summary = pipeline::run(&config, &client).await?;
//!     println!("Wrote {} records to {:?}", summary.records, summary.output);
//!     Ok(())
//! }
//! ```
//!
//! Element-level problems (no `href`, unresolvable `href`) drop only that
//! element. Everything else ends the run with a [`error::ScrapeError`].
pub mod config;
pub mod error;
pub mod extract;
pub mod http_client;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod resolve;
pub mod robots;
