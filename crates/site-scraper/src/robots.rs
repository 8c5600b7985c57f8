use reqwest::StatusCode;
use robots_txt::Robots;
use robots_txt::matcher::SimpleMatcher;

use crate::error::RobotsError;
use crate::http_client::HttpClient;
use crate::resolve::Origin;

/// Agent name evaluated against robots.txt rules.
pub const DEFAULT_ROBOTS_AGENT: &str = "bot";

// Holds the raw robots.txt text and parses it on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsTxt {
    robots_text: String,
}

impl RobotsTxt {
    /// Accepts a robots.txt body. Invalid UTF-8 sequences are replaced so the
    /// remaining rules are still enforced.
    pub fn from_bytes(body: &[u8]) -> Self {
        Self {
            robots_text: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Checks whether `path` may be fetched by `user_agent`.
    pub fn is_allowed(&self, path: &str, user_agent: &str) -> bool {
        let parsed_robots = Robots::from_str_lossy(&self.robots_text);
        let section = parsed_robots.choose_section(user_agent);
        let matcher = SimpleMatcher::new(&section.rules);

        matcher.check_path(path)
    }
}

/// Location of robots.txt for the origin of `origin`.
pub fn robots_url(origin: &Origin) -> String {
    origin.with_path("/robots.txt")
}

/// Decides whether `target_url` may be crawled by `agent`.
///
/// - 403 and 5xx on robots.txt deny the crawl.
/// - Any other non-200 status means there are no rules to enforce.
/// - A 200 body that cannot be read is ignored and the crawl is allowed.
/// - Otherwise the ruleset decides for the URL's path.
pub async fn check(client: &HttpClient, target_url: &str, agent: &str) -> Result<(), RobotsError> {
    let origin = Origin::parse(target_url)?;
    let robots_url = robots_url(&origin);

    tracing::info!("Fetching robots.txt from: {}", robots_url);

    let response = client
        .fetch(&robots_url)
        .await
        .map_err(|source| RobotsError::Fetch {
            url: robots_url.clone(),
            source,
        })?;
    let status = response.status();

    if status == StatusCode::FORBIDDEN || status.is_server_error() {
        return Err(RobotsError::Disallowed {
            url: robots_url,
            status: Some(status),
        });
    }

    if status != StatusCode::OK {
        tracing::info!(
            "No robots.txt rules for {} (HTTP {}), crawl allowed",
            origin.authority(),
            status
        );
        return Ok(());
    }

    let robots = match response.bytes().await {
        Ok(body) => RobotsTxt::from_bytes(&body),
        Err(e) => {
            tracing::warn!("Failed to read robots.txt from {}: {}", robots_url, e);
            return Ok(());
        }
    };
    tracing::debug!("robots.txt content for {}:\n{}", origin.authority(), robots.robots_text);

    if robots.is_allowed(origin.path(), agent) {
        Ok(())
    } else {
        Err(RobotsError::Disallowed {
            url: target_url.to_string(),
            status: None,
        })
    }
}
