use reqwest::{Client, Response};

/// User-Agent header sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("site-scraper/", env!("CARGO_PKG_VERSION"));

/// HTTP transport shared by the robots.txt check and the page fetch.
///
/// No timeout or retry is configured on top of the reqwest defaults.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// Issues a GET request. Any status is returned as a response; only
    /// transport failures are errors.
    pub async fn fetch(&self, url: &str) -> Result<Response, reqwest::Error> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("GET {} -> {}", url, response.status());
        Ok(response)
    }
}
