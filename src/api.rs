// API client module: a small blocking HTTP client for the encyclopedia's
// opensearch and query/extracts endpoints. Both calls hand back the raw
// response body; decoding lives in `model` so a malformed payload never
// turns into a transport error.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Endpoint used when neither `--api-url` nor `WIKI_API_URL` is given.
pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Fixed client-side timeout for every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("wiki-cli/", env!("CARGO_PKG_VERSION"));

/// The two remote calls the interactive loop needs. `WikiClient` is the
/// real implementation; tests substitute a recording fake.
pub trait WikiApi {
    /// Run an opensearch query and return the raw response body.
    fn search(&self, term: &str, limit: u32) -> Result<Vec<u8>>;

    /// Fetch the plain-text extract for exactly one title.
    fn article(&self, title: &str) -> Result<Vec<u8>>;
}

impl<T: WikiApi + ?Sized> WikiApi for &T {
    fn search(&self, term: &str, limit: u32) -> Result<Vec<u8>> {
        (**self).search(term, limit)
    }

    fn article(&self, title: &str) -> Result<Vec<u8>> {
        (**self).article(title)
    }
}

/// Blocking client holding a reqwest client and the API base URL.
#[derive(Clone)]
pub struct WikiClient {
    client: Client,
    base_url: String,
}

impl WikiClient {
    /// Create a client against `base_url` with the fixed request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(WikiClient {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the opensearch call for `term`, limited to the main namespace.
    pub fn search_url(&self, term: &str, limit: u32) -> String {
        format!(
            "{}?action=opensearch&search={}&limit={}&namespace=0&format=json",
            self.base_url,
            urlencoding::encode(term),
            limit
        )
    }

    /// URL of the query call requesting the plain-text extract of `title`
    /// together with the page-id ordering.
    pub fn article_url(&self, title: &str) -> String {
        format!(
            "{}?format=json&action=query&indexpageids=&prop=extracts&explaintext=&titles={}",
            self.base_url,
            urlencoding::encode(title)
        )
    }

    fn get_bytes(&self, url: &str, what: &str) -> Result<Vec<u8>> {
        log::debug!("GET {url}");
        let res = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to send {what} request"))?;
        let status = res.status();
        if !status.is_success() {
            // The body is still handed to the decoder, which degrades to an
            // empty result.
            log::warn!("{what} request returned {status}");
        }
        let body = res
            .bytes()
            .with_context(|| format!("Failed to read {what} response body"))?;
        log::debug!("{what} response: {} bytes", body.len());
        Ok(body.to_vec())
    }
}

impl WikiApi for WikiClient {
    fn search(&self, term: &str, limit: u32) -> Result<Vec<u8>> {
        let url = self.search_url(term, limit);
        self.get_bytes(&url, "search")
    }

    fn article(&self, title: &str) -> Result<Vec<u8>> {
        let url = self.article_url(title);
        self.get_bytes(&url, "article")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_escapes_term_and_embeds_limit() {
        let client = WikiClient::new("https://example.org/w/api.php").unwrap();
        let url = client.search_url("Go (programming language)", 3);
        assert_eq!(
            url,
            "https://example.org/w/api.php?action=opensearch&search=Go%20%28programming%20language%29&limit=3&namespace=0&format=json"
        );
    }

    #[test]
    fn article_url_requests_plain_text_extract() {
        let client = WikiClient::new("https://example.org/w/api.php").unwrap();
        let url = client.article_url("AC/DC");
        assert!(url.contains("prop=extracts"));
        assert!(url.contains("explaintext="));
        assert!(url.contains("indexpageids="));
        assert!(url.ends_with("titles=AC%2FDC"));
    }
}
