//! HTTP transport seam
//!
//! All API traffic flows through the `Transport` trait so pagination and
//! resolver logic can be exercised against scripted responses.

use std::time::Duration;

use crate::core::config::{AcceptFormat, Config, API_VERSION};
use crate::core::error::ScanError;

/// The response fields the rest of the tool consumes
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,

    /// `X-RateLimit-Remaining`, when present and parsable
    pub rate_remaining: Option<u32>,

    /// Raw `Link` header, when present
    pub link: Option<String>,

    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the Link header advertises a further page
    pub fn has_next_page(&self) -> bool {
        self.link
            .as_deref()
            .is_some_and(|l| l.contains("rel=\"next\""))
    }
}

/// Blocking GET against the API. Implementations attach auth headers; the
/// caller picks the Accept variant per request.
pub trait Transport {
    fn get(
        &mut self,
        url: &str,
        accept: AcceptFormat,
        query: &[(&str, String)],
    ) -> Result<ApiResponse, ScanError>;
}

/// reqwest-backed transport carrying the standard GitHub headers
pub struct ReqwestTransport {
    http: reqwest::blocking::Client,
    token: String,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> Result<Self, ScanError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ScanError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            token: config.token.clone(),
        })
    }
}

impl Transport for ReqwestTransport {
    fn get(
        &mut self,
        url: &str,
        accept: AcceptFormat,
        query: &[(&str, String)],
    ) -> Result<ApiResponse, ScanError> {
        let res = self
            .http
            .get(url)
            .header("Accept", accept.header_value())
            .header("Authorization", format!("Bearer {}", self.token))
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", concat!("ownerscan/", env!("CARGO_PKG_VERSION")))
            .query(query)
            .send()
            .map_err(|e| ScanError::Transport(e.to_string()))?;

        let status = res.status().as_u16();
        let rate_remaining = res
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let link = res
            .headers()
            .get("link")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = res.text().map_err(|e| ScanError::Transport(e.to_string()))?;

        Ok(ApiResponse {
            status,
            rate_remaining,
            link,
            body,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_next_page_requires_rel_next() {
        let mut res = testing::ok("{}");
        assert!(!res.has_next_page());

        res.link = Some(
            r#"<https://api.github.com/search/code?page=2>; rel="next", <...>; rel="last""#
                .to_string(),
        );
        assert!(res.has_next_page());

        res.link = Some(r#"<https://api.github.com/search/code?page=1>; rel="prev""#.to_string());
        assert!(!res.has_next_page());
    }

    #[test]
    fn test_is_success_bounds() {
        let mut res = testing::ok("");
        assert!(res.is_success());
        res.status = 299;
        assert!(res.is_success());
        res.status = 404;
        assert!(!res.is_success());
        res.status = 302;
        assert!(!res.is_success());
    }
}
