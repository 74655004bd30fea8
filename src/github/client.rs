//! GitHub API client
//!
//! Owns the rate budget shared by the search and content endpoints, so a
//! quota observed on one path throttles the other as well. Pagination is an
//! explicit loop with an accumulator scoped to each call.

use crate::core::config::{AcceptFormat, Config};
use crate::core::error::ScanError;
use crate::core::model::{SearchMatch, SearchResponse};
use crate::github::rate_limit::{RateBudget, RatePolicy};
use crate::github::transport::{ApiResponse, Transport};

/// Candidate manifest locations, tried in order
pub const MANIFEST_LOCATIONS: [&str; 3] = ["CODEOWNERS", ".github/CODEOWNERS", "doc/CODEOWNERS"];

pub struct GithubClient<T: Transport> {
    transport: T,
    config: Config,
    policy: RatePolicy,
    budget: RateBudget,
}

impl<T: Transport> GithubClient<T> {
    pub fn new(transport: T, config: Config, policy: RatePolicy) -> Self {
        Self {
            transport,
            config,
            policy,
            budget: RateBudget::default(),
        }
    }

    /// Remaining quota as last reported by the server
    #[allow(dead_code)]
    pub fn remaining(&self) -> u32 {
        self.budget.remaining
    }

    /// Run one rate-limited GET and fold the response quota into the budget
    fn get(
        &mut self,
        url: &str,
        accept: AcceptFormat,
        query: &[(&str, String)],
    ) -> Result<ApiResponse, ScanError> {
        self.policy.before_call(&self.budget);
        let res = self.transport.get(url, accept, query)?;
        self.budget.observe(res.rate_remaining);
        Ok(res)
    }

    /// Search the organization's code, following pagination to the end.
    ///
    /// Returns every item in server order, pages concatenated in fetch
    /// order. Any transport failure or non-2xx status aborts the whole
    /// search; there is no partial-result mode.
    pub fn search_code(&mut self, query: &str) -> Result<Vec<SearchMatch>, ScanError> {
        let url = format!("{}/search/code", self.config.api_url);
        let q = format!("org:{} {}", self.config.org, query);

        // The accumulator lives here, scoped to this one call.
        let mut matches: Vec<SearchMatch> = Vec::new();
        let mut page: u32 = 1;

        loop {
            let params = [
                ("q", q.clone()),
                ("type", "code".to_string()),
                ("page", page.to_string()),
            ];
            let res = self.get(&url, AcceptFormat::TextMatch, &params)?;
            if !res.is_success() {
                return Err(ScanError::Http {
                    status: res.status,
                    url: url.clone(),
                });
            }

            let parsed: SearchResponse = serde_json::from_str(&res.body)
                .map_err(|e| ScanError::Transport(format!("malformed search response: {e}")))?;
            matches.extend(parsed.items.into_iter().map(SearchMatch::from));

            if !res.has_next_page() {
                break;
            }
            page += 1;
        }

        Ok(matches)
    }

    /// Fetch a repository's ownership manifest as raw text, trying each
    /// candidate location until one answers. A non-2xx status moves on to
    /// the next location; a transport failure propagates immediately.
    /// Exhausting the list is a fatal configuration error.
    pub fn fetch_manifest(&mut self, repo: &str) -> Result<String, ScanError> {
        for location in MANIFEST_LOCATIONS {
            let url = format!(
                "{}/repos/{}/{}/contents/{}",
                self.config.api_url, self.config.org, repo, location
            );
            let res = self.get(&url, AcceptFormat::Raw, &[])?;
            if res.is_success() {
                return Ok(res.body);
            }
        }

        Err(ScanError::ManifestNotFound {
            repo: repo.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::transport::testing::{not_found, ok, ScriptedTransport};
    use crate::github::transport::ApiResponse;

    fn config() -> Config {
        Config {
            token: "t0ken".to_string(),
            org: "acme".to_string(),
            api_url: "https://api.test".to_string(),
        }
    }

    fn client(responses: Vec<ApiResponse>) -> GithubClient<ScriptedTransport> {
        GithubClient::new(ScriptedTransport::new(responses), config(), RatePolicy::default())
    }

    fn page_body(paths: &[&str]) -> String {
        let items: Vec<serde_json::Value> = paths
            .iter()
            .map(|p| {
                serde_json::json!({
                    "path": p,
                    "repository": { "name": "svc" },
                    "text_matches": [],
                    "html_url": format!("https://github.test/acme/svc/{p}"),
                })
            })
            .collect();
        serde_json::json!({ "items": items }).to_string()
    }

    fn search_page(paths: &[&str], has_next: bool) -> ApiResponse {
        let mut res = ok(&page_body(paths));
        if has_next {
            res.link = Some(r#"<https://api.test/search/code?page=2>; rel="next""#.to_string());
        }
        res
    }

    #[test]
    fn test_search_concatenates_pages_in_order() {
        let mut client = client(vec![
            search_page(&["a.rs", "b.rs"], true),
            search_page(&["c.rs"], true),
            search_page(&["d.rs"], false),
        ]);

        let matches = client.search_code("needle").unwrap();
        let paths: Vec<&str> = matches.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["a.rs", "b.rs", "c.rs", "d.rs"]);
    }

    #[test]
    fn test_search_requests_increasing_pages() {
        let mut client = client(vec![
            search_page(&["a.rs"], true),
            search_page(&["b.rs"], false),
        ]);

        client.search_code("needle").unwrap();
        let pages: Vec<Option<String>> = client
            .transport
            .requests
            .iter()
            .map(|r| r.page.clone())
            .collect();
        assert_eq!(pages, vec![Some("1".to_string()), Some("2".to_string())]);
    }

    #[test]
    fn test_search_accumulator_is_per_call() {
        let mut client = client(vec![
            search_page(&["a.rs"], false),
            search_page(&["b.rs"], false),
        ]);

        let first = client.search_code("needle").unwrap();
        let second = client.search_code("needle").unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].path, "b.rs");
    }

    #[test]
    fn test_search_aborts_on_http_error() {
        let mut forbidden = ok("");
        forbidden.status = 403;
        let mut client = client(vec![search_page(&["a.rs"], true), forbidden]);

        let err = client.search_code("needle").unwrap_err();
        assert!(matches!(err, ScanError::Http { status: 403, .. }));
    }

    #[test]
    fn test_search_scopes_query_to_org() {
        let mut client = client(vec![search_page(&[], false)]);
        client.search_code("useSSL=true").unwrap();
        assert_eq!(client.transport.call_count(), 1);
        let req = &client.transport.requests[0];
        assert!(req.url.ends_with("/search/code"));
        assert_eq!(req.q.as_deref(), Some("org:acme useSSL=true"));
    }

    #[test]
    fn test_low_quota_delays_next_page() {
        use std::time::{Duration, Instant};

        let mut first = search_page(&["a.rs"], true);
        first.rate_remaining = Some(1);
        let transport = ScriptedTransport::new(vec![first, search_page(&["b.rs"], false)]);
        let mut client = GithubClient::new(
            transport,
            config(),
            RatePolicy::new(Duration::from_millis(50)),
        );

        let start = Instant::now();
        let matches = client.search_code("needle").unwrap();
        assert_eq!(matches.len(), 2);
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_budget_overwritten_from_response_header() {
        let mut res = search_page(&[], false);
        res.rate_remaining = Some(7);
        let mut client = client(vec![res]);

        client.search_code("needle").unwrap();
        assert_eq!(client.remaining(), 7);
    }

    #[test]
    fn test_manifest_falls_back_through_locations() {
        let mut client = client(vec![not_found(), not_found(), ok("* @acme/platform\n")]);

        let text = client.fetch_manifest("svc").unwrap();
        assert_eq!(text, "* @acme/platform\n");

        let urls: Vec<&str> = client
            .transport
            .requests
            .iter()
            .map(|r| r.url.as_str())
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://api.test/repos/acme/svc/contents/CODEOWNERS",
                "https://api.test/repos/acme/svc/contents/.github/CODEOWNERS",
                "https://api.test/repos/acme/svc/contents/doc/CODEOWNERS",
            ]
        );
    }

    #[test]
    fn test_manifest_stops_at_first_success() {
        let mut client = client(vec![ok("* @acme/platform\n")]);
        client.fetch_manifest("svc").unwrap();
        assert_eq!(client.transport.call_count(), 1);
    }

    #[test]
    fn test_manifest_not_found_after_all_locations() {
        let mut client = client(vec![not_found(), not_found(), not_found()]);
        let err = client.fetch_manifest("svc").unwrap_err();
        assert!(matches!(err, ScanError::ManifestNotFound { repo } if repo == "svc"));
    }

    #[test]
    fn test_manifest_transport_error_propagates() {
        // Only one scripted response: the second location hits the
        // exhausted script, which surfaces as a transport error.
        let mut client = client(vec![not_found()]);
        let err = client.fetch_manifest("svc").unwrap_err();
        assert!(matches!(err, ScanError::Transport(_)));
    }
}
