//! Data model
//!
//! Wire DTOs for the search endpoint plus the enriched record written to the
//! output artifact. Text-match fragments are carried through as opaque JSON;
//! this tool never inspects them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of `/search/code` results, as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<SearchItem>,
}

/// A single search hit in API shape
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub path: String,
    pub repository: RepoRef,
    #[serde(default)]
    pub text_matches: Value,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoRef {
    pub name: String,
}

/// One matched file, reduced to the fields this tool cares about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub path: String,
    pub repo: String,
    pub text_matches: Value,
    pub url: String,
}

impl From<SearchItem> for SearchMatch {
    fn from(item: SearchItem) -> Self {
        Self {
            path: item.path,
            repo: item.repository.name,
            text_matches: item.text_matches,
            url: item.html_url,
        }
    }
}

/// A match enriched with its resolved owners. Built once, immutable after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedMatch {
    pub path: String,
    pub repo: String,
    pub text_matches: Value,
    pub url: String,
    pub owner: Vec<String>,
}

impl OwnedMatch {
    pub fn new(m: SearchMatch, owner: Vec<String>) -> Self {
        Self {
            path: m.path,
            repo: m.repo,
            text_matches: m.text_matches,
            url: m.url,
            owner,
        }
    }
}
