//! Runtime configuration
//!
//! Credentials and endpoints travel through an explicit `Config` value handed
//! to each component at construction; nothing reads the environment after CLI
//! parsing.

/// Default GitHub API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Value sent in the `X-GitHub-Api-Version` header
pub const API_VERSION: &str = "2022-11-28";

/// Accept header variants used against the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptFormat {
    /// Search results carrying text-match fragments
    TextMatch,
    /// Raw file content from the contents endpoint
    Raw,
}

impl AcceptFormat {
    pub fn header_value(self) -> &'static str {
        match self {
            AcceptFormat::TextMatch => "application/vnd.github.text-match+json",
            AcceptFormat::Raw => "application/vnd.github.raw",
        }
    }
}

/// Explicit configuration for everything that talks to the API
#[derive(Debug, Clone)]
pub struct Config {
    /// Personal access token. An empty string is passed through and fails
    /// downstream as an authentication error rather than being validated
    /// here.
    pub token: String,

    /// Organization whose repositories are searched.
    pub org: String,

    /// API base URL, overridable for tests.
    pub api_url: String,
}
