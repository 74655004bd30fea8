//! Error taxonomy
//!
//! Fatal conditions abort the whole batch run; there is no partial-success
//! mode. Non-fatal conditions (no owners matched, corrupt cache) never reach
//! this enum.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// Non-2xx response outside the manifest-location fallback loop.
    #[error("GET {url} returned HTTP {status}")]
    Http { status: u16, url: String },

    /// Network-level failure or an unparsable response body.
    #[error("transport error: {0}")]
    Transport(String),

    /// Every candidate manifest location was exhausted for this repository.
    #[error("no CODEOWNERS manifest found in repository '{repo}'")]
    ManifestNotFound { repo: String },
}
