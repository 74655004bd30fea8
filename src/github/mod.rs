//! GitHub API integration - transport, rate limiting, client

pub mod client;
pub mod rate_limit;
pub mod transport;
