//! Ownership resolution
//!
//! Per-repository state machine over the cache: a fresh entry is parsed
//! directly; a missing or stale entry triggers a refresh from the API; text
//! that cannot be a manifest triggers exactly one forced refresh to
//! self-heal from an earlier bad cache write.

use anyhow::Result;
use chrono::{Duration, Utc};
use colored::Colorize;

use crate::cache::store::ManifestStore;
use crate::github::client::GithubClient;
use crate::github::transport::Transport;
use crate::owners::manifest::{looks_like_manifest, match_owners, parse_manifest};

pub struct OwnerResolver<S: ManifestStore, T: Transport> {
    store: S,
    client: GithubClient<T>,
    ttl: Duration,
    quiet: bool,
}

impl<S: ManifestStore, T: Transport> OwnerResolver<S, T> {
    pub fn new(store: S, client: GithubClient<T>) -> Self {
        Self {
            store,
            client,
            ttl: Duration::hours(1),
            quiet: false,
        }
    }

    #[allow(dead_code)]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Resolve the owners of `path` within `repo`.
    ///
    /// An empty result is valid: it is reported as a warning on stderr and
    /// returned as-is. Failing to locate any manifest for the repository is
    /// fatal and aborts the run.
    pub fn resolve(&mut self, repo: &str, path: &str) -> Result<Vec<String>> {
        let mut raw = self.load_fresh(repo)?;

        if !looks_like_manifest(&raw) {
            if !self.quiet {
                eprintln!(
                    "{} cached manifest for '{}' is not CODEOWNERS text, refreshing",
                    "warning:".yellow().bold(),
                    repo
                );
            }
            raw = self.refresh(repo)?;
        }

        let rules = parse_manifest(&raw);
        let owners = match_owners(&rules, path);

        if owners.is_empty() && !self.quiet {
            eprintln!(
                "{} no owners matched '{}' in repository '{}'",
                "warning:".yellow().bold(),
                path,
                repo
            );
        }

        Ok(owners)
    }

    /// Return cached text when fresh, otherwise refresh from the API
    fn load_fresh(&mut self, repo: &str) -> Result<String> {
        let now = Utc::now();
        match self.store.load(repo)? {
            Some(entry) if !entry.is_stale(self.ttl, now) => Ok(entry.raw_text),
            _ => self.refresh(repo),
        }
    }

    fn refresh(&mut self, repo: &str) -> Result<String> {
        let raw = self.client.fetch_manifest(repo)?;
        self.store.save(repo, &raw)?;
        Ok(raw)
    }
}
