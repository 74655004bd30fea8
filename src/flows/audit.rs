//! Audit flow - search, resolve, report
//!
//! Steps:
//! 1. Run the paginated code search across the organization
//! 2. Optionally dump the raw matches before enrichment
//! 3. Resolve owners for every match, sequentially, in match order
//! 4. Write the enriched JSON artifact and render it to stdout

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cache::store::ManifestStore;
use crate::core::model::{OwnedMatch, SearchMatch};
use crate::core::render::{RenderConfig, Renderer};
use crate::github::client::GithubClient;
use crate::github::transport::Transport;
use crate::owners::resolve::OwnerResolver;

pub struct AuditOptions<'a> {
    /// Where the enriched JSON artifact is written
    pub output: &'a Path,

    /// Optional dump of the matches before owner resolution
    pub raw_output: Option<&'a Path>,

    /// Leave `owner` empty instead of resolving
    pub skip_owners: bool,
}

/// Run the full audit and print the enriched result set to stdout
pub fn run_audit<S: ManifestStore, T: Transport>(
    mut client: GithubClient<T>,
    store: S,
    query: &str,
    opts: &AuditOptions,
    render: RenderConfig,
    quiet: bool,
) -> Result<()> {
    let matches = client.search_code(query)?;

    if let Some(raw_path) = opts.raw_output {
        write_json(raw_path, &matches).context("Failed to write raw match dump")?;
    }

    let enriched = if opts.skip_owners {
        matches
            .into_iter()
            .map(|m| OwnedMatch::new(m, Vec::new()))
            .collect()
    } else {
        resolve_all(matches, store, client, quiet)?
    };

    write_json(opts.output, &enriched)
        .with_context(|| format!("Failed to write result artifact {:?}", opts.output))?;

    let renderer = Renderer::with_config(render);
    println!("{}", renderer.render(&enriched));

    Ok(())
}

/// Resolve owners for every match. The client moves into the resolver so
/// the rate budget observed during the search keeps throttling the manifest
/// fetches.
pub fn resolve_all<S: ManifestStore, T: Transport>(
    matches: Vec<SearchMatch>,
    store: S,
    client: GithubClient<T>,
    quiet: bool,
) -> Result<Vec<OwnedMatch>> {
    let mut resolver = OwnerResolver::new(store, client).quiet(quiet);
    let mut enriched = Vec::with_capacity(matches.len());

    for m in matches {
        let owners = resolver.resolve(&m.repo, &m.path)?;
        enriched.push(OwnedMatch::new(m, owners));
    }

    Ok(enriched)
}

/// Resolve one (repo, path) pair and print the owner list
pub fn run_owners<S: ManifestStore, T: Transport>(
    client: GithubClient<T>,
    store: S,
    repo: &str,
    path: &str,
    render: RenderConfig,
    quiet: bool,
) -> Result<()> {
    let mut resolver = OwnerResolver::new(store, client).quiet(quiet);
    let owners = resolver.resolve(repo, path)?;

    let record = serde_json::json!({
        "repo": repo,
        "path": path,
        "owner": owners,
    });
    if render.pretty {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", serde_json::to_string(&record)?);
    }

    Ok(())
}

fn write_json<V: serde::Serialize>(path: &Path, value: &V) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
