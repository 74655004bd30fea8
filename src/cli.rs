//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cache::store::FileStore;
use crate::core::config::{Config, DEFAULT_API_URL};
use crate::core::render::{OutputFormat, RenderConfig};
use crate::flows::audit::{run_audit, run_owners, AuditOptions};
use crate::github::client::GithubClient;
use crate::github::rate_limit::RatePolicy;
use crate::github::transport::ReqwestTransport;

/// ownerscan - search an organization's code and attach CODEOWNERS data.
#[derive(Parser, Debug)]
#[command(name = "ownerscan")]
#[command(
    author,
    version,
    about,
    long_about = r#"ownerscan runs a code search across one GitHub organization and annotates
every matched file with the owners recorded in its repository's CODEOWNERS
file.

Ownership manifests are cached on disk for one hour, so repeated runs within
that window resolve owners without touching the network.

Examples:
    ownerscan search "useSSL=true&verifyServerCertificate=false"
    ownerscan search "TODO" --output audit.json --raw-output matches.json
    ownerscan owners --repo billing src/db/pool.rs
    ownerscan cache clear
"#
)]
pub struct Cli {
    /// GitHub personal access token.
    #[arg(
        long,
        global = true,
        env = "GITHUB_PAT",
        default_value = "",
        hide_env_values = true,
        value_name = "TOKEN",
        long_help = "GitHub personal access token, usually supplied via the GITHUB_PAT\n\
environment variable. An empty token is passed through as-is and will fail\n\
at the API as an authentication error."
    )]
    pub token: String,

    /// GitHub organization to scan.
    #[arg(
        long,
        global = true,
        env = "GITHUB_ORG",
        default_value = "",
        value_name = "ORG",
        long_help = "Organization whose repositories are searched, usually supplied via the\n\
GITHUB_ORG environment variable."
    )]
    pub org: String,

    /// API base URL.
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_API_URL,
        value_name = "URL",
        long_help = "Base URL of the GitHub API. Override for GitHub Enterprise or tests."
    )]
    pub api_url: String,

    /// Directory for cached ownership manifests.
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        long_help = "Directory holding one cached CODEOWNERS file per repository.\n\n\
Defaults to an 'ownerscan' directory under the system temp dir. Entries are\n\
refreshed when older than one hour and are only removed by 'cache clear'."
    )]
    pub cache_dir: Option<PathBuf>,

    /// Output format for stdout (jsonl/json).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the stdout format.\n\n\
Supported values:\n\
- jsonl (default): one JSON object per line\n\
- json: a single JSON array\n\n\
The file artifact written by 'search' is always a pretty-printed JSON array."
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Quiet mode (suppress warnings on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Suppress non-fatal warnings such as matches without any owner.\n\
Machine-readable results are still printed to stdout."
    )]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the organization's code and attach owners to every match.
    #[command(
        long_about = "Run a paginated code search scoped to the configured organization,\n\
resolve the owners of every matched file, and write the enriched list as a\n\
JSON artifact.\n\n\
The whole run is sequential and aborts on the first fatal error; there is no\n\
partial-success mode.\n\n\
Examples:\n\
  ownerscan search \"useSSL=true\"\n\
  ownerscan search \"verifyServerCertificate=false\" --output audit.json\n"
    )]
    Search {
        /// Free-text search query (scoped to the configured org).
        #[arg(value_name = "QUERY")]
        query: String,

        /// Where to write the enriched JSON artifact.
        #[arg(long, default_value = "Result.json", value_name = "PATH")]
        output: PathBuf,

        /// Also dump the matches before owner resolution.
        #[arg(long, value_name = "PATH")]
        raw_output: Option<PathBuf>,

        /// Skip owner resolution; emit matches with an empty owner list.
        #[arg(long)]
        skip_owners: bool,
    },

    /// Resolve the owners of a single path within a repository.
    #[command(
        long_about = "Resolve one (repository, path) pair against the repository's CODEOWNERS\n\
manifest and print the owner list.\n\n\
Uses the same cache as 'search': a fresh cache entry answers without any\n\
network traffic.\n\n\
Example:\n\
  ownerscan owners --repo billing src/db/pool.rs\n"
    )]
    Owners {
        /// Repository name (without the organization prefix).
        #[arg(long, value_name = "REPO")]
        repo: String,

        /// File path within the repository.
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Manage the on-disk manifest cache.
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Delete every cached manifest.
    Clear,
}

pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().map_err(anyhow::Error::msg)?;
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    let cache_dir = cli.cache_dir.clone().unwrap_or_else(FileStore::default_dir);
    let store = FileStore::new(&cache_dir);

    let config = Config {
        token: cli.token.clone(),
        org: cli.org.clone(),
        api_url: cli.api_url.trim_end_matches('/').to_string(),
    };

    match cli.command {
        Commands::Search {
            query,
            output,
            raw_output,
            skip_owners,
        } => {
            let transport = ReqwestTransport::new(&config)?;
            let client = GithubClient::new(transport, config, RatePolicy::default());
            let opts = AuditOptions {
                output: &output,
                raw_output: raw_output.as_deref(),
                skip_owners,
            };
            run_audit(client, store, &query, &opts, render_config, cli.quiet)
        }

        Commands::Owners { repo, path } => {
            let transport = ReqwestTransport::new(&config)?;
            let client = GithubClient::new(transport, config, RatePolicy::default());
            run_owners(client, store, &repo, &path, render_config, cli.quiet)
        }

        Commands::Cache { action } => match action {
            CacheCommands::Clear => {
                store.clear()?;
                if !cli.quiet {
                    eprintln!("cache cleared: {}", cache_dir.display());
                }
                Ok(())
            }
        },
    }
}
