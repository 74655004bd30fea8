//! ownerscan - search an organization's code on GitHub and annotate every
//! match with the owners recorded in each repository's CODEOWNERS file.
//!
//! ownerscan provides:
//! - Paginated code search scoped to one organization
//! - Owner resolution backed by a TTL-based manifest cache
//! - A JSON result artifact suitable for further processing

use anyhow::Result;
use clap::Parser;

mod cache;
mod cli;
mod core;
mod flows;
mod github;
mod owners;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
