//! Pack build command

use abyss_pack::{build_pack, HttpFetcher};
use anyhow::{Context, Result};
use tracing::info;

use crate::cli::BuildArgs;

/// Handle the build command
pub fn handle(args: &BuildArgs) -> Result<()> {
    let config = args.to_config();
    let fetcher = HttpFetcher::new();

    let manifest = build_pack(&fetcher, &config)
        .with_context(|| format!("Failed to build pack into {}", config.out_dir.display()))?;

    info!(
        "Pack {} ({} characters, {} weapons)",
        manifest.version, manifest.counts.characters, manifest.counts.weapons
    );
    Ok(())
}
