//! Manifest verification command

use abyss_pack::verify_manifest;
use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Handle the verify command
pub fn handle(dir: &Path) -> Result<()> {
    let report = verify_manifest(dir)
        .with_context(|| format!("Failed to verify pack in {}", dir.display()))?;

    for name in &report.matched {
        info!("ok       {}", name);
    }
    for (name, recorded, current) in &report.mismatched {
        warn!("mismatch {} (manifest {}, file {})", name, recorded, current);
    }
    for name in &report.missing {
        warn!("missing  {}", name);
    }

    if !report.is_ok() {
        bail!(
            "{} mismatched, {} missing file(s) in {}",
            report.mismatched.len(),
            report.missing.len(),
            dir.display()
        );
    }
    Ok(())
}
