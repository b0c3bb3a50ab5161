//! Pack manifest: version, provenance, counts and artifact digests.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::Sources;
use crate::digest::sha256_file;
use crate::pack::PackError;
use crate::table::OrderedMap;

/// Artifact file name of the manifest
pub const MANIFEST_FILE: &str = "manifest.json";

/// Table and index sizes. Index counts may be lower than table counts when
/// icons were unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub characters: usize,
    pub weapons: usize,
    pub hash_characters: usize,
    pub hash_weapons: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDigest {
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Generation date, `YYYY-MM-DD`
    pub version: String,
    /// Generation time, UTC, second precision
    pub generated_at: String,
    pub source: Sources,
    pub counts: Counts,
    /// Data artifact file name -> digest, in write order
    pub files: OrderedMap<FileDigest>,
}

impl Manifest {
    pub fn new(generated_at: DateTime<Utc>, source: Sources, counts: Counts) -> Self {
        Manifest {
            version: generated_at.format("%Y-%m-%d").to_string(),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, false),
            source,
            counts,
            files: OrderedMap::new(),
        }
    }

    /// Digest `dir/name` and record it under `name`.
    pub fn add_file(&mut self, dir: &Path, name: &str) -> Result<(), PackError> {
        let sha256 = sha256_file(&dir.join(name))?;
        self.files.insert(name.to_string(), FileDigest { sha256 });
        Ok(())
    }

    /// Load `manifest.json` from a pack directory
    pub fn load(dir: &Path) -> Result<Self, PackError> {
        let path = dir.join(MANIFEST_FILE);
        let data = fs::read_to_string(&path).map_err(|source| PackError::Io { path, source })?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Outcome of re-checking a pack directory against its manifest
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub matched: Vec<String>,
    /// (file, recorded digest, current digest)
    pub mismatched: Vec<(String, String, String)>,
    pub missing: Vec<String>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.mismatched.is_empty() && self.missing.is_empty()
    }
}

/// Recompute every listed file's digest and compare with the manifest.
pub fn verify_manifest(dir: &Path) -> Result<VerifyReport, PackError> {
    let manifest = Manifest::load(dir)?;
    let mut report = VerifyReport::default();

    for (name, recorded) in manifest.files.iter() {
        let path = dir.join(name);
        if !path.exists() {
            report.missing.push(name.to_string());
            continue;
        }

        let current = sha256_file(&path)?;
        if current == recorded.sha256 {
            report.matched.push(name.to_string());
        } else {
            report
                .mismatched
                .push((name.to_string(), recorded.sha256.clone(), current));
        }
    }

    Ok(report)
}
