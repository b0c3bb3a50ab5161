//! Pack build pipeline and artifact writer.
//!
//! Fetches the three source documents, selects the entity tables, builds
//! their icon hash indexes and writes every artifact, finishing with the
//! manifest. Source failures abort the build; icon failures never do.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::config::PackConfig;
use crate::digest::DigestError;
use crate::fetch::{FetchError, Fetcher};
use crate::hash_index::build_hash_index;
use crate::manifest::{Counts, Manifest, MANIFEST_FILE};
use crate::record::EntityKind;
use crate::select::select;
use crate::textmap::TextMap;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("failed to fetch source data: {0}")]
    Source(#[from] FetchError),

    #[error("source {url} is not a JSON array")]
    NotAnArray { url: String },

    #[error("text map {url} is not a string map: {source}")]
    TextMap {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Digest(#[from] DigestError),
}

/// Build the pack into `config.out_dir`, stamped with the current time.
pub fn build_pack<F: Fetcher + ?Sized>(
    fetcher: &F,
    config: &PackConfig,
) -> Result<Manifest, PackError> {
    build_pack_at(fetcher, config, Utc::now())
}

/// Build the pack with an explicit generation time.
pub fn build_pack_at<F: Fetcher + ?Sized>(
    fetcher: &F,
    config: &PackConfig,
    now: DateTime<Utc>,
) -> Result<Manifest, PackError> {
    let sources = &config.sources;

    info!("Downloading source data...");
    let avatars = fetch_records(fetcher, &sources.avatars)?;
    let weapons = fetch_records(fetcher, &sources.weapons)?;
    let textmap = TextMap::from_value(fetcher.fetch_json(&sources.textmap_en)?).map_err(
        |source| PackError::TextMap {
            url: sources.textmap_en.clone(),
            source,
        },
    )?;
    info!("Text map entries: {}", textmap.len());

    info!("Building characters/weapons tables...");
    let chars = select(
        EntityKind::Character,
        &avatars,
        &textmap,
        config.max_characters,
    );
    let weaps = select(EntityKind::Weapon, &weapons, &textmap, config.max_weapons);
    info!(
        "Characters selected: {} / N={}",
        chars.len(),
        config.max_characters
    );
    info!("Weapons selected:    {} / N={}", weaps.len(), config.max_weapons);

    info!("Building hash indexes from {}...", sources.asset_host);
    let hidx_char = build_hash_index(fetcher, &chars, &sources.asset_host);
    let hidx_weap = build_hash_index(fetcher, &weaps, &sources.asset_host);
    info!("Hash index characters: {}", hidx_char.len());
    info!("Hash index weapons:    {}", hidx_weap.len());

    let out_dir = config.out_dir.as_path();
    fs::create_dir_all(out_dir).map_err(|source| PackError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let data_files = [
        EntityKind::Character.table_file(),
        EntityKind::Weapon.table_file(),
        EntityKind::Character.index_file(),
        EntityKind::Weapon.index_file(),
    ];
    write_json(&out_dir.join(data_files[0]), &chars)?;
    write_json(&out_dir.join(data_files[1]), &weaps)?;
    write_json(&out_dir.join(data_files[2]), &hidx_char)?;
    write_json(&out_dir.join(data_files[3]), &hidx_weap)?;

    let counts = Counts {
        characters: chars.len(),
        weapons: weaps.len(),
        hash_characters: hidx_char.len(),
        hash_weapons: hidx_weap.len(),
    };
    let mut manifest = Manifest::new(now, sources.clone(), counts);
    for name in data_files {
        manifest.add_file(out_dir, name)?;
    }

    let manifest_path = out_dir.join(MANIFEST_FILE);
    write_json(&manifest_path, &manifest)?;
    info!("Done. Wrote: {}", manifest_path.display());

    Ok(manifest)
}

/// Fetch a source document that must be a JSON array of records.
fn fetch_records<F: Fetcher + ?Sized>(fetcher: &F, url: &str) -> Result<Vec<Value>, PackError> {
    match fetcher.fetch_json(url)? {
        Value::Array(records) => {
            info!("Fetched {} records from {}", records.len(), url);
            Ok(records)
        }
        _ => Err(PackError::NotAnArray {
            url: url.to_string(),
        }),
    }
}

/// Write `value` as 2-space indented UTF-8 JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PackError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| PackError::Io {
        path: path.to_path_buf(),
        source,
    })
}
