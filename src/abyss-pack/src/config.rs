//! Build configuration: table bounds, output location and source endpoints.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default bound on each entity table
pub const DEFAULT_MAX_ENTITIES: usize = 30;

pub const DEFAULT_DATA_BASE: &str =
    "https://raw.githubusercontent.com/DimbreathBot/AnimeGameData/master";
pub const DEFAULT_ASSET_HOST: &str = "https://enka.network/ui";
pub const DEFAULT_REPO_LABEL: &str = "DimbreathBot/AnimeGameData";

/// Upstream endpoints consulted by a build.
///
/// Serializes as the manifest's `source` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sources {
    pub repo: String,
    pub avatars: String,
    pub weapons: String,
    pub textmap_en: String,
    #[serde(skip)]
    pub asset_host: String,
}

impl Sources {
    /// Endpoints under an AnimeGameData-layout base URL
    pub fn from_bases(data_base: &str, asset_host: &str) -> Self {
        let data_base = data_base.trim_end_matches('/');
        Sources {
            repo: DEFAULT_REPO_LABEL.to_string(),
            avatars: format!("{}/ExcelBinOutput/AvatarExcelConfigData.json", data_base),
            weapons: format!("{}/ExcelBinOutput/WeaponExcelConfigData.json", data_base),
            textmap_en: format!("{}/TextMap/TextMapEN.json", data_base),
            asset_host: asset_host.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for Sources {
    fn default() -> Self {
        Sources::from_bases(DEFAULT_DATA_BASE, DEFAULT_ASSET_HOST)
    }
}

#[derive(Debug, Clone)]
pub struct PackConfig {
    pub max_characters: usize,
    pub max_weapons: usize,
    pub out_dir: PathBuf,
    pub sources: Sources,
}

impl Default for PackConfig {
    fn default() -> Self {
        PackConfig {
            max_characters: DEFAULT_MAX_ENTITIES,
            max_weapons: DEFAULT_MAX_ENTITIES,
            out_dir: PathBuf::from("."),
            sources: Sources::default(),
        }
    }
}
