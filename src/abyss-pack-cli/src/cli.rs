//! CLI argument definitions for abyss-pack
//!
//! Every build setting comes from the environment, so a bare
//! `abyss-pack` invocation is a complete build. Flags are optional and
//! override their environment variable.

use abyss_pack::config::{DEFAULT_ASSET_HOST, DEFAULT_DATA_BASE};
use abyss_pack::{PackConfig, Sources, DEFAULT_MAX_ENTITIES};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "abyss-pack")]
#[command(about = "AbyssTracker data pack builder", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub build: BuildArgs,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Build the pack (default when no subcommand is given)
    #[command(visible_alias = "b")]
    Build,

    /// Check the pack's files against the digests in its manifest
    #[command(visible_alias = "v")]
    Verify,
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Maximum number of characters to select
    #[arg(long, global = true, env = "N_CHARACTERS", default_value_t = DEFAULT_MAX_ENTITIES)]
    pub max_characters: usize,

    /// Maximum number of weapons to select
    #[arg(long, global = true, env = "N_WEAPONS", default_value_t = DEFAULT_MAX_ENTITIES)]
    pub max_weapons: usize,

    /// Directory the pack is written to (and verified in)
    #[arg(short, long, global = true, env = "PACK_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Base URL of the AnimeGameData repository
    #[arg(long, global = true, env = "PACK_DATA_BASE", default_value = DEFAULT_DATA_BASE)]
    pub data_base: String,

    /// Base URL icons are fetched from
    #[arg(long, global = true, env = "PACK_ASSET_HOST", default_value = DEFAULT_ASSET_HOST)]
    pub asset_host: String,
}

impl BuildArgs {
    pub fn to_config(&self) -> PackConfig {
        PackConfig {
            max_characters: self.max_characters,
            max_weapons: self.max_weapons,
            out_dir: self.out_dir.clone(),
            sources: Sources::from_bases(&self.data_base, &self.asset_host),
        }
    }
}
