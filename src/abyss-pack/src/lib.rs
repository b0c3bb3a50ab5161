//! # abyss-pack
//!
//! Builds the AbyssTracker data pack: a small, versioned set of JSON
//! artifacts describing a bounded subset of characters and weapons, plus a
//! difference-hash index of their icon artwork.
//!
//! This library provides functionality to:
//! - Fetch upstream excel/text-map JSON and icon PNGs
//! - Normalize upstream quality and weapon-type codes
//! - Select a stable, id-ordered subset of records per kind
//! - Compute reproducible 64-bit dhash fingerprints of icons
//! - Write the pack and an integrity manifest of SHA-256 digests
//!
//! ## Example
//!
//! ```no_run
//! use abyss_pack::{build_pack, HttpFetcher, PackConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = HttpFetcher::new();
//! let manifest = build_pack(&fetcher, &PackConfig::default())?;
//! println!("Pack version {}", manifest.version);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dhash;
pub mod digest;
pub mod fetch;
pub mod hash_index;
pub mod manifest;
pub mod normalize;
pub mod pack;
pub mod record;
pub mod reference;
pub mod select;
pub mod table;
pub mod textmap;

// Re-export commonly used items
#[doc(inline)]
pub use config::{PackConfig, Sources, DEFAULT_MAX_ENTITIES};
#[doc(inline)]
pub use dhash::{dhash, DEFAULT_HASH_SIZE};
#[doc(inline)]
pub use digest::{sha256_file, DigestError};
#[doc(inline)]
pub use fetch::{FetchError, Fetcher, HttpFetcher};
#[doc(inline)]
pub use hash_index::{build_hash_index, icon_url, HashIndex};
#[doc(inline)]
pub use manifest::{verify_manifest, Manifest, VerifyReport};
#[doc(inline)]
pub use normalize::{normalize, BACKGROUND_LEVEL};
#[doc(inline)]
pub use pack::{build_pack, build_pack_at, PackError};
#[doc(inline)]
pub use record::{EntityKind, EntityRecord};
#[doc(inline)]
pub use reference::{rarity_from_quality, weapon_type_short};
#[doc(inline)]
pub use select::{build_characters, build_weapons, select};
#[doc(inline)]
pub use table::{EntityTable, OrderedMap};
#[doc(inline)]
pub use textmap::TextMap;
