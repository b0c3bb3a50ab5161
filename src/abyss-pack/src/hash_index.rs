//! Icon fingerprint index for a selected entity table.
//!
//! Each record's icon is fetched, normalized and hashed in table order. An
//! icon that cannot be fetched, decoded or hashed is left out of the index
//! and the build carries on.

use thiserror::Error;
use tracing::debug;

use crate::dhash::{dhash, DEFAULT_HASH_SIZE};
use crate::fetch::{FetchError, Fetcher};
use crate::normalize::{decode, normalize};
use crate::table::{EntityTable, OrderedMap};

/// Entity id -> hex fingerprint
pub type HashIndex = OrderedMap<String>;

/// Reasons a single icon is missing from the index
#[derive(Error, Debug)]
pub enum IconError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image has no pixels")]
    Empty,
}

/// URL of an icon asset: `<asset_host>/<icon_name>.png`
pub fn icon_url(asset_host: &str, icon_name: &str) -> String {
    format!("{}/{}.png", asset_host.trim_end_matches('/'), icon_name)
}

/// Fetch and fingerprint one icon.
pub fn hash_icon<F: Fetcher + ?Sized>(fetcher: &F, url: &str) -> Result<String, IconError> {
    let bytes = fetcher.fetch_bytes(url)?;
    let image = decode(&bytes)?;
    dhash(&normalize(&image), DEFAULT_HASH_SIZE).ok_or(IconError::Empty)
}

/// Build the index for `table`. Keys are a subset of the table's keys, in
/// the same order.
pub fn build_hash_index<F: Fetcher + ?Sized>(
    fetcher: &F,
    table: &EntityTable,
    asset_host: &str,
) -> HashIndex {
    let mut index = HashIndex::new();

    for (id, record) in table.iter() {
        if record.icon_name.is_empty() {
            continue;
        }

        let url = icon_url(asset_host, &record.icon_name);
        match hash_icon(fetcher, &url) {
            Ok(hash) => {
                index.insert(id.to_string(), hash);
            }
            Err(e) => debug!("Skipping icon for {} ({}): {}", id, url, e),
        }
    }

    index
}
