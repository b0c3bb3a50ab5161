//! Streaming SHA-256 digests of pack artifacts.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Read size for streaming digests
pub const CHUNK_SIZE: usize = 1024 * 1024;

#[derive(Error, Debug)]
#[error("failed to digest {}: {source}", .path.display())]
pub struct DigestError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Compute the SHA-256 of a file as lowercase hex, reading fixed-size chunks.
pub fn sha256_file(path: &Path) -> Result<String, DigestError> {
    let wrap = |source: std::io::Error| DigestError {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(wrap)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).map_err(wrap)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
