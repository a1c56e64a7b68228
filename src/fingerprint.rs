//! Content fingerprints for clipboard images
//!
//! Images are re-encoded to PNG before hashing so that two clipboard reads
//! with identical pixels and dimensions fingerprint identically regardless of
//! the in-memory representation they arrived in. The PNG encoder runs with
//! its default settings every call, so the encoding is deterministic.

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat};
use sha2::{Digest, Sha256};
use std::io::Cursor;

/// Encode an image to PNG bytes
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("Failed to encode image as PNG")?;
    Ok(bytes)
}

/// SHA-256 digest of a byte slice as 64 lowercase hex characters
pub fn digest_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Compute the content fingerprint of an image
///
/// Two images differing in any pixel or in width/height produce different
/// fingerprints with overwhelming probability.
pub fn fingerprint(image: &DynamicImage) -> Result<String> {
    Ok(digest_hex(&encode_png(image)?))
}
