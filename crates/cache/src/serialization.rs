//! Cache document codec
//!
//! The document is a JSON object keyed by barcode. Keys are written in sorted
//! order so identical caches produce identical bytes.

use scancache_core::{CachedRecord, Error, Result};
use std::collections::BTreeMap;

/// In-memory shape of the cache document
pub type CacheDocument = BTreeMap<String, CachedRecord>;

/// Encode a document to its canonical bytes
pub fn encode(document: &CacheDocument) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(document).map_err(Error::from)
}

/// Decode a document, rejecting the whole blob on any error
///
/// The map key is authoritative: a record whose `upc` disagrees with its key
/// is re-keyed to the key it was stored under.
pub fn decode(bytes: &[u8]) -> Result<CacheDocument> {
    let document: CacheDocument = serde_json::from_slice(bytes).map_err(Error::snapshot_decode)?;
    Ok(normalize(document))
}

/// Align every record's barcode with its map key
pub fn normalize(mut document: CacheDocument) -> CacheDocument {
    for (barcode, record) in document.iter_mut() {
        if record.barcode != *barcode {
            tracing::debug!(
                key = %barcode,
                upc = %record.barcode,
                "re-keying record to its map key"
            );
            record.barcode = barcode.clone();
        }
    }
    document
}
