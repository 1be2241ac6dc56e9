//! Cached branding-art payload.
//!
//! The first readable candidate path is loaded, encoded as a base64 data
//! URI, and cached for a fixed time window. Expiry is checked lazily on
//! the next access; there is no timer. Missing art is not an error.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::debug;

struct CachedArt {
    data_uri: String,
    loaded_at: Instant,
}

/// Lazily-loaded, TTL-bounded cache for the decoded art payload.
pub struct ArtCache {
    ttl: Duration,
    slot: RwLock<Option<CachedArt>>,
}

impl ArtCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Returns the cached data URI, reloading when absent or expired.
    ///
    /// Yields `None` when no candidate path is readable; callers fall
    /// back to a plain header.
    pub fn data_uri(&self, candidates: &[PathBuf]) -> Option<String> {
        {
            let slot = self.slot.read().unwrap();
            if let Some(art) = slot.as_ref() {
                if art.loaded_at.elapsed() < self.ttl {
                    return Some(art.data_uri.clone());
                }
            }
        }

        let data_uri = load_first(candidates)?;
        let mut slot = self.slot.write().unwrap();
        *slot = Some(CachedArt {
            data_uri: data_uri.clone(),
            loaded_at: Instant::now(),
        });
        Some(data_uri)
    }

    /// Evicts the cached payload.
    pub fn clear(&self) {
        let mut slot = self.slot.write().unwrap();
        *slot = None;
    }
}

fn load_first(candidates: &[PathBuf]) -> Option<String> {
    for path in candidates {
        match std::fs::read(path) {
            Ok(bytes) => {
                debug!(path = %path.display(), bytes = bytes.len(), "art loaded");
                let encoded = BASE64_STANDARD.encode(&bytes);
                return Some(format!("data:{};base64,{}", mime_for(path), encoded));
            }
            Err(_) => continue,
        }
    }
    None
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
