//! Filesystem and in-memory resource resolvers.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use cairn_gltf::{AssetKey, ResourceResolver};
use tracing::debug;

/// Resolves asset keys against a directory tree laid out as
/// `<root>/<module>/<name>`.
///
/// Binary buffer names arrive with their `.bin` suffix already stripped, so
/// a name that misses as-is is retried with the suffix restored.
pub struct DirResolver {
    root: PathBuf,
}

impl DirResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn candidates(&self, key: &AssetKey) -> [PathBuf; 2] {
        let base = self.root.join(key.module());
        [
            base.join(key.name()),
            base.join(format!("{}.bin", key.name())),
        ]
    }
}

impl ResourceResolver for DirResolver {
    fn resolve(&self, key: &AssetKey) -> Option<Vec<u8>> {
        for candidate in self.candidates(key) {
            if let Ok(bytes) = fs::read(&candidate) {
                debug!("resolved {} from {}", key, candidate.display());
                return Some(bytes);
            }
        }
        debug!("no file for {} under {}", key, self.root.display());
        None
    }
}

/// Resolves asset keys from an in-memory table. Useful for tests and for
/// tools that synthesize documents on the fly.
#[derive(Default)]
pub struct MemoryResolver {
    entries: HashMap<AssetKey, Vec<u8>>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: AssetKey, bytes: Vec<u8>) {
        self.entries.insert(key, bytes);
    }
}

impl ResourceResolver for MemoryResolver {
    fn resolve(&self, key: &AssetKey) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }
}
