use std::collections::HashMap;

use cairn_gltf::{load_primitive_data, parse_document, AssetKey, ResourceResolver};
use tracing::{debug, info};

use crate::error::AssetError;
use crate::mesh::MeshAsset;

/// Unique identifier for a loaded asset.
pub type AssetId = u64;

/// A handle referencing a mesh held by the [`AssetServer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(AssetId);

impl MeshHandle {
    /// The unique ID of this asset.
    pub fn id(self) -> AssetId {
        self.0
    }
}

/// Central asset registry. Loads, caches, and provides access to decoded
/// meshes.
pub struct AssetServer<R> {
    resolver: R,
    next_id: AssetId,
    meshes: HashMap<AssetId, MeshAsset>,
    key_to_mesh: HashMap<AssetKey, MeshHandle>,
}

impl<R: ResourceResolver> AssetServer<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            next_id: 1,
            meshes: HashMap::new(),
            key_to_mesh: HashMap::new(),
        }
    }

    /// Load the mesh behind a `module:name` key and return a handle to it.
    /// Subsequent loads of the same key return the cached handle.
    ///
    /// The glTF document is expected at `module:name.gltf`; external buffers
    /// it references resolve through the same resolver.
    pub fn load_mesh(&mut self, key: &str) -> Result<MeshHandle, AssetError> {
        let asset = AssetKey::parse(key).ok_or_else(|| AssetError::InvalidKey(key.to_string()))?;

        if let Some(&handle) = self.key_to_mesh.get(&asset) {
            debug!("returning cached mesh for {}", asset);
            return Ok(handle);
        }

        let document_key = asset.sibling(format!("{}.gltf", asset.name()));
        let json = self
            .resolver
            .resolve(&document_key)
            .ok_or(AssetError::NotFound(document_key))?;

        let gltf = parse_document(&asset, &json)?;
        let primitive = load_primitive_data(&asset, &gltf, &self.resolver)?;

        let name = gltf
            .meshes
            .first()
            .and_then(|mesh| mesh.name.clone())
            .unwrap_or_else(|| asset.name().to_string());
        let mesh = MeshAsset::from_primitive(&asset, name, primitive)?;

        let handle = MeshHandle(self.next_id);
        self.next_id += 1;
        info!(
            "loaded mesh '{}' for {}: {} vertices, {} indices",
            mesh.name,
            asset,
            mesh.vertex_count(),
            mesh.indices.len()
        );
        self.meshes.insert(handle.id(), mesh);
        self.key_to_mesh.insert(asset, handle);

        Ok(handle)
    }

    /// Get a reference to a loaded mesh by its handle.
    pub fn get_mesh(&self, handle: MeshHandle) -> Option<&MeshAsset> {
        self.meshes.get(&handle.id())
    }

    /// Check if a handle refers to a loaded mesh.
    pub fn is_loaded(&self, handle: MeshHandle) -> bool {
        self.meshes.contains_key(&handle.id())
    }
}
