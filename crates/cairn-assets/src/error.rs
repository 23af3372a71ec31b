use cairn_gltf::{AssetKey, GltfError, MeshAttributeSemantic};

/// Errors that can occur during asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(AssetKey),

    #[error("invalid asset key '{0}', expected 'module:name'")]
    InvalidKey(String),

    #[error("failed to decode mesh: {0}")]
    Decode(#[from] GltfError),

    #[error(
        "attribute {semantic} of '{asset}' holds {len} values, which does not divide into elements of {dimension}"
    )]
    MalformedAttribute {
        asset: AssetKey,
        semantic: MeshAttributeSemantic,
        len: usize,
        dimension: usize,
    },
}
