//! Cairn Assets - Mesh loading and caching
//!
//! Resolves glTF documents and their binary buffers through pluggable
//! resolvers, decodes them with `cairn-gltf`, and caches the resulting
//! meshes behind cheap copyable handles.

mod error;
mod mesh;
mod resolvers;
mod server;

pub use error::AssetError;
pub use mesh::MeshAsset;
pub use resolvers::{DirResolver, MemoryResolver};
pub use server::{AssetId, AssetServer, MeshHandle};
