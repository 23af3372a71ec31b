//! Cairn glTF - Document model and mesh decoding
//!
//! Parses glTF 2.0 JSON documents, resolves their embedded and external
//! buffers, and decodes index and float attribute streams for the Cairn
//! asset pipeline.

mod buffers;
mod document;
mod error;
mod loader;
mod reader;
mod resolver;
mod semantic;

pub use buffers::load_buffers;
pub use document::{
    Gltf, GltfAccessor, GltfAsset, GltfBuffer, GltfBufferView, GltfComponentType, GltfElementType,
    GltfMesh, GltfMode, GltfNode, GltfPrimitive, GltfScene, GltfTargetBuffer, GltfVersion,
};
pub use error::GltfError;
pub use loader::{
    check_indices_buffer, check_mesh_present, check_primitive_present, check_version_supported,
    get_accessor, get_indices_accessor, load_primitive_data, parse_document, DecodedAttribute,
    DecodedPrimitive, SUPPORTED_VERSION,
};
pub use reader::{read_floats, read_indices};
pub use resolver::{AssetKey, ResourceResolver};
pub use semantic::MeshAttributeSemantic;
