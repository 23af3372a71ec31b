//! Decode driver: document validation and per-primitive stream extraction.

use tracing::{debug, warn};

use crate::buffers::load_buffers;
use crate::document::{
    Gltf, GltfAccessor, GltfBufferView, GltfComponentType, GltfElementType, GltfMesh,
    GltfPrimitive, GltfTargetBuffer, GltfVersion,
};
use crate::error::GltfError;
use crate::reader::{read_floats, read_indices};
use crate::resolver::{AssetKey, ResourceResolver};
use crate::semantic::MeshAttributeSemantic;

/// The one glTF version this decoder supports.
pub const SUPPORTED_VERSION: GltfVersion = GltfVersion { major: 2, minor: 0 };

/// One decoded attribute stream: the semantic it fills, the element
/// dimension, and the flat float data (element count × dimension values).
#[derive(Debug, Clone)]
pub struct DecodedAttribute {
    pub semantic: MeshAttributeSemantic,
    pub dimension: usize,
    pub data: Vec<f32>,
}

/// Decoded streams of the first primitive of a document's first mesh.
#[derive(Debug, Clone, Default)]
pub struct DecodedPrimitive {
    pub indices: Vec<u32>,
    pub attributes: Vec<DecodedAttribute>,
}

/// Parse raw JSON bytes into a glTF document.
pub fn parse_document(asset: &AssetKey, json: &[u8]) -> Result<Gltf, GltfError> {
    serde_json::from_slice(json).map_err(|source| GltfError::Parse(asset.clone(), source))
}

/// Reject documents this decoder cannot honor.
///
/// A declared minimum version must not ask for a newer minor feature level
/// than [`SUPPORTED_VERSION`]. The document's own version only has to match
/// on the major component; newer minors are forward compatible.
pub fn check_version_supported(asset: &AssetKey, gltf: &Gltf) -> Result<(), GltfError> {
    if let Some(min_version) = gltf.asset.min_version {
        if min_version.major != SUPPORTED_VERSION.major
            || min_version.minor > SUPPORTED_VERSION.minor
        {
            return Err(GltfError::UnsupportedVersion {
                asset: asset.clone(),
                version: min_version,
            });
        }
    }
    if gltf.asset.version.major != SUPPORTED_VERSION.major {
        return Err(GltfError::UnsupportedVersion {
            asset: asset.clone(),
            version: gltf.asset.version,
        });
    }
    Ok(())
}

/// Fail unless the document has at least one mesh. Extra meshes are ignored
/// with a warning.
pub fn check_mesh_present(asset: &AssetKey, gltf: &Gltf) -> Result<(), GltfError> {
    if gltf.meshes.is_empty() {
        return Err(GltfError::MissingMesh(asset.clone()));
    }
    if gltf.meshes.len() > 1 {
        warn!(
            "{} contains {} meshes, only the first will be loaded",
            asset,
            gltf.meshes.len()
        );
    }
    Ok(())
}

/// Fail unless the mesh has at least one primitive. Extra primitives are
/// ignored with a warning.
pub fn check_primitive_present(asset: &AssetKey, mesh: &GltfMesh) -> Result<(), GltfError> {
    if mesh.primitives.is_empty() {
        return Err(GltfError::MissingPrimitive(asset.clone()));
    }
    if mesh.primitives.len() > 1 {
        warn!(
            "{} contains {} primitives, only the first will be loaded",
            asset,
            mesh.primitives.len()
        );
    }
    Ok(())
}

/// Look up the accessor bound to `semantic` in the primitive, if any, and
/// validate that its shape is legal for that semantic.
pub fn get_accessor<'a>(
    semantic: MeshAttributeSemantic,
    primitive: &GltfPrimitive,
    gltf: &'a Gltf,
) -> Result<Option<&'a GltfAccessor>, GltfError> {
    let Some(&index) = primitive.attributes.get(semantic.name()) else {
        return Ok(None);
    };
    let accessor = gltf
        .accessors
        .get(index)
        .ok_or(GltfError::BrokenReference {
            kind: "accessor",
            index,
        })?;
    if !semantic
        .supported_element_types()
        .contains(&accessor.element_type)
    {
        return Err(GltfError::InvalidAttributeAccessor {
            semantic: semantic.name(),
            problem: format!("element type {:?} is not supported", accessor.element_type),
        });
    }
    if !semantic
        .supported_component_types()
        .contains(&accessor.component_type)
    {
        return Err(GltfError::InvalidAttributeAccessor {
            semantic: semantic.name(),
            problem: format!(
                "component type {:?} is not supported",
                accessor.component_type
            ),
        });
    }
    Ok(Some(accessor))
}

/// Resolve the primitive's indices accessor. Primitives without indices are
/// not supported.
pub fn get_indices_accessor<'a>(
    primitive: &GltfPrimitive,
    gltf: &'a Gltf,
    asset: &AssetKey,
) -> Result<&'a GltfAccessor, GltfError> {
    let index = primitive.indices.ok_or_else(|| {
        GltfError::InvalidIndicesAccessor(format!(
            "primitive without indices is not supported, failed to load {}",
            asset
        ))
    })?;
    let accessor = gltf
        .accessors
        .get(index)
        .ok_or(GltfError::BrokenReference {
            kind: "accessor",
            index,
        })?;
    if !accessor.component_type.valid_for_indices() {
        return Err(GltfError::InvalidIndicesAccessor(format!(
            "component type {:?} is not valid for indices",
            accessor.component_type
        )));
    }
    if accessor.element_type != GltfElementType::Scalar {
        return Err(GltfError::InvalidIndicesAccessor(format!(
            "element type {:?} is not valid for indices, expected Scalar",
            accessor.element_type
        )));
    }
    Ok(accessor)
}

/// An indices accessor must not read from a view marked for generic vertex
/// data.
pub fn check_indices_buffer(view: &GltfBufferView) -> Result<(), GltfError> {
    match view.target {
        Some(GltfTargetBuffer::ElementArrayBuffer) | None => Ok(()),
        Some(target) => Err(GltfError::InvalidIndicesAccessor(format!(
            "buffer view targets {:?}, indices require ElementArrayBuffer",
            target
        ))),
    }
}

/// Run the full decode for one asset: version gate, buffer resolution,
/// structural checks, then index and attribute extraction from the first
/// primitive of the first mesh.
pub fn load_primitive_data(
    asset: &AssetKey,
    gltf: &Gltf,
    resolver: &dyn ResourceResolver,
) -> Result<DecodedPrimitive, GltfError> {
    check_version_supported(asset, gltf)?;
    let buffers = load_buffers(asset, gltf, resolver)?;
    check_mesh_present(asset, gltf)?;
    let mesh = &gltf.meshes[0];
    check_primitive_present(asset, mesh)?;
    let primitive = &mesh.primitives[0];

    let accessor = get_indices_accessor(primitive, gltf, asset)?;
    let view = view_for_indices(accessor, gltf)?;
    check_indices_buffer(view)?;
    let indices = read_indices(buffer_payload(&buffers, view)?, accessor, view);
    debug!("decoded {} indices for {}", indices.len(), asset);

    let mut attributes = Vec::new();
    for semantic in MeshAttributeSemantic::ALL {
        let Some(accessor) = get_accessor(semantic, primitive, gltf)? else {
            continue;
        };
        if accessor.component_type != GltfComponentType::Float {
            debug!(
                "skipping {} of {}: component type {:?} has no float decode",
                semantic, asset, accessor.component_type
            );
            continue;
        }
        let view = view_for_attribute(semantic, accessor, gltf)?;
        let data = read_floats(buffer_payload(&buffers, view)?, accessor, view);
        debug!("decoded {} {} floats for {}", data.len(), semantic, asset);
        attributes.push(DecodedAttribute {
            semantic,
            dimension: accessor.element_type.dimension(),
            data,
        });
    }

    Ok(DecodedPrimitive { indices, attributes })
}

fn view_for_indices<'a>(
    accessor: &GltfAccessor,
    gltf: &'a Gltf,
) -> Result<&'a GltfBufferView, GltfError> {
    let index = accessor.buffer_view.ok_or_else(|| {
        GltfError::InvalidIndicesAccessor("indices accessor has no buffer view".into())
    })?;
    gltf.buffer_views
        .get(index)
        .ok_or(GltfError::BrokenReference {
            kind: "buffer view",
            index,
        })
}

fn view_for_attribute<'a>(
    semantic: MeshAttributeSemantic,
    accessor: &GltfAccessor,
    gltf: &'a Gltf,
) -> Result<&'a GltfBufferView, GltfError> {
    let index = accessor
        .buffer_view
        .ok_or_else(|| GltfError::InvalidAttributeAccessor {
            semantic: semantic.name(),
            problem: "accessor has no buffer view".into(),
        })?;
    gltf.buffer_views
        .get(index)
        .ok_or(GltfError::BrokenReference {
            kind: "buffer view",
            index,
        })
}

fn buffer_payload<'a>(
    buffers: &'a [Vec<u8>],
    view: &GltfBufferView,
) -> Result<&'a [u8], GltfError> {
    buffers
        .get(view.buffer)
        .map(Vec::as_slice)
        .ok_or(GltfError::BrokenReference {
            kind: "buffer",
            index: view.buffer,
        })
}
