use bytemuck::cast_slice;
use cairn_gltf::{AssetKey, DecodedAttribute, DecodedPrimitive, MeshAttributeSemantic};
use glam::Vec3;

use crate::error::AssetError;

/// A loaded mesh asset (renderer-agnostic). Holds the vertex streams of the
/// first primitive of a glTF document, grouped into fixed-size elements.
#[derive(Debug, Clone)]
pub struct MeshAsset {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub tex_coords: Option<Vec<[f32; 2]>>,
    pub colors: Option<Vec<[f32; 4]>>,
    pub indices: Vec<u32>,
    /// Decoded streams with no dedicated field, e.g. vertex weights.
    pub extra: Vec<DecodedAttribute>,
}

impl MeshAsset {
    /// Build a mesh from decoded primitive streams. Colors stored as RGB are
    /// expanded to RGBA with full alpha.
    pub fn from_primitive(
        asset: &AssetKey,
        name: String,
        primitive: DecodedPrimitive,
    ) -> Result<Self, AssetError> {
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut tex_coords = None;
        let mut colors = None;
        let mut extra = Vec::new();

        for attribute in primitive.attributes {
            match (attribute.semantic, attribute.dimension) {
                (MeshAttributeSemantic::Position, 3) => {
                    positions = regroup::<3>(asset, &attribute)?;
                }
                (MeshAttributeSemantic::Normal, 3) => {
                    normals = regroup::<3>(asset, &attribute)?;
                }
                (MeshAttributeSemantic::Texcoord0, 2) => {
                    tex_coords = Some(regroup::<2>(asset, &attribute)?);
                }
                (MeshAttributeSemantic::Color0, 3) => {
                    let rgb = regroup::<3>(asset, &attribute)?;
                    colors = Some(rgb.into_iter().map(|[r, g, b]| [r, g, b, 1.0]).collect());
                }
                (MeshAttributeSemantic::Color0, 4) => {
                    colors = Some(regroup::<4>(asset, &attribute)?);
                }
                _ => extra.push(attribute),
            }
        }

        Ok(Self {
            name,
            positions,
            normals,
            tex_coords,
            colors,
            indices: primitive.indices,
            extra,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Raw bytes of the position stream, ready for buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        cast_slice(&self.positions)
    }

    /// Raw bytes of the index stream, ready for buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        cast_slice(&self.indices)
    }

    /// Axis-aligned bounds of the position stream, or `None` for an empty
    /// mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = Vec3::from_array(*self.positions.first()?);
        let mut min = first;
        let mut max = first;
        for position in &self.positions[1..] {
            let v = Vec3::from_array(*position);
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }
}

/// Group a flat float stream into `N`-element arrays.
fn regroup<const N: usize>(
    asset: &AssetKey,
    attribute: &DecodedAttribute,
) -> Result<Vec<[f32; N]>, AssetError> {
    if attribute.data.len() % N != 0 {
        return Err(AssetError::MalformedAttribute {
            asset: asset.clone(),
            semantic: attribute.semantic,
            len: attribute.data.len(),
            dimension: N,
        });
    }
    Ok(cast_slice(&attribute.data).to_vec())
}
