//! Serde model of the glTF 2.0 JSON document.
//!
//! Field names follow the glTF schema (camelCase on the wire). Enumerations
//! that the schema stores as integer codes (component type, buffer-view
//! target, primitive mode) deserialize through explicit code tables, so an
//! unknown code is a parse error rather than a silent default.

use std::collections::HashMap;
use std::fmt;

use glam::{Mat4, Quat, Vec3};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// A glTF version as declared in the asset record, e.g. `"2.0"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GltfVersion {
    pub major: u32,
    pub minor: u32,
}

impl fmt::Display for GltfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl<'de> Deserialize<'de> for GltfVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct VersionVisitor;

        impl<'de> Visitor<'de> for VersionVisitor {
            type Value = GltfVersion;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a version string of the form \"major.minor\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<GltfVersion, E>
            where
                E: de::Error,
            {
                let mut parts = value.split('.');
                let major = parts
                    .next()
                    .and_then(|p| p.parse().ok())
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))?;
                let minor = match parts.next() {
                    Some(p) => p
                        .parse()
                        .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))?,
                    None => 0,
                };
                if parts.next().is_some() {
                    return Err(E::invalid_value(de::Unexpected::Str(value), &self));
                }
                Ok(GltfVersion { major, minor })
            }
        }

        deserializer.deserialize_str(VersionVisitor)
    }
}

/// Scalar storage type of one component, keyed by the glTF code values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GltfComponentType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    UnsignedInt,
    Float,
}

impl GltfComponentType {
    fn from_code(code: u64) -> Option<Self> {
        match code {
            5120 => Some(Self::Byte),
            5121 => Some(Self::UnsignedByte),
            5122 => Some(Self::Short),
            5123 => Some(Self::UnsignedShort),
            5125 => Some(Self::UnsignedInt),
            5126 => Some(Self::Float),
            _ => None,
        }
    }

    /// The code this type is stored as on the wire.
    pub fn code(self) -> u32 {
        match self {
            Self::Byte => 5120,
            Self::UnsignedByte => 5121,
            Self::Short => 5122,
            Self::UnsignedShort => 5123,
            Self::UnsignedInt => 5125,
            Self::Float => 5126,
        }
    }

    /// Width in bytes of one component of this type.
    pub fn byte_width(self) -> usize {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short | Self::UnsignedShort => 2,
            Self::UnsignedInt | Self::Float => 4,
        }
    }

    /// Whether an accessor of this type may back an index buffer.
    pub fn valid_for_indices(self) -> bool {
        matches!(
            self,
            Self::UnsignedByte | Self::UnsignedShort | Self::UnsignedInt
        )
    }
}

impl<'de> Deserialize<'de> for GltfComponentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u64::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| de::Error::custom(format_args!("unknown component type code {}", code)))
    }
}

/// Shape of one logical element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GltfElementType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl GltfElementType {
    /// Number of components in one element of this shape.
    pub fn dimension(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
            Self::Mat2 => 4,
            Self::Mat3 => 9,
            Self::Mat4 => 16,
        }
    }
}

/// Intended GPU usage of a buffer view, keyed by the glTF code values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GltfTargetBuffer {
    ArrayBuffer,
    ElementArrayBuffer,
}

impl GltfTargetBuffer {
    fn from_code(code: u64) -> Option<Self> {
        match code {
            34962 => Some(Self::ArrayBuffer),
            34963 => Some(Self::ElementArrayBuffer),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for GltfTargetBuffer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u64::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| de::Error::custom(format_args!("unknown buffer target code {}", code)))
    }
}

/// Topology a primitive is drawn with, keyed by the glTF code values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GltfMode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl GltfMode {
    fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Self::Points),
            1 => Some(Self::Lines),
            2 => Some(Self::LineLoop),
            3 => Some(Self::LineStrip),
            4 => Some(Self::Triangles),
            5 => Some(Self::TriangleStrip),
            6 => Some(Self::TriangleFan),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for GltfMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u64::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| de::Error::custom(format_args!("unknown primitive mode code {}", code)))
    }
}

/// Top-level glTF document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gltf {
    pub asset: GltfAsset,
    #[serde(default)]
    pub buffers: Vec<GltfBuffer>,
    #[serde(default)]
    pub buffer_views: Vec<GltfBufferView>,
    #[serde(default)]
    pub accessors: Vec<GltfAccessor>,
    #[serde(default)]
    pub meshes: Vec<GltfMesh>,
    #[serde(default)]
    pub nodes: Vec<GltfNode>,
    #[serde(default)]
    pub scenes: Vec<GltfScene>,
    pub scene: Option<usize>,
}

/// Metadata record every glTF document carries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfAsset {
    pub version: GltfVersion,
    pub min_version: Option<GltfVersion>,
    pub generator: Option<String>,
    pub copyright: Option<String>,
}

/// A contiguous block of binary data, embedded in the document or external.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfBuffer {
    pub byte_length: usize,
    pub uri: String,
    pub name: Option<String>,
}

/// A byte range within a buffer, optionally strided for interleaved data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfBufferView {
    pub buffer: usize,
    #[serde(default)]
    pub byte_offset: usize,
    pub byte_length: usize,
    /// Distance between the starts of consecutive elements. 0 means the data
    /// is tightly packed.
    #[serde(default)]
    pub byte_stride: usize,
    pub target: Option<GltfTargetBuffer>,
    pub name: Option<String>,
}

/// Describes how a slice of a buffer view decodes into typed elements.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfAccessor {
    pub buffer_view: Option<usize>,
    /// Offset into the buffer view, on top of the view's own offset.
    #[serde(default)]
    pub byte_offset: usize,
    pub component_type: GltfComponentType,
    #[serde(default)]
    pub normalized: bool,
    pub count: usize,
    #[serde(rename = "type")]
    pub element_type: GltfElementType,
    #[serde(default)]
    pub min: Vec<f32>,
    #[serde(default)]
    pub max: Vec<f32>,
    pub name: Option<String>,
}

/// A named collection of drawable primitives.
#[derive(Debug, Deserialize)]
pub struct GltfMesh {
    #[serde(default)]
    pub primitives: Vec<GltfPrimitive>,
    pub name: Option<String>,
}

/// One drawable unit: attribute bindings plus an optional index accessor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfPrimitive {
    /// Semantic name (e.g. `POSITION`) to accessor index.
    #[serde(default)]
    pub attributes: HashMap<String, usize>,
    pub indices: Option<usize>,
    pub material: Option<usize>,
    #[serde(default)]
    pub mode: GltfMode,
}

/// A node in the scene hierarchy with an optional local transform.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfNode {
    pub name: Option<String>,
    pub mesh: Option<usize>,
    #[serde(default)]
    pub children: Vec<usize>,
    pub matrix: Option<Mat4>,
    pub translation: Option<Vec3>,
    pub rotation: Option<Quat>,
    pub scale: Option<Vec3>,
}

impl GltfNode {
    /// Local transform of this node: the explicit matrix when one is given,
    /// otherwise composed from translation, rotation and scale.
    pub fn local_matrix(&self) -> Mat4 {
        if let Some(matrix) = self.matrix {
            return matrix;
        }
        let translation = self.translation.unwrap_or(Vec3::ZERO);
        let rotation = self.rotation.unwrap_or(Quat::IDENTITY);
        let scale = self.scale.unwrap_or(Vec3::ONE);
        Mat4::from_scale_rotation_translation(scale, rotation, translation)
    }
}

/// A named set of root nodes.
#[derive(Debug, Deserialize)]
pub struct GltfScene {
    #[serde(default)]
    pub nodes: Vec<usize>,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_parses_major_and_minor() {
        let version: GltfVersion = serde_json::from_str("\"2.0\"").unwrap();
        assert_eq!(version, GltfVersion { major: 2, minor: 0 });
        assert_eq!(version.to_string(), "2.0");
    }

    #[test]
    fn version_without_minor_defaults_to_zero() {
        let version: GltfVersion = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(version, GltfVersion { major: 2, minor: 0 });
    }

    #[test]
    fn malformed_versions_are_rejected() {
        assert!(serde_json::from_str::<GltfVersion>("\"two.zero\"").is_err());
        assert!(serde_json::from_str::<GltfVersion>("\"2.0.1\"").is_err());
    }

    #[test]
    fn unknown_component_type_code_is_rejected() {
        assert!(serde_json::from_str::<GltfComponentType>("9999").is_err());
    }

    #[test]
    fn component_type_widths_match_the_format() {
        assert_eq!(GltfComponentType::UnsignedByte.byte_width(), 1);
        assert_eq!(GltfComponentType::UnsignedShort.byte_width(), 2);
        assert_eq!(GltfComponentType::UnsignedInt.byte_width(), 4);
        assert_eq!(GltfComponentType::Float.byte_width(), 4);
        assert!(!GltfComponentType::Float.valid_for_indices());
        assert!(!GltfComponentType::Short.valid_for_indices());
        assert!(GltfComponentType::UnsignedShort.valid_for_indices());
    }

    #[test]
    fn document_fields_map_from_camel_case() {
        let json = r#"{
            "asset": {"version": "2.0", "generator": "editor-export", "minVersion": "2.0"},
            "buffers": [{"byteLength": 44, "uri": "mesh_data.bin"}],
            "bufferViews": [
                {"buffer": 0, "byteOffset": 0, "byteLength": 6, "target": 34963},
                {"buffer": 0, "byteOffset": 8, "byteLength": 36, "byteStride": 12, "target": 34962}
            ],
            "accessors": [
                {"bufferView": 0, "componentType": 5123, "count": 3, "type": "SCALAR"},
                {"bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3",
                 "min": [-1.0, -1.0, 0.0], "max": [1.0, 1.0, 0.0]}
            ],
            "meshes": [{"name": "Tri", "primitives": [
                {"attributes": {"POSITION": 1}, "indices": 0}
            ]}]
        }"#;
        let gltf: Gltf = serde_json::from_str(json).unwrap();

        assert_eq!(gltf.asset.version, GltfVersion { major: 2, minor: 0 });
        assert_eq!(gltf.asset.min_version, Some(GltfVersion { major: 2, minor: 0 }));
        assert_eq!(gltf.buffers[0].byte_length, 44);
        assert_eq!(gltf.buffer_views[0].target, Some(GltfTargetBuffer::ElementArrayBuffer));
        assert_eq!(gltf.buffer_views[0].byte_stride, 0);
        assert_eq!(gltf.buffer_views[1].byte_stride, 12);
        assert_eq!(gltf.accessors[0].component_type, GltfComponentType::UnsignedShort);
        assert_eq!(gltf.accessors[0].element_type, GltfElementType::Scalar);
        assert_eq!(gltf.accessors[1].element_type, GltfElementType::Vec3);
        assert_eq!(gltf.accessors[1].min, vec![-1.0, -1.0, 0.0]);
        let primitive = &gltf.meshes[0].primitives[0];
        assert_eq!(primitive.attributes["POSITION"], 1);
        assert_eq!(primitive.indices, Some(0));
        assert_eq!(primitive.mode, GltfMode::Triangles);
    }

    #[test]
    fn node_transform_composes_trs() {
        let json = r#"{
            "name": "pivot",
            "translation": [1.0, 2.0, 3.0],
            "scale": [1.0, 1.0, 1.0]
        }"#;
        let node: GltfNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.local_matrix(), Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn node_explicit_matrix_wins() {
        let json = r#"{
            "matrix": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1],
            "translation": [5.0, 5.0, 5.0]
        }"#;
        let node: GltfNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.local_matrix(), Mat4::IDENTITY);
    }
}
