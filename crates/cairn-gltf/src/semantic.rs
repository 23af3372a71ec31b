use std::fmt;

use crate::document::{GltfComponentType, GltfElementType};

/// Vertex-attribute roles the pipeline extracts, with the wire name and the
/// accessor shapes the format allows for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshAttributeSemantic {
    Position,
    Normal,
    Texcoord0,
    Texcoord1,
    Color0,
    Joints0,
    Weights0,
}

impl MeshAttributeSemantic {
    /// Every semantic, in the order attributes are extracted.
    pub const ALL: [MeshAttributeSemantic; 7] = [
        Self::Position,
        Self::Normal,
        Self::Texcoord0,
        Self::Texcoord1,
        Self::Color0,
        Self::Joints0,
        Self::Weights0,
    ];

    /// The key this semantic uses in a primitive's attribute map.
    pub fn name(self) -> &'static str {
        match self {
            Self::Position => "POSITION",
            Self::Normal => "NORMAL",
            Self::Texcoord0 => "TEXCOORD_0",
            Self::Texcoord1 => "TEXCOORD_1",
            Self::Color0 => "COLOR_0",
            Self::Joints0 => "JOINTS_0",
            Self::Weights0 => "WEIGHTS_0",
        }
    }

    /// Element shapes an accessor may use for this semantic.
    pub fn supported_element_types(self) -> &'static [GltfElementType] {
        match self {
            Self::Position | Self::Normal => &[GltfElementType::Vec3],
            Self::Texcoord0 | Self::Texcoord1 => &[GltfElementType::Vec2],
            Self::Color0 => &[GltfElementType::Vec3, GltfElementType::Vec4],
            Self::Joints0 | Self::Weights0 => &[GltfElementType::Vec4],
        }
    }

    /// Component types an accessor may use for this semantic.
    pub fn supported_component_types(self) -> &'static [GltfComponentType] {
        match self {
            Self::Joints0 => &[
                GltfComponentType::UnsignedByte,
                GltfComponentType::UnsignedShort,
            ],
            _ => &[GltfComponentType::Float],
        }
    }
}

impl fmt::Display for MeshAttributeSemantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
