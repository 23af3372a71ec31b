use crate::document::GltfVersion;
use crate::resolver::AssetKey;

/// Errors that can occur while decoding a glTF document.
#[derive(Debug, thiserror::Error)]
pub enum GltfError {
    #[error("failed to parse glTF document for '{0}': {1}")]
    Parse(AssetKey, #[source] serde_json::Error),

    #[error("glTF version {version} of '{asset}' is not supported")]
    UnsupportedVersion { asset: AssetKey, version: GltfVersion },

    #[error(
        "buffer {buffer} of '{asset}' has the wrong length: declared {declared} bytes, resolved {actual}"
    )]
    BufferLengthMismatch {
        asset: AssetKey,
        buffer: usize,
        declared: usize,
        actual: usize,
    },

    #[error("failed to resolve binary '{uri}' for '{asset}'")]
    BufferResolutionFailed { asset: AssetKey, uri: String },

    #[error("buffer {buffer} of '{asset}' is not valid base64: {source}")]
    InvalidBase64 {
        asset: AssetKey,
        buffer: usize,
        source: base64::DecodeError,
    },

    #[error("invalid indices accessor: {0}")]
    InvalidIndicesAccessor(String),

    #[error("invalid accessor for attribute {semantic}: {problem}")]
    InvalidAttributeAccessor {
        semantic: &'static str,
        problem: String,
    },

    #[error("no mesh found in '{0}'")]
    MissingMesh(AssetKey),

    #[error("no primitives found in the mesh of '{0}'")]
    MissingPrimitive(AssetKey),

    #[error("document references a missing {kind} (index {index})")]
    BrokenReference { kind: &'static str, index: usize },
}
