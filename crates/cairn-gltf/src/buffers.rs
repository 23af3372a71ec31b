//! Buffer payload resolution.
//!
//! Every buffer a document declares resolves to raw bytes from one of three
//! sources: two embedded base64 data-URI encodings, or an external resource
//! looked up through the asset layer.

use base64::{engine::general_purpose, Engine as _};
use tracing::debug;

use crate::document::Gltf;
use crate::error::GltfError;
use crate::resolver::{AssetKey, ResourceResolver};

const OCTET_STREAM_PREFIX: &str = "data:application/octet-stream;base64,";
const GLTF_BUFFER_PREFIX: &str = "data:application/gltf-buffer;base64,";
const BINARY_SUFFIX: &str = ".bin";

/// Where one buffer's bytes come from, decided by a single look at its URI.
#[derive(Debug, PartialEq, Eq)]
enum BufferSource<'a> {
    /// Base64 payload embedded with the octet-stream media type.
    EmbeddedOctetStream(&'a str),
    /// Base64 payload embedded with the glTF-buffer media type.
    EmbeddedGltfBuffer(&'a str),
    /// Named resource for the asset layer, `.bin` suffix already stripped.
    External(&'a str),
}

impl<'a> BufferSource<'a> {
    fn classify(uri: &'a str) -> Self {
        if let Some(payload) = uri.strip_prefix(OCTET_STREAM_PREFIX) {
            BufferSource::EmbeddedOctetStream(payload)
        } else if let Some(payload) = uri.strip_prefix(GLTF_BUFFER_PREFIX) {
            BufferSource::EmbeddedGltfBuffer(payload)
        } else {
            BufferSource::External(uri.strip_suffix(BINARY_SUFFIX).unwrap_or(uri))
        }
    }
}

/// Resolve every buffer declared by `gltf` into raw bytes, in declaration
/// order. External URIs are looked up within the module of `asset`, and each
/// payload must match the buffer's declared byte length exactly. Any single
/// failure aborts the load, since accessors address buffers positionally.
pub fn load_buffers(
    asset: &AssetKey,
    gltf: &Gltf,
    resolver: &dyn ResourceResolver,
) -> Result<Vec<Vec<u8>>, GltfError> {
    let mut loaded = Vec::with_capacity(gltf.buffers.len());
    for (index, buffer) in gltf.buffers.iter().enumerate() {
        let bytes = match BufferSource::classify(&buffer.uri) {
            BufferSource::EmbeddedOctetStream(payload)
            | BufferSource::EmbeddedGltfBuffer(payload) => general_purpose::STANDARD
                .decode(payload)
                .map_err(|source| GltfError::InvalidBase64 {
                    asset: asset.clone(),
                    buffer: index,
                    source,
                })?,
            BufferSource::External(name) => {
                let key = asset.sibling(name);
                debug!("resolving external buffer {} of {} as {}", index, asset, key);
                resolver
                    .resolve(&key)
                    .ok_or_else(|| GltfError::BufferResolutionFailed {
                        asset: asset.clone(),
                        uri: buffer.uri.clone(),
                    })?
            }
        };
        if bytes.len() != buffer.byte_length {
            return Err(GltfError::BufferLengthMismatch {
                asset: asset.clone(),
                buffer: index,
                declared: buffer.byte_length,
                actual: bytes.len(),
            });
        }
        debug!("buffer {} of {} resolved to {} bytes", index, asset, bytes.len());
        loaded.push(bytes);
    }
    Ok(loaded)
}
