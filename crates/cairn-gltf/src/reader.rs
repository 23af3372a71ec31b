//! Byte-level accessor decoding.
//!
//! All reads are little-endian, per the format. Decoding walks explicit byte
//! windows with a local cursor; malformed windows are clamped to the
//! available payload rather than panicking.

use tracing::warn;

use crate::document::{GltfAccessor, GltfBufferView, GltfComponentType};

/// Slice `bytes` down to a declared window, clamping to the available
/// payload. A declared range past the payload end warns and yields the
/// clamped window.
fn window(bytes: &[u8], offset: usize, length: usize) -> &[u8] {
    let start = offset.min(bytes.len());
    let end = offset.saturating_add(length).min(bytes.len());
    if end - start < length {
        warn!(
            "buffer window [{}..{}) exceeds the {} byte payload, clamping",
            offset,
            offset.saturating_add(length),
            bytes.len()
        );
    }
    &bytes[start..end]
}

/// Decode an index accessor's buffer-view window into unsigned 32-bit values.
///
/// The whole window is walked with no stride, one element per component
/// width; index buffers are tightly packed per the format. Component types
/// that cannot back indices contribute nothing. The accessor's declared count
/// is not cross-checked against the decoded length; the view's byte length is
/// trusted. A window that is not a multiple of the component width warns and
/// drops the tail bytes.
pub fn read_indices(bytes: &[u8], accessor: &GltfAccessor, view: &GltfBufferView) -> Vec<u32> {
    let data = window(bytes, view.byte_offset, view.byte_length);
    let width = accessor.component_type.byte_width();
    if accessor.component_type.valid_for_indices() && data.len() % width != 0 {
        warn!(
            "index window of {} bytes is not a multiple of the {} byte width, dropping the tail",
            data.len(),
            width
        );
    }
    match accessor.component_type {
        GltfComponentType::UnsignedByte => data.iter().copied().map(u32::from).collect(),
        GltfComponentType::UnsignedShort => data
            .chunks_exact(2)
            .map(|pair| u32::from(u16::from_le_bytes([pair[0], pair[1]])))
            .collect(),
        GltfComponentType::UnsignedInt => data
            .chunks_exact(4)
            .map(|quad| u32::from_le_bytes([quad[0], quad[1], quad[2], quad[3]]))
            .collect(),
        _ => Vec::new(),
    }
}

/// Decode a float attribute accessor's window into 32-bit floats.
///
/// Returns an empty vector for non-float accessors; callers check the
/// component type first and treat empty as not applicable. The window starts
/// at the view's offset plus the accessor's own offset. When the view
/// declares a stride, one element's floats are read contiguously and the
/// remaining `stride - element size` bytes are skipped before the next
/// element, which is what interleaved vertex layouts need. Tightly packed
/// windows warn when tail bytes short of a whole element remain.
pub fn read_floats(bytes: &[u8], accessor: &GltfAccessor, view: &GltfBufferView) -> Vec<f32> {
    if accessor.component_type != GltfComponentType::Float {
        return Vec::new();
    }
    if accessor.byte_offset > view.byte_length {
        warn!(
            "accessor offset {} lies past the buffer view's {} bytes",
            accessor.byte_offset, view.byte_length
        );
        return Vec::new();
    }
    let data = window(
        bytes,
        view.byte_offset.saturating_add(accessor.byte_offset),
        view.byte_length - accessor.byte_offset,
    );

    let dimension = accessor.element_type.dimension();
    let element_size = accessor.component_type.byte_width() * dimension;
    let gap = if view.byte_stride > 0 {
        view.byte_stride.saturating_sub(element_size)
    } else {
        0
    };

    let mut values = Vec::with_capacity(data.len() / 4);
    let mut cursor = 0;
    while cursor < data.len() && data.len() - cursor >= element_size {
        for component in 0..dimension {
            let at = cursor + component * 4;
            values.push(f32::from_le_bytes([
                data[at],
                data[at + 1],
                data[at + 2],
                data[at + 3],
            ]));
        }
        let Some(next) = cursor.checked_add(element_size + gap) else {
            break;
        };
        cursor = next;
    }
    if gap == 0 && cursor < data.len() {
        warn!(
            "{} trailing bytes do not form a whole {} byte element, ignoring",
            data.len() - cursor,
            element_size
        );
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::GltfElementType;

    fn accessor(
        component_type: GltfComponentType,
        element_type: GltfElementType,
        byte_offset: usize,
    ) -> GltfAccessor {
        GltfAccessor {
            buffer_view: Some(0),
            byte_offset,
            component_type,
            normalized: false,
            count: 0,
            element_type,
            min: Vec::new(),
            max: Vec::new(),
            name: None,
        }
    }

    fn view(byte_offset: usize, byte_length: usize, byte_stride: usize) -> GltfBufferView {
        GltfBufferView {
            buffer: 0,
            byte_offset,
            byte_length,
            byte_stride,
            target: None,
            name: None,
        }
    }

    fn float_bytes(values: &[f32]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(values.len() * 4);
        for value in values {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn unsigned_byte_indices_zero_extend() {
        let accessor = accessor(GltfComponentType::UnsignedByte, GltfElementType::Scalar, 0);
        let indices = read_indices(&[0, 5, 250], &accessor, &view(0, 3, 0));
        assert_eq!(indices, vec![0, 5, 250]);
    }

    #[test]
    fn unsigned_short_max_value_decodes_to_65535() {
        let accessor = accessor(GltfComponentType::UnsignedShort, GltfElementType::Scalar, 0);
        let indices = read_indices(&[0xFF, 0xFF], &accessor, &view(0, 2, 0));
        assert_eq!(indices, vec![65535]);
    }

    #[test]
    fn unsigned_short_indices_read_little_endian() {
        let accessor = accessor(GltfComponentType::UnsignedShort, GltfElementType::Scalar, 0);
        let bytes = [1u8, 0, 2, 0, 0, 1];
        let indices = read_indices(&bytes, &accessor, &view(0, 6, 0));
        assert_eq!(indices, vec![1, 2, 256]);
    }

    #[test]
    fn unsigned_int_indices_read_little_endian() {
        let accessor = accessor(GltfComponentType::UnsignedInt, GltfElementType::Scalar, 0);
        let bytes = 70_000u32.to_le_bytes();
        let indices = read_indices(&bytes, &accessor, &view(0, 4, 0));
        assert_eq!(indices, vec![70_000]);
    }

    #[test]
    fn index_window_honors_the_view_offset() {
        let accessor = accessor(GltfComponentType::UnsignedShort, GltfElementType::Scalar, 0);
        let bytes = [0xAAu8, 0xAA, 0xAA, 0xAA, 3, 0, 4, 0];
        let indices = read_indices(&bytes, &accessor, &view(4, 4, 0));
        assert_eq!(indices, vec![3, 4]);
    }

    #[test]
    fn float_component_type_yields_no_indices() {
        let accessor = accessor(GltfComponentType::Float, GltfElementType::Scalar, 0);
        let indices = read_indices(&[0; 8], &accessor, &view(0, 8, 0));
        assert!(indices.is_empty());
    }

    #[test]
    fn trailing_partial_index_is_dropped() {
        let accessor = accessor(GltfComponentType::UnsignedShort, GltfElementType::Scalar, 0);
        let indices = read_indices(&[1, 0, 9], &accessor, &view(0, 3, 0));
        assert_eq!(indices, vec![1]);
    }

    #[test]
    fn oversized_window_clamps_to_the_payload() {
        let accessor = accessor(GltfComponentType::UnsignedShort, GltfElementType::Scalar, 0);
        let indices = read_indices(&[1, 0, 2, 0], &accessor, &view(0, 100, 0));
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn tightly_packed_floats_decode_contiguously() {
        let accessor = accessor(GltfComponentType::Float, GltfElementType::Vec3, 0);
        let bytes = float_bytes(&[1.5, -2.0, 3.25, 0.5, 0.25, -8.0]);
        let floats = read_floats(&bytes, &accessor, &view(0, 24, 0));
        assert_eq!(floats, vec![1.5, -2.0, 3.25, 0.5, 0.25, -8.0]);
    }

    #[test]
    fn declared_stride_equal_to_element_size_means_no_gap() {
        let accessor = accessor(GltfComponentType::Float, GltfElementType::Vec3, 0);
        let bytes = float_bytes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let floats = read_floats(&bytes, &accessor, &view(0, 24, 12));
        assert_eq!(floats, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn interleaved_stride_skips_the_other_attribute() {
        // Two vertices of position + normal interleaved, 24 byte stride.
        let bytes = float_bytes(&[
            1.0, 2.0, 3.0, // position 0
            0.0, 1.0, 0.0, // normal 0
            4.0, 5.0, 6.0, // position 1
            0.0, 0.0, 1.0, // normal 1
        ]);
        let shared_view = view(0, 48, 24);

        let positions = read_floats(
            &bytes,
            &accessor(GltfComponentType::Float, GltfElementType::Vec3, 0),
            &shared_view,
        );
        assert_eq!(positions, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let normals = read_floats(
            &bytes,
            &accessor(GltfComponentType::Float, GltfElementType::Vec3, 12),
            &shared_view,
        );
        assert_eq!(normals, vec![0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn non_float_accessor_reads_no_floats() {
        let accessor = accessor(GltfComponentType::UnsignedShort, GltfElementType::Vec3, 0);
        let bytes = float_bytes(&[1.0, 2.0, 3.0]);
        assert!(read_floats(&bytes, &accessor, &view(0, 12, 0)).is_empty());
    }

    #[test]
    fn accessor_offset_past_view_end_reads_nothing() {
        let accessor = accessor(GltfComponentType::Float, GltfElementType::Vec3, 64);
        let bytes = float_bytes(&[1.0, 2.0, 3.0]);
        assert!(read_floats(&bytes, &accessor, &view(0, 12, 0)).is_empty());
    }

    #[test]
    fn trailing_partial_element_is_dropped() {
        let accessor = accessor(GltfComponentType::Float, GltfElementType::Vec3, 0);
        // 4 floats: one full vec3 plus one loose component.
        let bytes = float_bytes(&[1.0, 2.0, 3.0, 4.0]);
        let floats = read_floats(&bytes, &accessor, &view(0, 16, 0));
        assert_eq!(floats, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn enormous_stride_reads_only_the_first_element() {
        let accessor = accessor(GltfComponentType::Float, GltfElementType::Vec3, 0);
        let bytes = float_bytes(&[1.0, 2.0, 3.0]);
        let floats = read_floats(&bytes, &accessor, &view(0, 12, usize::MAX));
        assert_eq!(floats, vec![1.0, 2.0, 3.0]);
    }
}
