//! Vertex attribute layout for GUI vertices
//!
//! Maps the producer's [`DrawVert`] record onto device attribute bindings.
//! Offsets come from the record itself so the binding cannot drift from the
//! struct definition.

use super::device::{AttributeType, VertexAttribute};
use crate::gui::DrawVert;

/// Shader attribute locations for the three vertex fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLocations {
    /// 2D position
    pub position: u32,
    /// Texture coordinates
    pub uv: u32,
    /// Packed color
    pub color: u32,
}

/// Vertex layout implementation for [`DrawVert`]
pub struct DrawVertLayout;

impl DrawVertLayout {
    /// Attribute bindings for an interleaved [`DrawVert`] buffer
    ///
    /// Position and UV are two floats each; color is four normalized bytes.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn attributes(locations: AttributeLocations) -> [VertexAttribute; 3] {
        let stride = DrawVert::STRIDE as i32;
        [
            // Position attribute
            VertexAttribute {
                location: locations.position,
                components: 2,
                kind: AttributeType::Float,
                normalized: false,
                stride,
                offset: DrawVert::POS_OFFSET,
            },
            // Texture coordinate attribute
            VertexAttribute {
                location: locations.uv,
                components: 2,
                kind: AttributeType::Float,
                normalized: false,
                stride,
                offset: DrawVert::UV_OFFSET,
            },
            // Color attribute
            VertexAttribute {
                location: locations.color,
                components: 4,
                kind: AttributeType::UnsignedByte,
                normalized: true,
                stride,
                offset: DrawVert::COL_OFFSET,
            },
        ]
    }
}
