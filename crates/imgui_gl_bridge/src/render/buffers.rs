//! Reusable GPU buffers for GUI geometry

use super::device::{
    BufferHandle, BufferTarget, BufferUsage, DeviceResult, GraphicsDevice, VertexArrayHandle,
};
use super::vertex_layout::{AttributeLocations, DrawVertLayout};
use crate::gui::DrawList;

/// Vertex buffer, index buffer and the vertex array binding them
///
/// Created once with the device objects; each draw list replaces the whole
/// contents of both buffers before its commands run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuBuffers {
    /// Vertex array object holding the attribute setup and index binding
    pub vertex_array: VertexArrayHandle,
    /// Interleaved [`DrawVert`](crate::gui::DrawVert) storage
    pub vertex_buffer: BufferHandle,
    /// Index storage
    pub index_buffer: BufferHandle,
}

impl GpuBuffers {
    /// Create the buffers and record the attribute layout in the vertex array
    ///
    /// Leaves the new vertex array and vertex buffer bound; the caller owns
    /// restoring the previous bindings.
    pub fn create(device: &mut dyn GraphicsDevice, locations: AttributeLocations) -> DeviceResult<Self> {
        let vertex_buffer = device.create_buffer()?;
        let index_buffer = match device.create_buffer() {
            Ok(buffer) => buffer,
            Err(e) => {
                device.delete_buffer(vertex_buffer);
                return Err(e);
            }
        };
        let vertex_array = match device.create_vertex_array() {
            Ok(vertex_array) => vertex_array,
            Err(e) => {
                device.delete_buffer(index_buffer);
                device.delete_buffer(vertex_buffer);
                return Err(e);
            }
        };

        device.bind_vertex_array(vertex_array);
        device.bind_buffer(BufferTarget::Array, vertex_buffer);
        for attribute in &DrawVertLayout::attributes(locations) {
            device.set_vertex_attribute(attribute);
        }
        device.bind_buffer(BufferTarget::ElementArray, index_buffer);

        Ok(Self {
            vertex_array,
            vertex_buffer,
            index_buffer,
        })
    }

    /// Replace buffer contents with one draw list's geometry
    ///
    /// Expects [`Self::vertex_array`] to be bound so the index buffer binding
    /// lands in it.
    pub fn upload(&self, device: &mut dyn GraphicsDevice, list: &DrawList) {
        device.bind_buffer(BufferTarget::Array, self.vertex_buffer);
        device.buffer_data(
            BufferTarget::Array,
            bytemuck::cast_slice(&list.vertices),
            BufferUsage::StreamDraw,
        );
        device.bind_buffer(BufferTarget::ElementArray, self.index_buffer);
        device.buffer_data(BufferTarget::ElementArray, list.indices.as_bytes(), BufferUsage::StreamDraw);
    }

    /// Delete all three objects
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.delete_vertex_array(self.vertex_array);
        device.delete_buffer(self.vertex_buffer);
        device.delete_buffer(self.index_buffer);
    }
}
