//! Ambient graphics state capture and restore

use super::device::{
    BlendState, BufferHandle, BufferTarget, Capability, GraphicsDevice, PixelRect, ProgramHandle,
    TextureHandle, VertexArrayHandle,
};

/// Every piece of device state the GUI renderer mutates
///
/// Captured before the first mutation of a frame and restored before the
/// renderer returns. Element buffer bindings and vertex attribute setup are
/// vertex-array state and come back with [`Self::vertex_array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicsStateSnapshot {
    /// Program in use
    pub program: ProgramHandle,
    /// Selected texture unit
    pub active_texture_unit: u32,
    /// 2D texture bound on unit 0
    pub texture: TextureHandle,
    /// Array buffer binding
    pub array_buffer: BufferHandle,
    /// Vertex array binding
    pub vertex_array: VertexArrayHandle,
    /// Blend equations and factors
    pub blend: BlendState,
    /// Blend enabled
    pub blend_enabled: bool,
    /// Face culling enabled
    pub cull_face_enabled: bool,
    /// Depth test enabled
    pub depth_test_enabled: bool,
    /// Scissor test enabled
    pub scissor_test_enabled: bool,
    /// Viewport rectangle
    pub viewport: PixelRect,
    /// Scissor box
    pub scissor_box: PixelRect,
}

impl GraphicsStateSnapshot {
    /// Capture the current state
    ///
    /// Leaves texture unit 0 selected so the unit-0 binding can be read; that
    /// selection is part of the renderer's own state from here on.
    pub fn capture(device: &mut dyn GraphicsDevice) -> Self {
        let active_texture_unit = device.active_texture_unit();
        device.set_active_texture_unit(0);

        Self {
            program: device.current_program(),
            active_texture_unit,
            texture: device.bound_texture(),
            array_buffer: device.bound_array_buffer(),
            vertex_array: device.bound_vertex_array(),
            blend: device.blend_state(),
            blend_enabled: device.is_enabled(Capability::Blend),
            cull_face_enabled: device.is_enabled(Capability::CullFace),
            depth_test_enabled: device.is_enabled(Capability::DepthTest),
            scissor_test_enabled: device.is_enabled(Capability::ScissorTest),
            viewport: device.viewport(),
            scissor_box: device.scissor_box(),
        }
    }

    /// Put every captured field back
    pub fn restore(&self, device: &mut dyn GraphicsDevice) {
        device.use_program(self.program);
        device.set_active_texture_unit(0);
        device.bind_texture(self.texture);
        device.set_active_texture_unit(self.active_texture_unit);
        device.bind_vertex_array(self.vertex_array);
        device.bind_buffer(BufferTarget::Array, self.array_buffer);
        device.set_blend_state(self.blend);
        device.set_enabled(Capability::Blend, self.blend_enabled);
        device.set_enabled(Capability::CullFace, self.cull_face_enabled);
        device.set_enabled(Capability::DepthTest, self.depth_test_enabled);
        device.set_enabled(Capability::ScissorTest, self.scissor_test_enabled);
        device.set_viewport(self.viewport);
        device.set_scissor(self.scissor_box);
    }
}
