//! Draw-list execution
//!
//! Replays one frame of GUI draw data on the device:
//! 1. capture the ambient state the GUI pass is about to change
//! 2. install blending, scissoring, the GUI program and the projection
//! 3. upload each list and walk its commands with a running index cursor
//! 4. restore the captured state
//!
//! The host application's state is observed unchanged after [`execute`]
//! returns.

use super::buffers::GpuBuffers;
use super::device::{BlendState, Capability, GraphicsDevice, PixelRect};
use super::shader::ShaderProgram;
use super::state::GraphicsStateSnapshot;
use super::texture::texture_handle;
use crate::foundation::math::{gui_projection, to_column_major, Vec2};
use crate::gui::{ClipRect, DrawCommand, DrawData};

/// Device objects a GUI pass draws with
#[derive(Debug, Clone, Copy)]
pub struct PassResources<'a> {
    /// Linked GUI program
    pub shader: &'a ShaderProgram,
    /// Geometry buffers
    pub buffers: &'a GpuBuffers,
}

/// Scissor box for a clip rectangle already in framebuffer pixels
///
/// Clip rectangles run top-down while the scissor origin is bottom-left, so
/// the vertical position is flipped against the framebuffer height.
#[allow(clippy::cast_possible_truncation)]
pub fn scissor_rect(clip: ClipRect, framebuffer_height: i32) -> PixelRect {
    PixelRect {
        x: clip.left as i32,
        y: framebuffer_height - clip.bottom as i32,
        width: (clip.right - clip.left) as i32,
        height: (clip.bottom - clip.top) as i32,
    }
}

/// Put the device into the state GUI geometry is drawn with
///
/// # Arguments
///
/// * `device` - Device to configure
/// * `resources` - Program and vertex array to bind
/// * `display_size` - Logical display size the projection maps from
/// * `framebuffer_size` - Viewport size in framebuffer pixels
pub fn install_render_state(
    device: &mut dyn GraphicsDevice,
    resources: PassResources<'_>,
    display_size: Vec2,
    framebuffer_size: (i32, i32),
) {
    device.set_enabled(Capability::Blend, true);
    device.set_blend_state(BlendState::ALPHA_OVER);
    device.set_enabled(Capability::CullFace, false);
    device.set_enabled(Capability::DepthTest, false);
    device.set_enabled(Capability::ScissorTest, true);

    let (width, height) = framebuffer_size;
    device.set_viewport(PixelRect::new(0, 0, width, height));

    let shader = resources.shader;
    device.use_program(shader.program);
    device.set_uniform_i32(shader.uniforms.texture, 0);
    device.set_uniform_mat4(
        shader.uniforms.projection,
        &to_column_major(&gui_projection(display_size)),
    );
    device.bind_vertex_array(resources.buffers.vertex_array);
}

/// Execute one frame of draw data
///
/// Returns immediately, without touching the device, when the framebuffer has
/// no area.
///
/// # Arguments
///
/// * `device` - Device to draw on; its observable state is restored on return
/// * `resources` - GUI program and geometry buffers
/// * `draw_data` - Frame produced by the GUI library, only borrowed for this call
pub fn execute(device: &mut dyn GraphicsDevice, resources: PassResources<'_>, draw_data: &DrawData) {
    let framebuffer_size = draw_data.framebuffer_size();
    let (fb_width, fb_height) = framebuffer_size;
    if fb_width <= 0 || fb_height <= 0 {
        return;
    }
    let scale = draw_data.framebuffer_scale;

    let snapshot = GraphicsStateSnapshot::capture(device);
    install_render_state(device, resources, draw_data.display_size, framebuffer_size);

    for list in &draw_data.lists {
        resources.buffers.upload(device, list);
        let index_type = list.indices.index_type();

        let mut cursor = 0usize;
        for command in &list.commands {
            match command {
                DrawCommand::Callback { callback, .. } => {
                    callback.invoke(list, command, device);
                }
                DrawCommand::ResetRenderState => {
                    install_render_state(device, resources, draw_data.display_size, framebuffer_size);
                }
                DrawCommand::Elements {
                    count,
                    clip_rect,
                    texture_id,
                } => {
                    device.bind_texture(texture_handle(*texture_id));
                    device.set_scissor(scissor_rect(clip_rect.scaled(scale), fb_height));
                    device.draw_elements(*count, index_type, cursor * index_type.size());
                }
            }
            cursor += command.element_count();
        }
    }

    snapshot.restore(device);
    log::trace!(
        "GUI pass: {} lists, {} vertices, {} indices",
        draw_data.lists.len(),
        draw_data.total_vertex_count(),
        draw_data.total_index_count()
    );
}
