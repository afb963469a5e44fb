//! In-memory graphics device and scripted GUI used by the unit tests

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::foundation::math::Vec2;
use crate::gui::{
    ClipRect, DrawCommand, DrawData, DrawIndices, DrawList, DrawVert, FontImage, FontPixels,
    GuiContext, GuiIo, IndexType, TextureId,
};
use crate::config::TextureFilter;
use crate::input::MouseButton;
use crate::render::device::{
    BlendState, BufferHandle, BufferTarget, BufferUsage, Capability, DeviceError, DeviceResult,
    GraphicsDevice, PixelRect, ProgramHandle, ShaderHandle, ShaderStage, TextureHandle,
    TextureUpload, UniformLocation, VertexArrayHandle, VertexAttribute,
};
use crate::window::RenderTarget;

const TEXTURE_UNITS: usize = 8;

/// Global binding state, the part of the device the renderer must not leak
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    pub program: ProgramHandle,
    pub active_texture_unit: u32,
    pub texture_units: [TextureHandle; TEXTURE_UNITS],
    pub array_buffer: BufferHandle,
    pub vertex_array: VertexArrayHandle,
    pub blend: BlendState,
    pub blend_enabled: bool,
    pub cull_face_enabled: bool,
    pub depth_test_enabled: bool,
    pub scissor_test_enabled: bool,
    pub viewport: PixelRect,
    pub scissor: PixelRect,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            program: ProgramHandle::NONE,
            active_texture_unit: 0,
            texture_units: [TextureHandle::NONE; TEXTURE_UNITS],
            array_buffer: BufferHandle::NONE,
            vertex_array: VertexArrayHandle::NONE,
            blend: BlendState::default(),
            blend_enabled: false,
            cull_face_enabled: false,
            depth_test_enabled: false,
            scissor_test_enabled: false,
            viewport: PixelRect::default(),
            scissor: PixelRect::default(),
        }
    }
}

impl DeviceState {
    pub fn capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::Blend => self.blend_enabled,
            Capability::CullFace => self.cull_face_enabled,
            Capability::DepthTest => self.depth_test_enabled,
            Capability::ScissorTest => self.scissor_test_enabled,
        }
    }

    pub fn set_capability(&mut self, capability: Capability, enabled: bool) {
        match capability {
            Capability::Blend => self.blend_enabled = enabled,
            Capability::CullFace => self.cull_face_enabled = enabled,
            Capability::DepthTest => self.depth_test_enabled = enabled,
            Capability::ScissorTest => self.scissor_test_enabled = enabled,
        }
    }

    fn texture(&self) -> TextureHandle {
        self.texture_units[self.active_texture_unit as usize]
    }
}

/// Texture as seen by the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRecord {
    pub width: u32,
    pub height: u32,
    pub filter: TextureFilter,
    pub rgba: Vec<u8>,
}

/// State stored inside a vertex array object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexArrayRecord {
    pub element_buffer: BufferHandle,
    pub attributes: Vec<(VertexAttribute, BufferHandle)>,
}

/// One indexed draw with the state it ran under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub count: usize,
    pub index_type: IndexType,
    pub offset: usize,
    pub texture: TextureHandle,
    pub scissor: PixelRect,
    pub program: ProgramHandle,
    pub vertex_array: VertexArrayHandle,
}

/// Every device entry point, queries included
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    Query(&'static str),
    SetEnabled(Capability, bool),
    SetBlendState(BlendState),
    SetViewport(PixelRect),
    SetScissor(PixelRect),
    SetActiveTextureUnit(u32),
    BindTexture(TextureHandle),
    UseProgram(ProgramHandle),
    BindBuffer(BufferTarget, BufferHandle),
    BindVertexArray(VertexArrayHandle),
    CreateTexture { width: u32, height: u32, filter: TextureFilter },
    DeleteTexture(TextureHandle),
    CreateBuffer,
    DeleteBuffer(BufferHandle),
    CreateVertexArray,
    DeleteVertexArray(VertexArrayHandle),
    BufferData(BufferTarget, usize),
    SetVertexAttribute(VertexAttribute),
    CompileShader(ShaderStage),
    DeleteShader(ShaderHandle),
    LinkProgram,
    DeleteProgram(ProgramHandle),
    SetUniformI32(UniformLocation, i32),
    SetUniformMat4(UniformLocation),
    DrawElements(usize, IndexType, usize),
}

/// Graphics device that keeps everything in memory and logs every call
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub state: DeviceState,
    pub textures: HashMap<TextureHandle, TextureRecord>,
    pub buffers: HashMap<BufferHandle, Vec<u8>>,
    pub vertex_arrays: HashMap<VertexArrayHandle, VertexArrayRecord>,
    pub shaders: HashSet<ShaderHandle>,
    pub programs: HashSet<ProgramHandle>,
    pub uniforms_mat4: HashMap<(ProgramHandle, i32), [f32; 16]>,
    pub uniforms_i32: HashMap<(ProgramHandle, i32), i32>,
    pub draws: Vec<DrawRecord>,
    pub calls: RefCell<Vec<DeviceCall>>,
    pub fail_shader_stage: Option<ShaderStage>,
    pub fail_link: bool,
    pub missing_locations: HashSet<&'static str>,
    locations: RefCell<HashMap<String, u32>>,
    next_name: u32,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self, call: DeviceCall) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }

    fn location_of(&self, name: &str) -> Option<u32> {
        if self.missing_locations.contains(name) {
            return None;
        }
        let mut locations = self.locations.borrow_mut();
        let next = u32::try_from(locations.len()).ok()?;
        Some(*locations.entry(name.to_string()).or_insert(next))
    }

    fn bound_element_buffer(&self) -> BufferHandle {
        self.vertex_arrays
            .get(&self.state.vertex_array)
            .map_or(BufferHandle::NONE, |vao| vao.element_buffer)
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count_calls(&self, matches: impl Fn(&DeviceCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| matches(call)).count()
    }

    /// Set up arbitrary host-application state
    pub fn scramble_state(&mut self) {
        self.state = DeviceState {
            program: ProgramHandle(900),
            active_texture_unit: 5,
            texture_units: [
                TextureHandle(901),
                TextureHandle(902),
                TextureHandle::NONE,
                TextureHandle::NONE,
                TextureHandle::NONE,
                TextureHandle(905),
                TextureHandle::NONE,
                TextureHandle::NONE,
            ],
            array_buffer: BufferHandle(910),
            vertex_array: VertexArrayHandle(920),
            blend: BlendState {
                equation_rgb: crate::render::device::BlendEquation::ReverseSubtract,
                equation_alpha: crate::render::device::BlendEquation::Max,
                src_rgb: crate::render::device::BlendFactor::DstColor,
                dst_rgb: crate::render::device::BlendFactor::One,
                src_alpha: crate::render::device::BlendFactor::Zero,
                dst_alpha: crate::render::device::BlendFactor::OneMinusDstAlpha,
            },
            blend_enabled: false,
            cull_face_enabled: true,
            depth_test_enabled: true,
            scissor_test_enabled: false,
            viewport: PixelRect::new(3, 4, 320, 240),
            scissor: PixelRect::new(7, 8, 9, 10),
        };
        self.vertex_arrays
            .insert(VertexArrayHandle(920), VertexArrayRecord {
                element_buffer: BufferHandle(911),
                attributes: Vec::new(),
            });
    }
}

impl GraphicsDevice for RecordingDevice {
    fn is_enabled(&self, capability: Capability) -> bool {
        self.log(DeviceCall::Query("is_enabled"));
        self.state.capability(capability)
    }

    fn blend_state(&self) -> BlendState {
        self.log(DeviceCall::Query("blend_state"));
        self.state.blend
    }

    fn viewport(&self) -> PixelRect {
        self.log(DeviceCall::Query("viewport"));
        self.state.viewport
    }

    fn scissor_box(&self) -> PixelRect {
        self.log(DeviceCall::Query("scissor_box"));
        self.state.scissor
    }

    fn active_texture_unit(&self) -> u32 {
        self.log(DeviceCall::Query("active_texture_unit"));
        self.state.active_texture_unit
    }

    fn bound_texture(&self) -> TextureHandle {
        self.log(DeviceCall::Query("bound_texture"));
        self.state.texture()
    }

    fn current_program(&self) -> ProgramHandle {
        self.log(DeviceCall::Query("current_program"));
        self.state.program
    }

    fn bound_array_buffer(&self) -> BufferHandle {
        self.log(DeviceCall::Query("bound_array_buffer"));
        self.state.array_buffer
    }

    fn bound_vertex_array(&self) -> VertexArrayHandle {
        self.log(DeviceCall::Query("bound_vertex_array"));
        self.state.vertex_array
    }

    fn set_enabled(&mut self, capability: Capability, enabled: bool) {
        self.log(DeviceCall::SetEnabled(capability, enabled));
        self.state.set_capability(capability, enabled);
    }

    fn set_blend_state(&mut self, state: BlendState) {
        self.log(DeviceCall::SetBlendState(state));
        self.state.blend = state;
    }

    fn set_viewport(&mut self, rect: PixelRect) {
        self.log(DeviceCall::SetViewport(rect));
        self.state.viewport = rect;
    }

    fn set_scissor(&mut self, rect: PixelRect) {
        self.log(DeviceCall::SetScissor(rect));
        self.state.scissor = rect;
    }

    fn set_active_texture_unit(&mut self, unit: u32) {
        self.log(DeviceCall::SetActiveTextureUnit(unit));
        assert!((unit as usize) < TEXTURE_UNITS, "texture unit {unit} out of range");
        self.state.active_texture_unit = unit;
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        self.log(DeviceCall::BindTexture(texture));
        self.state.texture_units[self.state.active_texture_unit as usize] = texture;
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.log(DeviceCall::UseProgram(program));
        self.state.program = program;
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferHandle) {
        self.log(DeviceCall::BindBuffer(target, buffer));
        match target {
            BufferTarget::Array => self.state.array_buffer = buffer,
            BufferTarget::ElementArray => {
                self.vertex_arrays
                    .entry(self.state.vertex_array)
                    .or_default()
                    .element_buffer = buffer;
            }
        }
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.log(DeviceCall::BindVertexArray(vertex_array));
        self.state.vertex_array = vertex_array;
    }

    fn create_texture(&mut self, upload: &TextureUpload<'_>) -> DeviceResult<TextureHandle> {
        self.log(DeviceCall::CreateTexture {
            width: upload.width,
            height: upload.height,
            filter: upload.filter,
        });
        let handle = TextureHandle(self.allocate());
        self.textures.insert(handle, TextureRecord {
            width: upload.width,
            height: upload.height,
            filter: upload.filter,
            rgba: upload.rgba.to_vec(),
        });
        self.state.texture_units[self.state.active_texture_unit as usize] = handle;
        Ok(handle)
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        self.log(DeviceCall::DeleteTexture(texture));
        self.textures.remove(&texture);
    }

    fn create_buffer(&mut self) -> DeviceResult<BufferHandle> {
        self.log(DeviceCall::CreateBuffer);
        let handle = BufferHandle(self.allocate());
        self.buffers.insert(handle, Vec::new());
        Ok(handle)
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        self.log(DeviceCall::DeleteBuffer(buffer));
        self.buffers.remove(&buffer);
    }

    fn create_vertex_array(&mut self) -> DeviceResult<VertexArrayHandle> {
        self.log(DeviceCall::CreateVertexArray);
        let handle = VertexArrayHandle(self.allocate());
        self.vertex_arrays.insert(handle, VertexArrayRecord::default());
        Ok(handle)
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.log(DeviceCall::DeleteVertexArray(vertex_array));
        self.vertex_arrays.remove(&vertex_array);
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], _usage: BufferUsage) {
        self.log(DeviceCall::BufferData(target, data.len()));
        let buffer = match target {
            BufferTarget::Array => self.state.array_buffer,
            BufferTarget::ElementArray => self.bound_element_buffer(),
        };
        assert!(buffer.is_some(), "buffer_data with nothing bound to {target:?}");
        self.buffers.insert(buffer, data.to_vec());
    }

    fn set_vertex_attribute(&mut self, attribute: &VertexAttribute) {
        self.log(DeviceCall::SetVertexAttribute(*attribute));
        let array_buffer = self.state.array_buffer;
        self.vertex_arrays
            .entry(self.state.vertex_array)
            .or_default()
            .attributes
            .push((*attribute, array_buffer));
    }

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> DeviceResult<ShaderHandle> {
        self.log(DeviceCall::CompileShader(stage));
        if self.fail_shader_stage == Some(stage) || source.is_empty() {
            return Err(DeviceError::ShaderCompile(format!("0:1: {stage:?} syntax error")));
        }
        let handle = ShaderHandle(self.allocate());
        self.shaders.insert(handle);
        Ok(handle)
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        self.log(DeviceCall::DeleteShader(shader));
        self.shaders.remove(&shader);
    }

    fn link_program(&mut self, vertex: ShaderHandle, fragment: ShaderHandle) -> DeviceResult<ProgramHandle> {
        self.log(DeviceCall::LinkProgram);
        if self.fail_link || !self.shaders.contains(&vertex) || !self.shaders.contains(&fragment) {
            return Err(DeviceError::ProgramLink("varying mismatch".to_string()));
        }
        let handle = ProgramHandle(self.allocate());
        self.programs.insert(handle);
        Ok(handle)
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.log(DeviceCall::DeleteProgram(program));
        self.programs.remove(&program);
    }

    fn attribute_location(&self, _program: ProgramHandle, name: &str) -> Option<u32> {
        self.log(DeviceCall::Query("attribute_location"));
        self.location_of(name)
    }

    fn uniform_location(&self, _program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        self.log(DeviceCall::Query("uniform_location"));
        self.location_of(name)
            .and_then(|location| i32::try_from(location).ok())
            .map(UniformLocation)
    }

    fn set_uniform_i32(&mut self, location: UniformLocation, value: i32) {
        self.log(DeviceCall::SetUniformI32(location, value));
        self.uniforms_i32.insert((self.state.program, location.0), value);
    }

    fn set_uniform_mat4(&mut self, location: UniformLocation, value: &[f32; 16]) {
        self.log(DeviceCall::SetUniformMat4(location));
        self.uniforms_mat4.insert((self.state.program, location.0), *value);
    }

    fn draw_elements(&mut self, count: usize, index_type: IndexType, offset: usize) {
        self.log(DeviceCall::DrawElements(count, index_type, offset));
        self.draws.push(DrawRecord {
            count,
            index_type,
            offset,
            texture: self.state.texture(),
            scissor: self.state.scissor,
            program: self.state.program,
            vertex_array: self.state.vertex_array,
        });
    }
}

/// GUI library stand-in driven entirely by the test
#[derive(Debug)]
pub struct ScriptedGui {
    pub io: GuiIo,
    pub font: FontImage,
    pub draw_data: DrawData,
    pub font_requests: usize,
    pub new_frames: usize,
    pub shutdowns: usize,
}

impl ScriptedGui {
    pub fn new() -> Self {
        Self {
            io: GuiIo::default(),
            font: FontImage {
                width: 2,
                height: 2,
                pixels: FontPixels::Alpha8(vec![0x00, 0x40, 0x80, 0xFF]),
            },
            draw_data: DrawData::default(),
            font_requests: 0,
            new_frames: 0,
            shutdowns: 0,
        }
    }
}

impl GuiContext for ScriptedGui {
    fn io(&self) -> &GuiIo {
        &self.io
    }

    fn io_mut(&mut self) -> &mut GuiIo {
        &mut self.io
    }

    fn font_texture_data(&mut self) -> FontImage {
        self.font_requests += 1;
        self.font.clone()
    }

    fn new_frame(&mut self) {
        self.new_frames += 1;
    }

    fn render(&mut self) -> &DrawData {
        &self.draw_data
    }

    fn shutdown(&mut self) {
        self.shutdowns += 1;
    }
}

/// Quad list: four vertices, six indices per command
pub fn quad_list(commands: Vec<DrawCommand>) -> DrawList {
    let indices_needed: usize = commands.iter().map(DrawCommand::element_count).sum();
    let pattern = [0u16, 1, 2, 0, 2, 3];
    DrawList {
        vertices: vec![
            DrawVert::new([0.0, 0.0], [0.0, 0.0], 0xFFFF_FFFF),
            DrawVert::new([10.0, 0.0], [1.0, 0.0], 0xFFFF_FFFF),
            DrawVert::new([10.0, 10.0], [1.0, 1.0], 0xFFFF_FFFF),
            DrawVert::new([0.0, 10.0], [0.0, 1.0], 0xFFFF_FFFF),
        ],
        indices: DrawIndices::U16(pattern.iter().copied().cycle().take(indices_needed).collect()),
        commands,
    }
}

/// Plain textured, clipped draw command
pub fn elements(count: usize, clip_rect: ClipRect, texture: u64) -> DrawCommand {
    DrawCommand::Elements {
        count,
        clip_rect,
        texture_id: TextureId(texture),
    }
}

/// Frame of the given logical size at 1:1 scale
pub fn frame(width: f32, height: f32, lists: Vec<DrawList>) -> DrawData {
    DrawData {
        lists,
        display_size: Vec2::new(width, height),
        framebuffer_scale: Vec2::new(1.0, 1.0),
    }
}

/// Window stand-in with scripted size and held buttons
#[derive(Debug, Default)]
pub struct FakeTarget {
    pub size: (u32, u32),
    pub held: Vec<MouseButton>,
    pub cursor_changes: Vec<bool>,
}

impl FakeTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Self::default()
        }
    }
}

impl RenderTarget for FakeTarget {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_changes.push(visible);
    }

    fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.held.contains(&button)
    }
}
