//! OpenGL 3.x core implementation of [`GraphicsDevice`]
//!
//! Every method issues the matching `gl` call on the context current on the
//! calling thread. The device holds no GL state of its own, so queries always
//! reflect what the host application or a draw callback last set.

use std::ffi::{c_void, CString};
use std::marker::PhantomData;
use std::ptr;

use gl::types::{GLboolean, GLenum, GLint, GLuint};

use super::device::{
    AttributeType, BlendEquation, BlendFactor, BlendState, BufferHandle, BufferTarget, BufferUsage,
    Capability, DeviceError, DeviceResult, GraphicsDevice, PixelRect, ProgramHandle, ShaderHandle,
    ShaderStage, TextureFilter, TextureHandle, TextureUpload, UniformLocation, VertexArrayHandle,
    VertexAttribute,
};
use crate::gui::IndexType;

/// Graphics device backed by the current OpenGL context
///
/// Not `Send`: GL contexts are bound to the thread that made them current.
#[derive(Debug)]
pub struct GlDevice {
    _context: PhantomData<*const ()>,
}

impl GlDevice {
    /// Load GL entry points through the windowing layer's symbol loader
    ///
    /// The context must be current on this thread.
    pub fn load_with<F>(loader: F) -> DeviceResult<Self>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let required = [
            ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
            ("glBlendEquationSeparate", gl::BlendEquationSeparate::is_loaded()),
            ("glBlendFuncSeparate", gl::BlendFuncSeparate::is_loaded()),
            ("glCreateProgram", gl::CreateProgram::is_loaded()),
            ("glUniformMatrix4fv", gl::UniformMatrix4fv::is_loaded()),
            ("glDrawElements", gl::DrawElements::is_loaded()),
        ];
        if let Some((name, _)) = required.iter().find(|(_, loaded)| !loaded) {
            log::error!("OpenGL entry point {} is unavailable", name);
            return Err(DeviceError::MissingFunction(*name));
        }

        log::info!("OpenGL device ready: {}", gl_string(gl::VERSION));
        Ok(Self {
            _context: PhantomData,
        })
    }

    #[allow(clippy::unused_self)]
    fn integer(&self, name: GLenum) -> GLint {
        let mut value = 0;
        unsafe { gl::GetIntegerv(name, &mut value) };
        value
    }

    #[allow(clippy::unused_self)]
    fn rect(&self, name: GLenum) -> PixelRect {
        let mut values = [0; 4];
        unsafe { gl::GetIntegerv(name, values.as_mut_ptr()) };
        PixelRect::new(values[0], values[1], values[2], values[3])
    }

    #[allow(clippy::cast_sign_loss)]
    fn name(&self, binding: GLenum) -> GLuint {
        self.integer(binding) as GLuint
    }

    #[allow(clippy::cast_sign_loss)]
    fn enumeration(&self, name: GLenum) -> GLenum {
        self.integer(name) as GLenum
    }
}

fn gl_string(name: GLenum) -> String {
    let raw = unsafe { gl::GetString(name) };
    if raw.is_null() {
        return String::from("unknown");
    }
    unsafe { std::ffi::CStr::from_ptr(raw.cast()) }
        .to_string_lossy()
        .into_owned()
}

fn c_string(text: &str) -> DeviceResult<CString> {
    CString::new(text).map_err(|_| DeviceError::InvalidArgument(format!("interior NUL in {text:?}")))
}

#[allow(clippy::cast_sign_loss)]
fn info_log(length: GLint, read: impl FnOnce(GLint, *mut gl::types::GLchar)) -> String {
    let mut buffer = vec![0u8; length.max(1) as usize];
    read(length, buffer.as_mut_ptr().cast());
    String::from_utf8_lossy(&buffer)
        .trim_end_matches('\0')
        .trim_end()
        .to_string()
}

const fn capability_enum(capability: Capability) -> GLenum {
    match capability {
        Capability::Blend => gl::BLEND,
        Capability::CullFace => gl::CULL_FACE,
        Capability::DepthTest => gl::DEPTH_TEST,
        Capability::ScissorTest => gl::SCISSOR_TEST,
    }
}

const fn factor_enum(factor: BlendFactor) -> GLenum {
    match factor {
        BlendFactor::Zero => gl::ZERO,
        BlendFactor::One => gl::ONE,
        BlendFactor::SrcColor => gl::SRC_COLOR,
        BlendFactor::OneMinusSrcColor => gl::ONE_MINUS_SRC_COLOR,
        BlendFactor::DstColor => gl::DST_COLOR,
        BlendFactor::OneMinusDstColor => gl::ONE_MINUS_DST_COLOR,
        BlendFactor::SrcAlpha => gl::SRC_ALPHA,
        BlendFactor::OneMinusSrcAlpha => gl::ONE_MINUS_SRC_ALPHA,
        BlendFactor::DstAlpha => gl::DST_ALPHA,
        BlendFactor::OneMinusDstAlpha => gl::ONE_MINUS_DST_ALPHA,
        BlendFactor::Other(value) => value,
    }
}

const fn factor_from_enum(value: GLenum) -> BlendFactor {
    match value {
        gl::ZERO => BlendFactor::Zero,
        gl::ONE => BlendFactor::One,
        gl::SRC_COLOR => BlendFactor::SrcColor,
        gl::ONE_MINUS_SRC_COLOR => BlendFactor::OneMinusSrcColor,
        gl::DST_COLOR => BlendFactor::DstColor,
        gl::ONE_MINUS_DST_COLOR => BlendFactor::OneMinusDstColor,
        gl::SRC_ALPHA => BlendFactor::SrcAlpha,
        gl::ONE_MINUS_SRC_ALPHA => BlendFactor::OneMinusSrcAlpha,
        gl::DST_ALPHA => BlendFactor::DstAlpha,
        gl::ONE_MINUS_DST_ALPHA => BlendFactor::OneMinusDstAlpha,
        other => BlendFactor::Other(other),
    }
}

const fn equation_enum(equation: BlendEquation) -> GLenum {
    match equation {
        BlendEquation::Add => gl::FUNC_ADD,
        BlendEquation::Subtract => gl::FUNC_SUBTRACT,
        BlendEquation::ReverseSubtract => gl::FUNC_REVERSE_SUBTRACT,
        BlendEquation::Min => gl::MIN,
        BlendEquation::Max => gl::MAX,
        BlendEquation::Other(value) => value,
    }
}

const fn equation_from_enum(value: GLenum) -> BlendEquation {
    match value {
        gl::FUNC_ADD => BlendEquation::Add,
        gl::FUNC_SUBTRACT => BlendEquation::Subtract,
        gl::FUNC_REVERSE_SUBTRACT => BlendEquation::ReverseSubtract,
        gl::MIN => BlendEquation::Min,
        gl::MAX => BlendEquation::Max,
        other => BlendEquation::Other(other),
    }
}

const fn buffer_target_enum(target: BufferTarget) -> GLenum {
    match target {
        BufferTarget::Array => gl::ARRAY_BUFFER,
        BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
    }
}

const fn usage_enum(usage: BufferUsage) -> GLenum {
    match usage {
        BufferUsage::StreamDraw => gl::STREAM_DRAW,
    }
}

const fn stage_enum(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    }
}

const fn attribute_type_enum(kind: AttributeType) -> GLenum {
    match kind {
        AttributeType::Float => gl::FLOAT,
        AttributeType::UnsignedByte => gl::UNSIGNED_BYTE,
    }
}

const fn index_type_enum(index_type: IndexType) -> GLenum {
    match index_type {
        IndexType::U16 => gl::UNSIGNED_SHORT,
        IndexType::U32 => gl::UNSIGNED_INT,
    }
}

const fn filter_enum(filter: TextureFilter) -> GLenum {
    match filter {
        TextureFilter::Linear => gl::LINEAR,
        TextureFilter::Nearest => gl::NEAREST,
    }
}

const fn gl_bool(value: bool) -> GLboolean {
    if value {
        gl::TRUE
    } else {
        gl::FALSE
    }
}

impl GraphicsDevice for GlDevice {
    fn is_enabled(&self, capability: Capability) -> bool {
        unsafe { gl::IsEnabled(capability_enum(capability)) == gl::TRUE }
    }

    fn blend_state(&self) -> BlendState {
        BlendState {
            equation_rgb: equation_from_enum(self.enumeration(gl::BLEND_EQUATION_RGB)),
            equation_alpha: equation_from_enum(self.enumeration(gl::BLEND_EQUATION_ALPHA)),
            src_rgb: factor_from_enum(self.enumeration(gl::BLEND_SRC_RGB)),
            dst_rgb: factor_from_enum(self.enumeration(gl::BLEND_DST_RGB)),
            src_alpha: factor_from_enum(self.enumeration(gl::BLEND_SRC_ALPHA)),
            dst_alpha: factor_from_enum(self.enumeration(gl::BLEND_DST_ALPHA)),
        }
    }

    fn viewport(&self) -> PixelRect {
        self.rect(gl::VIEWPORT)
    }

    fn scissor_box(&self) -> PixelRect {
        self.rect(gl::SCISSOR_BOX)
    }

    fn active_texture_unit(&self) -> u32 {
        self.enumeration(gl::ACTIVE_TEXTURE).saturating_sub(gl::TEXTURE0)
    }

    fn bound_texture(&self) -> TextureHandle {
        TextureHandle(self.name(gl::TEXTURE_BINDING_2D))
    }

    fn current_program(&self) -> ProgramHandle {
        ProgramHandle(self.name(gl::CURRENT_PROGRAM))
    }

    fn bound_array_buffer(&self) -> BufferHandle {
        BufferHandle(self.name(gl::ARRAY_BUFFER_BINDING))
    }

    fn bound_vertex_array(&self) -> VertexArrayHandle {
        VertexArrayHandle(self.name(gl::VERTEX_ARRAY_BINDING))
    }

    fn set_enabled(&mut self, capability: Capability, enabled: bool) {
        let cap = capability_enum(capability);
        unsafe {
            if enabled {
                gl::Enable(cap);
            } else {
                gl::Disable(cap);
            }
        }
    }

    fn set_blend_state(&mut self, state: BlendState) {
        unsafe {
            gl::BlendEquationSeparate(equation_enum(state.equation_rgb), equation_enum(state.equation_alpha));
            gl::BlendFuncSeparate(
                factor_enum(state.src_rgb),
                factor_enum(state.dst_rgb),
                factor_enum(state.src_alpha),
                factor_enum(state.dst_alpha),
            );
        }
    }

    fn set_viewport(&mut self, rect: PixelRect) {
        unsafe { gl::Viewport(rect.x, rect.y, rect.width, rect.height) };
    }

    fn set_scissor(&mut self, rect: PixelRect) {
        unsafe { gl::Scissor(rect.x, rect.y, rect.width, rect.height) };
    }

    fn set_active_texture_unit(&mut self, unit: u32) {
        unsafe { gl::ActiveTexture(gl::TEXTURE0 + unit) };
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        unsafe { gl::BindTexture(gl::TEXTURE_2D, texture.0) };
    }

    fn use_program(&mut self, program: ProgramHandle) {
        unsafe { gl::UseProgram(program.0) };
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferHandle) {
        unsafe { gl::BindBuffer(buffer_target_enum(target), buffer.0) };
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        unsafe { gl::BindVertexArray(vertex_array.0) };
    }

    #[allow(clippy::cast_possible_wrap)]
    fn create_texture(&mut self, upload: &TextureUpload<'_>) -> DeviceResult<TextureHandle> {
        let width = i32::try_from(upload.width)
            .map_err(|_| DeviceError::InvalidArgument(format!("texture width {}", upload.width)))?;
        let height = i32::try_from(upload.height)
            .map_err(|_| DeviceError::InvalidArgument(format!("texture height {}", upload.height)))?;
        let expected = upload.width as usize * upload.height as usize * 4;
        if upload.rgba.len() != expected {
            return Err(DeviceError::InvalidArgument(format!(
                "{} bytes of RGBA for a {}x{} texture",
                upload.rgba.len(),
                upload.width,
                upload.height
            )));
        }

        let mut texture = 0;
        unsafe { gl::GenTextures(1, &mut texture) };
        if texture == 0 {
            return Err(DeviceError::AllocationFailed("texture"));
        }

        let filter = filter_enum(upload.filter) as GLint;
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, texture);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint);
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 4);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8 as GLint,
                width,
                height,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                upload.rgba.as_ptr().cast(),
            );
        }
        Ok(TextureHandle(texture))
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        if texture.is_some() {
            unsafe { gl::DeleteTextures(1, &texture.0) };
        }
    }

    fn create_buffer(&mut self) -> DeviceResult<BufferHandle> {
        let mut buffer = 0;
        unsafe { gl::GenBuffers(1, &mut buffer) };
        if buffer == 0 {
            return Err(DeviceError::AllocationFailed("buffer"));
        }
        Ok(BufferHandle(buffer))
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        if buffer.is_some() {
            unsafe { gl::DeleteBuffers(1, &buffer.0) };
        }
    }

    fn create_vertex_array(&mut self) -> DeviceResult<VertexArrayHandle> {
        let mut vertex_array = 0;
        unsafe { gl::GenVertexArrays(1, &mut vertex_array) };
        if vertex_array == 0 {
            return Err(DeviceError::AllocationFailed("vertex array"));
        }
        Ok(VertexArrayHandle(vertex_array))
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        if vertex_array.is_some() {
            unsafe { gl::DeleteVertexArrays(1, &vertex_array.0) };
        }
    }

    // Slices never exceed isize::MAX bytes
    #[allow(clippy::cast_possible_wrap)]
    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        unsafe {
            gl::BufferData(
                buffer_target_enum(target),
                data.len() as isize,
                data.as_ptr().cast(),
                usage_enum(usage),
            );
        }
    }

    fn set_vertex_attribute(&mut self, attribute: &VertexAttribute) {
        unsafe {
            gl::EnableVertexAttribArray(attribute.location);
            gl::VertexAttribPointer(
                attribute.location,
                attribute.components,
                attribute_type_enum(attribute.kind),
                gl_bool(attribute.normalized),
                attribute.stride,
                attribute.offset as *const c_void,
            );
        }
    }

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> DeviceResult<ShaderHandle> {
        let source = c_string(source)?;
        unsafe {
            let shader = gl::CreateShader(stage_enum(stage));
            if shader == 0 {
                return Err(DeviceError::AllocationFailed("shader"));
            }
            gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(shader);

            let mut ok = 0;
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut ok);
            if ok == 0 {
                let mut length = 0;
                gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut length);
                let log = info_log(length, |len, buf| {
                    gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buf);
                });
                gl::DeleteShader(shader);
                return Err(DeviceError::ShaderCompile(log));
            }
            Ok(ShaderHandle(shader))
        }
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        if shader.is_some() {
            unsafe { gl::DeleteShader(shader.0) };
        }
    }

    fn link_program(&mut self, vertex: ShaderHandle, fragment: ShaderHandle) -> DeviceResult<ProgramHandle> {
        unsafe {
            let program = gl::CreateProgram();
            if program == 0 {
                return Err(DeviceError::AllocationFailed("program"));
            }
            gl::AttachShader(program, vertex.0);
            gl::AttachShader(program, fragment.0);
            gl::LinkProgram(program);
            gl::DetachShader(program, vertex.0);
            gl::DetachShader(program, fragment.0);

            let mut ok = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut ok);
            if ok == 0 {
                let mut length = 0;
                gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut length);
                let log = info_log(length, |len, buf| {
                    gl::GetProgramInfoLog(program, len, ptr::null_mut(), buf);
                });
                gl::DeleteProgram(program);
                return Err(DeviceError::ProgramLink(log));
            }
            Ok(ProgramHandle(program))
        }
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        if program.is_some() {
            unsafe { gl::DeleteProgram(program.0) };
        }
    }

    fn attribute_location(&self, program: ProgramHandle, name: &str) -> Option<u32> {
        let name = c_string(name).ok()?;
        let location = unsafe { gl::GetAttribLocation(program.0, name.as_ptr()) };
        u32::try_from(location).ok()
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let name = c_string(name).ok()?;
        let location = unsafe { gl::GetUniformLocation(program.0, name.as_ptr()) };
        (location >= 0).then_some(UniformLocation(location))
    }

    fn set_uniform_i32(&mut self, location: UniformLocation, value: i32) {
        unsafe { gl::Uniform1i(location.0, value) };
    }

    fn set_uniform_mat4(&mut self, location: UniformLocation, value: &[f32; 16]) {
        unsafe { gl::UniformMatrix4fv(location.0, 1, gl::FALSE, value.as_ptr()) };
    }

    fn draw_elements(&mut self, count: usize, index_type: IndexType, offset: usize) {
        let Ok(count) = i32::try_from(count) else {
            log::error!("Skipping draw of {} indices: count exceeds the API range", count);
            return;
        };
        unsafe {
            gl::DrawElements(gl::TRIANGLES, count, index_type_enum(index_type), offset as *const c_void);
        }
    }
}
