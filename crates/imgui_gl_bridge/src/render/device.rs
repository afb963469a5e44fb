//! Graphics device abstraction
//!
//! Defines the interface between the GUI renderer and the graphics API.
//! The methods mirror the slice of OpenGL state the renderer reads and writes,
//! so the draw-list engine can be driven by [`GlDevice`](super::GlDevice) in
//! production and by an in-memory device in tests.
//!
//! Queries return the state of the currently selected texture unit and the
//! currently bound vertex array, exactly as the underlying API does.

use thiserror::Error;

pub use crate::config::TextureFilter;
use crate::gui::IndexType;

/// Device-level failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The API returned no object name
    #[error("Failed to allocate {0}")]
    AllocationFailed(&'static str),

    /// A required entry point was not found by the loader
    #[error("Graphics function not loaded: {0}")]
    MissingFunction(&'static str),

    /// Shader source could not be compiled
    #[error("Shader compilation failed: {0}")]
    ShaderCompile(String),

    /// Program could not be linked
    #[error("Program link failed: {0}")]
    ProgramLink(String),

    /// Invalid argument passed to the device
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for device operations
pub type DeviceResult<T> = Result<T, DeviceError>;

macro_rules! object_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(pub u32);

        impl $name {
            /// The unallocated sentinel
            pub const NONE: Self = Self(0);

            /// Whether the handle refers to an allocated object
            pub const fn is_some(self) -> bool {
                self.0 != 0
            }
        }
    };
}

object_handle!(
    /// Texture object name
    TextureHandle
);
object_handle!(
    /// Buffer object name
    BufferHandle
);
object_handle!(
    /// Vertex array object name
    VertexArrayHandle
);
object_handle!(
    /// Shader object name
    ShaderHandle
);
object_handle!(
    /// Program object name
    ProgramHandle
);

/// Uniform location inside a linked program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

/// Switchable pipeline capabilities the renderer touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Color blending
    Blend,
    /// Face culling
    CullFace,
    /// Depth testing
    DepthTest,
    /// Scissor testing
    ScissorTest,
}

/// Blend factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// 0
    Zero,
    /// 1
    One,
    /// Source color
    SrcColor,
    /// 1 - source color
    OneMinusSrcColor,
    /// Destination color
    DstColor,
    /// 1 - destination color
    OneMinusDstColor,
    /// Source alpha
    SrcAlpha,
    /// 1 - source alpha
    OneMinusSrcAlpha,
    /// Destination alpha
    DstAlpha,
    /// 1 - destination alpha
    OneMinusDstAlpha,
    /// Any other factor, by raw API value
    Other(u32),
}

/// Blend equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendEquation {
    /// src + dst
    Add,
    /// src - dst
    Subtract,
    /// dst - src
    ReverseSubtract,
    /// min(src, dst)
    Min,
    /// max(src, dst)
    Max,
    /// Any other equation, by raw API value
    Other(u32),
}

/// Complete separate-RGB/alpha blend configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendState {
    /// Equation for color channels
    pub equation_rgb: BlendEquation,
    /// Equation for the alpha channel
    pub equation_alpha: BlendEquation,
    /// Source factor for color channels
    pub src_rgb: BlendFactor,
    /// Destination factor for color channels
    pub dst_rgb: BlendFactor,
    /// Source factor for alpha
    pub src_alpha: BlendFactor,
    /// Destination factor for alpha
    pub dst_alpha: BlendFactor,
}

impl BlendState {
    /// "Source-alpha over" blending used for GUI geometry
    pub const ALPHA_OVER: Self = Self {
        equation_rgb: BlendEquation::Add,
        equation_alpha: BlendEquation::Add,
        src_rgb: BlendFactor::SrcAlpha,
        dst_rgb: BlendFactor::OneMinusSrcAlpha,
        src_alpha: BlendFactor::SrcAlpha,
        dst_alpha: BlendFactor::OneMinusSrcAlpha,
    };
}

impl Default for BlendState {
    /// API default: add, one, zero
    fn default() -> Self {
        Self {
            equation_rgb: BlendEquation::Add,
            equation_alpha: BlendEquation::Add,
            src_rgb: BlendFactor::One,
            dst_rgb: BlendFactor::Zero,
            src_alpha: BlendFactor::One,
            dst_alpha: BlendFactor::Zero,
        }
    }
}

/// Integer pixel rectangle, origin bottom-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    /// Left edge
    pub x: i32,
    /// Bottom edge
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl PixelRect {
    /// Create a rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// Buffer binding points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data
    Array,
    /// Index data, part of the bound vertex array's state
    ElementArray,
}

/// Expected update frequency of buffer contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    /// Rewritten every frame
    StreamDraw,
}

/// Shader pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex stage
    Vertex,
    /// Fragment stage
    Fragment,
}

/// Component type of a vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    /// 32-bit float
    Float,
    /// 8-bit unsigned integer
    UnsignedByte,
}

/// Binding of one vertex attribute inside an interleaved buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// Shader attribute location
    pub location: u32,
    /// Components per vertex
    pub components: i32,
    /// Component type
    pub kind: AttributeType,
    /// Map integer components to `0..1`
    pub normalized: bool,
    /// Bytes between consecutive vertices
    pub stride: i32,
    /// Byte offset of the first component
    pub offset: usize,
}

/// Description of a 2D RGBA8 texture upload
#[derive(Debug, Clone, Copy)]
pub struct TextureUpload<'a> {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Minification and magnification filter
    pub filter: TextureFilter,
    /// Tightly packed RGBA8 rows
    pub rgba: &'a [u8],
}

/// Graphics API operations used by the GUI renderer
///
/// Object-safe so user draw callbacks can receive `&mut dyn GraphicsDevice`.
pub trait GraphicsDevice {
    // State queries

    /// Whether a capability is enabled
    fn is_enabled(&self, capability: Capability) -> bool;

    /// Current blend configuration
    fn blend_state(&self) -> BlendState;

    /// Current viewport
    fn viewport(&self) -> PixelRect;

    /// Current scissor box
    fn scissor_box(&self) -> PixelRect;

    /// Selected texture unit, zero-based
    fn active_texture_unit(&self) -> u32;

    /// 2D texture bound on the selected unit
    fn bound_texture(&self) -> TextureHandle;

    /// Program in use
    fn current_program(&self) -> ProgramHandle;

    /// Buffer bound to [`BufferTarget::Array`]
    fn bound_array_buffer(&self) -> BufferHandle;

    /// Bound vertex array
    fn bound_vertex_array(&self) -> VertexArrayHandle;

    // State changes

    /// Enable or disable a capability
    fn set_enabled(&mut self, capability: Capability, enabled: bool);

    /// Set equations and factors for color and alpha
    fn set_blend_state(&mut self, state: BlendState);

    /// Set the viewport
    fn set_viewport(&mut self, rect: PixelRect);

    /// Set the scissor box
    fn set_scissor(&mut self, rect: PixelRect);

    /// Select a texture unit
    fn set_active_texture_unit(&mut self, unit: u32);

    /// Bind a 2D texture on the selected unit
    fn bind_texture(&mut self, texture: TextureHandle);

    /// Make a program current
    fn use_program(&mut self, program: ProgramHandle);

    /// Bind a buffer to a target
    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferHandle);

    /// Bind a vertex array
    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    // Resources

    /// Create a 2D texture, leaving it bound on the selected unit
    fn create_texture(&mut self, upload: &TextureUpload<'_>) -> DeviceResult<TextureHandle>;

    /// Delete a texture
    fn delete_texture(&mut self, texture: TextureHandle);

    /// Create a buffer object
    fn create_buffer(&mut self) -> DeviceResult<BufferHandle>;

    /// Delete a buffer object
    fn delete_buffer(&mut self, buffer: BufferHandle);

    /// Create a vertex array object
    fn create_vertex_array(&mut self) -> DeviceResult<VertexArrayHandle>;

    /// Delete a vertex array object
    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    /// Replace the whole contents of the buffer bound to `target`
    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], usage: BufferUsage);

    /// Enable a vertex attribute on the bound vertex array and point it at the
    /// bound array buffer
    fn set_vertex_attribute(&mut self, attribute: &VertexAttribute);

    // Programs

    /// Compile a shader stage
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> DeviceResult<ShaderHandle>;

    /// Delete a shader object
    fn delete_shader(&mut self, shader: ShaderHandle);

    /// Link a program from a vertex and a fragment shader
    fn link_program(&mut self, vertex: ShaderHandle, fragment: ShaderHandle) -> DeviceResult<ProgramHandle>;

    /// Delete a program object
    fn delete_program(&mut self, program: ProgramHandle);

    /// Location of an active vertex attribute
    fn attribute_location(&self, program: ProgramHandle, name: &str) -> Option<u32>;

    /// Location of an active uniform
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// Set an integer uniform on the current program
    fn set_uniform_i32(&mut self, location: UniformLocation, value: i32);

    /// Set a column-major 4x4 matrix uniform on the current program
    fn set_uniform_mat4(&mut self, location: UniformLocation, value: &[f32; 16]);

    // Drawing

    /// Draw indexed triangles from the bound element buffer
    ///
    /// `offset` is in bytes from the start of the element buffer.
    fn draw_elements(&mut self, count: usize, index_type: IndexType, offset: usize);
}
