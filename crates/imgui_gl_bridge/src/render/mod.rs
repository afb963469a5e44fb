//! GUI rendering on an OpenGL 3.x device
//!
//! [`device`] defines the graphics interface, [`gl_device`] implements it on
//! a live context, and the remaining modules build the GUI's device objects
//! and execute draw lists against any [`GraphicsDevice`].

pub mod buffers;
pub mod device;
pub mod engine;
pub mod gl_device;
pub mod shader;
pub mod state;
pub mod texture;
pub mod vertex_layout;

pub use buffers::GpuBuffers;
pub use device::{
    BlendEquation, BlendFactor, BlendState, BufferHandle, BufferTarget, BufferUsage, Capability,
    DeviceError, DeviceResult, GraphicsDevice, PixelRect, ProgramHandle, ShaderHandle, ShaderStage,
    TextureHandle, TextureUpload, UniformLocation, VertexArrayHandle, VertexAttribute,
};
pub use engine::PassResources;
pub use gl_device::GlDevice;
pub use shader::ShaderProgram;
pub use state::GraphicsStateSnapshot;
pub use texture::FontTexture;
