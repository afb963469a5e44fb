//! Per-frame draw data produced by the GUI library
//!
//! The layout of [`DrawVert`] is part of the contract with the producer: the
//! renderer uploads the vertex slice as raw bytes and binds attributes by
//! offset, so the record is `#[repr(C)]` and its stride and offsets are
//! checked at compile time.

use std::fmt;
use std::mem::{offset_of, size_of};
use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

use super::TextureId;
use crate::foundation::math::Vec2;
use crate::render::GraphicsDevice;

/// Vertex produced by the GUI library
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct DrawVert {
    /// Position in logical display pixels
    pub pos: [f32; 2],
    /// Texture coordinates
    pub uv: [f32; 2],
    /// Packed RGBA8 color, red in the lowest byte
    pub col: u32,
}

impl DrawVert {
    /// Byte distance between consecutive vertices
    pub const STRIDE: usize = size_of::<Self>();
    /// Byte offset of `pos`
    pub const POS_OFFSET: usize = offset_of!(Self, pos);
    /// Byte offset of `uv`
    pub const UV_OFFSET: usize = offset_of!(Self, uv);
    /// Byte offset of `col`
    pub const COL_OFFSET: usize = offset_of!(Self, col);

    /// Create a vertex
    pub const fn new(pos: [f32; 2], uv: [f32; 2], col: u32) -> Self {
        Self { pos, uv, col }
    }
}

const _: () = assert!(DrawVert::STRIDE == 20);
const _: () = assert!(DrawVert::POS_OFFSET == 0);
const _: () = assert!(DrawVert::UV_OFFSET == 8);
const _: () = assert!(DrawVert::COL_OFFSET == 16);

/// 16-bit draw index
pub type DrawIdx16 = u16;

/// 32-bit draw index
pub type DrawIdx32 = u32;

/// Width of the indices in a draw list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    /// 16-bit indices
    U16,
    /// 32-bit indices
    U32,
}

impl IndexType {
    /// Size of one index in bytes
    pub const fn size(self) -> usize {
        match self {
            Self::U16 => size_of::<DrawIdx16>(),
            Self::U32 => size_of::<DrawIdx32>(),
        }
    }
}

/// Index sequence of a draw list, in the list's native width
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawIndices {
    /// 16-bit indices
    U16(Vec<DrawIdx16>),
    /// 32-bit indices
    U32(Vec<DrawIdx32>),
}

impl DrawIndices {
    /// Number of indices
    pub fn len(&self) -> usize {
        match self {
            Self::U16(indices) => indices.len(),
            Self::U32(indices) => indices.len(),
        }
    }

    /// Whether the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of the stored indices
    pub const fn index_type(&self) -> IndexType {
        match self {
            Self::U16(_) => IndexType::U16,
            Self::U32(_) => IndexType::U32,
        }
    }

    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U16(indices) => bytemuck::cast_slice(indices),
            Self::U32(indices) => bytemuck::cast_slice(indices),
        }
    }

    /// Largest index value, if any
    pub fn max_index(&self) -> Option<usize> {
        match self {
            Self::U16(indices) => indices.iter().max().map(|&i| usize::from(i)),
            Self::U32(indices) => indices.iter().max().and_then(|&i| usize::try_from(i).ok()),
        }
    }
}

impl Default for DrawIndices {
    fn default() -> Self {
        Self::U16(Vec::new())
    }
}

/// Clip rectangle `(left, top, right, bottom)`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClipRect {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub right: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl ClipRect {
    /// Create a clip rectangle from its edges
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Multiply every edge by the per-axis framebuffer scale
    pub fn scaled(self, scale: Vec2) -> Self {
        Self {
            left: self.left * scale.x,
            top: self.top * scale.y,
            right: self.right * scale.x,
            bottom: self.bottom * scale.y,
        }
    }
}

type CallbackFn = dyn Fn(&DrawList, &DrawCommand, &mut dyn GraphicsDevice);

/// User callback embedded in a draw command
///
/// Invoked with the owning list, the command itself and the graphics device,
/// in place of the default draw. The renderer does not inspect what the
/// callback does to device state.
#[derive(Clone)]
pub struct DrawCallback(Rc<CallbackFn>);

impl DrawCallback {
    /// Wrap a closure
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&DrawList, &DrawCommand, &mut dyn GraphicsDevice) + 'static,
    {
        Self(Rc::new(callback))
    }

    /// Invoke the callback
    pub fn invoke(&self, list: &DrawList, command: &DrawCommand, device: &mut dyn GraphicsDevice) {
        (self.0)(list, command, device);
    }
}

impl fmt::Debug for DrawCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DrawCallback(..)")
    }
}

/// One sub-draw of a draw list
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Draw `count` indices with a texture and a clip rectangle
    Elements {
        /// Number of indices consumed from the list's cursor
        count: usize,
        /// Clip rectangle in logical pixels
        clip_rect: ClipRect,
        /// Texture sampled by the fragments
        texture_id: TextureId,
    },
    /// Run a user callback instead of drawing
    Callback {
        /// Number of indices the cursor advances past
        count: usize,
        /// The callback
        callback: DrawCallback,
    },
    /// Re-install the GUI render state, typically after a callback changed it
    ResetRenderState,
}

impl DrawCommand {
    /// Number of indices this command advances the cursor by
    pub const fn element_count(&self) -> usize {
        match self {
            Self::Elements { count, .. } | Self::Callback { count, .. } => *count,
            Self::ResetRenderState => 0,
        }
    }
}

/// A batch of vertices, indices and commands for one region of the frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Vertex sequence
    pub vertices: Vec<DrawVert>,
    /// Index sequence referencing `vertices`
    pub indices: DrawIndices,
    /// Commands, consumed in order
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Total indices consumed by all commands
    pub fn total_element_count(&self) -> usize {
        self.commands.iter().map(DrawCommand::element_count).sum()
    }

    /// Check the list against its own buffers
    pub fn validate(&self) -> Result<(), DrawDataError> {
        let consumed = self.total_element_count();
        if consumed > self.indices.len() {
            return Err(DrawDataError::IndexOverrun {
                consumed,
                available: self.indices.len(),
            });
        }
        if let Some(max) = self.indices.max_index() {
            if max >= self.vertices.len() {
                return Err(DrawDataError::VertexOutOfRange {
                    index: max,
                    vertex_count: self.vertices.len(),
                });
            }
        }
        Ok(())
    }
}

/// One frame of GUI geometry
#[derive(Debug, Clone)]
pub struct DrawData {
    /// Draw lists, executed in order
    pub lists: Vec<DrawList>,
    /// Logical display size
    pub display_size: Vec2,
    /// Logical-to-framebuffer scale per axis
    pub framebuffer_scale: Vec2,
}

impl Default for DrawData {
    fn default() -> Self {
        Self {
            lists: Vec::new(),
            display_size: Vec2::zeros(),
            framebuffer_scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl DrawData {
    /// Framebuffer size in physical pixels, truncated
    #[allow(clippy::cast_possible_truncation)]
    pub fn framebuffer_size(&self) -> (i32, i32) {
        (
            (self.display_size.x * self.framebuffer_scale.x) as i32,
            (self.display_size.y * self.framebuffer_scale.y) as i32,
        )
    }

    /// Total vertices across all lists
    pub fn total_vertex_count(&self) -> usize {
        self.lists.iter().map(|list| list.vertices.len()).sum()
    }

    /// Total indices across all lists
    pub fn total_index_count(&self) -> usize {
        self.lists.iter().map(|list| list.indices.len()).sum()
    }

    /// Check every list, reporting the first violation
    pub fn validate(&self) -> Result<(), DrawDataError> {
        self.lists.iter().enumerate().try_for_each(|(list, draw_list)| {
            draw_list.validate().map_err(|e| DrawDataError::InList {
                list,
                source: Box::new(e),
            })
        })
    }
}

/// Draw data contract violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawDataError {
    /// Commands consume more indices than the list holds
    #[error("commands consume {consumed} indices but only {available} exist")]
    IndexOverrun {
        /// Sum of command element counts
        consumed: usize,
        /// Length of the index sequence
        available: usize,
    },

    /// An index refers past the end of the vertex sequence
    #[error("index {index} out of range for {vertex_count} vertices")]
    VertexOutOfRange {
        /// Offending index value
        index: usize,
        /// Length of the vertex sequence
        vertex_count: usize,
    },

    /// Violation inside a specific list
    #[error("draw list {list}: {source}")]
    InList {
        /// Position of the list in the frame
        list: usize,
        /// Underlying violation
        #[source]
        source: Box<DrawDataError>,
    },
}
