//! GUI library contract
//!
//! The immediate-mode GUI library is an external collaborator. The bridge
//! reaches it only through [`GuiContext`], passed explicitly into every call,
//! and exchanges data with it through the types in this module:
//! - [`GuiIo`]: input, display and font-texture fields the bridge writes
//! - [`DrawData`]: one frame of draw lists the bridge executes
//! - [`FontImage`]: the rasterized glyph atlas the bridge uploads

pub mod draw_data;
pub mod font;
pub mod io;

pub use draw_data::{
    ClipRect, DrawCallback, DrawCommand, DrawData, DrawDataError, DrawIdx16, DrawIdx32,
    DrawIndices, DrawList, DrawVert, IndexType,
};
pub use font::{FontImage, FontPixels};
pub use io::{GuiIo, GuiKey, KEYS_DOWN_LEN, MOUSE_BUTTON_COUNT};

/// Opaque texture identifier handed to the GUI library
///
/// The GUI library stores it in draw commands without interpreting it; the
/// renderer maps it back onto a device texture. Zero means "no texture".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u64);

impl TextureId {
    /// The "no texture" id
    pub const NONE: Self = Self(0);

    /// Whether this id refers to a texture
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }
}

/// Handle to the immediate-mode GUI library instance
///
/// Every bridge operation takes the context explicitly so several contexts
/// can coexist and the bridge can be tested against a scripted GUI.
pub trait GuiContext {
    /// Input/output state shared with the bridge
    fn io(&self) -> &GuiIo;

    /// Mutable input/output state
    fn io_mut(&mut self) -> &mut GuiIo;

    /// Rasterize the font atlas and return its pixels
    fn font_texture_data(&mut self) -> FontImage;

    /// Begin a new GUI frame using the current IO state
    fn new_frame(&mut self);

    /// Finish the frame and return its draw data
    ///
    /// The returned data is valid until the next call into the context.
    fn render(&mut self) -> &DrawData;

    /// Release the GUI library instance
    fn shutdown(&mut self);
}
