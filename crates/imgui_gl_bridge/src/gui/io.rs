//! GUI input/output state written by the bridge

use super::TextureId;
use crate::foundation::math::Vec2;

/// Number of mouse buttons tracked by the GUI
pub const MOUSE_BUTTON_COUNT: usize = 5;

/// Length of the key-down table
pub const KEYS_DOWN_LEN: usize = 512;

/// Keys the GUI library needs a mapping for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuiKey {
    /// Tab
    Tab,
    /// Left arrow
    LeftArrow,
    /// Right arrow
    RightArrow,
    /// Up arrow
    UpArrow,
    /// Down arrow
    DownArrow,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Home
    Home,
    /// End
    End,
    /// Delete
    Delete,
    /// Backspace
    Backspace,
    /// Enter / return
    Enter,
    /// Escape
    Escape,
    /// A (select all)
    A,
    /// C (copy)
    C,
    /// V (paste)
    V,
    /// X (cut)
    X,
    /// Y (redo)
    Y,
    /// Z (undo)
    Z,
}

impl GuiKey {
    /// Number of mapped keys
    pub const COUNT: usize = 19;

    /// Every key, in key-map order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Tab,
        Self::LeftArrow,
        Self::RightArrow,
        Self::UpArrow,
        Self::DownArrow,
        Self::PageUp,
        Self::PageDown,
        Self::Home,
        Self::End,
        Self::Delete,
        Self::Backspace,
        Self::Enter,
        Self::Escape,
        Self::A,
        Self::C,
        Self::V,
        Self::X,
        Self::Y,
        Self::Z,
    ];

    /// Position of this key in the key map
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Input, display and font fields shared between the GUI and the bridge
#[derive(Debug, Clone)]
pub struct GuiIo {
    /// Logical display size
    pub display_size: Vec2,
    /// Logical-to-framebuffer scale per axis
    pub display_framebuffer_scale: Vec2,
    /// Seconds since the previous frame
    pub delta_time: f32,

    /// Pointer position in window coordinates, `(-1, -1)` when unavailable
    pub mouse_pos: Vec2,
    /// Button down state: 0 left, 1 right, 2 middle, 3/4 extra
    pub mouse_down: [bool; MOUSE_BUTTON_COUNT],
    /// Vertical wheel delta for this frame
    pub mouse_wheel: f32,
    /// Horizontal wheel delta for this frame
    pub mouse_wheel_h: f32,
    /// The GUI draws its own cursor; the OS cursor should be hidden
    pub mouse_draw_cursor: bool,

    /// Key down state indexed by windowing-layer key code
    pub keys_down: [bool; KEYS_DOWN_LEN],
    /// Shift held
    pub key_shift: bool,
    /// Control held
    pub key_ctrl: bool,
    /// Alt held
    pub key_alt: bool,
    /// Platform key (super/command) held
    pub key_super: bool,
    /// Windowing-layer key code for each [`GuiKey`]
    pub key_map: [Option<usize>; GuiKey::COUNT],

    /// UTF-8 text typed since the GUI last drained the queue
    pub input_queue: String,

    /// Texture used for glyph draws
    pub font_texture_id: TextureId,
}

impl Default for GuiIo {
    fn default() -> Self {
        Self {
            display_size: Vec2::new(-1.0, -1.0),
            display_framebuffer_scale: Vec2::new(1.0, 1.0),
            delta_time: 1.0 / 60.0,
            mouse_pos: Vec2::new(-1.0, -1.0),
            mouse_down: [false; MOUSE_BUTTON_COUNT],
            mouse_wheel: 0.0,
            mouse_wheel_h: 0.0,
            mouse_draw_cursor: false,
            keys_down: [false; KEYS_DOWN_LEN],
            key_shift: false,
            key_ctrl: false,
            key_alt: false,
            key_super: false,
            key_map: [None; GuiKey::COUNT],
            input_queue: String::new(),
            font_texture_id: TextureId::NONE,
        }
    }
}

impl GuiIo {
    /// Append UTF-8 text to the input queue
    pub fn add_input_characters_utf8(&mut self, text: &str) {
        self.input_queue.push_str(text);
    }

    /// Windowing-layer key code mapped to a GUI key
    pub fn mapped_key(&self, key: GuiKey) -> Option<usize> {
        self.key_map[key.index()]
    }

    /// Whether a mapped GUI key is currently down
    pub fn is_key_down(&self, key: GuiKey) -> bool {
        self.mapped_key(key)
            .and_then(|code| self.keys_down.get(code).copied())
            .unwrap_or(false)
    }
}
