//! Windowing events the GUI consumes

use bitflags::bitflags;

use crate::gui::MOUSE_BUTTON_COUNT;

/// Mouse button identifier in GUI order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// First extra button (usually "back")
    Extra1,
    /// Second extra button (usually "forward")
    Extra2,
}

impl MouseButton {
    /// Every button, in GUI index order
    pub const ALL: [Self; MOUSE_BUTTON_COUNT] =
        [Self::Left, Self::Right, Self::Middle, Self::Extra1, Self::Extra2];

    /// Index into the GUI's button-down table
    pub const fn index(self) -> usize {
        self as usize
    }
}

bitflags! {
    /// Modifier keys held while a key event fired
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        /// Either shift key
        const SHIFT = 1 << 0;
        /// Either control key
        const CONTROL = 1 << 1;
        /// Either alt key
        const ALT = 1 << 2;
        /// Platform key (super/command/windows)
        const SUPER = 1 << 3;
    }
}

/// Input event in windowing-layer terms
///
/// The closed set of events the adapter reacts to. Anything else the window
/// reports has no counterpart here and is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to window coordinates
    CursorMoved {
        /// Horizontal position
        x: f32,
        /// Vertical position
        y: f32,
    },
    /// The window lost input focus
    FocusLost,
    /// Wheel or trackpad scrolled
    Scrolled {
        /// Horizontal amount
        x: f32,
        /// Vertical amount
        y: f32,
    },
    /// A mouse button changed state
    MouseButton {
        /// Which button
        button: MouseButton,
        /// `true` on press, `false` on release
        pressed: bool,
    },
    /// A character was typed
    Text(char),
    /// A key was pressed, repeated or released
    Key {
        /// Windowing-layer key code; negative for unknown keys
        code: i32,
        /// `true` on press and repeat
        pressed: bool,
        /// Modifiers held at the time
        modifiers: KeyModifiers,
    },
}
