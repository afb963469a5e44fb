//! GLFW event translation

use glfw::{Action, Key, Modifiers, WindowEvent};

use super::event::{InputEvent, KeyModifiers, MouseButton};
use crate::gui::{GuiIo, GuiKey};

impl InputEvent {
    /// Translate a GLFW window event
    ///
    /// Returns `None` for events the GUI does not consume, including focus
    /// gain and buttons beyond the fifth.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match *event {
            WindowEvent::CursorPos(x, y) => Some(Self::CursorMoved {
                x: x as f32,
                y: y as f32,
            }),
            WindowEvent::Focus(false) => Some(Self::FocusLost),
            WindowEvent::Scroll(x, y) => Some(Self::Scrolled {
                x: x as f32,
                y: y as f32,
            }),
            WindowEvent::MouseButton(button, action, _) => Some(Self::MouseButton {
                button: mouse_button(button)?,
                pressed: action != Action::Release,
            }),
            WindowEvent::Char(character) => Some(Self::Text(character)),
            WindowEvent::Key(key, _, action, mods) => Some(Self::Key {
                code: key as i32,
                pressed: action != Action::Release,
                modifiers: key_modifiers(mods),
            }),
            _ => None,
        }
    }
}

fn mouse_button(button: glfw::MouseButton) -> Option<MouseButton> {
    match button {
        glfw::MouseButton::Button1 => Some(MouseButton::Left),
        glfw::MouseButton::Button2 => Some(MouseButton::Right),
        glfw::MouseButton::Button3 => Some(MouseButton::Middle),
        glfw::MouseButton::Button4 => Some(MouseButton::Extra1),
        glfw::MouseButton::Button5 => Some(MouseButton::Extra2),
        _ => None,
    }
}

/// GLFW button for a GUI button
pub const fn glfw_mouse_button(button: MouseButton) -> glfw::MouseButton {
    match button {
        MouseButton::Left => glfw::MouseButton::Button1,
        MouseButton::Right => glfw::MouseButton::Button2,
        MouseButton::Middle => glfw::MouseButton::Button3,
        MouseButton::Extra1 => glfw::MouseButton::Button4,
        MouseButton::Extra2 => glfw::MouseButton::Button5,
    }
}

fn key_modifiers(mods: Modifiers) -> KeyModifiers {
    let mut modifiers = KeyModifiers::empty();
    modifiers.set(KeyModifiers::SHIFT, mods.contains(Modifiers::Shift));
    modifiers.set(KeyModifiers::CONTROL, mods.contains(Modifiers::Control));
    modifiers.set(KeyModifiers::ALT, mods.contains(Modifiers::Alt));
    modifiers.set(KeyModifiers::SUPER, mods.contains(Modifiers::Super));
    modifiers
}

/// GLFW key bound to each navigation/editing key the GUI asks about
pub const fn glfw_key(key: GuiKey) -> Key {
    match key {
        GuiKey::Tab => Key::Tab,
        GuiKey::LeftArrow => Key::Left,
        GuiKey::RightArrow => Key::Right,
        GuiKey::UpArrow => Key::Up,
        GuiKey::DownArrow => Key::Down,
        GuiKey::PageUp => Key::PageUp,
        GuiKey::PageDown => Key::PageDown,
        GuiKey::Home => Key::Home,
        GuiKey::End => Key::End,
        GuiKey::Delete => Key::Delete,
        GuiKey::Backspace => Key::Backspace,
        GuiKey::Enter => Key::Enter,
        GuiKey::Escape => Key::Escape,
        GuiKey::A => Key::A,
        GuiKey::C => Key::C,
        GuiKey::V => Key::V,
        GuiKey::X => Key::X,
        GuiKey::Y => Key::Y,
        GuiKey::Z => Key::Z,
    }
}

/// Fill the GUI key map with GLFW key codes
pub fn install_key_map(io: &mut GuiIo) {
    for key in GuiKey::ALL {
        io.key_map[key.index()] = usize::try_from(glfw_key(key) as i32).ok();
    }
}
