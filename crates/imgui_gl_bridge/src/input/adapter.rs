//! Folding window events into GUI input state
//!
//! Events update [`GuiIo`] as they arrive. Mouse buttons get special handling
//! in [`MouseInputMode::Buffered`] mode: a press is latched until the next
//! frame starts, so a click whose press and release both land between two
//! frames still reaches the GUI as one frame of "down".

use super::event::{InputEvent, KeyModifiers, MouseButton};
use crate::config::MouseInputMode;
use crate::foundation::math::Vec2;
use crate::gui::{GuiIo, MOUSE_BUTTON_COUNT};

/// Per-bridge input state
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    mode: MouseInputMode,
    latched: [bool; MOUSE_BUTTON_COUNT],
}

impl InputAdapter {
    /// Create an adapter with empty latches
    pub fn new(mode: MouseInputMode) -> Self {
        Self {
            mode,
            latched: [false; MOUSE_BUTTON_COUNT],
        }
    }

    /// Button handling strategy
    pub const fn mode(&self) -> MouseInputMode {
        self.mode
    }

    /// Whether a press of `button` is waiting for the next frame
    pub const fn is_latched(&self, button: MouseButton) -> bool {
        self.latched[button.index()]
    }

    /// Apply one event to the GUI input state
    ///
    /// Returns `true` when the event was consumed. Every variant of
    /// [`InputEvent`] is consumed; callers translating from a richer event
    /// type report `false` for events with no translation.
    pub fn process_event(&mut self, io: &mut GuiIo, event: &InputEvent) -> bool {
        match *event {
            InputEvent::CursorMoved { x, y } => {
                io.mouse_pos = Vec2::new(x, y);
            }
            InputEvent::FocusLost => {
                io.mouse_pos = Vec2::new(-1.0, -1.0);
            }
            InputEvent::Scrolled { x, y } => {
                io.mouse_wheel = y;
                io.mouse_wheel_h = x;
            }
            InputEvent::MouseButton { button, pressed } => match self.mode {
                MouseInputMode::Buffered => {
                    if pressed {
                        self.latched[button.index()] = true;
                    }
                }
                MouseInputMode::Immediate => {
                    io.mouse_down[button.index()] = pressed;
                }
            },
            InputEvent::Text(character) => {
                let mut utf8 = [0u8; 4];
                io.add_input_characters_utf8(character.encode_utf8(&mut utf8));
            }
            InputEvent::Key {
                code,
                pressed,
                modifiers,
            } => {
                if let Some(down) = usize::try_from(code).ok().and_then(|code| io.keys_down.get_mut(code)) {
                    *down = pressed;
                } else {
                    log::trace!("Key code {} outside the key table", code);
                }
                io.key_shift = modifiers.contains(KeyModifiers::SHIFT);
                io.key_ctrl = modifiers.contains(KeyModifiers::CONTROL);
                io.key_alt = modifiers.contains(KeyModifiers::ALT);
                io.key_super = modifiers.contains(KeyModifiers::SUPER);
            }
        }
        true
    }

    /// Settle button state at the start of a frame
    ///
    /// In buffered mode each button is down if it was pressed since the last
    /// frame or `live` reports it held now; the latches are then cleared.
    /// Immediate mode leaves the event-driven state alone.
    ///
    /// # Arguments
    ///
    /// * `io` - GUI input state to update
    /// * `live` - Whether a button is held right now, polled from the window
    pub fn resolve_frame(&mut self, io: &mut GuiIo, live: impl Fn(MouseButton) -> bool) {
        if self.mode == MouseInputMode::Immediate {
            return;
        }
        for button in MouseButton::ALL {
            let i = button.index();
            io.mouse_down[i] = self.latched[i] || live(button);
            self.latched[i] = false;
        }
    }
}
