//! Window the GUI renders into

use crate::input::{glfw_mouse_button, MouseButton};

/// Window-side queries and controls needed once per frame
pub trait RenderTarget {
    /// Window size in screen coordinates, the space pointer events use
    ///
    /// On high-density displays this is smaller than the framebuffer; the
    /// bridge publishes it with a 1:1 framebuffer scale.
    fn size(&self) -> (u32, u32);

    /// Show or hide the OS cursor over the window
    fn set_cursor_visible(&mut self, visible: bool);

    /// Whether a mouse button is held right now
    fn mouse_button_down(&self, button: MouseButton) -> bool;
}

impl RenderTarget for glfw::Window {
    #[allow(clippy::cast_sign_loss)]
    fn size(&self) -> (u32, u32) {
        let (width, height) = self.get_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.set_cursor_mode(if visible {
            glfw::CursorMode::Normal
        } else {
            glfw::CursorMode::Hidden
        });
    }

    fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.get_mouse_button(glfw_mouse_button(button)) == glfw::Action::Press
    }
}
