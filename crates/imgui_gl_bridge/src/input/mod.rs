//! Input event adaptation
//!
//! GLFW window events are translated into [`InputEvent`]s and folded into the
//! GUI's input state by an [`InputAdapter`].

pub mod adapter;
pub mod event;
pub mod glfw_events;

pub use adapter::InputAdapter;
pub use event::{InputEvent, KeyModifiers, MouseButton};
pub use glfw_events::{glfw_key, glfw_mouse_button, install_key_map};
