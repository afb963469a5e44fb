//! # ImGui GL Bridge
//!
//! Renderer and input bridge between an immediate-mode GUI library, a GLFW
//! window and an OpenGL 3.x context.
//!
//! ## Features
//!
//! - **Draw-list execution**: replays a frame of GUI draw lists with
//!   per-command scissoring, texture binding and user callbacks
//! - **State isolation**: the host application's OpenGL state is captured
//!   before and restored after every GUI draw
//! - **Input adaptation**: GLFW window events are folded into the GUI input
//!   state, with a one-frame latch so short clicks are never lost
//! - **Lazy device objects**: shader program, buffers and the font atlas
//!   texture are created on the first frame and torn down on shutdown
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use imgui_gl_bridge::prelude::*;
//! # fn run<G: GuiContext>(gui: &mut G, window: &mut glfw::PWindow) -> BridgeResult<()> {
//! let device = GlDevice::load_with(|symbol| window.get_proc_address(symbol) as *const _)?;
//! let mut bridge = GuiBridge::init(gui, device, BridgeConfig::default())?;
//!
//! bridge.new_frame(gui, &mut **window, std::time::Duration::from_millis(16))?;
//! // ... build the GUI for this frame ...
//! bridge.render(gui)?;
//!
//! bridge.shutdown(gui);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod gui;
pub mod input;
pub mod render;
pub mod window;

mod bridge;
mod error;

#[cfg(test)]
pub(crate) mod testing;

pub use bridge::{DeviceObjects, GuiBridge};
pub use error::{BridgeError, BridgeResult};

/// Common imports for bridge users
pub mod prelude {
    pub use crate::{
        BridgeError, BridgeResult, GuiBridge,
        config::{BridgeConfig, Config, MouseInputMode, TextureFilter},
        gui::{
            ClipRect, DrawCallback, DrawCommand, DrawData, DrawIndices, DrawList, DrawVert,
            FontImage, GuiContext, GuiIo, GuiKey, TextureId,
        },
        input::{InputAdapter, InputEvent, KeyModifiers, MouseButton},
        render::{GlDevice, GraphicsDevice},
        window::RenderTarget,
    };
}
