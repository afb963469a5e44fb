//! Frame lifecycle
//!
//! [`GuiBridge`] owns every device object the GUI needs and sequences them
//! through three phases:
//! - **create**: lazily on the first frame, or explicitly with
//!   [`GuiBridge::create_device_objects`]
//! - **use**: [`GuiBridge::new_frame`], event processing and
//!   [`GuiBridge::render`] once per frame
//! - **destroy**: [`GuiBridge::invalidate_device_objects`] or
//!   [`GuiBridge::shutdown`], both safe to repeat

use std::time::Duration;

use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::foundation::math::Vec2;
use crate::gui::{DrawData, GuiContext};
use crate::input::{install_key_map, InputAdapter, InputEvent};
use crate::render::engine::{self, PassResources};
use crate::render::{BufferTarget, FontTexture, GpuBuffers, GraphicsDevice, ShaderProgram};
use crate::window::RenderTarget;

/// Device objects shared by every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceObjects {
    /// GUI shader program
    pub shader: ShaderProgram,
    /// Geometry buffers and their vertex array
    pub buffers: GpuBuffers,
    /// Font atlas texture
    pub font: FontTexture,
}

impl DeviceObjects {
    fn build<G: GuiContext + ?Sized>(
        device: &mut dyn GraphicsDevice,
        gui: &mut G,
        config: &BridgeConfig,
    ) -> BridgeResult<Self> {
        let shader = ShaderProgram::compile(device, &config.glsl_version)?;

        let buffers = match GpuBuffers::create(device, shader.attributes) {
            Ok(buffers) => buffers,
            Err(e) => {
                shader.destroy(device);
                return Err(e.into());
            }
        };

        let font = match FontTexture::create(device, gui, config.font_filter) {
            Ok(font) => font,
            Err(e) => {
                buffers.destroy(device);
                shader.destroy(device);
                return Err(e.into());
            }
        };

        Ok(Self { shader, buffers, font })
    }

    const fn pass(&self) -> PassResources<'_> {
        PassResources {
            shader: &self.shader,
            buffers: &self.buffers,
        }
    }
}

/// Renderer and input bridge for one GUI context on one graphics device
pub struct GuiBridge<D: GraphicsDevice> {
    device: D,
    config: BridgeConfig,
    objects: Option<DeviceObjects>,
    input: InputAdapter,
    cursor_visible: Option<bool>,
    shut_down: bool,
}

impl<D: GraphicsDevice> GuiBridge<D> {
    /// Set up the bridge and register the key map with the GUI
    ///
    /// Device objects are not created here; the first [`Self::new_frame`]
    /// does that.
    ///
    /// # Arguments
    ///
    /// * `gui` - GUI context receiving the key map
    /// * `device` - Graphics device the bridge draws with
    /// * `config` - Bridge settings, validated before anything else happens
    pub fn init<G: GuiContext + ?Sized>(gui: &mut G, device: D, config: BridgeConfig) -> BridgeResult<Self> {
        config.validate()?;
        install_key_map(gui.io_mut());
        log::info!(
            "GUI bridge initialized ({}, {:?} mouse input)",
            config.glsl_version,
            config.mouse_input
        );

        Ok(Self {
            device,
            input: InputAdapter::new(config.mouse_input),
            config,
            objects: None,
            cursor_visible: None,
            shut_down: false,
        })
    }

    /// Compile the GUI program, create the geometry buffers and upload the
    /// font atlas
    ///
    /// Texture, array buffer and vertex array bindings are restored
    /// afterwards. On failure everything created so far is deleted. Does
    /// nothing if the objects already exist.
    pub fn create_device_objects<G: GuiContext + ?Sized>(&mut self, gui: &mut G) -> BridgeResult<()> {
        if self.objects.is_some() {
            return Ok(());
        }

        let device: &mut dyn GraphicsDevice = &mut self.device;
        let last_texture = device.bound_texture();
        let last_array_buffer = device.bound_array_buffer();
        let last_vertex_array = device.bound_vertex_array();

        let built = DeviceObjects::build(device, gui, &self.config);

        device.bind_texture(last_texture);
        device.bind_vertex_array(last_vertex_array);
        device.bind_buffer(BufferTarget::Array, last_array_buffer);

        let objects = built?;
        log::info!(
            "GUI device objects created: program {:?}, font {}x{}",
            objects.shader.program,
            objects.font.width,
            objects.font.height
        );
        self.objects = Some(objects);
        self.shut_down = false;
        Ok(())
    }

    /// Delete every device object and clear the GUI's font texture id
    ///
    /// A no-op when nothing has been created.
    pub fn invalidate_device_objects<G: GuiContext + ?Sized>(&mut self, gui: &mut G) {
        let Some(objects) = self.objects.take() else {
            return;
        };
        let device: &mut dyn GraphicsDevice = &mut self.device;
        objects.font.destroy(device, gui);
        objects.buffers.destroy(device);
        objects.shader.destroy(device);
        log::info!("GUI device objects invalidated");
    }

    /// Prepare the GUI for a new frame
    ///
    /// Creates device objects on first use, publishes the target size and
    /// frame time, syncs cursor visibility, settles mouse buttons and then
    /// starts the GUI frame.
    ///
    /// # Arguments
    ///
    /// * `gui` - GUI context to advance
    /// * `target` - Window supplying the display size, cursor control and live
    ///   button state
    /// * `delta_time` - Time since the previous frame
    #[allow(clippy::cast_precision_loss)]
    pub fn new_frame<G, T>(&mut self, gui: &mut G, target: &mut T, delta_time: Duration) -> BridgeResult<()>
    where
        G: GuiContext + ?Sized,
        T: RenderTarget + ?Sized,
    {
        self.create_device_objects(gui)?;

        let (width, height) = target.size();
        let io = gui.io_mut();
        io.display_size = Vec2::new(width as f32, height as f32);
        io.display_framebuffer_scale = Vec2::new(1.0, 1.0);
        io.delta_time = delta_time.as_secs_f32();

        let visible = !io.mouse_draw_cursor;
        if self.cursor_visible != Some(visible) {
            target.set_cursor_visible(visible);
            self.cursor_visible = Some(visible);
        }

        self.input.resolve_frame(io, |button| target.mouse_button_down(button));
        gui.new_frame();
        Ok(())
    }

    /// Feed one input event to the GUI
    pub fn process_event<G: GuiContext + ?Sized>(&mut self, gui: &mut G, event: &InputEvent) -> bool {
        self.input.process_event(gui.io_mut(), event)
    }

    /// Feed one GLFW window event to the GUI
    ///
    /// Returns `false` for events the GUI does not consume.
    pub fn process_window_event<G: GuiContext + ?Sized>(&mut self, gui: &mut G, event: &glfw::WindowEvent) -> bool {
        InputEvent::from_window_event(event).is_some_and(|event| self.process_event(gui, &event))
    }

    /// Finish the GUI frame and draw it
    pub fn render<G: GuiContext + ?Sized>(&mut self, gui: &mut G) -> BridgeResult<()> {
        self.create_device_objects(gui)?;
        let draw_data = gui.render();
        self.render_draw_data(draw_data)
    }

    /// Draw a frame of GUI draw data
    ///
    /// The device state observed by the host is unchanged afterwards. Returns
    /// [`BridgeError::MalformedDrawData`] without touching the device when
    /// validation is enabled and the data is inconsistent.
    pub fn render_draw_data(&mut self, draw_data: &DrawData) -> BridgeResult<()> {
        let Some(objects) = self.objects.as_ref() else {
            log::warn!("GUI draw data submitted before device objects exist; skipped");
            return Ok(());
        };

        if self.config.validate_draw_data {
            if let Err(e) = draw_data.validate() {
                log::warn!("Rejected GUI draw data: {}", e);
                return Err(BridgeError::MalformedDrawData(e));
            }
        }

        engine::execute(&mut self.device, objects.pass(), draw_data);
        Ok(())
    }

    /// Release device objects, then shut the GUI library down
    ///
    /// Repeated calls do nothing.
    pub fn shutdown<G: GuiContext + ?Sized>(&mut self, gui: &mut G) {
        if self.shut_down {
            return;
        }
        self.invalidate_device_objects(gui);
        gui.shutdown();
        self.shut_down = true;
        log::info!("GUI bridge shut down");
    }

    /// Device objects, once created
    pub const fn device_objects(&self) -> Option<&DeviceObjects> {
        self.objects.as_ref()
    }

    /// Bridge configuration
    pub const fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Input adapter state
    pub const fn input(&self) -> &InputAdapter {
        &self.input
    }

    /// Graphics device
    pub const fn device(&self) -> &D {
        &self.device
    }

    /// Mutable graphics device, for host drawing between GUI passes
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}

impl<D: GraphicsDevice> Drop for GuiBridge<D> {
    fn drop(&mut self) {
        if self.objects.is_some() {
            log::warn!("GuiBridge dropped without shutdown; GUI device objects leaked");
        }
    }
}
