//! GUI bridge demo
//!
//! Opens an OpenGL 3.2 core window and drives the bridge with a tiny GUI
//! that draws one panel. The panel brightens under the pointer and turns red
//! while the left button is held. Pass a `.toml` or `.ron` bridge config as
//! the first argument to override the defaults.

use std::time::Instant;

use glfw::{Action, Context, Key, WindowEvent};
use imgui_gl_bridge::foundation::logging;
use imgui_gl_bridge::prelude::*;

const PANEL: ClipRect = ClipRect::new(80.0, 60.0, 400.0, 300.0);

const IDLE_COLOR: u32 = 0xFF80_4020;
const HOVER_COLOR: u32 = 0xFFC0_6030;
const PRESSED_COLOR: u32 = 0xFF30_30E0;

/// Minimal GUI producer: one panel, no widgets
struct PanelGui {
    io: GuiIo,
    draw_data: DrawData,
    frames: u64,
}

impl PanelGui {
    fn new() -> Self {
        Self {
            io: GuiIo::default(),
            draw_data: DrawData::default(),
            frames: 0,
        }
    }

    fn panel_color(&self) -> u32 {
        let pos = self.io.mouse_pos;
        let hovered = pos.x >= PANEL.left && pos.x < PANEL.right && pos.y >= PANEL.top && pos.y < PANEL.bottom;
        match (hovered, self.io.mouse_down[MouseButton::Left.index()]) {
            (true, true) => PRESSED_COLOR,
            (true, false) => HOVER_COLOR,
            _ => IDLE_COLOR,
        }
    }
}

impl GuiContext for PanelGui {
    fn io(&self) -> &GuiIo {
        &self.io
    }

    fn io_mut(&mut self) -> &mut GuiIo {
        &mut self.io
    }

    fn font_texture_data(&mut self) -> FontImage {
        // Single opaque texel so untextured quads sample white
        FontImage {
            width: 1,
            height: 1,
            pixels: imgui_gl_bridge::gui::FontPixels::Alpha8(vec![0xFF]),
        }
    }

    fn new_frame(&mut self) {
        self.frames += 1;
        if !self.io.input_queue.is_empty() {
            log::info!("Typed: {:?}", self.io.input_queue);
            self.io.input_queue.clear();
        }
    }

    fn render(&mut self) -> &DrawData {
        let color = self.panel_color();
        let display = self.io.display_size;

        self.draw_data = DrawData {
            lists: vec![DrawList {
                vertices: vec![
                    DrawVert::new([PANEL.left, PANEL.top], [0.0, 0.0], color),
                    DrawVert::new([PANEL.right, PANEL.top], [0.0, 0.0], color),
                    DrawVert::new([PANEL.right, PANEL.bottom], [0.0, 0.0], color),
                    DrawVert::new([PANEL.left, PANEL.bottom], [0.0, 0.0], color),
                ],
                indices: DrawIndices::U16(vec![0, 1, 2, 0, 2, 3]),
                commands: vec![DrawCommand::Elements {
                    count: 6,
                    clip_rect: ClipRect::new(0.0, 0.0, display.x, display.y),
                    texture_id: self.io.font_texture_id,
                }],
            }],
            display_size: display,
            framebuffer_scale: self.io.display_framebuffer_scale,
        };
        &self.draw_data
    }

    fn shutdown(&mut self) {
        log::info!("Panel GUI shut down after {} frames", self.frames);
    }
}

fn run(
    glfw: &mut glfw::Glfw,
    window: &mut glfw::PWindow,
    events: &glfw::GlfwReceiver<(f64, WindowEvent)>,
    bridge: &mut GuiBridge<GlDevice>,
    gui: &mut PanelGui,
) -> BridgeResult<()> {
    let mut last_frame = Instant::now();

    while !window.should_close() {
        glfw.poll_events();
        for (_, event) in glfw::flush_messages(events) {
            if let WindowEvent::Key(Key::Escape, _, Action::Press, _) = event {
                window.set_should_close(true);
            }
            bridge.process_window_event(gui, &event);
        }

        let now = Instant::now();
        bridge.new_frame(gui, &mut **window, now - last_frame)?;
        last_frame = now;

        let (width, height) = window.get_framebuffer_size();
        unsafe {
            gl::Viewport(0, 0, width, height);
            gl::ClearColor(0.10, 0.10, 0.12, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        bridge.render(gui)?;
        window.swap_buffers();
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting GUI bridge demo");

    let config = match std::env::args().nth(1) {
        Some(path) => BridgeConfig::load_from_file(path)?,
        None => BridgeConfig {
            glsl_version: "#version 150".to_string(),
            ..BridgeConfig::default()
        },
    };

    let mut glfw = glfw::init(glfw::fail_on_errors).map_err(|e| format!("GLFW initialization failed: {e:?}"))?;
    glfw.window_hint(glfw::WindowHint::ContextVersion(3, 2));
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

    let (mut window, events) = glfw
        .create_window(1024, 768, "GUI Bridge Demo", glfw::WindowMode::Windowed)
        .ok_or("Window creation failed")?;
    window.make_current();
    window.set_all_polling(true);
    glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

    let device = GlDevice::load_with(|symbol| window.get_proc_address(symbol) as *const _)?;
    let mut gui = PanelGui::new();
    let mut bridge = GuiBridge::init(&mut gui, device, config)?;

    let result = run(&mut glfw, &mut window, &events, &mut bridge, &mut gui);
    bridge.shutdown(&mut gui);

    match result {
        Ok(()) => {
            log::info!("GUI bridge demo finished");
            Ok(())
        }
        Err(e) => {
            log::error!("GUI bridge demo failed: {}", e);
            Err(e.into())
        }
    }
}
