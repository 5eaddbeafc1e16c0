/// Window frontend: paints the projected point cloud into a pixel buffer
use std::io;

use minifb::{Key, Window, WindowOptions};
use teapot_core::config::WindowConfig;
use teapot_core::{AppConfig, DisplaySink, Error, LoopState, Model, Ndc, Result};

pub mod canvas;

pub use canvas::Canvas;

/// Display sink backed by a native window.
///
/// The sink owns its window, so events are dispatched straight to it
/// without any process-wide handle table.
pub struct WindowSink {
    window: Window,
    canvas: Canvas,
    frame: Vec<u32>,
    color: u32,
}

impl WindowSink {
    pub fn open(config: &WindowConfig) -> Result<Self> {
        let mut window = Window::new(
            &config.title,
            config.width,
            config.height,
            WindowOptions::default(),
        )
        .map_err(|e| Error::WindowInit(e.to_string()))?;

        // Frame pacing belongs to the animation loop.
        window.set_target_fps(0);

        Ok(Self {
            window,
            canvas: Canvas::new(config.width, config.height),
            frame: Vec::with_capacity(config.width * config.height),
            color: config.packed_color(),
        })
    }
}

impl DisplaySink for WindowSink {
    fn pump(&mut self) -> Result<LoopState> {
        self.window.update();
        if !self.window.is_open() || self.window.is_key_down(Key::Escape) {
            return Ok(LoopState::Stopped);
        }
        Ok(LoopState::Running)
    }

    fn present(&mut self, points: &[Ndc]) -> Result<()> {
        self.canvas.clear();
        self.canvas.paint(points, self.color);
        self.canvas.copy_top_down(&mut self.frame);

        self.window
            .update_with_buffer(&self.frame, self.canvas.width(), self.canvas.height())
            .map_err(|e| Error::Io(io::Error::other(e.to_string())))
    }
}

/// Spin `model` in a window until it is closed; returns frames drawn
pub fn run(config: &AppConfig, model: Model) -> Result<u64> {
    let mut frame_loop = config.frame_loop(model);

    log::info!("config: {}", config.summary());

    let mut sink = WindowSink::open(&config.window)?;

    log::info!(
        "window {}x{} open, {} vertices",
        config.window.width,
        config.window.height,
        frame_loop.model().len()
    );

    let frames = frame_loop.run(&mut sink)?;
    log::info!("window closed after {} frames", frames);
    Ok(frames)
}
