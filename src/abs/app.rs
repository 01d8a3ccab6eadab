//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application,
//! and the frame loop every tutorial program runs.

use std::{fmt, sync::Arc, time::Instant};

use glam::Vec4;
use glow::HasContext;
use sdl2::{event::Event, event::WindowEvent, keyboard::Keycode};

use crate::{config::WindowConfig, error::Error};

/// Errors raised while creating the window and OpenGL context.
#[derive(Debug)]
pub enum AppError {
    /// SDL itself could not be initialized.
    Sdl(String),
    /// The video subsystem could not be initialized.
    Video(String),
    /// The window could not be created.
    Window(String),
    /// The OpenGL context could not be created.
    Context(String),
    /// The OpenGL context could not be made current.
    MakeCurrent(String),
    /// The event pump could not be obtained.
    EventPump(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sdl(msg) => write!(f, "failed to initialize SDL: {msg}"),
            Self::Video(msg) => write!(f, "failed to initialize the video subsystem: {msg}"),
            Self::Window(msg) => write!(f, "failed to create window: {msg}"),
            Self::Context(msg) => write!(f, "failed to create OpenGL context: {msg}"),
            Self::MakeCurrent(msg) => write!(f, "failed to make OpenGL context current: {msg}"),
            Self::EventPump(msg) => write!(f, "failed to get event pump: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Every GPU object must be dropped before the [`App`] that owns its context, so declare them
/// after the app in the same scope.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
    pub clear_color: Vec4,
    close_requested: bool,
}

impl App {
    /// Creates a new [`App`] instance with the specified configuration and makes its OpenGL
    /// context current.
    pub fn new(config: &WindowConfig) -> Result<Self, AppError> {
        let sdl = sdl2::init().map_err(AppError::Sdl)?;
        let video_subsystem = sdl.video().map_err(AppError::Video)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(config.gl_version.0, config.gl_version.1);
        #[cfg(target_os = "macos")]
        gl_attr.set_context_flags().forward_compatible().set();

        let mut builder = video_subsystem.window(&config.title, config.width, config.height);
        builder.opengl().position_centered();
        if config.resizable {
            builder.resizable();
        }
        let window = builder
            .build()
            .map_err(|e| AppError::Window(e.to_string()))?;

        let gl_context = window.gl_create_context().map_err(AppError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(AppError::MakeCurrent)?;

        let swap_interval = if config.vsync {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(swap_interval) {
            log::warn!("could not set swap interval: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };

        let (width, height) = window.drawable_size();
        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
        }

        let event_pump = sdl.event_pump().map_err(AppError::EventPump)?;

        log::info!(
            "opened \"{}\" ({width}x{height}) with OpenGL {:?}",
            config.title,
            gl.version()
        );

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl: Arc::new(gl),
            event_pump,
            clear_color: config.clear_color,
            close_requested: false,
        })
    }

    /// Runs the frame loop until the window is closed or Escape is pressed.
    ///
    /// Each frame the color buffer is cleared, `frame` is called with the seconds elapsed since
    /// the loop started, and the buffers are swapped. An error from `frame` stops the loop and is
    /// returned.
    pub fn run<F>(&mut self, mut frame: F) -> Result<(), Error>
    where
        F: FnMut(&Arc<glow::Context>, f32) -> Result<(), Error>,
    {
        let start = Instant::now();
        let mut frames = 0u64;

        while !self.close_requested {
            for event in self.event_pump.poll_iter() {
                match event {
                    Event::Quit { .. }
                    | Event::KeyDown {
                        keycode: Some(Keycode::Escape),
                        ..
                    } => self.close_requested = true,
                    // The event reports window coordinates; the viewport wants pixels.
                    Event::Window {
                        win_event: WindowEvent::SizeChanged(..),
                        ..
                    } => {
                        let (width, height) = self.window.drawable_size();
                        unsafe {
                            self.gl.viewport(0, 0, width as i32, height as i32);
                        }
                    }
                    _ => {}
                }
            }

            unsafe {
                let c = self.clear_color;
                self.gl.clear_color(c.x, c.y, c.z, c.w);
                self.gl.clear(glow::COLOR_BUFFER_BIT);
            }

            frame(&self.gl, start.elapsed().as_secs_f32())?;

            self.window.gl_swap_window();
            frames += 1;
        }

        let elapsed = start.elapsed().as_secs_f32();
        log::info!(
            "closed after {frames} frames ({:.1} fps)",
            frames as f32 / elapsed.max(f32::EPSILON)
        );
        Ok(())
    }
}
