// src/plotter.rs

//! The `Plotter` is the caller-facing surface of the library.
//!
//! Each drawing or state method builds a [`Command`] and queues it for the
//! render thread; none of them block. Reading pixels is only meaningful after
//! [`Plotter::drain`] or [`Plotter::shutdown`] has returned, since the render
//! thread may otherwise be halfway through a command.
//!
//! A plotter created with a zero-sized buffer is not ready: no render thread
//! is started and every call is an inert no-op.

use crate::buffer::{PixelBuffer, PixelStorage, SharedBuffer};
use crate::color::Color;
use crate::config::Config;
use crate::error::BufferError;
use crate::math::{Matrix4, Region, Vector4};
use crate::renderer::actor::{Dispatcher, DEFAULT_THREAD_NAME};
use crate::renderer::{
    Axis, Command, DrawMode, MatrixTarget, PixelPos, PointSize, RenderState, StateReport,
};
use anyhow::Result;
use log::{info, warn};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, MutexGuard, PoisonError};

#[derive(Debug)]
pub struct Plotter {
    buffer: SharedBuffer,
    width: u32,
    height: u32,
    dispatcher: Option<Dispatcher>,
}

impl Plotter {
    /// Creates a plotter drawing into a buffer it allocates itself.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::from_config(&Config {
            width,
            height,
            ..Config::default()
        })
    }

    /// Creates a plotter from a full configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::build(PixelBuffer::new(config.width, config.height), config)
    }

    /// Creates a plotter drawing into caller-provided storage.
    ///
    /// Fails if `storage` does not hold exactly `width * height` cells.
    pub fn with_storage(width: u32, height: u32, storage: PixelStorage) -> Result<Self> {
        let buffer = PixelBuffer::with_storage(width, height, storage)?;
        Self::build(
            buffer,
            &Config {
                width,
                height,
                ..Config::default()
            },
        )
    }

    fn build(buffer: PixelBuffer, config: &Config) -> Result<Self> {
        let (width, height) = (buffer.width(), buffer.height());
        let ready = buffer.is_ready();
        let buffer = buffer.into_shared();

        let dispatcher = if ready {
            let state = RenderState::with_colors(
                Arc::clone(&buffer),
                config.front_color,
                config.clear_color,
            );
            let name = if config.thread_name.is_empty() {
                DEFAULT_THREAD_NAME
            } else {
                config.thread_name.as_str()
            };
            Some(Dispatcher::spawn(state, name)?)
        } else {
            warn!(
                "Plotter: {}x{} buffer is not ready, no render thread started",
                width, height
            );
            None
        };

        info!("Plotter: Created {}x{} plotter", width, height);
        Ok(Self {
            buffer,
            width,
            height,
            dispatcher,
        })
    }

    /// Whether commands are still accepted.
    pub fn is_ready(&self) -> bool {
        self.dispatcher.as_ref().is_some_and(Dispatcher::is_running)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Queues a command. Ignored when the plotter is not ready.
    pub fn submit(&self, command: Command) {
        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.submit(command);
        }
    }

    /// Blocks until every command queued so far has been applied.
    pub fn drain(&self) {
        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.drain();
        }
    }

    /// Stops the render thread after the commands already queued. The buffer
    /// stays readable; further commands are ignored.
    pub fn shutdown(&self) {
        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.shutdown();
        }
    }

    // --- Drawing ---

    pub fn clear(&self) {
        self.submit(Command::Clear);
    }

    /// Plots a pixel with the front color, without any transformation.
    pub fn plot_raw_point(&self, at: impl Into<PixelPos>) {
        self.submit(Command::PlotRawPoint {
            at: at.into(),
            size: PointSize::Normal,
        });
    }

    /// Like [`plot_raw_point`](Self::plot_raw_point), also covering the four
    /// adjacent pixels.
    pub fn plot_raw_big_point(&self, at: impl Into<PixelPos>) {
        self.submit(Command::PlotRawPoint {
            at: at.into(),
            size: PointSize::Big,
        });
    }

    pub fn draw_raw_line(&self, from: impl Into<PixelPos>, to: impl Into<PixelPos>) {
        self.submit(Command::DrawRawLine {
            from: from.into(),
            to: to.into(),
        });
    }

    /// Transforms and plots a 3D point.
    pub fn plot_point(&self, point: Vector4) {
        self.submit(Command::PlotPoint {
            point,
            size: PointSize::Normal,
        });
    }

    pub fn plot_big_point(&self, point: Vector4) {
        self.submit(Command::PlotPoint {
            point,
            size: PointSize::Big,
        });
    }

    /// Transforms both endpoints and draws the segment between them.
    pub fn draw_line(&self, from: Vector4, to: Vector4) {
        self.submit(Command::DrawLine { from, to });
    }

    /// Draws a vertex list as points or lines in a single command.
    pub fn draw(&self, mode: DrawMode, vertices: &[Vector4]) {
        self.submit(Command::DrawPrimitives {
            mode,
            vertices: vertices.into(),
        });
    }

    // --- Matrices ---

    pub fn set_modelview_matrix(&self, matrix: Matrix4) {
        self.submit(Command::SetMatrix {
            matrix,
            target: MatrixTarget::ModelView,
        });
    }

    pub fn set_projection_matrix(&self, matrix: Matrix4) {
        self.submit(Command::SetMatrix {
            matrix,
            target: MatrixTarget::Projection,
        });
    }

    /// Replaces the projection with an orthographic one. Ignored by the render
    /// thread if the parameters describe an empty volume.
    pub fn ortho(&self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.submit(Command::SetOrtho {
            left,
            right,
            bottom,
            top,
            near,
            far,
        });
    }

    /// Replaces the projection with a perspective one (`fovy` in degrees).
    /// Ignored by the render thread if the parameters are invalid.
    pub fn perspective(&self, fovy: f32, near: f32, far: f32, aspect: f32) {
        self.submit(Command::SetPerspective {
            fovy,
            near,
            far,
            aspect,
        });
    }

    pub fn translate(&self, offset: Vector4, target: MatrixTarget) {
        self.submit(Command::Translate { offset, target });
    }

    pub fn scale(&self, factors: Vector4, target: MatrixTarget) {
        self.submit(Command::Scale { factors, target });
    }

    /// Rotates counter-clockwise about the X axis (`angle` in radians).
    pub fn rotate_x(&self, angle: f32, target: MatrixTarget) {
        self.submit(Command::Rotate {
            axis: Axis::X,
            angle,
            target,
        });
    }

    pub fn rotate_y(&self, angle: f32, target: MatrixTarget) {
        self.submit(Command::Rotate {
            axis: Axis::Y,
            angle,
            target,
        });
    }

    pub fn rotate_z(&self, angle: f32, target: MatrixTarget) {
        self.submit(Command::Rotate {
            axis: Axis::Z,
            angle,
            target,
        });
    }

    /// Rotates about X (pitch), then Y (yaw), then Z (roll), as three
    /// consecutive commands.
    pub fn rotate(&self, pitch: f32, yaw: f32, roll: f32, target: MatrixTarget) {
        self.rotate_x(pitch, target);
        self.rotate_y(yaw, target);
        self.rotate_z(roll, target);
    }

    // --- Colors and viewport ---

    pub fn set_front_color(&self, color: Color) {
        self.submit(Command::SetFrontColor(color));
    }

    pub fn set_clear_color(&self, color: Color) {
        self.submit(Command::SetClearColor(color));
    }

    pub fn set_viewport(&self, viewport: Region) {
        self.submit(Command::SetViewport(viewport));
    }

    // --- State and buffer access ---

    /// Queues a state report and returns the channel it will arrive on, or
    /// `None` when the plotter no longer accepts commands.
    pub fn request_report(&self) -> Option<Receiver<StateReport>> {
        if !self.is_ready() {
            return None;
        }
        let (tx, rx) = mpsc::channel();
        self.submit(Command::Report(tx));
        Some(rx)
    }

    /// Blocks until the render thread reaches a report request queued now.
    pub fn report(&self) -> Option<StateReport> {
        self.request_report()?.recv().ok()
    }

    fn lock_buffer(&self) -> MutexGuard<'_, PixelBuffer> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copies the buffer into `dest` (at least `width * height` cells).
    pub fn copy_into(&self, dest: &mut [u32]) -> Result<usize, BufferError> {
        self.lock_buffer().copy_into(dest)
    }

    /// Copies the buffer into `dest` as native-endian bytes (at least
    /// `width * height * 4` bytes).
    pub fn copy_bytes_into(&self, dest: &mut [u8]) -> Result<usize, BufferError> {
        self.lock_buffer().copy_bytes_into(dest)
    }

    /// Returns a copy of the buffer contents.
    pub fn pixels(&self) -> Vec<u32> {
        self.lock_buffer().pixels().to_vec()
    }

    /// Shuts down and hands back the pixel buffer, e.g. to recover adopted
    /// storage.
    pub fn into_buffer(mut self) -> PixelBuffer {
        if let Some(dispatcher) = self.dispatcher.take() {
            dispatcher.shutdown();
        }
        match Arc::try_unwrap(self.buffer) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
            // Unreachable once the render thread has exited; fall back to a copy.
            Err(shared) => {
                let guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
                let copy = guard.pixels().to_vec();
                PixelBuffer::with_storage(guard.width(), guard.height(), copy.into())
                    .unwrap_or_default()
            }
        }
    }
}
