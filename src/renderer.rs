// src/renderer.rs

//! This module defines the `RenderState`.
//!
//! The `RenderState` is the render thread's view of the world: the current
//! modelview and projection matrices, the viewport, the front and clear colors,
//! and a handle to the pixel buffer. [`Command`]s are applied to it one at a
//! time; non-drawing commands mutate the configuration, drawing commands run
//! their vertices through the transform pipeline and rasterize points and
//! lines into the buffer.
//!
//! Transform pipeline for one vertex:
//!
//! ```text
//! object ──modelview──▶ view ──projection──▶ clip ──÷w──▶ NDC ──viewport──▶ pixel
//! ```
//!
//! A vertex whose clip `w` is zero cannot be drawn at all. A vertex whose
//! normalized depth leaves `[-1, 1]` is depth-clipped. A vertex outside
//! `[-1, 1)` in x or y still gets a pixel position but is flagged as outside
//! the viewport; points drop it, lines keep it and let the per-pixel bounds
//! check trim the segment.

pub mod actor;
pub mod commands;


pub use commands::{Axis, Command, DrawMode, Flow, MatrixTarget, PointSize};

use crate::buffer::{PixelBuffer, SharedBuffer};
use crate::color::Color;
use crate::math::{transform, Matrix4, Region, Vector4};
use log::{debug, trace};
use std::sync::{MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

/// Integer pixel position, origin at the top-left corner of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for PixelPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Outcome of running one vertex through the transform pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projected {
    /// Inside the depth range and the viewport.
    Visible(PixelPos),
    /// Inside the depth range, but x or y left `[-1, 1)`.
    OutsideViewport(PixelPos),
    /// Normalized depth outside `[-1, 1]`.
    DepthClipped(PixelPos),
    /// Clip-space `w` was zero.
    Degenerate,
}

impl Projected {
    pub fn position(&self) -> Option<PixelPos> {
        match *self {
            Projected::Visible(pos)
            | Projected::OutsideViewport(pos)
            | Projected::DepthClipped(pos) => Some(pos),
            Projected::Degenerate => None,
        }
    }
}

/// Copy of the render configuration at one point of the command stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateReport {
    pub modelview: Matrix4,
    pub projection: Matrix4,
    pub viewport: Region,
    pub front_color: Color,
    pub clear_color: Color,
}

/// Rendering configuration plus the buffer it draws into.
///
/// Owned by exactly one render thread once [`bind_to_current_thread`] has been
/// called; debug builds assert that every command is applied from that thread.
///
/// [`bind_to_current_thread`]: RenderState::bind_to_current_thread
#[derive(Debug)]
pub struct RenderState {
    buffer: SharedBuffer,
    modelview: Matrix4,
    projection: Matrix4,
    viewport: Region,
    front_color: Color,
    clear_color: Color,
    owner: Option<ThreadId>,
}

impl RenderState {
    /// Creates a state with identity matrices, a viewport covering the whole
    /// buffer and the default colors.
    pub fn new(buffer: SharedBuffer) -> Self {
        Self::with_colors(buffer, Color::DEFAULT_FRONT, Color::DEFAULT_CLEAR)
    }

    pub fn with_colors(buffer: SharedBuffer, front_color: Color, clear_color: Color) -> Self {
        let viewport = {
            let guard = buffer.lock().unwrap_or_else(PoisonError::into_inner);
            Region::full(guard.width(), guard.height())
        };
        Self {
            buffer,
            modelview: Matrix4::IDENTITY,
            projection: Matrix4::IDENTITY,
            viewport,
            front_color,
            clear_color,
            owner: None,
        }
    }

    /// Records the calling thread as the only one allowed to apply commands.
    pub fn bind_to_current_thread(&mut self) {
        self.owner = Some(thread::current().id());
    }

    fn assert_owner(&self) {
        if let Some(owner) = self.owner {
            debug_assert_eq!(
                owner,
                thread::current().id(),
                "render state touched outside its render thread"
            );
        }
    }

    /// Applies one command. Returns [`Flow::Terminate`] for the termination
    /// marker, [`Flow::Continue`] otherwise.
    pub fn apply(&mut self, command: Command) -> Flow {
        self.assert_owner();
        command.apply(self)
    }

    pub fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }

    fn lock_buffer(&self) -> MutexGuard<'_, PixelBuffer> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn modelview(&self) -> &Matrix4 {
        &self.modelview
    }

    pub fn projection(&self) -> &Matrix4 {
        &self.projection
    }

    pub fn matrix(&self, target: MatrixTarget) -> &Matrix4 {
        match target {
            MatrixTarget::ModelView => &self.modelview,
            MatrixTarget::Projection => &self.projection,
        }
    }

    pub fn matrix_mut(&mut self, target: MatrixTarget) -> &mut Matrix4 {
        match target {
            MatrixTarget::ModelView => &mut self.modelview,
            MatrixTarget::Projection => &mut self.projection,
        }
    }

    pub fn viewport(&self) -> Region {
        self.viewport
    }

    pub fn front_color(&self) -> Color {
        self.front_color
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn report(&self) -> StateReport {
        StateReport {
            modelview: self.modelview,
            projection: self.projection,
            viewport: self.viewport,
            front_color: self.front_color,
            clear_color: self.clear_color,
        }
    }

    // --- Configuration ---

    pub fn set_viewport(&mut self, viewport: Region) {
        self.viewport = viewport;
    }

    pub fn set_matrix(&mut self, target: MatrixTarget, matrix: Matrix4) {
        *self.matrix_mut(target) = matrix;
    }

    pub fn set_front_color(&mut self, color: Color) {
        self.front_color = color;
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Replaces the projection with an orthographic one. Invalid parameters
    /// leave the projection untouched and return `false`.
    pub fn set_ortho(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> bool {
        match transform::ortho(left, right, bottom, top, near, far) {
            Some(matrix) => {
                self.projection = matrix;
                true
            }
            None => {
                debug!(
                    "RenderState: rejected ortho projection (l={}, r={}, b={}, t={}, n={}, f={})",
                    left, right, bottom, top, near, far
                );
                false
            }
        }
    }

    /// Replaces the projection with a perspective one. Invalid parameters
    /// leave the projection untouched and return `false`.
    pub fn set_perspective(&mut self, fovy: f32, near: f32, far: f32, aspect: f32) -> bool {
        match transform::perspective(fovy, near, far, aspect) {
            Some(matrix) => {
                self.projection = matrix;
                true
            }
            None => {
                debug!(
                    "RenderState: rejected perspective projection (fovy={}, n={}, f={}, aspect={})",
                    fovy, near, far, aspect
                );
                false
            }
        }
    }

    // --- Drawing ---

    /// Fills the buffer with the clear color.
    pub fn clear(&mut self) -> bool {
        let color = self.clear_color;
        self.lock_buffer().clear(color)
    }

    /// Plots a point directly in pixel space.
    pub fn plot_raw_point(&mut self, at: PixelPos, size: PointSize) -> bool {
        let color = self.front_color;
        raster_point(&mut self.lock_buffer(), at, size, color)
    }

    /// Draws a line directly in pixel space.
    pub fn draw_raw_line(&mut self, from: PixelPos, to: PixelPos) {
        let color = self.front_color;
        raster_line(&mut self.lock_buffer(), from, to, color);
    }

    /// Runs `point` through modelview, projection, perspective division and
    /// the viewport mapping.
    pub fn project(&self, point: Vector4) -> Projected {
        let clip = self.projection.transform(self.modelview.transform(point));
        if clip.w == 0.0 {
            return Projected::Degenerate;
        }
        let ndc = clip.normalized();
        let ((x, y), inside) = self.viewport.map_ndc(ndc.x, ndc.y);
        let pos = PixelPos::new(x, y);
        if !(-1.0..=1.0).contains(&ndc.z) {
            return Projected::DepthClipped(pos);
        }
        if inside {
            Projected::Visible(pos)
        } else {
            Projected::OutsideViewport(pos)
        }
    }

    /// Projects and plots a point. Nothing is drawn unless the point is fully
    /// visible.
    pub fn plot_point(&mut self, point: Vector4, size: PointSize) -> bool {
        match self.project(point) {
            Projected::Visible(pos) => self.plot_raw_point(pos, size),
            rejected => {
                trace!("RenderState: point {} not drawn ({:?})", point, rejected);
                false
            }
        }
    }

    /// Projects both endpoints and rasterizes the segment between them.
    ///
    /// The whole line is dropped when either endpoint is depth-clipped or
    /// degenerate. Endpoints outside the viewport are kept as mapped, and the
    /// per-pixel bounds check trims whatever falls off the buffer.
    // TODO: replace the keep-as-mapped rule with parametric (Liang-Barsky)
    // clipping against the view volume once callers no longer rely on the
    // current output.
    pub fn draw_line(&mut self, from: Vector4, to: Vector4) -> bool {
        let (a, b) = match (self.project(from), self.project(to)) {
            (
                Projected::Visible(a) | Projected::OutsideViewport(a),
                Projected::Visible(b) | Projected::OutsideViewport(b),
            ) => (a, b),
            rejected => {
                trace!("RenderState: line {} -> {} not drawn ({:?})", from, to, rejected);
                return false;
            }
        };
        self.draw_raw_line(a, b);
        true
    }

    /// Draws a vertex list according to `mode`.
    pub fn draw_primitives(&mut self, mode: DrawMode, vertices: &[Vector4]) {
        match mode {
            DrawMode::Points | DrawMode::BigPoints => {
                let size = if mode == DrawMode::BigPoints {
                    PointSize::Big
                } else {
                    PointSize::Normal
                };
                for &vertex in vertices {
                    self.plot_point(vertex, size);
                }
            }
            DrawMode::Lines => {
                for pair in vertices.chunks_exact(2) {
                    self.draw_line(pair[0], pair[1]);
                }
            }
            DrawMode::LineStrip | DrawMode::LineLoop => {
                for pair in vertices.windows(2) {
                    self.draw_line(pair[0], pair[1]);
                }
                if mode == DrawMode::LineLoop && vertices.len() >= 3 {
                    self.draw_line(vertices[vertices.len() - 1], vertices[0]);
                }
            }
        }
    }
}

/// Plots `at`, plus its four axis neighbours for big points. Neighbours are
/// only drawn when the centre landed inside the buffer.
fn raster_point(buffer: &mut PixelBuffer, at: PixelPos, size: PointSize, color: Color) -> bool {
    if !buffer.plot(at.x, at.y, color) {
        return false;
    }
    if size == PointSize::Big {
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            buffer.plot(at.x + dx, at.y + dy, color);
        }
    }
    true
}

/// Line rasterizer working directly in pixel space.
///
/// Steps one pixel at a time along the dominant axis (`|dx| > |dy|` is
/// x-dominant; ties step along y) and rounds the other coordinate. Only the
/// stepped range is limited to the buffer; each plotted pixel is still bounds
/// checked on its own.
fn raster_line(buffer: &mut PixelBuffer, from: PixelPos, to: PixelPos, color: Color) {
    if from == to {
        raster_point(buffer, from, PointSize::Normal, color);
        return;
    }

    let (x1, y1) = (from.x as i64, from.y as i64);
    let (x2, y2) = (to.x as i64, to.y as i64);
    let dx = x2 - x1;
    let dy = y2 - y1;

    if dx.abs() > dy.abs() {
        // y = x*m + b
        let ((sx, sy), (ex, _)) = if x1 > x2 {
            ((x2, y2), (x1, y1))
        } else {
            ((x1, y1), (x2, y2))
        };
        let m = dy as f32 / dx as f32;
        let b = sy as f32 - sx as f32 * m;
        let width = buffer.width() as i64;
        let last = if ex > width { width - 1 } else { ex };
        for x in sx.max(0)..=last {
            let y = (x as f32 * m + b).round();
            buffer.plot(x as i32, y as i32, color);
        }
    } else {
        // x = y*m + b
        let ((sx, sy), (_, ey)) = if y1 > y2 {
            ((x2, y2), (x1, y1))
        } else {
            ((x1, y1), (x2, y2))
        };
        let m = dx as f32 / dy as f32;
        let b = sx as f32 - sy as f32 * m;
        let height = buffer.height() as i64;
        let last = if ey > height { height - 1 } else { ey };
        for y in sy.max(0)..=last {
            let x = (y as f32 * m + b).round();
            buffer.plot(x as i32, y as i32, color);
        }
    }
}
