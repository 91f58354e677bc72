// src/renderer/commands.rs
//! Commands accepted by the render thread.
//!
//! A [`Command`] is a self-contained value describing one requested action.
//! Every variant carries exactly the data it needs, so a malformed command
//! cannot be built; in particular matrix targets and rotation axes are enums
//! rather than integers.

use super::{PixelPos, RenderState, StateReport};
use crate::color::Color;
use crate::error::InvalidMatrixTarget;
use crate::math::{transform, Matrix4, Region, Vector4};
use std::sync::mpsc::Sender;

/// Which of the two render matrices a command operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatrixTarget {
    #[default]
    ModelView,
    Projection,
}

impl TryFrom<i32> for MatrixTarget {
    type Error = InvalidMatrixTarget;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(MatrixTarget::ModelView),
            1 => Ok(MatrixTarget::Projection),
            other => Err(InvalidMatrixTarget(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Size of a plotted point. A big point also covers its four axis neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointSize {
    #[default]
    Normal,
    Big,
}

/// How a vertex list is turned into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMode {
    /// One point per vertex.
    Points,
    /// One big point per vertex.
    BigPoints,
    /// Independent segments (v0,v1), (v2,v3), ...; an odd last vertex is ignored.
    Lines,
    /// Connected segments through all vertices.
    LineStrip,
    /// A line strip closed back to the first vertex.
    LineLoop,
}

/// Whether the render loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Terminate,
}

/// One unit of work for the render thread.
#[derive(Debug, Clone)]
pub enum Command {
    /// Stop the render loop; commands still queued behind it are discarded.
    Terminate,
    SetViewport(Region),
    /// Fill the buffer with the clear color.
    Clear,
    PlotRawPoint {
        at: PixelPos,
        size: PointSize,
    },
    DrawRawLine {
        from: PixelPos,
        to: PixelPos,
    },
    PlotPoint {
        point: Vector4,
        size: PointSize,
    },
    DrawLine {
        from: Vector4,
        to: Vector4,
    },
    DrawPrimitives {
        mode: DrawMode,
        vertices: Box<[Vector4]>,
    },
    SetMatrix {
        matrix: Matrix4,
        target: MatrixTarget,
    },
    SetOrtho {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
    /// Perspective projection; `fovy` is in degrees.
    SetPerspective {
        fovy: f32,
        near: f32,
        far: f32,
        aspect: f32,
    },
    Translate {
        offset: Vector4,
        target: MatrixTarget,
    },
    /// Counter-clockwise rotation, `angle` in radians.
    Rotate {
        axis: Axis,
        angle: f32,
        target: MatrixTarget,
    },
    Scale {
        factors: Vector4,
        target: MatrixTarget,
    },
    SetFrontColor(Color),
    SetClearColor(Color),
    /// Send a copy of the current configuration back to the caller.
    Report(Sender<StateReport>),
}

impl Command {
    /// Short variant name for log output.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Terminate => "Terminate",
            Command::SetViewport(_) => "SetViewport",
            Command::Clear => "Clear",
            Command::PlotRawPoint { .. } => "PlotRawPoint",
            Command::DrawRawLine { .. } => "DrawRawLine",
            Command::PlotPoint { .. } => "PlotPoint",
            Command::DrawLine { .. } => "DrawLine",
            Command::DrawPrimitives { .. } => "DrawPrimitives",
            Command::SetMatrix { .. } => "SetMatrix",
            Command::SetOrtho { .. } => "SetOrtho",
            Command::SetPerspective { .. } => "SetPerspective",
            Command::Translate { .. } => "Translate",
            Command::Rotate { .. } => "Rotate",
            Command::Scale { .. } => "Scale",
            Command::SetFrontColor(_) => "SetFrontColor",
            Command::SetClearColor(_) => "SetClearColor",
            Command::Report(_) => "Report",
        }
    }

    /// Applies this command to `state`.
    pub fn apply(self, state: &mut RenderState) -> Flow {
        match self {
            Command::Terminate => return Flow::Terminate,
            Command::SetViewport(viewport) => state.set_viewport(viewport),
            Command::Clear => {
                state.clear();
            }
            Command::PlotRawPoint { at, size } => {
                state.plot_raw_point(at, size);
            }
            Command::DrawRawLine { from, to } => state.draw_raw_line(from, to),
            Command::PlotPoint { point, size } => {
                state.plot_point(point, size);
            }
            Command::DrawLine { from, to } => {
                state.draw_line(from, to);
            }
            Command::DrawPrimitives { mode, vertices } => state.draw_primitives(mode, &vertices),
            Command::SetMatrix { matrix, target } => state.set_matrix(target, matrix),
            Command::SetOrtho {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => {
                state.set_ortho(left, right, bottom, top, near, far);
            }
            Command::SetPerspective {
                fovy,
                near,
                far,
                aspect,
            } => {
                state.set_perspective(fovy, near, far, aspect);
            }
            Command::Translate { offset, target } => {
                transform::translate(state.matrix_mut(target), offset);
            }
            Command::Rotate { axis, angle, target } => {
                let matrix = state.matrix_mut(target);
                match axis {
                    Axis::X => transform::rotate_x(matrix, angle),
                    Axis::Y => transform::rotate_y(matrix, angle),
                    Axis::Z => transform::rotate_z(matrix, angle),
                };
            }
            Command::Scale { factors, target } => {
                transform::scale(state.matrix_mut(target), factors);
            }
            Command::SetFrontColor(color) => state.set_front_color(color),
            Command::SetClearColor(color) => state.set_clear_color(color),
            Command::Report(reply) => {
                // Receiver may already be gone.
                let _ = reply.send(state.report());
            }
        }
        Flow::Continue
    }
}
