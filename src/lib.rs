// src/lib.rs

//! `derplot` is a small 3D software plotter.
//!
//! Callers issue drawing and transformation commands through a [`Plotter`].
//! Every call is turned into a [`Command`] and queued; a dedicated render
//! thread applies the commands in order to a [`RenderState`], which owns the
//! modelview/projection matrices, the viewport and the current colors, and
//! rasterizes points and lines into a [`PixelBuffer`].
//!
//! Calls return immediately. [`Plotter::drain`] blocks until every queued
//! command has been applied, after which the buffer can be copied out.
//!
//! ```no_run
//! use derplot::{Plotter, Vector4};
//!
//! # fn main() -> anyhow::Result<()> {
//! let plotter = Plotter::new(64, 48)?;
//! plotter.clear();
//! plotter.draw_line(Vector4::point(-0.5, -0.5, 0.0), Vector4::point(0.5, 0.5, 0.0));
//! plotter.drain();
//!
//! let mut pixels = vec![0u32; 64 * 48];
//! plotter.copy_into(&mut pixels)?;
//! plotter.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod color;
pub mod config;
pub mod error;
pub mod math;
pub mod plotter;
pub mod renderer;

pub use buffer::{ExternalPixels, PixelBuffer, PixelStorage, SharedBuffer};
pub use color::Color;
pub use config::Config;
pub use error::{BufferError, InvalidMatrixTarget};
pub use math::{Matrix4, Region, Vector4};
pub use plotter::Plotter;
pub use renderer::{
    Axis, Command, DrawMode, Flow, MatrixTarget, PixelPos, PointSize, Projected, RenderState,
    StateReport,
};
