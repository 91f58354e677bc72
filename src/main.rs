// src/main.rs

use derplot::math::transform::degrees_to_radians;
use derplot::{Color, Config, DrawMode, MatrixTarget, Plotter, Vector4};

// Logging
use anyhow::Context; // For context on Results
use log::{info, warn};

/// Width of the ASCII preview printed after rendering.
const PREVIEW_COLUMNS: u32 = 80;

/// Edges of the unit cube centred on the origin, as vertex pairs.
fn cube_edges() -> Vec<Vector4> {
    let corner = |i: usize| {
        Vector4::point(
            if i & 1 == 0 { -0.5 } else { 0.5 },
            if i & 2 == 0 { -0.5 } else { 0.5 },
            if i & 4 == 0 { -0.5 } else { 0.5 },
        )
    };
    let mut edges = Vec::with_capacity(24);
    for a in 0..8 {
        for bit in [1, 2, 4] {
            if a & bit == 0 {
                edges.push(corner(a));
                edges.push(corner(a | bit));
            }
        }
    }
    edges
}

/// Prints the buffer as ASCII, one character per `step` x `2 * step` block.
fn print_preview(pixels: &[u32], width: u32, height: u32, clear: Color) {
    const RAMP: &[u8] = b" .:-=+*#%@";
    let step = (width / PREVIEW_COLUMNS).max(1);
    for row in (0..height).step_by((step * 2) as usize) {
        let line: String = (0..width)
            .step_by(step as usize)
            .map(|col| {
                let color = Color(pixels[(row * width + col) as usize]);
                if color == clear {
                    ' '
                } else {
                    let level = color.luma() as usize * (RAMP.len() - 1) / 255;
                    RAMP[level.max(1)] as char
                }
            })
            .collect();
        println!("{}", line.trim_end());
    }
}

/// Entry point for the `derplot` demo: renders a wireframe cube with axes.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting derplot...");

    // --- Configuration ---
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => {
            warn!("No configuration file given, using defaults");
            Config::default()
        }
    };
    info!("Configuration: {:?}", config);

    let plotter = Plotter::from_config(&config).context("Failed to create plotter")?;
    if !plotter.is_ready() {
        warn!("Plotter is not ready, nothing to draw");
        return Ok(());
    }

    // --- Scene ---
    plotter.perspective(60.0, 0.01, 100.0, config.aspect_ratio());
    plotter.rotate_x(degrees_to_radians(10.0), MatrixTarget::Projection);
    plotter.translate(Vector4::point(0.5, -1.5, -5.0), MatrixTarget::Projection);
    plotter.clear();

    plotter.rotate(
        degrees_to_radians(15.0),
        degrees_to_radians(30.0),
        0.0,
        MatrixTarget::ModelView,
    );
    plotter.draw(DrawMode::Lines, &cube_edges());

    let origin = Vector4::point(0.0, 0.0, 0.0);
    for (axis, color) in [
        (Vector4::point(1.5, 0.0, 0.0), Color::RED),
        (Vector4::point(0.0, 1.5, 0.0), Color::GREEN),
        (Vector4::point(0.0, 0.0, 1.5), Color::BLUE),
    ] {
        plotter.set_front_color(color);
        plotter.draw_line(origin, axis);
        plotter.plot_big_point(axis);
    }

    plotter.drain();
    if let Some(report) = plotter.report() {
        info!("Final modelview:\n{}", report.modelview);
    }

    print_preview(&plotter.pixels(), plotter.width(), plotter.height(), config.clear_color);

    plotter.shutdown();
    info!("derplot exited successfully.");
    Ok(())
}
