/// Spin3D Terminal Demo - Rotating Cube
///
/// Renders a randomly colored cube spinning about the (1, 1, 1) axis.
/// Pass a TOML file as the first argument to override the defaults.
/// Controls:
///   - Q/ESC: Quit

use nalgebra::Point3;
use rand::thread_rng;
use spin3d_core::{AnimationConfig, ColorSource, Polyhedron, RandomColors};
use spin3d_terminal::TerminalApp;
use std::env;
use std::io;

fn main() -> io::Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => AnimationConfig::load(&path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("Failed to load {}: {}", path, e)))?,
        None => AnimationConfig::default(),
    };

    let colors = match config.palette() {
        Some(mut palette) => palette.take_colors(6),
        None => RandomColors::new(thread_rng()).take_colors(6),
    };
    let cube = Polyhedron::cube(Point3::new(100.0, 100.0, 100.0), 200.0, colors)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // Run the terminal app
    let mut app = TerminalApp::new(&config)?;
    app.add_shape(cube);
    app.run()?;

    println!("Thank you for using Spin3D!");
    Ok(())
}
