/// Example: a cube and a flat slab spinning together about the z axis
///
/// Usage: cargo run --example two_shapes

use nalgebra::{Point3, Vector3};
use spin3d_core::{AnimationConfig, ColorSource, Palette, Polyhedron};
use spin3d_terminal::TerminalApp;
use std::io;

fn main() -> io::Result<()> {
    env_logger::init();

    let config = AnimationConfig {
        axis_direction: [0.0, 0.0, 1.0],
        rotation_speed: std::f64::consts::PI / 2.0,
        ..AnimationConfig::default()
    };

    let mut palette = Palette::default();
    let cube = Polyhedron::cube(Point3::new(60.0, 60.0, 160.0), 120.0, palette.take_colors(6))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let slab = Polyhedron::cuboid(
        Point3::new(150.0, 150.0, -60.0),
        Vector3::new(300.0, 300.0, 40.0),
        palette.take_colors(6),
    )
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut app = TerminalApp::new(&config)?;
    // Insertion order is draw order: the slab is drawn over the cube where they overlap.
    app.add_shape(cube);
    app.add_shape(slab);
    app.run()
}
