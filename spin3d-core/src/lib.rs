/// Spin3D Core Library - Rotation, projection and painter's-algorithm rendering
///
/// This library provides the windowing-agnostic core of a rotating polyhedron
/// animation: arbitrary-axis rotation of point buffers, pinhole perspective
/// projection, depth-sorted quad generation and a fixed-interval driver that
/// talks to its host only through the `DisplaySurface` and `Timer` traits.

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod polyhedron;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use animation::{Animation, DisplaySurface, State, StopHandle, Timer};
pub use color::{Color, ColorSource, Palette, RandomColors};
pub use config::AnimationConfig;
pub use error::{AnimationError, ConfigError, GeometryError, ProjectionError};
pub use geometry::{Axis, PointBuffer};
pub use polyhedron::{Face, Polyhedron, QuadCommand, Shape};
pub use projection::{project, project_checked, Camera, Viewer, Viewport};
pub use transform::{rotate, Rotation};
