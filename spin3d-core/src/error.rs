/// Error types shared by the core library
use thiserror::Error;

/// Invalid shape or axis construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Flat coordinate buffer whose length is not a multiple of three
    #[error("point buffer length {len} is not a multiple of 3")]
    InvalidPointBuffer { len: usize },

    /// Rotation direction that cannot be normalized
    #[error("axis direction ({x}, {y}, {z}) cannot be normalized")]
    DegenerateAxis { x: f64, y: f64, z: f64 },

    /// Face referencing a vertex the shape does not have
    #[error("face {face} references vertex {index}, but the shape has {points} points")]
    FaceIndexOutOfRange {
        face: usize,
        index: usize,
        points: usize,
    },

    /// One color per face is required
    #[error("{faces} faces but {colors} colors")]
    ColorCountMismatch { faces: usize, colors: usize },
}

/// Perspective projection failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// The vertex shares the eye's depth coordinate, so its projection is unbounded
    #[error("vertex {index} lies in the eye's depth plane (relative depth is zero)")]
    EyeInVertexPlane { index: usize },
}

/// Animation driver state errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    #[error("animation has already been started or stopped")]
    AlreadyStarted,
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Invalid rotation axis: {0}")]
    Axis(#[from] GeometryError),
}
