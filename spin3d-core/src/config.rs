/// Animation configuration with the classic rotating-cube defaults
use std::f64::consts::PI;
use std::path::Path;
use std::time::Duration;

use nalgebra::{Point3, Vector3};
use serde::Deserialize;

use crate::color::{Color, Palette};
use crate::error::ConfigError;
use crate::geometry::Axis;
use crate::projection::{Camera, Viewer, Viewport};

/// Construction parameters for an [`Animation`](crate::animation::Animation).
///
/// Every field has a default, so a TOML file only needs the values it changes:
///
/// ```toml
/// max_fps = 30.0
/// axis_direction = [0.0, 0.0, 1.0]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    pub width: u32,
    pub height: u32,
    pub max_fps: f64,
    /// Radians per second
    pub rotation_speed: f64,
    pub eye: [f64; 3],
    pub plane_distance: f64,
    pub plane_center: [f64; 2],
    /// Normalized when the rotation axis is built
    pub axis_direction: [f64; 3],
    pub axis_pivot: [f64; 3],
    /// Fixed face colors; random colors are used when empty
    pub face_colors: Vec<Color>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let unit = 3f64.sqrt() / 3.0;
        Self {
            width: 1280,
            height: 720,
            max_fps: 60.0,
            rotation_speed: 2.0 * PI / 3.0,
            eye: [500.0, 0.0, 0.0],
            plane_distance: 550.0,
            plane_center: [0.0, 0.0],
            axis_direction: [unit, unit, unit],
            axis_pivot: [0.0, 0.0, 0.0],
            face_colors: Vec::new(),
        }
    }
}

impl AnimationConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_fps.is_finite() && self.max_fps > 0.0) {
            return Err(ConfigError::Invalid {
                field: "max_fps",
                reason: format!("must be a positive number, got {}", self.max_fps),
            });
        }
        if self.frame_interval().is_zero() {
            return Err(ConfigError::Invalid {
                field: "max_fps",
                reason: format!("at most 1000 frames per second, got {}", self.max_fps),
            });
        }
        if !self.rotation_speed.is_finite() {
            return Err(ConfigError::Invalid {
                field: "rotation_speed",
                reason: format!("must be finite, got {}", self.rotation_speed),
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid {
                field: "width/height",
                reason: format!("surface must be non-empty, got {}x{}", self.width, self.height),
            });
        }
        self.axis()?;
        Ok(())
    }

    /// Delay between ticks, truncated to whole milliseconds
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis((1000.0 / self.max_fps) as u64)
    }

    /// Rotation applied per tick, so the speed is independent of the frame rate
    pub fn angle_delta(&self) -> f64 {
        self.rotation_speed * self.frame_interval().as_secs_f64()
    }

    pub fn camera(&self) -> Camera {
        let [x, y, z] = self.eye;
        let [center_y, center_z] = self.plane_center;
        Camera::new(Point3::new(x, y, z), Viewer::new(self.plane_distance, center_y, center_z))
    }

    pub fn axis(&self) -> Result<Axis, ConfigError> {
        let [u, v, w] = self.axis_direction;
        let [a, b, c] = self.axis_pivot;
        Ok(Axis::normalized(Vector3::new(u, v, w), Point3::new(a, b, c))?)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn palette(&self) -> Option<Palette> {
        (!self.face_colors.is_empty()).then(|| Palette::new(self.face_colors.clone()))
    }
}
