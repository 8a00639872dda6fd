/// Fixed-interval animation driver
///
/// The driver knows nothing about windows or event loops. The host supplies a
/// [`DisplaySurface`] that receives quads and a [`Timer`] that is asked to fire
/// the next tick, then calls [`Animation::tick`] whenever that timer fires.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use crate::config::AnimationConfig;
use crate::error::{AnimationError, ConfigError};
use crate::geometry::Axis;
use crate::polyhedron::{QuadCommand, Shape};
use crate::projection::Camera;

/// Receives the render commands of every tick
pub trait DisplaySurface {
    /// Drop everything drawn by the previous tick
    fn clear(&mut self);

    fn draw_quad(&mut self, quad: &QuadCommand);
}

/// One-shot scheduler for the next tick
pub trait Timer {
    /// Request a single call to [`Animation::tick`] after `delay`
    fn after(&mut self, delay: Duration);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Running,
    Stopped,
}

/// Cloneable cancellation token for a running animation
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Rotates every tracked shape by a fixed angle per tick and redraws it
pub struct Animation<D: DisplaySurface, T: Timer> {
    surface: D,
    timer: T,
    shapes: Vec<Box<dyn Shape>>,
    camera: Camera,
    axis: Axis,
    angle_delta: f64,
    frame_interval: Duration,
    state: State,
    stop: StopHandle,
    frame_count: u64,
}

impl<D: DisplaySurface, T: Timer> Animation<D, T> {
    pub fn new(config: &AnimationConfig, surface: D, timer: T) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            surface,
            timer,
            shapes: Vec::new(),
            camera: config.camera(),
            axis: config.axis()?,
            angle_delta: config.angle_delta(),
            frame_interval: config.frame_interval(),
            state: State::Idle,
            stop: StopHandle::default(),
            frame_count: 0,
        })
    }

    /// Track a shape; shapes are drawn in the order they were added
    pub fn add_shape(&mut self, shape: impl Shape + 'static) {
        self.shapes.push(Box::new(shape));
    }

    pub fn shapes(&self) -> &[Box<dyn Shape>] {
        &self.shapes
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn angle_delta(&self) -> f64 {
        self.angle_delta
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Arm the first tick immediately
    pub fn start(&mut self) -> Result<(), AnimationError> {
        if self.state != State::Idle {
            return Err(AnimationError::AlreadyStarted);
        }
        info!(
            "starting animation: {} shape(s), {:?} per frame, {:.4} rad per frame",
            self.shapes.len(),
            self.frame_interval,
            self.angle_delta
        );
        self.state = State::Running;
        self.timer.after(Duration::ZERO);
        Ok(())
    }

    /// No further ticks are armed once this returns.
    pub fn stop(&mut self) {
        self.stop.stop();
        self.sync_stop();
    }

    pub fn is_running(&self) -> bool {
        self.state == State::Running && !self.stop.is_stopped()
    }

    /// Run one frame. Does nothing unless the animation is running.
    pub fn tick(&mut self) {
        self.sync_stop();
        if self.state != State::Running {
            return;
        }

        self.surface.clear();
        for shape in &mut self.shapes {
            shape.rotate(self.angle_delta, &self.axis);
            for quad in shape.render(&self.camera) {
                self.surface.draw_quad(&quad);
            }
        }
        self.frame_count += 1;
        debug!("frame {} drawn", self.frame_count);

        // A stop requested while drawing still lets this frame finish.
        self.sync_stop();
        if self.state == State::Running {
            self.timer.after(self.frame_interval);
        }
    }

    fn sync_stop(&mut self) {
        if self.stop.is_stopped() && self.state != State::Stopped {
            info!("animation stopped after {} frame(s)", self.frame_count);
            self.state = State::Stopped;
        }
    }
}
