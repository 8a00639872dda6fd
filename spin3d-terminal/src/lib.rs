/// Terminal frontend for the rotating polyhedron animation
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::info;
use spin3d_core::{Animation, AnimationConfig, Shape, StopHandle, Timer};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::TerminalSurface;

/// One-shot timer that records a deadline for the host loop to wait on
#[derive(Debug, Default)]
pub struct DeadlineTimer {
    deadline: Option<Instant>,
}

impl DeadlineTimer {
    /// The armed deadline, disarming the timer
    pub fn take_deadline(&mut self) -> Option<Instant> {
        self.deadline.take()
    }
}

impl Timer for DeadlineTimer {
    fn after(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    animation: Animation<TerminalSurface, DeadlineTimer>,
    stop: StopHandle,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: &AnimationConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let surface = TerminalSurface::new(width as usize, height as usize, config.viewport());
        let animation = Animation::new(config, surface, DeadlineTimer::default())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let stop = animation.stop_handle();

        Ok(Self {
            animation,
            stop,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn add_shape(&mut self, shape: impl Shape + 'static) {
        self.animation.add_shape(shape);
    }

    /// Handle that ends the animation after the current frame
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        info!("rendered {} frame(s)", self.animation.frame_count());
        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.animation
            .start()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        // The animation stops re-arming the timer once it has been stopped.
        while let Some(deadline) = self.animation.timer_mut().take_deadline() {
            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                if event::poll(remaining)? {
                    self.handle_input()?;
                }
            }

            self.animation.tick();
            if !self.animation.is_running() {
                continue;
            }
            self.render()?;

            // Update FPS counter
            self.frame_count += 1;
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => {
                if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.stop.stop();
                }
            }
            Event::Resize(width, height) => {
                self.animation
                    .surface_mut()
                    .resize(width as usize, height as usize);
            }
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.animation.surface().draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!("Spin3D | FPS: {:.1} | Q=Quit", self.fps)),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
