/// Character-cell rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use log::debug;
use nalgebra::Point2;
use std::io::Write;
use spin3d_core::{DisplaySurface, QuadCommand, Viewport};

/// Glyph used for filled cells
const FILL: char = '█';

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

/// Display surface that fills quads into a grid of colored cells.
///
/// There is no depth buffer: each quad overwrites whatever is under it, so
/// quads must arrive back to front.
pub struct TerminalSurface {
    width: usize,
    height: usize,
    viewport: Viewport,
    cells: Vec<Option<spin3d_core::Color>>,
}

impl TerminalSurface {
    pub fn new(width: usize, height: usize, viewport: Viewport) -> Self {
        Self {
            width,
            height,
            viewport,
            cells: vec![None; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![None; width * height];
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<spin3d_core::Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    /// Viewport pixel to fractional cell position, keeping the aspect ratio
    fn to_cell(&self, point: &Point2<f64>) -> Point2<f64> {
        let screen = self.viewport.to_screen(point);
        let vw = f64::from(self.viewport.width);
        let vh = f64::from(self.viewport.height);
        let scale = (self.width as f64 / vw).min(CELL_ASPECT * self.height as f64 / vh);
        Point2::new(
            (screen.x - vw / 2.0) * scale + self.width as f64 / 2.0,
            (screen.y - vh / 2.0) * scale / CELL_ASPECT + self.height as f64 / 2.0,
        )
    }

    fn fill_triangle(&mut self, v: [Point2<f64>; 3], color: spin3d_core::Color) {
        // Bounding box
        let min_x = v[0].x.min(v[1].x).min(v[2].x).floor() as i64;
        let max_x = v[0].x.max(v[1].x).max(v[2].x).ceil() as i64;
        let min_y = v[0].y.min(v[1].y).min(v[2].y).floor() as i64;
        let max_y = v[0].y.max(v[1].y).max(v[2].y).ceil() as i64;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i64 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Point2::new(x as f64 + 0.5, y as f64 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v[0], v[1], v[2], p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.cells[y as usize * self.width + x as usize] = Some(color);
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            for x in 0..self.width {
                match self.cells[y * self.width + x] {
                    Some(color) => {
                        if current != Some(color) {
                            writer.queue(SetForegroundColor(Color::Rgb {
                                r: color.r,
                                g: color.g,
                                b: color.b,
                            }))?;
                            current = Some(color);
                        }
                        writer.queue(Print(FILL))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DisplaySurface for TerminalSurface {
    fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn draw_quad(&mut self, quad: &QuadCommand) {
        let [a, b, c, d] = quad.points.map(|p| self.to_cell(&p));
        if [a, b, c, d].iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            debug!("skipping face {} with a non-finite corner", quad.face);
            return;
        }
        self.fill_triangle([a, b, c], quad.color);
        self.fill_triangle([a, c, d], quad.color);
    }
}

/// Barycentric coordinates of `p`, normalized so that points inside the
/// triangle are non-negative for either winding.
fn barycentric(v0: Point2<f64>, v1: Point2<f64>, v2: Point2<f64>, p: Point2<f64>) -> Option<(f64, f64, f64)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
