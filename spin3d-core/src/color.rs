/// Face colors and color sources
use std::fmt;

use rand::Rng;
use serde::Deserialize;

/// An opaque 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Supplies one color per face when a polyhedron is built
pub trait ColorSource {
    fn next_color(&mut self) -> Color;

    fn take_colors(&mut self, count: usize) -> Vec<Color> {
        (0..count).map(|_| self.next_color()).collect()
    }
}

/// Uniformly random colors drawn from any `rand` generator
pub struct RandomColors<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomColors<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ColorSource for RandomColors<R> {
    fn next_color(&mut self) -> Color {
        Color::new(self.rng.gen(), self.rng.gen(), self.rng.gen())
    }
}

/// Cycles through a fixed list of colors
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Color>,
    next: usize,
}

impl Palette {
    /// Falls back to the default palette when `colors` is empty
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            return Self::default();
        }
        Self { colors, next: 0 }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                Color::new(0xE6, 0x39, 0x46),
                Color::new(0xF4, 0xA2, 0x61),
                Color::new(0xE9, 0xC4, 0x6A),
                Color::new(0x2A, 0x9D, 0x8F),
                Color::new(0x45, 0x7B, 0x9D),
                Color::new(0x8E, 0x5E, 0xA2),
            ],
            next: 0,
        }
    }
}

impl ColorSource for Palette {
    fn next_color(&mut self) -> Color {
        let color = self.colors[self.next];
        self.next = (self.next + 1) % self.colors.len();
        color
    }
}
