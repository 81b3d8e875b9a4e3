//! Drawing surface abstraction shared by the canvas renderers.
//!
//! Renderers never touch a browser context directly; they paint through
//! [`Painter`]. The wasm binding implements it over a 2D canvas context and
//! tests use [`Recorder`].

use std::fmt;

/// Pixel dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A surface with no area cannot be projected onto.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// CSS colour string, `#rrggbb` when opaque and `rgba(..)` otherwise.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

pub trait Painter {
    /// Erase the whole surface to transparent.
    fn clear(&mut self, viewport: Viewport);
    /// Cover the whole surface with a solid colour.
    fn fill(&mut self, viewport: Viewport, color: Rgba);
    fn dot(&mut self, at: Point, radius: f64, color: Rgba);
    fn line(&mut self, from: Point, to: Point, width: f64, color: Rgba);
    fn label(&mut self, at: Point, text: &str, font_px: f64, color: Rgba);
}

/// One recorded [`Painter`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum Stroke {
    Clear,
    Fill(Rgba),
    Dot { at: Point, radius: f64, color: Rgba },
    Line { from: Point, to: Point, width: f64, color: Rgba },
    Label { at: Point, text: String, font_px: f64, color: Rgba },
}

/// Painter that keeps every call, for inspecting what a frame drew.
#[derive(Debug, Default)]
pub struct Recorder {
    pub strokes: Vec<Stroke>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<Stroke> {
        std::mem::take(&mut self.strokes)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes
            .iter()
            .filter(|s| matches!(s, Stroke::Line { .. }))
    }

    pub fn labels(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes
            .iter()
            .filter(|s| matches!(s, Stroke::Label { .. }))
    }
}

impl Painter for Recorder {
    fn clear(&mut self, _viewport: Viewport) {
        self.strokes.push(Stroke::Clear);
    }

    fn fill(&mut self, _viewport: Viewport, color: Rgba) {
        self.strokes.push(Stroke::Fill(color));
    }

    fn dot(&mut self, at: Point, radius: f64, color: Rgba) {
        self.strokes.push(Stroke::Dot { at, radius, color });
    }

    fn line(&mut self, from: Point, to: Point, width: f64, color: Rgba) {
        self.strokes.push(Stroke::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn label(&mut self, at: Point, text: &str, font_px: f64, color: Rgba) {
        self.strokes.push(Stroke::Label {
            at,
            text: text.to_string(),
            font_px,
            color,
        });
    }
}
