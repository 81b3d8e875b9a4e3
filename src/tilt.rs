//! Pointer-driven 3D tilt for the holo cards.

use crate::config::{ViewportClass, TILT_MAX_DEG};
use crate::surface::Point;

/// Pointer position inside a card, each axis in `[-0.5, 0.5]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerOffset {
    x: f64,
    y: f64,
}

impl PointerOffset {
    pub const CENTER: PointerOffset = PointerOffset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_half(x),
            y: clamp_half(y),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

fn clamp_half(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-0.5, 0.5)
    }
}

/// Element bounds in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Offset of `client` from the centre of the bounds, normalised to the size.
    pub fn offset_of(&self, client: Point) -> Option<PointerOffset> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        Some(PointerOffset::new(
            (client.x - self.left) / self.width - 0.5,
            (client.y - self.top) / self.height - 0.5,
        ))
    }
}

/// Rotation in degrees around the card's X and Y axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    pub const NEUTRAL: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    /// Vertical offset tips the card around X (top edge away from the
    /// pointer), horizontal offset turns it around Y.
    pub fn from_offset(offset: PointerOffset) -> Self {
        let scale = TILT_MAX_DEG / 0.5;
        Tilt {
            rotate_x: -offset.y * scale,
            rotate_y: offset.x * scale,
        }
    }

    pub fn css_transform(&self) -> String {
        format!(
            "rotateX({:.3}deg) rotateY({:.3}deg)",
            self.rotate_x, self.rotate_y
        )
    }
}

/// Tilt state for one card.
#[derive(Debug, Default)]
pub struct TiltCard {
    offset: PointerOffset,
}

impl TiltCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> PointerOffset {
        self.offset
    }

    /// New tilt for a pointer at `client`, or `None` when tilt is disabled for
    /// this window width or the card has no size.
    pub fn pointer_moved(&mut self, window_width: f64, bounds: Bounds, client: Point) -> Option<Tilt> {
        if !ViewportClass::of(window_width).allows_tilt() {
            return None;
        }
        self.offset = bounds.offset_of(client)?;
        Some(Tilt::from_offset(self.offset))
    }

    pub fn pointer_left(&mut self) -> Tilt {
        self.offset = PointerOffset::CENTER;
        Tilt::NEUTRAL
    }
}
