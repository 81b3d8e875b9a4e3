//! Tuning constants for the canvas effects.
//!
//! Everything that differs between phone-sized and desktop-sized viewports is
//! grouped into a profile selected by [`ViewportClass::of`].

use crate::surface::Rgba;

/// Widths strictly below this are treated as compact (touch) displays.
pub const COMPACT_BREAKPOINT: f64 = 768.0;

/// Page background painted under the particle field.
pub const BACKGROUND: Rgba = Rgba::rgb(0x0f, 0x10, 0x14);
/// Cyan used for particles, links and highlighted orbit labels.
pub const ACCENT: Rgba = Rgba::rgb(0x22, 0xd3, 0xee);
/// Slate used for dimmed orbit labels.
pub const MUTED: Rgba = Rgba::rgb(0x47, 0x55, 0x69);

/// Depth lost by every particle per frame.
pub const DEPTH_STEP: f64 = 2.0;
/// Added to depth before the perspective divide.
pub const DEPTH_BIAS: f64 = 100.0;
/// Largest depth gap for which two particles may be linked.
pub const LINK_DEPTH_TOLERANCE: f64 = 100.0;
/// Fraction of the pointer offset used as parallax target.
pub const PARALLAX_DAMPING: f64 = 0.1;
/// Particle radius at depth zero.
pub const PARTICLE_RADIUS: f64 = 1.5;

/// Pseudo-depth used by the orbit scale factor.
pub const ORBIT_PERSPECTIVE: f64 = 1000.0;
/// Vertical squash applied to the orbit ellipse.
pub const ORBIT_FLATTEN: f64 = 0.2;
pub const ORBIT_LINE_WIDTH: f64 = 0.5;

/// Maximum card rotation in degrees, reached at the card edges.
pub const TILT_MAX_DEG: f64 = 5.0;

pub const SCRAMBLE_GLYPHS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%&";
pub const SCRAMBLE_TICK_MS: u32 = 30;
/// A character is revealed every this many ticks.
pub const SCRAMBLE_TICKS_PER_CHAR: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Compact,
    Wide,
}

impl ViewportClass {
    pub fn of(width: f64) -> Self {
        if width < COMPACT_BREAKPOINT {
            Self::Compact
        } else {
            Self::Wide
        }
    }

    pub fn field(self) -> FieldProfile {
        match self {
            Self::Compact => FieldProfile {
                particles: 60,
                connection_distance: 40.0,
                line_opacity: 0.1,
            },
            Self::Wide => FieldProfile {
                particles: 450,
                connection_distance: 120.0,
                line_opacity: 0.2,
            },
        }
    }

    pub fn orbit(self) -> OrbitProfile {
        match self {
            Self::Compact => OrbitProfile {
                radius_scale: 0.45,
                lit_opacity: 0.6,
                dim_opacity: 0.1,
                font_px: 8.0,
            },
            Self::Wide => OrbitProfile {
                radius_scale: 0.35,
                lit_opacity: 0.8,
                dim_opacity: 0.2,
                font_px: 10.0,
            },
        }
    }

    /// Card tilt is skipped on compact displays to avoid accidental triggers.
    pub fn allows_tilt(self) -> bool {
        matches!(self, Self::Wide)
    }
}

/// Particle field sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldProfile {
    pub particles: usize,
    pub connection_distance: f64,
    pub line_opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitProfile {
    /// Orbit radius as a fraction of the shorter surface side.
    pub radius_scale: f64,
    pub lit_opacity: f64,
    pub dim_opacity: f64,
    pub font_px: f64,
}
