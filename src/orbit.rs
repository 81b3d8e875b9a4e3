//! Labels circling the trajectory section on a flattened ellipse.

use std::f64::consts::TAU;

use crate::category::{Category, CategoryView};
use crate::config::{
    OrbitProfile, ViewportClass, ACCENT, MUTED, ORBIT_FLATTEN, ORBIT_LINE_WIDTH, ORBIT_PERSPECTIVE,
};
use crate::scheduler::Animation;
use crate::surface::{Painter, Point, Viewport};

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitNode {
    pub label: &'static str,
    /// Angle in radians, kept in `[0, 2π)`.
    pub phase: f64,
    /// Radians added per frame.
    pub speed: f64,
    category: Category,
}

impl OrbitNode {
    pub fn new(label: &'static str, phase: f64, speed: f64, category: Category) -> Self {
        Self {
            label,
            phase: phase.rem_euclid(TAU),
            speed,
            category,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    fn advance(&mut self) {
        self.phase = (self.phase + self.speed).rem_euclid(TAU);
    }
}

/// The fixed label set shown behind the career timeline.
pub fn default_nodes() -> Vec<OrbitNode> {
    vec![
        OrbitNode::new("AI", 0.0, 0.002, Category::Ai),
        OrbitNode::new("CLINICAL", 2.0, 0.003, Category::Clinical),
        OrbitNode::new("DATA", 4.0, 0.002, Category::Data),
        OrbitNode::new("OPS", 1.0, 0.004, Category::Ops),
        OrbitNode::new("AUTOMATION", 1.0, 0.004, Category::Automation),
        OrbitNode::new("REVENUE", 3.0, 0.003, Category::Ops),
        OrbitNode::new("BRAND", 5.0, 0.002, Category::Brand),
    ]
}

/// Screen position of a node at `phase` on an orbit of `radius` around `center`.
pub fn orbit_position(center: Point, radius: f64, phase: f64) -> Point {
    let x = phase.cos() * radius;
    let z = phase.sin() * radius;
    let scale = (z + ORBIT_PERSPECTIVE) / ORBIT_PERSPECTIVE;
    Point::new(center.x + x * scale, center.y + z * ORBIT_FLATTEN * scale)
}

pub struct Orbit {
    nodes: Vec<OrbitNode>,
    profile: OrbitProfile,
    viewport: Viewport,
    active: CategoryView,
}

impl Orbit {
    pub fn new(viewport: Viewport, active: CategoryView) -> Self {
        let profile = ViewportClass::of(viewport.width).orbit();
        Self::with_nodes(viewport, profile, default_nodes(), active)
    }

    pub fn with_nodes(
        viewport: Viewport,
        profile: OrbitProfile,
        nodes: Vec<OrbitNode>,
        active: CategoryView,
    ) -> Self {
        Self {
            nodes,
            profile,
            viewport,
            active,
        }
    }

    pub fn nodes(&self) -> &[OrbitNode] {
        &self.nodes
    }

    pub fn radius(&self) -> f64 {
        self.viewport.width.min(self.viewport.height) * self.profile.radius_scale
    }
}

impl Animation for Orbit {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn frame(&mut self, viewport: Viewport, painter: &mut dyn Painter) {
        if viewport.is_empty() {
            return;
        }
        painter.clear(viewport);
        let center = viewport.center();
        let radius = self.radius();
        let active = self.active.get();
        let profile = self.profile;

        for node in &mut self.nodes {
            node.advance();
            let at = orbit_position(center, radius, node.phase);
            let lit = active.highlights(node.category);
            let (color, opacity) = if lit {
                (ACCENT, profile.lit_opacity)
            } else {
                (MUTED, profile.dim_opacity)
            };
            let color = color.with_alpha(opacity);
            painter.label(at, node.label, profile.font_px, color);
            if lit {
                painter.line(center, at, ORBIT_LINE_WIDTH, color);
            }
        }
    }
}
