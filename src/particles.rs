//! Warp-speed star field: a fixed pool of particles falling towards the
//! viewer, linked to their close neighbours.

use fastrand::Rng;

use crate::config::{
    FieldProfile, ViewportClass, ACCENT, BACKGROUND, DEPTH_BIAS, DEPTH_STEP, LINK_DEPTH_TOLERANCE,
    PARALLAX_DAMPING, PARTICLE_RADIUS,
};
use crate::scheduler::Animation;
use crate::surface::{Painter, Point, Viewport};

/// A point in the field. `x`/`y` are relative to the surface centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
    /// Random brightness factor in `[0, 1)`.
    pub brightness: f64,
}

/// A particle after the perspective divide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub at: Point,
    pub depth: f64,
    pub radius: f64,
    pub alpha: f64,
}

/// Two linked particles, by pool index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub opacity: f64,
}

/// Opacity of a link between points `distance` apart, or `None` when they
/// are too far apart to be linked. Falls linearly to zero at `max_distance`.
pub fn link_opacity(distance: f64, max_distance: f64, base: f64) -> Option<f64> {
    if distance < max_distance {
        Some(base * (1.0 - distance / max_distance))
    } else {
        None
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    profile: FieldProfile,
    viewport: Viewport,
    pointer: Point,
    rng: Rng,
    projected: Vec<Projected>,
}

impl ParticleField {
    /// Field sized for the viewport class of `viewport`.
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        let profile = ViewportClass::of(viewport.width).field();
        Self::with_profile(viewport, profile, seed)
    }

    pub fn with_profile(viewport: Viewport, profile: FieldProfile, seed: u64) -> Self {
        let mut field = Self::from_particles(viewport, profile, Vec::new(), seed);
        let max_depth = field.max_depth();
        let particles: Vec<Particle> = (0..profile.particles)
            .map(|_| {
                let (x, y) = field.spawn_position();
                Particle {
                    x,
                    y,
                    depth: field.rng.f64() * max_depth,
                    brightness: field.rng.f64(),
                }
            })
            .collect();
        field.particles = particles;
        log::debug!(
            "particle field seeded with {} particles for {}x{}",
            field.particles.len(),
            viewport.width,
            viewport.height
        );
        field
    }

    /// Field with an explicit particle set. The pool size is fixed from here on.
    pub fn from_particles(
        viewport: Viewport,
        profile: FieldProfile,
        particles: Vec<Particle>,
        seed: u64,
    ) -> Self {
        let capacity = particles.len();
        Self {
            particles,
            profile,
            viewport: sanitize(viewport),
            pointer: Point::new(0.0, 0.0),
            rng: Rng::with_seed(seed),
            projected: Vec::with_capacity(capacity),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn profile(&self) -> FieldProfile {
        self.profile
    }

    /// Depth at which particles respawn; tracks the surface width.
    pub fn max_depth(&self) -> f64 {
        self.viewport.width
    }

    /// Latest pointer position in surface pixels.
    pub fn set_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// Offset every particle is pulled towards, derived from the pointer.
    pub fn parallax_target(&self) -> Point {
        let center = self.viewport.center();
        Point::new(
            (self.pointer.x - center.x) * PARALLAX_DAMPING,
            (self.pointer.y - center.y) * PARALLAX_DAMPING,
        )
    }

    /// Move every particle one step closer, recycling those that pass the viewer.
    pub fn advance(&mut self) {
        let max_depth = self.max_depth();
        for i in 0..self.particles.len() {
            let depth = self.particles[i].depth - DEPTH_STEP;
            if depth <= 0.0 {
                let (x, y) = self.spawn_position();
                let particle = &mut self.particles[i];
                particle.x = x;
                particle.y = y;
                particle.depth = max_depth;
            } else {
                self.particles[i].depth = depth;
            }
        }
    }

    /// Screen position of `particle` for the given parallax target.
    pub fn project(&self, particle: &Particle, target: Point) -> Projected {
        let center = self.viewport.center();
        let focal = self.viewport.width / 2.0;
        let perspective = focal / (particle.depth + DEPTH_BIAS);
        let nearness = 1.0 - particle.depth / self.max_depth();
        Projected {
            at: Point::new(
                center.x + particle.x * perspective + target.x * (1.0 - perspective),
                center.y + particle.y * perspective + target.y * (1.0 - perspective),
            ),
            depth: particle.depth,
            radius: (PARTICLE_RADIUS * nearness).max(0.0),
            alpha: (particle.brightness * nearness).clamp(0.0, 1.0),
        }
    }

    /// Links between projected particles. Quadratic in the pool size.
    pub fn links(&self, projected: &[Projected]) -> Vec<Link> {
        let mut links = Vec::new();
        for (a, first) in projected.iter().enumerate() {
            for (offset, second) in projected[a + 1..].iter().enumerate() {
                if (first.depth - second.depth).abs() > LINK_DEPTH_TOLERANCE {
                    continue;
                }
                let distance = first.at.distance(second.at);
                if let Some(opacity) = link_opacity(
                    distance,
                    self.profile.connection_distance,
                    self.profile.line_opacity,
                ) {
                    links.push(Link {
                        a,
                        b: a + 1 + offset,
                        opacity,
                    });
                }
            }
        }
        links
    }

    fn spawn_position(&mut self) -> (f64, f64) {
        let center = self.viewport.center();
        (
            self.rng.f64() * self.viewport.width - center.x,
            self.rng.f64() * self.viewport.height - center.y,
        )
    }
}

impl Animation for ParticleField {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = sanitize(viewport);
        let max_depth = self.max_depth();
        for particle in &mut self.particles {
            particle.depth = particle.depth.min(max_depth);
        }
    }

    fn frame(&mut self, viewport: Viewport, painter: &mut dyn Painter) {
        if viewport.is_empty() || self.viewport.is_empty() {
            return;
        }
        painter.fill(viewport, BACKGROUND);
        self.advance();

        let target = self.parallax_target();
        let mut projected = std::mem::take(&mut self.projected);
        projected.clear();
        projected.extend(self.particles.iter().map(|p| self.project(p, target)));

        for star in &projected {
            painter.dot(star.at, star.radius, ACCENT.with_alpha(star.alpha));
        }
        for link in self.links(&projected) {
            painter.line(
                projected[link.a].at,
                projected[link.b].at,
                1.0,
                ACCENT.with_alpha(link.opacity),
            );
        }
        self.projected = projected;
    }
}

fn sanitize(viewport: Viewport) -> Viewport {
    Viewport::new(viewport.width.max(0.0), viewport.height.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Recorder, Stroke};

    const WIDE: Viewport = Viewport::new(1920.0, 1080.0);

    fn profile() -> FieldProfile {
        ViewportClass::Wide.field()
    }

    fn particle(x: f64, y: f64, depth: f64) -> Particle {
        Particle {
            x,
            y,
            depth,
            brightness: 1.0,
        }
    }

    #[test]
    fn pool_size_follows_viewport_class() {
        assert_eq!(ParticleField::new(WIDE, 1).particles().len(), 450);
        let phone = ParticleField::new(Viewport::new(390.0, 844.0), 1);
        assert_eq!(phone.particles().len(), 60);
        assert_eq!(phone.profile().connection_distance, 40.0);
    }

    #[test]
    fn initial_particles_sit_inside_spawn_bounds() {
        let field = ParticleField::new(WIDE, 7);
        for p in field.particles() {
            assert!(p.x >= -960.0 && p.x < 960.0);
            assert!(p.y >= -540.0 && p.y < 540.0);
            assert!(p.depth >= 0.0 && p.depth < field.max_depth());
            assert!(p.brightness >= 0.0 && p.brightness < 1.0);
        }
    }

    #[test]
    fn depth_stays_in_range_for_any_pool_size() {
        // narrow surface so particles recycle many times
        let viewport = Viewport::new(64.0, 48.0);
        for n in [0usize, 1, 2, 17, 60] {
            let profile = FieldProfile {
                particles: n,
                ..profile()
            };
            let mut field = ParticleField::with_profile(viewport, profile, n as u64);
            for _ in 0..500 {
                field.advance();
                for p in field.particles() {
                    assert!(p.depth > 0.0 && p.depth <= field.max_depth(), "depth {}", p.depth);
                }
            }
            assert_eq!(field.particles().len(), n);
        }
    }

    #[test]
    fn underflow_respawns_at_max_depth() {
        let mut field =
            ParticleField::from_particles(WIDE, profile(), vec![particle(5.0, 5.0, 1.5)], 3);
        field.advance();
        let p = field.particles()[0];
        assert_eq!(p.depth, 1920.0);
        assert!(p.x >= -960.0 && p.x < 960.0);
        assert!(p.y >= -540.0 && p.y < 540.0);
        assert_eq!(p.brightness, 1.0);
    }

    #[test]
    fn perspective_divide_matches_formula() {
        let field = ParticleField::from_particles(WIDE, profile(), Vec::new(), 0);
        let p = particle(100.0, -50.0, 860.0);
        let projected = field.project(&p, Point::new(0.0, 0.0));
        // focal 960 over depth 860 + 100
        assert!((projected.at.x - (960.0 + 100.0)).abs() < 1e-9);
        assert!((projected.at.y - (540.0 - 50.0)).abs() < 1e-9);
        let nearness = 1.0 - 860.0 / 1920.0;
        assert!((projected.radius - 1.5 * nearness).abs() < 1e-12);
        assert!((projected.alpha - nearness).abs() < 1e-12);
    }

    #[test]
    fn nearer_particles_are_bigger_and_brighter() {
        let field = ParticleField::from_particles(WIDE, profile(), Vec::new(), 0);
        let near = field.project(&particle(0.0, 0.0, 100.0), Point::new(0.0, 0.0));
        let far = field.project(&particle(0.0, 0.0, 1500.0), Point::new(0.0, 0.0));
        assert!(near.radius > far.radius);
        assert!(near.alpha > far.alpha);
    }

    #[test]
    fn parallax_is_zero_with_pointer_at_centre() {
        let mut field = ParticleField::from_particles(WIDE, profile(), Vec::new(), 0);
        field.set_pointer(Point::new(960.0, 540.0));
        assert_eq!(field.parallax_target(), Point::new(0.0, 0.0));
        field.set_pointer(Point::new(1960.0, 540.0));
        assert_eq!(field.parallax_target(), Point::new(100.0, 0.0));
    }

    #[test]
    fn parallax_shifts_all_particles_by_the_same_target() {
        let field = ParticleField::from_particles(WIDE, profile(), Vec::new(), 0);
        let p = particle(40.0, 40.0, 1820.0);
        let still = field.project(&p, Point::new(0.0, 0.0));
        let moved = field.project(&p, Point::new(10.0, -10.0));
        // perspective is 960 / 1920 at this depth
        assert!((moved.at.x - still.at.x - 5.0).abs() < 1e-9);
        assert!((moved.at.y - still.at.y + 5.0).abs() < 1e-9);
    }

    #[test]
    fn link_opacity_falls_to_zero_at_threshold() {
        let mut last = f64::INFINITY;
        for step in 0..120 {
            let opacity = link_opacity(step as f64, 120.0, 0.2).expect("inside threshold");
            assert!(opacity < last);
            last = opacity;
        }
        assert!(last > 0.0);
        assert_eq!(link_opacity(120.0, 120.0, 0.2), None);
        assert_eq!(link_opacity(500.0, 120.0, 0.2), None);
        assert_eq!(link_opacity(0.0, 120.0, 0.2), Some(0.2));
    }

    #[test]
    fn links_need_proximity_and_similar_depth() {
        let field = ParticleField::from_particles(WIDE, profile(), Vec::new(), 0);
        let at = |x: f64, y: f64, depth: f64| Projected {
            at: Point::new(x, y),
            depth,
            radius: 1.0,
            alpha: 1.0,
        };
        let projected = [
            at(0.0, 0.0, 500.0),
            at(60.0, 0.0, 600.0),  // close, depth gap 100: linked
            at(30.0, 0.0, 601.0),  // close to 0 but depth gap 101
            at(500.0, 0.0, 500.0), // same depth, too far
        ];
        let links = field.links(&projected);
        let pairs: Vec<(usize, usize)> = links.iter().map(|l| (l.a, l.b)).collect();
        assert!(pairs.contains(&(0, 1)));
        assert!(!pairs.contains(&(0, 2)));
        assert!(pairs.contains(&(1, 2)));
        assert!(!pairs.iter().any(|&(a, b)| a == 3 || b == 3));
        // each unordered pair at most once
        assert_eq!(pairs.len(), 2);
        let first = links.iter().find(|l| (l.a, l.b) == (0, 1)).map(|l| l.opacity);
        assert_eq!(first, Some(0.2 * (1.0 - 60.0 / 120.0)));
    }

    #[test]
    fn frame_paints_background_dots_and_links() {
        let particles = vec![particle(0.0, 0.0, 502.0), particle(10.0, 0.0, 502.0)];
        let mut field = ParticleField::from_particles(WIDE, profile(), particles, 0);
        field.set_pointer(WIDE.center());
        let mut painter = Recorder::new();
        field.frame(WIDE, &mut painter);

        let strokes = painter.take();
        assert_eq!(strokes[0], Stroke::Fill(BACKGROUND));
        let dots = strokes
            .iter()
            .filter(|s| matches!(s, Stroke::Dot { .. }))
            .count();
        assert_eq!(dots, 2);
        let lines = strokes
            .iter()
            .filter(|s| matches!(s, Stroke::Line { .. }))
            .count();
        assert_eq!(lines, 1);
    }

    #[test]
    fn empty_surface_draws_nothing() {
        let mut field = ParticleField::new(Viewport::new(0.0, 0.0), 9);
        let mut painter = Recorder::new();
        field.frame(Viewport::new(0.0, 0.0), &mut painter);
        assert!(painter.strokes.is_empty());
    }

    #[test]
    fn resize_keeps_positions_and_clamps_depth() {
        let particles = vec![particle(12.0, -4.0, 1800.0), particle(-3.0, 8.0, 200.0)];
        let mut field = ParticleField::from_particles(WIDE, profile(), particles, 0);
        field.resize(Viewport::new(1024.0, 768.0));
        let ps = field.particles();
        assert_eq!((ps[0].x, ps[0].y, ps[0].depth), (12.0, -4.0, 1024.0));
        assert_eq!((ps[1].x, ps[1].y, ps[1].depth), (-3.0, 8.0, 200.0));
    }
}
