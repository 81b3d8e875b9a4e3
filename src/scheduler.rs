//! Per-frame driver for canvas animations.
//!
//! The browser side calls [`FrameDriver::tick`] from `requestAnimationFrame`;
//! everything that decides *whether* a frame runs lives here so it can be
//! exercised without a browser.

use std::cell::Cell;
use std::rc::Rc;

use crate::surface::{Painter, Viewport};

/// Shared cancellation flag. Cloning hands out another view of the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// A canvas effect advanced once per display refresh.
pub trait Animation {
    /// The surface was re-measured. Accumulated state must survive.
    fn resize(&mut self, viewport: Viewport);

    /// Advance one step and paint it. Never called with an empty viewport.
    fn frame(&mut self, viewport: Viewport, painter: &mut dyn Painter);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    /// No measurable surface yet, or a zero-sized one.
    Skipped,
    Cancelled,
}

impl FrameOutcome {
    /// Whether another frame should be requested.
    pub fn keep_going(self) -> bool {
        !matches!(self, FrameOutcome::Cancelled)
    }
}

pub struct FrameDriver<A> {
    animation: A,
    viewport: Option<Viewport>,
    token: CancelToken,
    frames: u64,
}

impl<A: Animation> FrameDriver<A> {
    pub fn new(animation: A) -> Self {
        Self {
            animation,
            viewport: None,
            token: CancelToken::new(),
            frames: 0,
        }
    }

    /// Driver that starts with a measured surface.
    pub fn attached(animation: A, viewport: Viewport) -> Self {
        let mut driver = Self::new(animation);
        driver.resize(viewport);
        driver
    }

    pub fn tick(&mut self, painter: &mut dyn Painter) -> FrameOutcome {
        if self.token.is_cancelled() {
            return FrameOutcome::Cancelled;
        }
        match self.viewport {
            Some(viewport) if !viewport.is_empty() => {
                self.animation.frame(viewport, painter);
                self.frames += 1;
                FrameOutcome::Drawn
            }
            _ => FrameOutcome::Skipped,
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if self.token.is_cancelled() {
            return;
        }
        log::debug!("surface resized to {}x{}", viewport.width, viewport.height);
        self.viewport = Some(viewport);
        self.animation.resize(viewport);
    }

    /// Stop the driver. Later ticks report [`FrameOutcome::Cancelled`].
    pub fn detach(&mut self) {
        self.token.cancel();
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Number of frames actually drawn.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut A {
        &mut self.animation
    }
}
