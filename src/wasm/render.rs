use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, HtmlElement};

use crate::scheduler::{Animation, CancelToken, FrameDriver};
use crate::surface::{Painter, Point, Rgba, Viewport};
use crate::{SiteError, SiteResult};

/// An event listener that is removed again when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> SiteResult<Self> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Where a canvas takes its pixel size from.
#[derive(Debug, Clone, Copy)]
pub enum Fit {
    Window,
    /// The canvas' parent element, falling back to the window.
    Parent,
}

fn window_viewport() -> Option<Viewport> {
    let w = window()?;
    let width = w.inner_width().ok()?.as_f64()?;
    let height = w.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width, height))
}

fn measure(canvas: &HtmlCanvasElement, fit: Fit) -> Option<Viewport> {
    if let Fit::Parent = fit {
        let parent = canvas
            .parent_element()
            .and_then(|p| p.dyn_into::<HtmlElement>().ok());
        if let Some(parent) = parent {
            let (w, h) = (parent.offset_width(), parent.offset_height());
            if w > 0 && h > 0 {
                return Some(Viewport::new(w as f64, h as f64));
            }
        }
    }
    window_viewport()
}

fn apply_size(canvas: &HtmlCanvasElement, viewport: Viewport) {
    canvas.set_width(viewport.width as u32);
    canvas.set_height(viewport.height as u32);
}

/// [`Painter`] over a 2D canvas context.
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl Painter for CanvasPainter {
    fn clear(&mut self, viewport: Viewport) {
        self.ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    }

    fn fill(&mut self, viewport: Viewport, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
    }

    fn dot(&mut self, at: Point, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        if self.ctx.arc(at.x, at.y, radius, 0.0, TAU).is_ok() {
            self.ctx.set_fill_style_str(&color.to_string());
            self.ctx.fill();
        }
    }

    fn line(&mut self, from: Point, to: Point, width: f64, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.stroke();
    }

    fn label(&mut self, at: Point, text: &str, font_px: f64, color: Rgba) {
        self.ctx.set_font(&format!("{font_px}px 'JetBrains Mono'"));
        self.ctx.set_fill_style_str(&color.to_string());
        let _ = self.ctx.fill_text(text, at.x, at.y);
    }
}

/// A running canvas animation. Dropping it cancels the pending animation
/// frame and removes every listener before anything else is released.
pub struct FrameLoop<A> {
    driver: Rc<RefCell<FrameDriver<A>>>,
    token: CancelToken,
    raf_id: Rc<Cell<Option<i32>>>,
    frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    listeners: Vec<Listener>,
}

impl<A: Animation + 'static> FrameLoop<A> {
    /// Size `canvas`, build the animation for that size and start repainting.
    pub fn start(
        canvas: HtmlCanvasElement,
        fit: Fit,
        make: impl FnOnce(Viewport) -> A,
    ) -> SiteResult<Self> {
        let name = canvas.id();
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| SiteError::ContextUnavailable(name.clone()))?
            .dyn_into()
            .map_err(|_| SiteError::ContextUnavailable(name.clone()))?;
        let viewport = measure(&canvas, fit)
            .ok_or_else(|| SiteError::SurfaceUnavailable(name.clone()))?;
        apply_size(&canvas, viewport);

        let driver = FrameDriver::attached(make(viewport), viewport);
        let token = driver.token();
        let mut frame_loop = FrameLoop {
            driver: Rc::new(RefCell::new(driver)),
            token,
            raf_id: Rc::new(Cell::new(None)),
            frame: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        };

        // Resize: re-measure once, keep animation state.
        let win = window().ok_or_else(|| SiteError::Js("no window".into()))?;
        let resize_driver = frame_loop.driver.clone();
        let resize_canvas = canvas.clone();
        frame_loop.listen(&win, "resize", move |_| {
            if let Some(viewport) = measure(&resize_canvas, fit) {
                apply_size(&resize_canvas, viewport);
                resize_driver.borrow_mut().resize(viewport);
            }
        })?;

        // `frame` holds the animation-frame closure so that it can keep
        // calling `request_animation_frame` on itself.
        let next = frame_loop.frame.clone();
        let raf_id = frame_loop.raf_id.clone();
        let tick_driver = frame_loop.driver.clone();
        let mut painter = CanvasPainter { ctx };
        *frame_loop.frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            raf_id.set(None);
            if !tick_driver.borrow_mut().tick(&mut painter).keep_going() {
                return;
            }
            let (Some(win), Some(cb)) = (window(), next.borrow().as_ref().map(|c| c.as_ref().clone()))
            else {
                return;
            };
            match win.request_animation_frame(cb.unchecked_ref()) {
                Ok(id) => raf_id.set(Some(id)),
                Err(err) => log::error!("request_animation_frame failed: {err:?}"),
            }
        }) as Box<dyn FnMut()>));

        let first_cb = frame_loop
            .frame
            .borrow()
            .as_ref()
            .map(|c| c.as_ref().clone())
            .ok_or_else(|| SiteError::Js("frame callback missing".into()))?;
        let first = win.request_animation_frame(first_cb.unchecked_ref())?;
        frame_loop.raf_id.set(Some(first));
        log::info!("canvas #{name} mounted at {}x{}", viewport.width, viewport.height);
        Ok(frame_loop)
    }

    /// Attach a listener that lives as long as this loop.
    pub fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> SiteResult<()> {
        self.listeners.push(Listener::new(target, event, callback)?);
        Ok(())
    }

    pub fn driver(&self) -> Rc<RefCell<FrameDriver<A>>> {
        self.driver.clone()
    }
}

impl<A> Drop for FrameLoop<A> {
    fn drop(&mut self) {
        self.token.cancel();
        if let (Some(id), Some(win)) = (self.raf_id.take(), window()) {
            let _ = win.cancel_animation_frame(id);
        }
        self.listeners.clear();
        self.frame.borrow_mut().take();
    }
}
