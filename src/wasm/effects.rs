//! DOM bindings for the hover effects: scramble text and card tilt.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen::JsCast;
use web_sys::{window, Event, HtmlElement, MouseEvent};

use super::render::Listener;
use crate::config::SCRAMBLE_TICK_MS;
use crate::scramble::{Scramble, Tick};
use crate::surface::Point;
use crate::tilt::{Bounds, Tilt, TiltCard};
use crate::SiteResult;

/// Scramble effect bound to one element's text.
pub struct ScrambleText {
    element: HtmlElement,
    scramble: Rc<RefCell<Scramble>>,
    listeners: Vec<Listener>,
    timer: Rc<RefCell<Option<Interval>>>,
}

impl ScrambleText {
    pub fn attach(element: HtmlElement, seed: u64) -> SiteResult<Self> {
        let text = element.text_content().unwrap_or_default();
        let scramble = Rc::new(RefCell::new(Scramble::new(text, seed)));
        let timer: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));

        let enter = {
            let (scramble, timer, element) = (scramble.clone(), timer.clone(), element.clone());
            move |_: Event| {
                // at most one interval per element
                let previous = timer.borrow_mut().take();
                drop(previous);
                scramble.borrow_mut().hover_enter();

                let (scramble, element) = (scramble.clone(), element.clone());
                let slot = Rc::downgrade(&timer);
                let interval = Interval::new(SCRAMBLE_TICK_MS, move || {
                    let outcome = scramble.borrow_mut().tick();
                    element.set_text_content(Some(scramble.borrow().display()));
                    if outcome != Tick::Running {
                        let finished = slot.upgrade().and_then(|t| t.borrow_mut().take());
                        drop(finished);
                    }
                });
                *timer.borrow_mut() = Some(interval);
            }
        };

        let leave = {
            let (scramble, timer, element) = (scramble.clone(), timer.clone(), element.clone());
            move |_: Event| {
                let pending = timer.borrow_mut().take();
                drop(pending);
                let mut scramble = scramble.borrow_mut();
                scramble.hover_leave();
                element.set_text_content(Some(scramble.display()));
            }
        };

        let listeners = vec![
            Listener::new(&element, "mouseenter", enter)?,
            Listener::new(&element, "mouseleave", leave)?,
        ];
        Ok(Self {
            element,
            scramble,
            listeners,
            timer,
        })
    }

    /// Whether a reveal timer is pending.
    pub fn is_running(&self) -> bool {
        self.timer.borrow().is_some()
    }
}

impl Drop for ScrambleText {
    fn drop(&mut self) {
        self.listeners.clear();
        let pending = self.timer.borrow_mut().take();
        drop(pending);
        // leave the real text behind so a later mount reads it back
        let mut scramble = self.scramble.borrow_mut();
        scramble.hover_leave();
        self.element.set_text_content(Some(scramble.display()));
    }
}

fn set_transform(element: &HtmlElement, tilt: Tilt) {
    if let Err(err) = element
        .style()
        .set_property("transform", &tilt.css_transform())
    {
        log::debug!("card transform not applied: {err:?}");
    }
}

/// Tilt bound to one card element.
pub struct TiltBinding {
    element: HtmlElement,
    listeners: Vec<Listener>,
}

impl TiltBinding {
    pub fn attach(element: HtmlElement) -> SiteResult<Self> {
        let card = Rc::new(RefCell::new(TiltCard::new()));

        let moved = {
            let (card, element) = (card.clone(), element.clone());
            move |event: Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Some(window_width) = window()
                    .and_then(|w| w.inner_width().ok())
                    .and_then(|w| w.as_f64())
                else {
                    return;
                };
                let rect = element.get_bounding_client_rect();
                let bounds = Bounds {
                    left: rect.left(),
                    top: rect.top(),
                    width: rect.width(),
                    height: rect.height(),
                };
                let client = Point::new(event.client_x() as f64, event.client_y() as f64);
                if let Some(tilt) = card.borrow_mut().pointer_moved(window_width, bounds, client) {
                    set_transform(&element, tilt);
                }
            }
        };

        let left = {
            let element = element.clone();
            move |_: Event| {
                let tilt = card.borrow_mut().pointer_left();
                set_transform(&element, tilt);
            }
        };

        let listeners = vec![
            Listener::new(&element, "mousemove", moved)?,
            Listener::new(&element, "mouseleave", left)?,
        ];
        Ok(Self { element, listeners })
    }
}

impl Drop for TiltBinding {
    fn drop(&mut self) {
        self.listeners.clear();
        set_transform(&self.element, Tilt::NEUTRAL);
    }
}
