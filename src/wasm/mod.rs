use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlCanvasElement, HtmlElement, MouseEvent};

use crate::category::CategoryView;
use crate::content::ContentStore;
use crate::orbit::Orbit;
use crate::page::Page;
use crate::particles::ParticleField;
use crate::surface::Point;
use crate::{SiteError, SiteResult};

mod dom;
mod effects;
mod render;

use dom::PageView;
use effects::{ScrambleText, TiltBinding};
use render::{Fit, FrameLoop};

/// Everything mounted on the page. Dropping it tears the page down.
struct Site {
    starfield: Option<FrameLoop<ParticleField>>,
    orbit: Option<FrameLoop<Orbit>>,
    scrambles: Vec<ScrambleText>,
    cards: Vec<TiltBinding>,
    page: Option<PageView>,
}

thread_local! {
    static SITE: RefCell<Option<Site>> = RefCell::new(None);
}

fn seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Effects that fail to mount are logged and left out.
fn degrade<T>(what: &str, result: SiteResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{what} disabled: {err}");
            None
        }
    }
}

fn canvas(document: &Document, id: &str) -> SiteResult<HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SiteError::SurfaceUnavailable(id.to_string()))?
        .dyn_into()
        .map_err(|_| SiteError::SurfaceUnavailable(id.to_string()))
}

fn mount_starfield(document: &Document) -> SiteResult<FrameLoop<ParticleField>> {
    let mut field = FrameLoop::start(canvas(document, "starfield")?, Fit::Window, |viewport| {
        ParticleField::new(viewport, seed())
    })?;
    let driver = field.driver();
    let win = web_sys::window().ok_or_else(|| SiteError::Js("no window".into()))?;
    field.listen(&win, "mousemove", move |event: Event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            let pointer = Point::new(event.client_x() as f64, event.client_y() as f64);
            driver.borrow_mut().animation_mut().set_pointer(pointer);
        }
    })?;
    Ok(field)
}

fn mount_orbit(document: &Document, active: CategoryView) -> SiteResult<FrameLoop<Orbit>> {
    FrameLoop::start(canvas(document, "orbit")?, Fit::Parent, move |viewport| {
        Orbit::new(viewport, active)
    })
}

fn elements(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    // Tear down a previous mount first so its text and markup are restored
    // before the new bindings read them.
    unmount();

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let page = Page::new(ContentStore::embedded()?);
    let active = page.category_view();
    let page = Rc::new(RefCell::new(page));

    // Content goes in first so its cards and headings pick up the effects.
    let page_view = degrade("page content", PageView::mount(&document, page));
    let site = Site {
        starfield: degrade("starfield", mount_starfield(&document)),
        orbit: degrade("orbit", mount_orbit(&document, active)),
        scrambles: elements(&document, "[data-scramble]")
            .into_iter()
            .filter_map(|e| degrade("scramble text", ScrambleText::attach(e, seed())))
            .collect(),
        cards: elements(&document, ".holo-card")
            .into_iter()
            .filter_map(|e| degrade("card tilt", TiltBinding::attach(e)))
            .collect(),
        page: page_view,
    };
    log::info!(
        "site mounted: {} scramble texts, {} tilt cards",
        site.scrambles.len(),
        site.cards.len()
    );

    SITE.with(|slot| *slot.borrow_mut() = Some(site));
    Ok(())
}

/// Stop every animation, timer and listener.
#[wasm_bindgen]
pub fn unmount() {
    let site = SITE.with(|slot| slot.borrow_mut().take());
    if site.is_some() {
        drop(site);
        log::info!("site unmounted");
    }
}
