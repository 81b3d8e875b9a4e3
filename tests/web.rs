#![cfg(target_arch = "wasm32")]

use holo_site::category::{ActiveCategory, Category};
use holo_site::orbit::Orbit;
use holo_site::scheduler::FrameDriver;
use holo_site::surface::{Recorder, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn window_is_measurable() {
    let window = web_sys::window().unwrap();
    let width = window.inner_width().unwrap().as_f64().unwrap();
    let height = window.inner_height().unwrap().as_f64().unwrap();
    assert!(width >= 0.0 && height >= 0.0);
}

#[wasm_bindgen_test]
fn canvas_gets_a_2d_context() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    let ctx = canvas.get_context("2d").unwrap();
    assert!(ctx.is_some());
}

#[wasm_bindgen_test]
fn orbit_runs_in_the_browser() {
    let viewport = Viewport::new(1280.0, 720.0);
    let active = ActiveCategory::from(Category::Ops);
    let mut driver = FrameDriver::attached(Orbit::new(viewport, active.into()), viewport);
    let mut painter = Recorder::new();
    driver.tick(&mut painter);
    // OPS, CLINICAL and REVENUE
    assert_eq!(painter.lines().count(), 3);
}

#[wasm_bindgen_test]
fn unmount_without_start_is_harmless() {
    holo_site::unmount();
}
