//! Browser tests for the web HAL and view
//!
//! Run with `wasm-pack test --headless --chrome crates/folio-web`.

#![cfg(target_arch = "wasm32")]

use folio_hal::{FrameHal, ListenerKind};
use folio_web::{PortfolioView, WebHal};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_web_hal_clock_is_monotonic() {
    let hal = WebHal::new().unwrap();
    let first = hal.now_ms();
    let second = hal.now_ms();
    assert!(second >= first);
}

#[wasm_bindgen_test]
fn test_web_hal_viewport_is_positive() {
    let hal = WebHal::new().unwrap();
    let viewport = hal.viewport();
    assert!(viewport.width > 0.0);
    assert!(viewport.height > 0.0);
    assert!(viewport.device_pixel_ratio > 0.0);
}

#[wasm_bindgen_test]
fn test_web_hal_listeners_attach_and_detach() {
    let hal = WebHal::new().unwrap();
    let ids: Vec<_> = ListenerKind::ALL
        .iter()
        .map(|kind| hal.listen(*kind).unwrap())
        .collect();
    assert_eq!(hal.listener_count(), 4);

    for id in ids {
        hal.unlisten(id);
    }
    assert_eq!(hal.listener_count(), 0);
}

#[wasm_bindgen_test]
fn test_web_hal_cancelled_frame_is_forgotten() {
    let hal = WebHal::new().unwrap();
    let handle = hal.request_frame().unwrap();
    assert_eq!(hal.pending_frame_count(), 1);

    hal.cancel_frame(handle);
    hal.cancel_frame(handle);
    assert_eq!(hal.pending_frame_count(), 0);
}

#[wasm_bindgen_test]
fn test_web_hal_style_property() {
    let hal = WebHal::new().unwrap();
    hal.set_style_property("--scroll-progress", "25%");

    let root = hal.window().document().unwrap().document_element().unwrap();
    let root: web_sys::HtmlElement = wasm_bindgen::JsCast::dyn_into(root).unwrap();
    assert_eq!(
        root.style().get_property_value("--scroll-progress").unwrap(),
        "25%"
    );
}

#[wasm_bindgen_test]
fn test_view_rejects_bad_config() {
    assert!(PortfolioView::with_config("{not json").is_err());
    assert!(PortfolioView::with_config(r#"{"render": {"max_pixel_ratio": 0.5}}"#).is_err());
    assert!(PortfolioView::with_config("{}").is_ok());
}

#[wasm_bindgen_test]
fn test_view_unmounted_state() {
    let mut view = PortfolioView::new();
    assert!(!view.is_mounted());
    assert!(!view.is_degraded());
    assert_eq!(view.snapshot_json(), "{}");
    assert_eq!(view.tick_frame(16.0), "{}");
    assert_eq!(view.take_events_json(), "[]");
    assert!(view.add_section_timelines().is_err());

    // Harmless without an engine
    view.unmount();
    view.scroll_to(100.0, true);
}
