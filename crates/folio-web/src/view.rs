//! PortfolioView - the controller JavaScript holds on to
//!
//! Owns the engine behind an `Rc<RefCell<..>>` so the HAL's frame and input
//! callbacks can reach it without going through JavaScript.

use std::cell::RefCell;
use std::rc::Rc;

use folio_hal::{FrameHal, HostEvent};
use folio_motion::background::TunnelRenderer;
use folio_motion::uniforms::device_resolution;
use folio_motion::{FrameDriver, GridEvent, MotionConfig, PageEngine, TriggerGeometry};
use wasm_bindgen::prelude::*;

use crate::hal::{Dispatch, WebHal};

type Engine = PageEngine<WebHal, TunnelRenderer>;
type EngineSlot = Rc<RefCell<Option<Engine>>>;

/// Page motion controller exported to JavaScript
#[wasm_bindgen]
pub struct PortfolioView {
    config: MotionConfig,
    engine: EngineSlot,
    /// Grid events not yet collected by `take_events_json`
    events: Rc<RefCell<Vec<GridEvent>>>,
    hal: Option<WebHal>,
}

#[wasm_bindgen]
impl PortfolioView {
    /// Create a view with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> PortfolioView {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        Self::from_config(MotionConfig::default())
    }

    /// Create a view from a JSON configuration
    pub fn with_config(json: &str) -> Result<PortfolioView, JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let config = MotionConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_config(config))
    }

    /// Attach to the page and start animating
    ///
    /// The canvas is sized to the capped device resolution. If the GPU
    /// renderer cannot be created the page keeps scrolling without the
    /// tunnel background.
    pub async fn mount(&mut self, canvas: web_sys::HtmlCanvasElement) -> Result<(), JsValue> {
        if self.is_mounted() {
            return Err(JsValue::from_str("already mounted"));
        }

        let hal = WebHal::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let resolution = device_resolution(hal.viewport(), self.config.render.max_pixel_ratio);
        canvas.set_width(resolution.width as u32);
        canvas.set_height(resolution.height as u32);

        let mut engine = PageEngine::new(hal.clone(), self.config.clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        engine.attach_renderer(TunnelRenderer::new(canvas).await);

        hal.set_dispatch(Some(self.dispatcher()));
        if let Err(e) = engine.mount() {
            hal.set_dispatch(None);
            return Err(JsValue::from_str(&e.to_string()));
        }

        *self.engine.borrow_mut() = Some(engine);
        self.hal = Some(hal);
        Ok(())
    }

    /// Detach from the page and release every resource
    pub fn unmount(&mut self) {
        if let Some(hal) = self.hal.take() {
            hal.set_dispatch(None);
        }
        let engine = self.engine.borrow_mut().take();
        if let Some(mut engine) = engine {
            engine.unmount();
        }
        self.events.borrow_mut().clear();
    }

    pub fn is_mounted(&self) -> bool {
        self.engine
            .borrow()
            .as_ref()
            .is_some_and(|engine| engine.is_mounted())
    }

    /// True when the tunnel background could not be created
    pub fn is_degraded(&self) -> bool {
        self.engine
            .borrow()
            .as_ref()
            .is_some_and(|engine| engine.is_degraded())
    }

    /// Run one frame with a host timestamp and return the snapshot
    ///
    /// Only the external frame driver takes frames from JavaScript; with the
    /// self-scheduled driver this just returns the snapshot.
    pub fn tick_frame(&mut self, now_ms: f64) -> String {
        if self.config.render.driver == FrameDriver::External {
            self.send(HostEvent::Frame { now_ms });
        }
        self.snapshot_json()
    }

    /// Current engine state as JSON, or `{}` when not mounted
    pub fn snapshot_json(&self) -> String {
        match self.engine.borrow().as_ref() {
            Some(engine) => {
                serde_json::to_string(&engine.snapshot()).unwrap_or_else(|_| "{}".to_string())
            }
            None => "{}".to_string(),
        }
    }

    /// Drain pending grid events as a JSON array
    pub fn take_events_json(&mut self) -> String {
        let events: Vec<GridEvent> = self.events.borrow_mut().drain(..).collect();
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Record where a trigger element sits in the document
    pub fn set_trigger_geometry(&mut self, name: &str, top: f64, height: f64) {
        if let Some(engine) = self.engine.borrow_mut().as_mut() {
            engine.set_trigger_geometry(name, TriggerGeometry { top, height });
        }
    }

    /// Install the portfolio's section timelines
    pub fn add_section_timelines(&mut self) -> Result<(), JsValue> {
        match self.engine.borrow_mut().as_mut() {
            Some(engine) => engine
                .add_section_timelines()
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Err(JsValue::from_str("not mounted")),
        }
    }

    pub fn scroll_to(&mut self, position: f64, immediate: bool) {
        if let Some(engine) = self.engine.borrow_mut().as_mut() {
            engine.scroll_to(position, immediate);
        }
    }

    /// Report a new scrollable content height
    pub fn set_content_height(&mut self, height: f64) {
        self.send(HostEvent::ContentResize { height });
    }
}

impl PortfolioView {
    fn from_config(config: MotionConfig) -> Self {
        Self {
            config,
            engine: Rc::new(RefCell::new(None)),
            events: Rc::new(RefCell::new(Vec::new())),
            hal: None,
        }
    }

    fn send(&self, event: HostEvent) {
        deliver(&self.engine, &self.events, event);
    }

    /// Callback the HAL uses to feed events to the engine
    fn dispatcher(&self) -> Dispatch {
        let engine = Rc::downgrade(&self.engine);
        let events = Rc::downgrade(&self.events);
        Rc::new(move |event: HostEvent| {
            if let (Some(engine), Some(events)) = (engine.upgrade(), events.upgrade()) {
                deliver(&engine, &events, event);
            }
        })
    }
}

impl Default for PortfolioView {
    fn default() -> Self {
        Self::new()
    }
}

fn deliver(engine: &EngineSlot, events: &RefCell<Vec<GridEvent>>, event: HostEvent) {
    // A callback can fire while the view itself is borrowed
    let Ok(mut slot) = engine.try_borrow_mut() else {
        return;
    };
    let Some(engine) = slot.as_mut() else {
        return;
    };
    let name = event.name();
    match engine.dispatch(event) {
        Ok(emitted) => events.borrow_mut().extend(emitted),
        Err(e) => engine
            .hal()
            .debug_write(&format!("[folio-web] {} dropped: {}", name, e)),
    }
}
