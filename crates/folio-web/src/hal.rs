//! WASM HAL implementation for the browser
//!
//! Frames come from `requestAnimationFrame`, input from listeners on the
//! window. Every callback turns its DOM event into a [`HostEvent`] and hands
//! it to the dispatcher installed by the view.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use folio_hal::{
    DeltaMode, FrameHal, FrameHandle, HalError, HostEvent, ListenerId, ListenerKind, ViewportInfo,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, TouchEvent, WheelEvent};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// Two touchmoves further apart than this belong to different drags
const TOUCH_GAP_MS: f64 = 100.0;

/// Receives every event the HAL produces
pub(crate) type Dispatch = Rc<dyn Fn(HostEvent)>;

struct FrameEntry {
    raf_id: i32,
    _closure: Closure<dyn FnMut(f64)>,
}

struct ListenerEntry {
    kind: ListenerKind,
    closure: Closure<dyn FnMut(Event)>,
}

struct WebHalState {
    window: web_sys::Window,
    next_id: Cell<u64>,
    /// Requested frames, kept alive until they fire or are cancelled
    frames: RefCell<HashMap<u64, FrameEntry>>,
    /// Frames that already fired; dropped when the next one fires
    retired: RefCell<Vec<FrameEntry>>,
    listeners: RefCell<HashMap<u64, ListenerEntry>>,
    dispatch: RefCell<Option<Dispatch>>,
}

impl WebHalState {
    fn dispatch(&self, event: HostEvent) {
        let dispatch = self.dispatch.borrow().clone();
        if let Some(dispatch) = dispatch {
            dispatch(event);
        }
    }

    fn viewport(&self) -> ViewportInfo {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        ViewportInfo {
            width: dimension(self.window.inner_width()),
            height: dimension(self.window.inner_height()),
            device_pixel_ratio: self.window.device_pixel_ratio() as f32,
        }
    }

    /// Turn a DOM event into a host event, or drop it
    fn translate(
        &self,
        kind: ListenerKind,
        event: &Event,
        last_touch: &Cell<Option<(f64, f64)>>,
    ) -> Option<HostEvent> {
        match kind {
            ListenerKind::Resize => {
                let viewport = self.viewport();
                Some(HostEvent::Resize {
                    width: viewport.width,
                    height: viewport.height,
                    device_pixel_ratio: viewport.device_pixel_ratio,
                })
            }
            ListenerKind::Wheel => {
                let wheel = event.dyn_ref::<WheelEvent>()?;
                // The engine owns scrolling
                event.prevent_default();
                Some(HostEvent::Wheel {
                    dx: wheel.delta_x(),
                    dy: wheel.delta_y(),
                    mode: DeltaMode::from_dom(wheel.delta_mode()),
                })
            }
            ListenerKind::Touch => {
                let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
                let y = touch.client_y() as f64;
                let now = event.time_stamp();
                match last_touch.replace(Some((y, now))) {
                    Some((previous_y, previous_ms)) if now - previous_ms < TOUCH_GAP_MS => {
                        event.prevent_default();
                        Some(HostEvent::Touch { dy: previous_y - y })
                    }
                    _ => None,
                }
            }
            ListenerKind::PointerMove => {
                let pointer = event.dyn_ref::<MouseEvent>()?;
                Some(HostEvent::PointerMove {
                    x: pointer.client_x() as f32,
                    y: pointer.client_y() as f32,
                })
            }
        }
    }
}

impl Drop for WebHalState {
    fn drop(&mut self) {
        for (_, entry) in self.frames.get_mut().drain() {
            let _ = self.window.cancel_animation_frame(entry.raf_id);
        }
        for (_, entry) in self.listeners.get_mut().drain() {
            let _ = self.window.remove_event_listener_with_callback(
                entry.kind.event_name(),
                entry.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Browser HAL; clones share the same frames and listeners
#[derive(Clone)]
pub struct WebHal {
    state: Rc<WebHalState>,
}

impl WebHal {
    /// Create a HAL bound to the current window
    pub fn new() -> Result<Self, HalError> {
        let window = web_sys::window().ok_or(HalError::NoWindow)?;
        Ok(Self {
            state: Rc::new(WebHalState {
                window,
                next_id: Cell::new(1),
                frames: RefCell::new(HashMap::new()),
                retired: RefCell::new(Vec::new()),
                listeners: RefCell::new(HashMap::new()),
                dispatch: RefCell::new(None),
            }),
        })
    }

    /// Install or clear the event dispatcher
    pub(crate) fn set_dispatch(&self, dispatch: Option<Dispatch>) {
        *self.state.dispatch.borrow_mut() = dispatch;
    }

    pub fn window(&self) -> &web_sys::Window {
        &self.state.window
    }

    /// Number of frames requested and not yet fired or cancelled
    pub fn pending_frame_count(&self) -> usize {
        self.state.frames.borrow().len()
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    fn next_id(&self) -> u64 {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        id
    }

    fn event_closure(&self, kind: ListenerKind) -> Closure<dyn FnMut(Event)> {
        let weak: Weak<WebHalState> = Rc::downgrade(&self.state);
        let last_touch = Cell::new(None);
        Closure::wrap(Box::new(move |event: Event| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            if let Some(host_event) = state.translate(kind, &event, &last_touch) {
                state.dispatch(host_event);
            }
        }) as Box<dyn FnMut(Event)>)
    }
}

impl FrameHal for WebHal {
    fn now_ms(&self) -> f64 {
        self.state
            .window
            .performance()
            .map(|performance| performance.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn request_frame(&self) -> Result<FrameHandle, HalError> {
        let id = self.next_id();
        let weak: Weak<WebHalState> = Rc::downgrade(&self.state);
        let closure = Closure::wrap(Box::new(move |timestamp: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            // Earlier frame closures are done running; this one is not
            state.retired.borrow_mut().clear();
            let entry = state.frames.borrow_mut().remove(&id);
            if let Some(entry) = entry {
                state.retired.borrow_mut().push(entry);
            }
            state.dispatch(HostEvent::Frame { now_ms: timestamp });
        }) as Box<dyn FnMut(f64)>);

        let raf_id = self
            .state
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(|_| HalError::FrameRequestFailed)?;
        self.state.frames.borrow_mut().insert(
            id,
            FrameEntry {
                raf_id,
                _closure: closure,
            },
        );
        Ok(FrameHandle::new(id))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let entry = self.state.frames.borrow_mut().remove(&handle.id());
        if let Some(entry) = entry {
            let _ = self.state.window.cancel_animation_frame(entry.raf_id);
        }
    }

    fn listen(&self, kind: ListenerKind) -> Result<ListenerId, HalError> {
        let closure = self.event_closure(kind);

        let options = web_sys::AddEventListenerOptions::new();
        // Wheel and touch call preventDefault
        options.set_passive(!matches!(kind, ListenerKind::Wheel | ListenerKind::Touch));

        self.state
            .window
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind.event_name(),
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| {
                log(&format!(
                    "[wasm-hal] addEventListener({}) failed: {:?}",
                    kind.event_name(),
                    e
                ));
                HalError::ListenerFailed
            })?;

        let id = self.next_id();
        self.state
            .listeners
            .borrow_mut()
            .insert(id, ListenerEntry { kind, closure });
        Ok(ListenerId::new(id))
    }

    fn unlisten(&self, id: ListenerId) {
        let entry = self.state.listeners.borrow_mut().remove(&id.id());
        if let Some(entry) = entry {
            let _ = self.state.window.remove_event_listener_with_callback(
                entry.kind.event_name(),
                entry.closure.as_ref().unchecked_ref(),
            );
        }
    }

    fn viewport(&self) -> ViewportInfo {
        self.state.viewport()
    }

    fn set_style_property(&self, name: &str, value: &str) {
        let root = self
            .state
            .window
            .document()
            .and_then(|document| document.document_element())
            .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(root) = root {
            let _ = root.style().set_property(name, value);
        }
    }

    fn apply_scroll(&self, position: f64) {
        self.state.window.scroll_to_with_x_and_y(0.0, position);
    }

    fn debug_write(&self, msg: &str) {
        log(msg);
    }
}
