//! Browser glue for the Folio motion engine
//!
//! Runs on the page's main thread and connects the pure-Rust engine to the
//! DOM.
//!
//! - `hal`: [`WebHal`], the `FrameHal` over `requestAnimationFrame`, window
//!   listeners and `console.log`
//! - `view`: [`PortfolioView`], the wasm-bindgen controller JavaScript holds
//!
//! ## Lifecycle
//!
//! JavaScript creates a `PortfolioView`, awaits `mount(canvas)` and calls
//! `unmount()` when the page goes away. In between, frames and input reach
//! the engine through the HAL without a round trip through JavaScript;
//! `snapshot_json()` and `take_events_json()` expose what the DOM side paints.

mod hal;
mod view;

pub use hal::WebHal;
pub use view::PortfolioView;

pub use folio_motion as motion;
