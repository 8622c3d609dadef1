//! Scroll-triggered timelines
//!
//! A [`TimelineBinding`] ties a trigger element's scroll range to a set of
//! property tracks. [`ScrollTimeline`] resolves each range against the
//! trigger geometry reported by the host and evaluates every binding
//! independently from the shared scroll position.

mod binding;
mod position;
pub mod presets;
mod sequencer;

pub use binding::{Playback, Property, TimelineBinding, Track};
pub use position::{Anchor, EndPosition, TriggerPosition};
pub use sequencer::{PinState, ScrollTimeline, TimelineValue, TriggerGeometry};
