//! Smooth scrolling
//!
//! Raw wheel and touch input moves a target position; every frame the
//! animated position closes a fixed fraction of the remaining distance.
//! Each step produces a [`ScrollState`] handed to subscribers and returned
//! to the engine.

mod smooth;
mod state;

pub use smooth::{ScrollCallback, SmoothScroll, SubscriptionId};
pub use state::{ScrollDirection, ScrollState};
