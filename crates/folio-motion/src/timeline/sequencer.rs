//! Scroll timeline sequencer

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};

use super::{Playback, Property, TimelineBinding};

/// Document position and height of a trigger element, in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerGeometry {
    pub top: f64,
    pub height: f64,
}

/// One evaluated property value
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineValue {
    pub binding: String,
    pub target: String,
    pub property: Property,
    pub value: f32,
}

/// Pin state of a pinned binding
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PinState {
    pub binding: String,
    /// Translation that keeps the trigger in place
    pub offset: f64,
    /// Whether the scroll position is inside the pinned range
    pub active: bool,
}

struct Entry {
    binding: TimelineBinding,
    start: f64,
    end: f64,
    /// Scroll-mapped progress
    raw: f64,
    /// Progress actually rendered
    progress: f64,
    /// Toggle direction: 1 forward, -1 reverse, 0 idle
    toggle_direction: f64,
    /// Whether the last update was at or past the start
    past_start: Option<bool>,
}

impl Entry {
    fn resolve(&mut self, geometry: TriggerGeometry, viewport_height: f64) {
        let binding = &self.binding;
        self.start = binding
            .start
            .resolve(geometry.top, geometry.height, viewport_height);
        self.end = binding
            .end
            .resolve(self.start, geometry.top, geometry.height, viewport_height);
    }

    fn scroll_progress(&self, position: f64) -> f64 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if position >= self.start { 1.0 } else { 0.0 };
        }
        ((position - self.start) / span).clamp(0.0, 1.0)
    }

    fn update(&mut self, position: f64, dt_ms: Option<f64>) {
        self.raw = self.scroll_progress(position);
        match self.binding.playback {
            Playback::Scrub { smoothing_s } => match dt_ms {
                Some(dt) if smoothing_s > 0.0 => {
                    let blend = 1.0 - (-(dt / 1000.0) / smoothing_s).exp();
                    self.progress += (self.raw - self.progress) * blend;
                }
                _ => self.progress = self.raw,
            },
            Playback::Toggle { duration_ms, .. } => {
                let past = position >= self.start;
                match self.past_start {
                    // Entering forward (or loading already past it) plays
                    None | Some(false) if past => self.toggle_direction = 1.0,
                    // Leaving back above the start reverses
                    Some(true) if !past => self.toggle_direction = -1.0,
                    _ => {}
                }
                self.past_start = Some(past);

                if let Some(dt) = dt_ms {
                    let step = if duration_ms > 0.0 { dt / duration_ms } else { 1.0 };
                    self.progress =
                        (self.progress + step * self.toggle_direction).clamp(0.0, 1.0);
                }
            }
        }
    }

    /// Timeline time for the rendered progress
    fn timeline_time(&self) -> f32 {
        let eased = match self.binding.playback {
            Playback::Toggle { ease, .. } => ease.apply(self.progress as f32),
            Playback::Scrub { .. } => self.progress as f32,
        };
        eased * self.binding.duration()
    }
}

/// Every registered binding plus the trigger geometry they resolve against
pub struct ScrollTimeline {
    triggers: BTreeMap<String, TriggerGeometry>,
    viewport_height: f64,
    entries: Vec<Entry>,
    position: f64,
    last_update_ms: Option<f64>,
}

impl ScrollTimeline {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            triggers: BTreeMap::new(),
            viewport_height,
            entries: Vec::new(),
            position: 0.0,
            last_update_ms: None,
        }
    }

    // === Geometry ===

    /// Record where a trigger element sits; its bindings are re-resolved
    pub fn set_trigger_geometry(&mut self, name: &str, geometry: TriggerGeometry) {
        self.triggers.insert(name.to_string(), geometry);
        let viewport_height = self.viewport_height;
        for entry in self.entries.iter_mut().filter(|e| e.binding.trigger == name) {
            entry.resolve(geometry, viewport_height);
        }
    }

    pub fn has_trigger(&self, name: &str) -> bool {
        self.triggers.contains_key(name)
    }

    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
        self.refresh();
    }

    /// Recompute every binding's scroll range
    pub fn refresh(&mut self) {
        let viewport_height = self.viewport_height;
        for entry in self.entries.iter_mut() {
            if let Some(geometry) = self.triggers.get(&entry.binding.trigger) {
                entry.resolve(*geometry, viewport_height);
            }
        }
    }

    // === Bindings ===

    /// Register a binding; its trigger must already have geometry
    pub fn add(&mut self, binding: TimelineBinding) -> Result<()> {
        let geometry = *self
            .triggers
            .get(&binding.trigger)
            .ok_or_else(|| MotionError::UnknownTrigger(binding.trigger.clone()))?;
        if self.entries.iter().any(|e| e.binding.name == binding.name) {
            return Err(MotionError::InvalidConfig(format!(
                "duplicate timeline binding: {}",
                binding.name
            )));
        }

        let mut entry = Entry {
            binding,
            start: 0.0,
            end: 0.0,
            raw: 0.0,
            progress: 0.0,
            toggle_direction: 0.0,
            past_start: None,
        };
        entry.resolve(geometry, self.viewport_height);
        entry.update(self.position, None);
        self.entries.push(entry);
        Ok(())
    }

    /// Register several bindings; on error none of them stay registered
    pub fn add_all(&mut self, bindings: Vec<TimelineBinding>) -> Result<()> {
        let before = self.entries.len();
        for binding in bindings {
            if let Err(e) = self.add(binding) {
                self.entries.truncate(before);
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.binding.name != name);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.binding.name.as_str()).collect()
    }

    // === Frame ===

    /// Evaluate every binding at a scroll position
    pub fn update(&mut self, position: f64, now_ms: f64) {
        let dt_ms = self
            .last_update_ms
            .map(|last| (now_ms - last).max(0.0));
        self.last_update_ms = Some(now_ms);
        self.position = position;
        for entry in self.entries.iter_mut() {
            entry.update(position, dt_ms);
        }
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.binding.name == name)
    }

    /// Resolved `(start, end)` scroll positions
    pub fn bounds(&self, name: &str) -> Option<(f64, f64)> {
        self.entry(name).map(|e| (e.start, e.end))
    }

    /// Rendered progress in `[0, 1]`
    pub fn progress(&self, name: &str) -> Option<f64> {
        self.entry(name).map(|e| e.progress)
    }

    /// Value of one property, if the binding animates it
    pub fn value(&self, name: &str, target: &str, property: Property) -> Option<f32> {
        let entry = self.entry(name)?;
        entry
            .binding
            .evaluate(entry.timeline_time())
            .into_iter()
            .find(|(t, p, _)| *t == target && *p == property)
            .map(|(_, _, value)| value)
    }

    /// Every property value of every binding
    pub fn values(&self) -> Vec<TimelineValue> {
        let mut out = Vec::new();
        for entry in &self.entries {
            for (target, property, value) in entry.binding.evaluate(entry.timeline_time()) {
                out.push(TimelineValue {
                    binding: entry.binding.name.clone(),
                    target: target.to_string(),
                    property,
                    value,
                });
            }
        }
        out
    }

    /// Offset keeping a pinned trigger in place
    pub fn pin_offset(&self, name: &str) -> Option<f64> {
        let entry = self.entry(name).filter(|e| e.binding.pin)?;
        let span = (entry.end - entry.start).max(0.0);
        Some((self.position - entry.start).clamp(0.0, span))
    }

    pub fn pins(&self) -> Vec<PinState> {
        self.entries
            .iter()
            .filter(|e| e.binding.pin)
            .map(|e| PinState {
                binding: e.binding.name.clone(),
                offset: (self.position - e.start).clamp(0.0, (e.end - e.start).max(0.0)),
                active: self.position >= e.start && self.position <= e.end,
            })
            .collect()
    }
}
