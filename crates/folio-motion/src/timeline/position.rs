//! Trigger position parsing
//!
//! Positions use the familiar two-word form: the first word picks a point on
//! the trigger element, the second a line in the viewport, e.g. `"top center"`
//! or `"15% top"`. Either word may carry a pixel offset (`"center+=100"`).
//! End positions may instead be relative to the start: `"+=50%"` (percent of
//! the viewport height) or `"+=300"` (pixels).

use serde::Deserialize;

use crate::error::{MotionError, Result};

/// A point along an element or the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    Top,
    Center,
    Bottom,
    /// Percentage of the extent from its top
    Percent(f64),
    /// Pixels from the top
    Pixels(f64),
}

impl Anchor {
    /// Distance from the top of an extent of the given height
    pub fn resolve(&self, extent: f64) -> f64 {
        match self {
            Anchor::Top => 0.0,
            Anchor::Center => extent * 0.5,
            Anchor::Bottom => extent,
            Anchor::Percent(p) => extent * p / 100.0,
            Anchor::Pixels(px) => *px,
        }
    }

    fn parse(word: &str) -> Option<Self> {
        match word {
            "top" => Some(Anchor::Top),
            "center" => Some(Anchor::Center),
            "bottom" => Some(Anchor::Bottom),
            _ => {
                if let Some(percent) = word.strip_suffix('%') {
                    percent.parse().ok().map(Anchor::Percent)
                } else {
                    word.strip_suffix("px")
                        .unwrap_or(word)
                        .parse()
                        .ok()
                        .map(Anchor::Pixels)
                }
            }
        }
    }
}

/// Split `"center+=100"` into the anchor word and a signed offset
fn split_offset(word: &str) -> Option<(&str, f64)> {
    for (op, sign) in [("+=", 1.0), ("-=", -1.0)] {
        if let Some(at) = word.find(op) {
            let amount: f64 = word[at + 2..].trim_end_matches("px").parse().ok()?;
            return Some((&word[..at], sign * amount));
        }
    }
    Some((word, 0.0))
}

fn parse_word(word: &str) -> Option<(Anchor, f64)> {
    let (anchor, offset) = split_offset(word)?;
    Some((Anchor::parse(anchor)?, offset))
}

fn invalid(text: &str) -> MotionError {
    MotionError::InvalidConfig(format!("invalid trigger position: {:?}", text))
}

/// Where an element point meets a viewport line
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct TriggerPosition {
    pub element: Anchor,
    pub element_offset: f64,
    pub viewport: Anchor,
    pub viewport_offset: f64,
}

impl TriggerPosition {
    pub fn parse(text: &str) -> Result<Self> {
        let mut words = text.split_whitespace();
        let (element, element_offset) = words.next().and_then(parse_word).ok_or_else(|| invalid(text))?;
        let (viewport, viewport_offset) = words.next().and_then(parse_word).ok_or_else(|| invalid(text))?;
        if words.next().is_some() {
            return Err(invalid(text));
        }
        Ok(Self {
            element,
            element_offset,
            viewport,
            viewport_offset,
        })
    }

    /// Scroll position at which this position is reached
    pub fn resolve(&self, element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
        let element_point = element_top + self.element.resolve(element_height) + self.element_offset;
        let viewport_line = self.viewport.resolve(viewport_height) + self.viewport_offset;
        element_point - viewport_line
    }
}

impl TryFrom<String> for TriggerPosition {
    type Error = MotionError;

    fn try_from(text: String) -> Result<Self> {
        Self::parse(&text)
    }
}

/// End of a binding's scroll range
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum EndPosition {
    Absolute(TriggerPosition),
    /// Pixels past the start
    AfterPixels(f64),
    /// Percent of the viewport height past the start
    AfterViewportPercent(f64),
}

impl EndPosition {
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let Some(relative) = trimmed.strip_prefix("+=") else {
            return TriggerPosition::parse(trimmed).map(EndPosition::Absolute);
        };
        if let Some(percent) = relative.strip_suffix('%') {
            percent
                .parse()
                .map(EndPosition::AfterViewportPercent)
                .map_err(|_| invalid(text))
        } else {
            relative
                .trim_end_matches("px")
                .parse()
                .map(EndPosition::AfterPixels)
                .map_err(|_| invalid(text))
        }
    }

    /// Scroll position of the end, given the resolved start
    pub fn resolve(
        &self,
        start: f64,
        element_top: f64,
        element_height: f64,
        viewport_height: f64,
    ) -> f64 {
        match self {
            EndPosition::Absolute(position) => {
                position.resolve(element_top, element_height, viewport_height)
            }
            EndPosition::AfterPixels(px) => start + px,
            EndPosition::AfterViewportPercent(percent) => start + viewport_height * percent / 100.0,
        }
    }
}

impl TryFrom<String> for EndPosition {
    type Error = MotionError;

    fn try_from(text: String) -> Result<Self> {
        Self::parse(&text)
    }
}
