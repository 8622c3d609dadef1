//! Timeline bindings and property tracks

use serde::{Deserialize, Serialize};

use crate::transition::Ease;

use super::{EndPosition, TriggerPosition};

/// Animatable property of a target element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    Scale,
    RotateX,
    RotateY,
    /// Inset of a clip rectangle, in percent
    ClipInset,
    /// Vertical translation in pixels
    Y,
    /// Vertical translation in percent of the element height
    YPercent,
}

/// One property interpolation placed on the binding's timeline
///
/// `at` and `duration` are in timeline units; a scrubbed binding maps its
/// whole scroll range onto `[0, duration()]` of the binding.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Track {
    /// Element name the value applies to
    pub target: String,
    pub property: Property,
    pub from: f32,
    pub to: f32,
    #[serde(default)]
    pub at: f32,
    pub duration: f32,
    #[serde(default)]
    pub ease: Ease,
}

impl Track {
    pub fn new(target: &str, property: Property, from: f32, to: f32) -> Self {
        Self {
            target: target.to_string(),
            property,
            from,
            to,
            at: 0.0,
            duration: 1.0,
            ease: Ease::Linear,
        }
    }

    /// Place the track on the timeline
    pub fn span(mut self, at: f32, duration: f32) -> Self {
        self.at = at;
        self.duration = duration;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn end(&self) -> f32 {
        self.at + self.duration.max(0.0)
    }

    /// Value at timeline time `t`
    pub fn value_at(&self, t: f32) -> f32 {
        let progress = if self.duration <= 0.0 {
            if t >= self.at {
                1.0
            } else {
                0.0
            }
        } else {
            ((t - self.at) / self.duration).clamp(0.0, 1.0)
        };
        self.from + (self.to - self.from) * self.ease.apply(progress)
    }
}

/// How scroll drives a binding
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Playback {
    /// Progress follows the scroll position, smoothed over `smoothing_s`
    /// seconds (0 = locked to scroll)
    Scrub { smoothing_s: f64 },
    /// Play forward on entering past the start, reverse on leaving back
    /// above it
    Toggle { duration_ms: f64, ease: Ease },
}

impl Default for Playback {
    fn default() -> Self {
        Playback::Scrub { smoothing_s: 0.0 }
    }
}

/// A trigger element's scroll range mapped onto property tracks
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TimelineBinding {
    /// Unique name of the binding
    pub name: String,
    /// Element whose geometry anchors the range
    pub trigger: String,
    pub start: TriggerPosition,
    pub end: EndPosition,
    #[serde(default)]
    pub playback: Playback,
    /// Hold the trigger in place while its range is scrolled through
    #[serde(default)]
    pub pin: bool,
    pub tracks: Vec<Track>,
}

impl TimelineBinding {
    /// Length of the timeline in track units
    pub fn duration(&self) -> f32 {
        self.tracks.iter().map(Track::end).fold(0.0, f32::max)
    }

    /// Evaluate every (target, property) pair at timeline time `t`
    ///
    /// Tracks on the same pair hand over in timeline order: the latest
    /// track that has started wins, and before any has started the first
    /// track's start value holds.
    pub fn evaluate(&self, t: f32) -> Vec<(&str, Property, f32)> {
        let mut values: Vec<(&str, Property, f32)> = Vec::new();
        let mut started: Vec<Option<f32>> = Vec::new();

        for track in &self.tracks {
            let slot = values
                .iter()
                .position(|(target, property, _)| *target == track.target && *property == track.property);
            let index = match slot {
                Some(index) => index,
                None => {
                    values.push((track.target.as_str(), track.property, track.from));
                    started.push(None);
                    values.len() - 1
                }
            };

            let latest = started[index].map_or(true, |at| track.at >= at);
            if t >= track.at && latest {
                values[index].2 = track.value_at(t);
                started[index] = Some(track.at);
            }
        }

        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(tracks: Vec<Track>) -> TimelineBinding {
        TimelineBinding {
            name: "test".into(),
            trigger: "section".into(),
            start: TriggerPosition::parse("top top").unwrap(),
            end: EndPosition::parse("+=100%").unwrap(),
            playback: Playback::default(),
            pin: false,
            tracks,
        }
    }

    #[test]
    fn test_track_value() {
        let track = Track::new("banner", Property::Opacity, 0.0, 1.0).span(1.0, 2.0);
        assert!((track.value_at(0.0) - 0.0).abs() < 0.001);
        assert!((track.value_at(2.0) - 0.5).abs() < 0.001);
        assert!((track.value_at(5.0) - 1.0).abs() < 0.001);
        assert!((track.end() - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_duration() {
        let b = binding(vec![
            Track::new("a", Property::Opacity, 0.0, 1.0).span(0.0, 1.5),
            Track::new("b", Property::Opacity, 1.0, 0.0).span(1.5, 0.5),
        ]);
        assert!((b.duration() - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_sequential_tracks_hand_over() {
        let b = binding(vec![
            Track::new("line", Property::Y, 120.0, 0.0).span(0.7, 0.8),
            Track::new("line", Property::Y, 0.0, -120.0).span(2.5, 0.8),
        ]);

        let at = |t: f32| b.evaluate(t)[0].2;
        assert!((at(0.0) - 120.0).abs() < 0.001);
        assert!((at(1.1) - 60.0).abs() < 0.001);
        assert!((at(2.0) - 0.0).abs() < 0.001);
        assert!((at(2.9) + 60.0).abs() < 0.001);
        assert!((at(4.0) + 120.0).abs() < 0.001);
        assert_eq!(b.evaluate(0.0).len(), 1);
    }

    #[test]
    fn test_independent_pairs() {
        let b = binding(vec![
            Track::new("grid", Property::Opacity, 0.0, 1.0),
            Track::new("grid", Property::Scale, 0.8, 1.0),
        ]);
        let values = b.evaluate(0.5);
        assert_eq!(values.len(), 2);
        assert!((values[0].2 - 0.5).abs() < 0.001);
        assert!((values[1].2 - 0.9).abs() < 0.001);
    }

    #[test]
    fn test_deserialize_binding() {
        let json = r#"{
            "name": "fade",
            "trigger": "hero-section",
            "start": "top top",
            "end": "+=50%",
            "playback": {"mode": "scrub", "smoothing_s": 1.0},
            "tracks": [
                {"target": "hero-content", "property": "opacity", "from": 1.0, "to": 0.0,
                 "duration": 1.0, "ease": "power2.in"}
            ]
        }"#;
        let b: TimelineBinding = serde_json::from_str(json).unwrap();
        assert_eq!(b.end, EndPosition::AfterViewportPercent(50.0));
        assert_eq!(b.playback, Playback::Scrub { smoothing_s: 1.0 });
        assert_eq!(b.tracks[0].ease, Ease::Power2In);
        assert!(!b.pin);
    }
}
