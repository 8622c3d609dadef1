//! Section timelines of the portfolio page
//!
//! Trigger names are the element names the host reports geometry for.

use crate::error::Result;
use crate::transition::Ease;

use super::{EndPosition, Playback, Property, TimelineBinding, Track, TriggerPosition};

pub const HERO_SECTION: &str = "hero-section";
pub const TEXT_REVEAL_SECTION: &str = "text-reveal-section";
pub const REVEAL_TEXT: &str = "reveal-text";
pub const PARALLAX_SECTION: &str = "parallax-section";

/// Red banner opening up while the hero content fades
pub fn hero() -> Result<TimelineBinding> {
    Ok(TimelineBinding {
        name: "hero".to_string(),
        trigger: HERO_SECTION.to_string(),
        start: TriggerPosition::parse("top top")?,
        end: EndPosition::parse("+=50%")?,
        playback: Playback::Scrub { smoothing_s: 1.0 },
        pin: false,
        tracks: vec![
            Track::new("red-banner", Property::ClipInset, 50.0, 0.0)
                .span(0.0, 1.5)
                .ease(Ease::Power3InOut),
            Track::new("red-banner", Property::Opacity, 0.0, 0.15)
                .span(0.0, 1.5)
                .ease(Ease::Power3InOut),
            Track::new("hero-content", Property::Opacity, 1.0, 0.0)
                .span(1.5, 0.5)
                .ease(Ease::Power2In),
        ],
    })
}

/// Tile board fading in, then its tiles turning over
pub fn grid() -> Result<TimelineBinding> {
    Ok(TimelineBinding {
        name: "grid".to_string(),
        trigger: HERO_SECTION.to_string(),
        start: TriggerPosition::parse("15% top")?,
        end: EndPosition::parse("+=100%")?,
        playback: Playback::Scrub { smoothing_s: 1.0 },
        pin: false,
        tracks: vec![
            Track::new("grid-container", Property::Opacity, 0.0, 1.0)
                .span(0.0, 1.0)
                .ease(Ease::Power2Out),
            Track::new("grid-container", Property::Scale, 0.8, 1.0)
                .span(0.0, 1.0)
                .ease(Ease::Power2Out),
            Track::new("grid-tile", Property::RotateY, 0.0, 180.0)
                .span(1.0, 1.5)
                .ease(Ease::Power2InOut),
        ],
    })
}

/// Pinned section: circle grows, lines rise in, then leave upwards
pub fn text_reveal() -> Result<TimelineBinding> {
    Ok(TimelineBinding {
        name: "text-reveal".to_string(),
        trigger: TEXT_REVEAL_SECTION.to_string(),
        start: TriggerPosition::parse("top center")?,
        end: EndPosition::parse("+=200%")?,
        playback: Playback::Scrub { smoothing_s: 1.2 },
        pin: true,
        tracks: vec![
            Track::new("reveal-circle", Property::Scale, 1.0, 35.0)
                .span(0.0, 1.5)
                .ease(Ease::Power2InOut),
            Track::new("text-line", Property::Y, 120.0, 0.0)
                .span(0.7, 0.8)
                .ease(Ease::Power2Out),
            Track::new("text-line", Property::Opacity, 0.0, 1.0)
                .span(0.7, 0.8)
                .ease(Ease::Power2Out),
            Track::new("text-line", Property::Y, 0.0, -120.0)
                .span(2.5, 0.8)
                .ease(Ease::Power2In),
            Track::new("text-line", Property::Opacity, 1.0, 0.0)
                .span(2.5, 0.8)
                .ease(Ease::Power2In),
        ],
    })
}

/// Characters flipping up into place once their line nears the centre
pub fn reveal_text() -> Result<TimelineBinding> {
    Ok(TimelineBinding {
        name: "reveal-text".to_string(),
        trigger: REVEAL_TEXT.to_string(),
        start: TriggerPosition::parse("top center+=100")?,
        end: EndPosition::parse("top center-=100")?,
        playback: Playback::Toggle {
            duration_ms: 1000.0,
            ease: Ease::Power4Out,
        },
        pin: false,
        tracks: vec![
            Track::new("reveal-text", Property::Opacity, 0.0, 1.0),
            Track::new("reveal-text", Property::Y, 100.0, 0.0),
            Track::new("reveal-text", Property::RotateX, -90.0, 0.0),
        ],
    })
}

/// Section drifting up faster than the page
pub fn parallax() -> Result<TimelineBinding> {
    Ok(TimelineBinding {
        name: "parallax".to_string(),
        trigger: PARALLAX_SECTION.to_string(),
        start: TriggerPosition::parse("top bottom")?,
        end: EndPosition::parse("bottom top")?,
        playback: Playback::Scrub { smoothing_s: 0.0 },
        pin: false,
        tracks: vec![Track::new("parallax-section", Property::YPercent, 0.0, -30.0)],
    })
}

/// Every section timeline of the page
pub fn section_timelines() -> Result<Vec<TimelineBinding>> {
    Ok(vec![hero()?, grid()?, text_reveal()?, reveal_text()?, parallax()?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{ScrollTimeline, TriggerGeometry};

    #[test]
    fn test_presets_parse() {
        let all = section_timelines().unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.iter().filter(|b| b.pin).count() == 1);
        assert!((hero().unwrap().duration() - 2.0).abs() < 0.001);
        assert!((grid().unwrap().duration() - 2.5).abs() < 0.001);
        assert!((text_reveal().unwrap().duration() - 3.3).abs() < 0.001);
    }

    #[test]
    fn test_hero_endpoints() {
        let mut timeline = ScrollTimeline::new(1000.0);
        timeline.set_trigger_geometry(HERO_SECTION, TriggerGeometry { top: 0.0, height: 1000.0 });
        let mut binding = hero().unwrap();
        binding.playback = Playback::default();
        timeline.add(binding).unwrap();
        assert_eq!(timeline.bounds("hero"), Some((0.0, 500.0)));

        timeline.update(0.0, 0.0);
        let inset = timeline.value("hero", "red-banner", Property::ClipInset).unwrap();
        assert!((inset - 50.0).abs() < 0.001);

        timeline.update(500.0, 16.0);
        let inset = timeline.value("hero", "red-banner", Property::ClipInset).unwrap();
        let opacity = timeline.value("hero", "red-banner", Property::Opacity).unwrap();
        let content = timeline.value("hero", "hero-content", Property::Opacity).unwrap();
        assert!(inset.abs() < 0.001);
        assert!((opacity - 0.15).abs() < 0.001);
        assert!(content.abs() < 0.001);
    }

    #[test]
    fn test_reveal_text_bounds() {
        let mut timeline = ScrollTimeline::new(800.0);
        timeline.set_trigger_geometry(REVEAL_TEXT, TriggerGeometry { top: 2000.0, height: 100.0 });
        timeline.add(reveal_text().unwrap()).unwrap();
        // top meets centre+100 at 2000 - 500, centre-100 at 2000 - 300
        assert_eq!(timeline.bounds("reveal-text"), Some((1500.0, 1700.0)));
    }
}
