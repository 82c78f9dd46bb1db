//! radix - a natal chart wheel renderer.
//!
//! The crate consumes already-computed astronomical state (planetary
//! longitudes, house cusps, the Ascendant and Midheaven) from an external
//! ephemeris provider and projects it onto a circular layout: zodiac band,
//! house divisions, body glyphs with collision staggering, aspect lines
//! and angle markers. Output is a typed scene graph plus an SVG
//! serialization of it.
//!
//! ```
//! use radix::{ChartEngine, ChartPayload};
//!
//! let payload = ChartPayload::from_json(r#"{
//!     "ascendant": {"position": 123.4},
//!     "midheaven": {"position": 33.2},
//!     "planets": [
//!         {"name": "Sun", "position": 294.7, "speed": 1.019},
//!         {"name": "Moon", "position": 25.1, "speed": 13.2}
//!     ]
//! }"#).unwrap();
//!
//! let mut engine = ChartEngine::default();
//! engine.render(payload);
//! engine.highlight(Some("Sun"));
//! let markup = engine.svg().unwrap();
//! assert!(markup.starts_with("<svg"));
//! ```
//!
//! Stateless hosts can call [`render_svg`] directly; interactive hosts
//! keep a [`ChartEngine`] and wire pointer events to its mutators.

pub mod chart;
pub mod config;
pub mod errors;
pub mod log;
pub mod payload;
pub mod types;
pub mod view;
pub mod zodiac;

mod engine;

pub use chart::{Scene, assemble, to_svg};
pub use config::{AspectConfig, ChartConfig, CollisionConfig, OrbTable, Theme};
pub use engine::ChartEngine;
pub use errors::{ConfigError, PayloadError};
pub use payload::{CelestialBody, ChartPayload};
pub use types::Longitude;
pub use view::{DisplayMode, OverlayOption, ViewState};

/// One-shot render: assemble and serialize in a single call, without
/// engine state. Returns `None` when the payload is not yet renderable.
pub fn render_svg(
    payload: &ChartPayload,
    config: &ChartConfig,
    view: &ViewState,
) -> Option<String> {
    chart::assemble(payload, config, view)
        .as_ref()
        .map(chart::to_svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::AnglePoint;

    #[test]
    fn one_shot_render() {
        let payload = ChartPayload {
            ascendant: Some(AnglePoint::new(0.0)),
            midheaven: Some(AnglePoint::new(270.0)),
            planets: vec![CelestialBody::new("Sun", 15.0)],
            ..ChartPayload::default()
        };
        let markup =
            render_svg(&payload, &ChartConfig::default(), &ViewState::default()).unwrap();
        assert!(markup.contains("body-Sun"));
    }

    #[test]
    fn one_shot_render_skips_incomplete_payloads() {
        let payload = ChartPayload::default();
        assert!(render_svg(&payload, &ChartConfig::default(), &ViewState::default()).is_none());
    }
}
