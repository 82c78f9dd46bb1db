//! The interaction controller.
//!
//! `ChartEngine` owns the last-supplied payload snapshot, the view state
//! and the most recent scene. Every mutation re-runs the full assembly
//! pipeline synchronously against the stored snapshot; a pass is bounded
//! work over at most a handful of bodies, so re-renders are not coalesced.

use crate::chart::{self, Scene};
use crate::config::ChartConfig;
use crate::errors::ConfigError;
use crate::payload::ChartPayload;
use crate::view::{DisplayMode, OverlayOption, ViewState};

/// A stateful chart view: data snapshot + view state + last scene.
///
/// The host wires pointer and toggle events to [`highlight`],
/// [`set_mode`] and [`set_option`]; each returns the freshly assembled
/// scene (or `None` while the data is incomplete).
///
/// [`highlight`]: ChartEngine::highlight
/// [`set_mode`]: ChartEngine::set_mode
/// [`set_option`]: ChartEngine::set_option
#[derive(Debug, Clone)]
pub struct ChartEngine {
    config: ChartConfig,
    view: ViewState,
    data: Option<ChartPayload>,
    scene: Option<Scene>,
}

impl Default for ChartEngine {
    fn default() -> Self {
        ChartEngine {
            config: ChartConfig::default(),
            view: ViewState::default(),
            data: None,
            scene: None,
        }
    }
}

impl ChartEngine {
    /// Create an engine with a validated configuration.
    pub fn new(config: ChartConfig) -> Result<ChartEngine, ConfigError> {
        config.validate()?;
        Ok(ChartEngine {
            config,
            ..ChartEngine::default()
        })
    }

    /// Supply (or replace) the chart data and render it.
    pub fn render(&mut self, payload: ChartPayload) -> Option<&Scene> {
        self.data = Some(payload);
        self.rebuild()
    }

    /// Switch between symbolic and educational display. Changing mode
    /// clears any highlight, since highlight-dependent geometry may no
    /// longer apply.
    pub fn set_mode(&mut self, mode: DisplayMode) -> Option<&Scene> {
        if self.view.mode != mode {
            self.view.mode = mode;
            self.view.highlight = None;
        }
        self.rebuild()
    }

    /// Set or clear the highlighted body.
    pub fn highlight(&mut self, body: Option<&str>) -> Option<&Scene> {
        self.view.highlight = body.map(str::to_owned);
        self.rebuild()
    }

    /// Toggle a named overlay option. Unknown names are ignored (the host
    /// UI may be newer than this renderer).
    pub fn set_option(&mut self, name: &str, on: bool) -> Option<&Scene> {
        match name.parse::<OverlayOption>() {
            Ok(option) => self.view.set_option(option, on),
            Err(()) => {
                crate::log::warn!("ignoring unknown view option {:?}", name);
            }
        }
        self.rebuild()
    }

    /// The current view state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The most recently assembled scene, if any.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Serialize the current scene to SVG.
    pub fn svg(&self) -> Option<String> {
        self.scene.as_ref().map(chart::to_svg)
    }

    fn rebuild(&mut self) -> Option<&Scene> {
        self.scene = self
            .data
            .as_ref()
            .and_then(|payload| chart::assemble(payload, &self.config, &self.view));
        self.scene.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{AnglePoint, CelestialBody};

    fn payload() -> ChartPayload {
        ChartPayload {
            ascendant: Some(AnglePoint::new(15.0)),
            midheaven: Some(AnglePoint::new(280.0)),
            planets: vec![
                CelestialBody::new("Sun", 20.0),
                CelestialBody::new("Moon", 110.0),
            ],
            ..ChartPayload::default()
        }
    }

    #[test]
    fn render_requires_complete_data() {
        let mut engine = ChartEngine::default();
        assert!(engine.scene().is_none());
        assert!(engine.render(ChartPayload::default()).is_none());
        assert!(engine.render(payload()).is_some());
        assert!(engine.svg().is_some());
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut config = ChartConfig::default();
        config.collision.tracks = 9;
        assert!(ChartEngine::new(config).is_err());
    }

    #[test]
    fn mode_change_clears_highlight() {
        let mut engine = ChartEngine::default();
        engine.render(payload());
        engine.highlight(Some("Sun"));
        assert_eq!(engine.view().highlight.as_deref(), Some("Sun"));
        engine.set_mode(DisplayMode::Educational);
        assert!(engine.view().highlight.is_none());
        // Setting the same mode again is a no-op that keeps the highlight
        engine.highlight(Some("Moon"));
        engine.set_mode(DisplayMode::Educational);
        assert_eq!(engine.view().highlight.as_deref(), Some("Moon"));
    }

    #[test]
    fn unknown_options_are_ignored() {
        let mut engine = ChartEngine::default();
        engine.render(payload());
        let before = engine.view().clone();
        engine.set_option("show-hyperspace", true);
        assert_eq!(*engine.view(), before);
    }

    #[test]
    fn rerender_with_unchanged_state_is_idempotent() {
        let mut engine = ChartEngine::default();
        engine.render(payload());
        let first = engine.svg().unwrap();
        engine.render(payload());
        let second = engine.svg().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn highlight_survives_into_the_scene() {
        let mut engine = ChartEngine::default();
        engine.render(payload());
        engine.highlight(Some("Sun"));
        let scene = engine.scene().unwrap();
        let group = scene.find_group("body-Sun").unwrap();
        assert_eq!(group.class.as_deref(), Some("body-group active"));
        engine.highlight(None);
        let scene = engine.scene().unwrap();
        let group = scene.find_group("body-Sun").unwrap();
        assert_eq!(group.class.as_deref(), Some("body-group"));
    }
}
