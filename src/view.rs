//! View state: the mutable, process-local slice of the chart.
//!
//! Everything here is owned by the [`ChartEngine`](crate::engine::ChartEngine)
//! and read by every assembly pass. None of it survives into the payload or
//! the scene - it only gates what gets drawn.

use std::str::FromStr;

/// How bodies and signs are labeled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Traditional glyphs.
    #[default]
    Symbolic,
    /// Written-out names, house keywords and house numbers.
    Educational,
}

/// Named overlay toggles exposed to the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOption {
    FortunePoint,
    SpiritPoint,
    DegreeTerms,
    DecanFaces,
    AlwaysShowAspects,
}

impl FromStr for OverlayOption {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "show-fortune-point" => Ok(OverlayOption::FortunePoint),
            "show-spirit-point" => Ok(OverlayOption::SpiritPoint),
            "show-degree-terms" => Ok(OverlayOption::DegreeTerms),
            "show-decan-faces" => Ok(OverlayOption::DecanFaces),
            "always-show-aspects" => Ok(OverlayOption::AlwaysShowAspects),
            _ => Err(()),
        }
    }
}

/// The full interactive state of one chart view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub mode: DisplayMode,
    /// Body currently under the pointer, if any.
    pub highlight: Option<String>,
    pub show_fortune_point: bool,
    pub show_spirit_point: bool,
    pub show_degree_terms: bool,
    pub show_decan_faces: bool,
    pub always_show_aspects: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            mode: DisplayMode::default(),
            highlight: None,
            show_fortune_point: false,
            show_spirit_point: false,
            show_degree_terms: false,
            show_decan_faces: false,
            // An untouched chart shows every aspect under the display
            // threshold; a highlight narrows the set
            always_show_aspects: true,
        }
    }
}

impl ViewState {
    pub fn set_option(&mut self, option: OverlayOption, on: bool) {
        match option {
            OverlayOption::FortunePoint => self.show_fortune_point = on,
            OverlayOption::SpiritPoint => self.show_spirit_point = on,
            OverlayOption::DegreeTerms => self.show_degree_terms = on,
            OverlayOption::DecanFaces => self.show_decan_faces = on,
            OverlayOption::AlwaysShowAspects => self.always_show_aspects = on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_names_parse() {
        assert_eq!(
            "show-degree-terms".parse::<OverlayOption>(),
            Ok(OverlayOption::DegreeTerms)
        );
        assert!("show-everything".parse::<OverlayOption>().is_err());
    }

    #[test]
    fn options_toggle() {
        let mut view = ViewState::default();
        assert!(!view.show_fortune_point);
        view.set_option(OverlayOption::FortunePoint, true);
        assert!(view.show_fortune_point);
        view.set_option(OverlayOption::AlwaysShowAspects, false);
        assert!(!view.always_show_aspects);
    }
}
