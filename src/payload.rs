//! Data contract with the ephemeris provider.
//!
//! The provider computes astronomical state (planetary longitudes, house
//! cusps, angles) and hands it over as a JSON document; this module is the
//! typed boundary for that document. Every longitude is normalized modulo
//! 360 on the way in, and everything beyond the two mandatory angles is
//! optional - missing pieces degrade the chart instead of failing it.

use serde::{Deserialize, Serialize};

use crate::errors::PayloadError;
use crate::types::Longitude;
use crate::zodiac;

/// A single positioned chart angle (Ascendant or Midheaven).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnglePoint {
    pub position: Longitude,
}

impl AnglePoint {
    pub fn new(position: f64) -> AnglePoint {
        AnglePoint {
            position: Longitude::new(position),
        }
    }
}

/// A celestial body supplied by the provider.
///
/// `track` assignments from collision resolution are deliberately *not*
/// part of this type - they are render-scoped annotations owned by the
/// resolver's output, never written back into the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub name: String,
    pub position: Longitude,
    /// Daily motion in degrees; negative means retrograde.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Upstream-formatted degree-in-sign, e.g. `18°55'`. Derived locally
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree_formatted: Option<String>,
}

impl CelestialBody {
    pub fn new(name: impl Into<String>, position: f64) -> CelestialBody {
        CelestialBody {
            name: name.into(),
            position: Longitude::new(position),
            speed: None,
            degree_formatted: None,
        }
    }

    /// Apparent backward motion, signaled by negative daily speed.
    pub fn is_retrograde(&self) -> bool {
        self.speed.is_some_and(|s| s < 0.0)
    }

    /// The degree-within-sign label: the provider's string when present,
    /// otherwise derived from the position.
    pub fn degree_label(&self) -> String {
        self.degree_formatted
            .clone()
            .unwrap_or_else(|| zodiac::format_degree(self.position.degree_in_sign()))
    }
}

/// An aspect precomputed upstream. Entries naming bodies that are absent
/// from `planets`, or carrying an unrecognized type, are skipped at
/// assembly time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectRecord {
    pub planet1: String,
    pub planet2: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub orb: f64,
}

/// Hellenistic lots, rendered as overlay bodies when the matching view
/// option is enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Lots {
    #[serde(default, alias = "Fortuna", skip_serializing_if = "Option::is_none")]
    pub fortuna: Option<AnglePoint>,
    #[serde(default, alias = "Spirit", skip_serializing_if = "Option::is_none")]
    pub spirit: Option<AnglePoint>,
}

/// Birth-data caption information. Display-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// The full chart document consumed by [`assemble`](crate::chart::assemble).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascendant: Option<AnglePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub midheaven: Option<AnglePoint>,
    #[serde(default)]
    pub planets: Vec<CelestialBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspects: Option<Vec<AspectRecord>>,
    #[serde(default, alias = "houseCusps", skip_serializing_if = "Option::is_none")]
    pub house_cusps: Option<Vec<Longitude>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lots: Option<Lots>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ChartMeta>,
}

impl Default for AnglePoint {
    fn default() -> Self {
        AnglePoint {
            position: Longitude::ZERO,
        }
    }
}

impl ChartPayload {
    /// Decode a provider JSON document.
    pub fn from_json(source: &str) -> Result<ChartPayload, PayloadError> {
        serde_json::from_str(source)
            .map_err(|e| PayloadError::from_json_error("<payload>", source, &e))
    }

    /// Whether the payload carries enough to draw anything at all.
    /// Missing angles or an empty body list make the render a no-op.
    pub fn is_renderable(&self) -> bool {
        self.ascendant.is_some() && self.midheaven.is_some() && !self.planets.is_empty()
    }

    /// Look up a body by name.
    pub fn body(&self, name: &str) -> Option<&CelestialBody> {
        self.planets.iter().find(|b| b.name == name)
    }
}
