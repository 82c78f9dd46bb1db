//! Chart configuration.
//!
//! Historical renderer variants differed only in radii, colors, fonts and
//! overlay choices, so a "theme" here is a value, not a code path. All
//! lookup tables (orbs included) are immutable once constructed and passed
//! explicitly into assembly - there is no ambient module state to mutate
//! between renders.

use std::collections::HashMap;

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

// ============================================================================
// Theme
// ============================================================================

/// Concentric radii of the wheel, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiiTable {
    /// Outer frame of the chart.
    pub outer: f64,
    /// Inner edge of the zodiac band.
    pub sign: f64,
    /// Base radius for body glyphs (track 0).
    pub planet_base: f64,
    /// Radial distance between adjacent body tracks.
    pub planet_step: f64,
    /// House-label ring.
    pub house: f64,
    /// Innermost ring; aspect lines terminate here.
    pub inner: f64,
    /// Radius of the disc behind each body glyph.
    pub glyph: f64,
}

impl Default for RadiiTable {
    fn default() -> Self {
        RadiiTable {
            outer: 360.0,
            sign: 300.0,
            planet_base: 250.0,
            planet_step: 24.0,
            house: 200.0,
            inner: 140.0,
            glyph: 16.0,
        }
    }
}

/// Color assignments for every structural element. Values are raw SVG paint
/// strings so hosts can pass anything the target renderer accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    pub frame: String,
    pub ring: String,
    pub tick_minor: String,
    pub tick_major: String,
    pub divider: String,
    pub leader: String,
    pub angle: String,
    pub text: String,
    pub glyph_fill: String,
    pub glyph_stroke: String,
    pub aspect_neutral: String,
    pub aspect_hard: String,
    pub aspect_soft: String,
    pub fire: String,
    pub earth: String,
    pub air: String,
    pub water: String,
}

impl Default for Palette {
    fn default() -> Self {
        // The "classic paper" look
        Palette {
            background: "#fff".into(),
            frame: "#111".into(),
            ring: "#ccc".into(),
            tick_minor: "#999".into(),
            tick_major: "#666".into(),
            divider: "#ddd".into(),
            leader: "#ccc".into(),
            angle: "#a03333".into(),
            text: "#333".into(),
            glyph_fill: "#fff".into(),
            glyph_stroke: "#111".into(),
            aspect_neutral: "rgba(0,0,0,0.1)".into(),
            aspect_hard: "rgba(200,50,50,0.3)".into(),
            aspect_soft: "rgba(50,100,200,0.3)".into(),
            fire: "#b3442e".into(),
            earth: "#6b7d3a".into(),
            air: "#3b7bbf".into(),
            water: "#2e6e8e".into(),
        }
    }
}

impl Palette {
    /// Paint for an element class.
    pub fn element(&self, element: crate::zodiac::Element) -> &str {
        use crate::zodiac::Element::*;
        match element {
            Fire => &self.fire,
            Earth => &self.earth,
            Air => &self.air,
            Water => &self.water,
        }
    }
}

/// Font sizes in drawing-surface units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontTable {
    pub sign: f64,
    pub glyph: f64,
    pub label: f64,
    pub subtext: f64,
    pub caption: f64,
}

impl Default for FontTable {
    fn default() -> Self {
        FontTable {
            sign: 28.0,
            glyph: 22.0,
            label: 10.0,
            subtext: 9.0,
            caption: 13.0,
        }
    }
}

/// A complete visual theme: drawing-surface size plus the radii, palette
/// and font tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub size: Option<f64>,
    pub radii: RadiiTable,
    pub palette: Palette,
    pub fonts: FontTable,
}

impl Theme {
    /// Side length of the square drawing surface. Defaults to a surface
    /// with a small margin around the outer ring.
    pub fn surface_size(&self) -> f64 {
        self.size.unwrap_or(800.0)
    }

    /// Center of the wheel.
    pub fn center(&self) -> DVec2 {
        let half = self.surface_size() / 2.0;
        dvec2(half, half)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.surface_size();
        if !size.is_finite() || size <= 0.0 {
            return Err(ConfigError::InvalidSize { size });
        }
        let r = &self.radii;
        for (name, value) in [
            ("outer", r.outer),
            ("sign", r.sign),
            ("planet_base", r.planet_base),
            ("planet_step", r.planet_step),
            ("house", r.house),
            ("inner", r.inner),
            ("glyph", r.glyph),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidRadius { name, value });
            }
        }
        if r.inner >= r.outer {
            return Err(ConfigError::RadiiOutOfOrder {
                inner: r.inner,
                outer: r.outer,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Aspects
// ============================================================================

/// Per-body orb allowances in degrees. A body missing from the table gets
/// orb 0 and therefore never registers a major aspect - intentionally so
/// for nodal points and lots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrbTable(pub HashMap<String, f64>);

impl Default for OrbTable {
    fn default() -> Self {
        // Classical half-orbs for the seven traditional planets; modern
        // outers get a tighter allowance.
        let orbs = [
            ("Sun", 10.0),
            ("Moon", 9.0),
            ("Mercury", 7.0),
            ("Venus", 7.0),
            ("Mars", 7.0),
            ("Jupiter", 9.0),
            ("Saturn", 9.0),
            ("Uranus", 5.0),
            ("Neptune", 5.0),
            ("Pluto", 5.0),
        ];
        OrbTable(
            orbs.into_iter()
                .map(|(name, orb)| (name.to_string(), orb))
                .collect(),
        )
    }
}

impl OrbTable {
    /// Empty table: no body ever aspects another.
    pub fn none() -> OrbTable {
        OrbTable(HashMap::new())
    }

    /// A body's configured orb, 0 when unconfigured.
    pub fn orb(&self, body: &str) -> f64 {
        self.0.get(body).copied().unwrap_or(0.0)
    }
}

/// Settings for aspect classification and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectConfig {
    pub orbs: OrbTable,
    /// Reject candidates whose sign distance disagrees with the aspect
    /// angle; guards against cross-boundary matches at wide orbs.
    pub require_sign_agreement: bool,
    /// Aspects at or beyond this orb are never drawn.
    pub display_orb_max: f64,
    /// Aspects tighter than this draw heavier.
    pub tight_orb: f64,
}

impl Default for AspectConfig {
    fn default() -> Self {
        AspectConfig {
            orbs: OrbTable::default(),
            require_sign_agreement: false,
            display_orb_max: 8.0,
            tight_orb: 3.0,
        }
    }
}

// ============================================================================
// Collision resolution
// ============================================================================

/// Settings for the glyph collision resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Bodies closer than this (degrees) to their predecessor stagger onto
    /// the next track.
    pub threshold_deg: f64,
    /// Number of concentric tracks to cycle through (3 or 4).
    pub tracks: u8,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        CollisionConfig {
            threshold_deg: 10.0,
            tracks: 3,
        }
    }
}

impl CollisionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold_deg.is_finite() || self.threshold_deg <= 0.0 {
            return Err(ConfigError::InvalidThreshold {
                threshold: self.threshold_deg,
            });
        }
        if !(3..=4).contains(&self.tracks) {
            return Err(ConfigError::UnsupportedTracks {
                tracks: self.tracks,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Everything the assembler needs besides the payload and the view state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub theme: Theme,
    pub aspects: AspectConfig,
    pub collision: CollisionConfig,
}

impl ChartConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.theme.validate()?;
        self.collision.validate()?;
        Ok(())
    }
}
