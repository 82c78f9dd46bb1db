//! Polar projection onto the drawing surface.
//!
//! The whole wheel is rotated so the Ascendant sits at the chart's left
//! horizon. This uses the zodiacal convention: screen angle is
//! `180 - (longitude - ascendant)`, so increasing longitude sweeps
//! clockwise on screen and the first six houses fall below the horizon
//! (drawing-surface y grows downward).

use glam::{DVec2, dvec2};

use crate::types::Longitude;

/// Projects `(radius, longitude)` pairs into drawing-surface coordinates.
/// Pure value type; construction fixes the center and the rotation
/// reference for a whole render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    center: DVec2,
    ascendant: Longitude,
}

impl Projector {
    pub fn new(center: DVec2, ascendant: Longitude) -> Projector {
        Projector { center, ascendant }
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    /// Project an ecliptic longitude at the given radius.
    pub fn project(&self, radius: f64, longitude: Longitude) -> DVec2 {
        let screen_deg = (180.0 - longitude.arc_from(self.ascendant)).rem_euclid(360.0);
        let rad = screen_deg.to_radians();
        self.center + radius * dvec2(rad.cos(), rad.sin())
    }
}
