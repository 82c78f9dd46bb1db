//! Strongly-typed angular primitives.
//!
//! Ecliptic positions arrive as plain degrees at the provider boundary, but
//! raw `f64` longitudes invite unwrapped arithmetic. `Longitude` keeps every
//! value normalized into [0, 360) and owns the arc math the rest of the
//! crate builds on.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Degrees in one zodiac sign segment.
pub const SIGN_SPAN: f64 = 30.0;

/// An ecliptic longitude in degrees, always normalized into [0, 360).
///
/// Construction normalizes modulo 360, so out-of-range provider values
/// (`725`, `-10`) are tolerated everywhere a longitude is consumed.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
#[repr(transparent)]
pub struct Longitude(f64);

impl Longitude {
    pub const ZERO: Longitude = Longitude(0.0);

    /// Normalize raw degrees into [0, 360). Non-finite input collapses to 0
    /// rather than poisoning downstream trigonometry.
    #[inline]
    pub fn new(degrees: f64) -> Longitude {
        if degrees.is_finite() {
            Longitude(degrees.rem_euclid(360.0))
        } else {
            Longitude(0.0)
        }
    }

    /// The normalized value in degrees.
    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Zodiac sign index, 0 = Aries .. 11 = Pisces.
    #[inline]
    pub fn sign_index(self) -> usize {
        ((self.0 / SIGN_SPAN) as usize) % 12
    }

    /// Position within the current 30-degree sign segment.
    #[inline]
    pub fn degree_in_sign(self) -> f64 {
        self.0 % SIGN_SPAN
    }

    /// Shortest-arc angular separation, in [0, 180].
    pub fn separation(self, other: Longitude) -> f64 {
        let raw = (self.0 - other.0).abs();
        raw.min(360.0 - raw)
    }

    /// Forward arc (in zodiacal order) from `start` to `self`, in [0, 360).
    pub fn arc_from(self, start: Longitude) -> f64 {
        (self.0 - start.0).rem_euclid(360.0)
    }

    /// The point directly opposite on the circle (DSC from ASC, IC from MC).
    #[inline]
    pub fn antipode(self) -> Longitude {
        Longitude::new(self.0 + 180.0)
    }

    /// Sign-count distance between two longitudes' signs, in 0..=6.
    pub fn sign_distance(self, other: Longitude) -> usize {
        let d = self.sign_index().abs_diff(other.sign_index());
        d.min(12 - d)
    }
}

impl From<f64> for Longitude {
    fn from(degrees: f64) -> Longitude {
        Longitude::new(degrees)
    }
}

impl From<Longitude> for f64 {
    fn from(l: Longitude) -> f64 {
        l.0
    }
}

impl Add<f64> for Longitude {
    type Output = Longitude;
    fn add(self, rhs: f64) -> Longitude {
        Longitude::new(self.0 + rhs)
    }
}

impl Sub<f64> for Longitude {
    type Output = Longitude;
    fn sub(self, rhs: f64) -> Longitude {
        Longitude::new(self.0 - rhs)
    }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\u{00b0}", self.0)
    }
}
