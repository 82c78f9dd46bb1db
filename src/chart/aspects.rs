//! Aspect classification.
//!
//! An aspect is a named angular relationship between two bodies, admitted
//! when the shortest-arc separation falls within the pair's moiety (the
//! average of each body's configured orb). Classification is a pure, total
//! function - a pair either matches one of the five Ptolemaic aspects or
//! nothing.

use std::fmt;
use std::str::FromStr;

use crate::config::AspectConfig;
use crate::payload::CelestialBody;

/// The five Ptolemaic aspects, in ascending-angle evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Canonical angle in degrees.
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    /// Squares and oppositions read as tension.
    pub fn is_hard(self) -> bool {
        matches!(self, AspectKind::Square | AspectKind::Opposition)
    }

    /// Trines and sextiles read as flow.
    pub fn is_soft(self) -> bool {
        matches!(self, AspectKind::Trine | AspectKind::Sextile)
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::Sextile => "Sextile",
            AspectKind::Square => "Square",
            AspectKind::Trine => "Trine",
            AspectKind::Opposition => "Opposition",
        };
        f.write_str(name)
    }
}

impl FromStr for AspectKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Conjunction" => Ok(AspectKind::Conjunction),
            "Sextile" => Ok(AspectKind::Sextile),
            "Square" => Ok(AspectKind::Square),
            "Trine" => Ok(AspectKind::Trine),
            "Opposition" => Ok(AspectKind::Opposition),
            _ => Err(()),
        }
    }
}

/// A classified relationship: which aspect, and how far from exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRelation {
    pub kind: AspectKind,
    /// Deviation from the canonical angle, in degrees.
    pub orb: f64,
}

/// An aspect between two named bodies, as produced by [`sweep`].
#[derive(Debug, Clone, PartialEq)]
pub struct AspectHit {
    pub a: String,
    pub b: String,
    pub relation: AspectRelation,
}

/// Classify the relationship between two bodies, or `None`.
///
/// The moiety is the average of the two bodies' configured orbs; a body
/// missing from the orb table contributes 0, so unconfigured bodies
/// effectively never aspect. With `require_sign_agreement` set, a
/// candidate must also connect signs whose distance matches the aspect
/// (guards against cross-boundary matches at wide orbs).
pub fn classify(
    a: &CelestialBody,
    b: &CelestialBody,
    config: &AspectConfig,
) -> Option<AspectRelation> {
    let moiety = (config.orbs.orb(&a.name) + config.orbs.orb(&b.name)) / 2.0;
    let separation = a.position.separation(b.position);

    for kind in AspectKind::ALL {
        let orb = (separation - kind.angle()).abs();
        if orb > moiety {
            continue;
        }
        if config.require_sign_agreement {
            let wanted = (kind.angle() / 30.0) as usize;
            if a.position.sign_distance(b.position) != wanted {
                continue;
            }
        }
        return Some(AspectRelation { kind, orb });
    }
    None
}

/// Classify every unordered pair of bodies. Used when the payload carries
/// no precomputed aspect list. O(n²) over a bounded body count.
pub fn sweep(bodies: &[CelestialBody], config: &AspectConfig) -> Vec<AspectHit> {
    let mut hits = Vec::new();
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            if let Some(relation) = classify(a, b, config) {
                hits.push(AspectHit {
                    a: a.name.clone(),
                    b: b.name.clone(),
                    relation,
                });
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrbTable;

    /// Config giving every listed body orb 5, so any pair's moiety is 5.
    fn moiety5(names: &[&str]) -> AspectConfig {
        AspectConfig {
            orbs: OrbTable(names.iter().map(|n| (n.to_string(), 5.0)).collect()),
            ..AspectConfig::default()
        }
    }

    fn body(name: &str, position: f64) -> CelestialBody {
        CelestialBody::new(name, position)
    }

    #[test]
    fn square_at_exact_angle() {
        let config = moiety5(&["A", "B"]);
        let rel = classify(&body("A", 0.0), &body("B", 90.0), &config).unwrap();
        assert_eq!(rel.kind, AspectKind::Square);
        assert_eq!(rel.orb, 0.0);
    }

    #[test]
    fn moiety_is_an_inclusive_boundary() {
        let config = moiety5(&["A", "B"]);
        // Exactly at the moiety: still a match
        let rel = classify(&body("A", 0.0), &body("B", 95.0), &config).unwrap();
        assert_eq!(rel.kind, AspectKind::Square);
        assert_eq!(rel.orb, 5.0);
        // One degree beyond: none
        assert!(classify(&body("A", 0.0), &body("B", 96.0), &config).is_none());
    }

    #[test]
    fn classification_is_symmetric() {
        let config = moiety5(&["A", "B"]);
        for (pa, pb) in [(0.0, 90.0), (10.0, 68.0), (350.0, 20.0), (5.0, 220.0)] {
            assert_eq!(
                classify(&body("A", pa), &body("B", pb), &config),
                classify(&body("B", pb), &body("A", pa), &config),
            );
        }
    }

    #[test]
    fn separation_wraps_across_the_seam() {
        let config = moiety5(&["A", "B"]);
        // 357° and 1° are 4° apart through the seam, not 356°
        let rel = classify(&body("A", 357.0), &body("B", 1.0), &config).unwrap();
        assert_eq!(rel.kind, AspectKind::Conjunction);
        assert!((rel.orb - 4.0).abs() < 1e-9);
    }

    #[test]
    fn unconfigured_bodies_never_aspect() {
        let config = moiety5(&["A"]);
        // Moiety is (5 + 0) / 2 = 2.5; orb 3 misses
        assert!(classify(&body("A", 0.0), &body("Node", 3.0), &config).is_none());
        // A pair of unconfigured bodies has moiety 0: even exact angles
        // need orb exactly 0
        let none = AspectConfig {
            orbs: OrbTable::none(),
            ..AspectConfig::default()
        };
        assert!(classify(&body("X", 0.0), &body("Y", 90.0), &none).is_some());
        assert!(classify(&body("X", 0.0), &body("Y", 90.1), &none).is_none());
    }

    #[test]
    fn sign_agreement_rejects_cross_boundary_conjunction() {
        let mut config = moiety5(&["A", "B"]);
        // 29° Aries vs 1° Taurus: separation 2° reads as a conjunction...
        assert!(classify(&body("A", 29.0), &body("B", 31.0), &config).is_some());
        // ...unless sign agreement is required (sign distance 1 != 0)
        config.require_sign_agreement = true;
        assert!(classify(&body("A", 29.0), &body("B", 31.0), &config).is_none());
        // A same-sign conjunction still passes
        assert!(classify(&body("A", 14.0), &body("B", 16.0), &config).is_some());
    }

    #[test]
    fn ascending_angle_order_wins_ties() {
        // Separation 30 with a huge moiety matches Conjunction (|30-0|=30)
        // before Sextile (|30-60|=30)
        let config = AspectConfig {
            orbs: OrbTable(
                [("A".to_string(), 30.0), ("B".to_string(), 30.0)]
                    .into_iter()
                    .collect(),
            ),
            ..AspectConfig::default()
        };
        let rel = classify(&body("A", 0.0), &body("B", 30.0), &config).unwrap();
        assert_eq!(rel.kind, AspectKind::Conjunction);
    }

    #[test]
    fn sweep_covers_all_pairs_once() {
        let config = moiety5(&["Sun", "Moon", "Mars"]);
        let bodies = [body("Sun", 0.0), body("Moon", 90.0), body("Mars", 180.0)];
        let hits = sweep(&bodies, &config);
        // Sun-Moon square, Sun-Mars opposition, Moon-Mars square
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|h| h.a != h.b));
    }
}
