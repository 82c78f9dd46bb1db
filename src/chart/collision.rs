//! Glyph collision resolution.
//!
//! Bodies that crowd the same stretch of the wheel are staggered onto
//! concentric tracks so their glyphs stay readable. This is a greedy
//! single-pass walk over the bodies in ascending-longitude order: each body
//! within the proximity threshold of its immediate predecessor cycles to
//! the next track, anything else resets to track 0. Adjacent-only
//! comparison is an intentional approximation - three or more mutually
//! close bodies cycle through tracks rather than being jointly optimized,
//! and the walk does not compare the last body against the first across 0°.

use crate::config::CollisionConfig;
use crate::payload::CelestialBody;

/// One body's render-scoped track assignment. `index` refers back into the
/// input slice; the payload itself is never annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSlot {
    pub index: usize,
    pub track: u8,
}

/// Assign a track to every body, returned in ascending-longitude order
/// (ties keep input order, so assignment is deterministic).
pub fn resolve(bodies: &[CelestialBody], config: &CollisionConfig) -> Vec<TrackSlot> {
    let mut order: Vec<usize> = (0..bodies.len()).collect();
    // Stable sort keeps input order on equal longitudes
    order.sort_by(|&i, &j| {
        bodies[i]
            .position
            .degrees()
            .total_cmp(&bodies[j].position.degrees())
    });

    let tracks = config.tracks.max(1);
    let mut slots: Vec<TrackSlot> = Vec::with_capacity(order.len());
    for (seq, &index) in order.iter().enumerate() {
        let track = if seq == 0 {
            0
        } else {
            let prev = &slots[seq - 1];
            // Sorted ascending, so the raw difference is non-negative;
            // normalize anyway so a pathological comparator can't go wrong
            let diff = (bodies[index].position.degrees()
                - bodies[prev.index].position.degrees())
            .rem_euclid(360.0);
            if diff < config.threshold_deg {
                (prev.track + 1) % tracks
            } else {
                0
            }
        };
        slots.push(TrackSlot { index, track });
    }
    slots
}
