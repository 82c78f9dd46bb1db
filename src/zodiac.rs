//! Immutable zodiac lookup tables and house arithmetic.
//!
//! Everything here is pure data or pure functions over it: sign names and
//! glyphs, the element cycle, planetary glyphs, house keywords, the
//! Egyptian terms table, decan face rulers, degree formatting, and the
//! whole-sign house derivation. Tables are owned by this module and passed
//! by reference - nothing in the crate mutates them.

use crate::types::{Longitude, SIGN_SPAN};

/// The twelve sign names, Aries first.
pub const SIGN_NAMES: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// Sign glyphs with the text-presentation selector appended, so renderers
/// don't substitute emoji forms.
pub const SIGN_GLYPHS: [&str; 12] = [
    "\u{2648}\u{FE0E}",
    "\u{2649}\u{FE0E}",
    "\u{264A}\u{FE0E}",
    "\u{264B}\u{FE0E}",
    "\u{264C}\u{FE0E}",
    "\u{264D}\u{FE0E}",
    "\u{264E}\u{FE0E}",
    "\u{264F}\u{FE0E}",
    "\u{2650}\u{FE0E}",
    "\u{2651}\u{FE0E}",
    "\u{2652}\u{FE0E}",
    "\u{2653}\u{FE0E}",
];

/// Classical elements, repeating fire/earth/air/water through the signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    /// Element of the sign at `sign_index`.
    pub fn of_sign(sign_index: usize) -> Element {
        match sign_index % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// CSS-style class fragment, e.g. `elem-fire`.
    pub fn class_name(self) -> &'static str {
        match self {
            Element::Fire => "elem-fire",
            Element::Earth => "elem-earth",
            Element::Air => "elem-air",
            Element::Water => "elem-water",
        }
    }
}

/// Glyphs for the bodies a provider is expected to send. Unknown names get
/// a placeholder label instead of failing the render.
const BODY_GLYPHS: [(&str, &str); 14] = [
    ("Sun", "\u{2609}"),
    ("Moon", "\u{263D}"),
    ("Mercury", "\u{263F}"),
    ("Venus", "\u{2640}"),
    ("Mars", "\u{2642}"),
    ("Jupiter", "\u{2643}"),
    ("Saturn", "\u{2644}"),
    ("Uranus", "\u{2645}"),
    ("Neptune", "\u{2646}"),
    ("Pluto", "\u{2647}"),
    ("North Node", "\u{260A}"),
    ("South Node", "\u{260B}"),
    ("Fortuna", "\u{2297}"),
    ("Spirit", "\u{2299}"),
];

/// Glyph for a body name, if one is known.
pub fn body_glyph(name: &str) -> Option<&'static str> {
    BODY_GLYPHS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, g)| *g)
}

/// Placeholder label for a body with no configured glyph: the first two
/// characters of its name.
pub fn placeholder_label(name: &str) -> String {
    name.chars().take(2).collect()
}

/// One keyword line per house, 1st house first.
pub const HOUSE_KEYWORDS: [&str; 12] = [
    "Self / Body",
    "Possessions / Values",
    "Siblings / Communication",
    "Home / Roots",
    "Children / Creativity",
    "Health / Service",
    "Partnership / Contracts",
    "Loss / Inheritance",
    "Philosophy / Travel",
    "Career / Status",
    "Friends / Community",
    "Seclusion / Unconscious",
];

/// Egyptian terms (bounds): per sign, five `(upper bound, ruler)` pairs.
/// The last bound of every row is 30.
pub const EGYPTIAN_TERMS: [[(f64, &str); 5]; 12] = [
    [(6.0, "Jupiter"), (12.0, "Venus"), (20.0, "Mercury"), (25.0, "Mars"), (30.0, "Saturn")],
    [(8.0, "Venus"), (14.0, "Mercury"), (22.0, "Jupiter"), (27.0, "Saturn"), (30.0, "Mars")],
    [(6.0, "Mercury"), (12.0, "Jupiter"), (17.0, "Venus"), (24.0, "Mars"), (30.0, "Saturn")],
    [(7.0, "Mars"), (13.0, "Venus"), (19.0, "Mercury"), (26.0, "Jupiter"), (30.0, "Saturn")],
    [(6.0, "Jupiter"), (11.0, "Venus"), (18.0, "Saturn"), (24.0, "Mercury"), (30.0, "Mars")],
    [(7.0, "Mercury"), (17.0, "Venus"), (21.0, "Jupiter"), (28.0, "Mars"), (30.0, "Saturn")],
    [(6.0, "Saturn"), (14.0, "Mercury"), (21.0, "Jupiter"), (28.0, "Venus"), (30.0, "Mars")],
    [(7.0, "Mars"), (11.0, "Venus"), (19.0, "Mercury"), (24.0, "Jupiter"), (30.0, "Saturn")],
    [(12.0, "Jupiter"), (17.0, "Venus"), (21.0, "Mercury"), (26.0, "Saturn"), (30.0, "Mars")],
    [(7.0, "Mercury"), (14.0, "Jupiter"), (22.0, "Venus"), (26.0, "Saturn"), (30.0, "Mars")],
    [(7.0, "Mercury"), (13.0, "Venus"), (20.0, "Jupiter"), (25.0, "Mars"), (30.0, "Saturn")],
    [(12.0, "Venus"), (16.0, "Jupiter"), (19.0, "Mercury"), (28.0, "Mars"), (30.0, "Saturn")],
];

/// Chaldean order, starting from the first face of Aries.
const FACE_RULERS: [&str; 7] = ["Mars", "Sun", "Venus", "Mercury", "Moon", "Saturn", "Jupiter"];

/// Ruler of the nth decan face, `decan_index` in 0..36 counted from 0° Aries.
pub fn face_ruler(decan_index: usize) -> &'static str {
    FACE_RULERS[decan_index % 7]
}

/// Format a degree-within-sign as `D°MM'`, e.g. `18.92` -> `18°55'`.
pub fn format_degree(degree_in_sign: f64) -> String {
    let whole = degree_in_sign.trunc() as i64;
    let minutes = ((degree_in_sign - whole as f64) * 60.0) as i64;
    format!("{whole}\u{00b0}{minutes:02}'")
}

/// Whole-sign house cusps: the Ascendant's sign boundary opens house 1 and
/// each house occupies exactly one sign.
pub fn whole_sign_cusps(ascendant: Longitude) -> [Longitude; 12] {
    let first = ascendant.sign_index() as f64 * SIGN_SPAN;
    std::array::from_fn(|i| Longitude::new(first + i as f64 * SIGN_SPAN))
}

/// House number (1-12) of a body given the twelve cusps. Sectors are
/// wrap-around: a body belongs to cusp `i` when its forward arc from that
/// cusp is smaller than the sector's width.
pub fn house_of(position: Longitude, cusps: &[Longitude; 12]) -> usize {
    for i in 0..12 {
        let width = cusps[(i + 1) % 12].arc_from(cusps[i]);
        // A degenerate zero-width sector can't contain anything
        if width == 0.0 {
            continue;
        }
        if position.arc_from(cusps[i]) < width {
            return i + 1;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_cycle_repeats() {
        assert_eq!(Element::of_sign(0), Element::Fire);
        assert_eq!(Element::of_sign(1), Element::Earth);
        assert_eq!(Element::of_sign(7), Element::Water);
        assert_eq!(Element::of_sign(10), Element::Air);
    }

    #[test]
    fn glyph_lookup_and_placeholder() {
        assert_eq!(body_glyph("Sun"), Some("\u{2609}"));
        assert_eq!(body_glyph("Vulcan"), None);
        assert_eq!(placeholder_label("Vulcan"), "Vu");
    }

    #[test]
    fn degree_formatting_matches_provider_style() {
        assert_eq!(format_degree(18.92), "18°55'");
        assert_eq!(format_degree(0.0), "0°00'");
        assert_eq!(format_degree(29.99), "29°59'");
    }

    #[test]
    fn whole_sign_cusps_anchor_to_sign_boundary() {
        let cusps = whole_sign_cusps(Longitude::new(95.5));
        assert_eq!(cusps[0].degrees(), 90.0);
        assert_eq!(cusps[1].degrees(), 120.0);
        assert_eq!(cusps[11].degrees(), 60.0);
    }

    #[test]
    fn house_assignment_wraps() {
        let cusps = whole_sign_cusps(Longitude::new(95.5));
        // Cancer rising: a body at 100° sits in house 1
        assert_eq!(house_of(Longitude::new(100.0), &cusps), 1);
        // ...and one at 85° (late Gemini) in house 12
        assert_eq!(house_of(Longitude::new(85.0), &cusps), 12);
        assert_eq!(house_of(Longitude::new(300.0), &cusps), 8);
    }

    #[test]
    fn house_assignment_with_unequal_cusps() {
        let mut cusps = whole_sign_cusps(Longitude::new(0.0));
        // Shrink house 1 to 10° and widen house 2 accordingly
        cusps[1] = Longitude::new(10.0);
        assert_eq!(house_of(Longitude::new(5.0), &cusps), 1);
        assert_eq!(house_of(Longitude::new(15.0), &cusps), 2);
    }

    #[test]
    fn terms_rows_end_at_sign_boundary() {
        for row in EGYPTIAN_TERMS.iter() {
            assert_eq!(row[4].0, 30.0);
            // Bounds are strictly increasing
            for pair in row.windows(2) {
                assert!(pair[0].0 < pair[1].0);
            }
        }
    }

    #[test]
    fn face_rulers_follow_chaldean_order() {
        assert_eq!(face_ruler(0), "Mars");
        assert_eq!(face_ruler(1), "Sun");
        assert_eq!(face_ruler(7), "Mars");
        // Pisces III is a Mars face (35 ≡ 0 mod 7)
        assert_eq!(face_ruler(35), "Mars");
    }
}
