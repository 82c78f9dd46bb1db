//! End-to-end scenes: a payload goes in, a scene graph and its SVG come
//! out, and the geometry holds together across the layers.

use glam::{DVec2, dvec2};
use radix::chart::scene::{Group, Scene, SceneNode};
use radix::payload::AnglePoint;
use radix::{CelestialBody, ChartConfig, ChartEngine, ChartPayload, DisplayMode, ViewState};

const EPS: f64 = 1e-9;

fn payload(asc: f64, mc: f64, planets: &[(&str, f64)]) -> ChartPayload {
    ChartPayload {
        ascendant: Some(AnglePoint::new(asc)),
        midheaven: Some(AnglePoint::new(mc)),
        planets: planets
            .iter()
            .map(|(name, pos)| CelestialBody::new(*name, *pos))
            .collect(),
        ..ChartPayload::default()
    }
}

fn top_level_group<'a>(scene: &'a Scene, class: &str) -> &'a Group {
    scene
        .nodes
        .iter()
        .find_map(|n| match n {
            SceneNode::Group(g) if g.class.as_deref() == Some(class) => Some(g),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no {class:?} group in scene"))
}

/// Center of the glyph disc inside a body group.
fn glyph_center(group: &Group) -> DVec2 {
    group
        .children
        .iter()
        .find_map(|n| match n {
            SceneNode::Circle(c) => Some(c.center),
            _ => None,
        })
        .expect("body group has no glyph disc")
}

#[test]
fn sun_conjunct_ascendant_sits_on_the_asc_ray() {
    let payload = payload(0.0, 90.0, &[("Sun", 0.0)]);
    let config = ChartConfig::default();
    let scene = radix::assemble(&payload, &config, &ViewState::default()).unwrap();

    let center = config.theme.center();
    let radii = &config.theme.radii;

    // The Sun glyph sits at track 0 on the left horizon
    let sun = glyph_center(scene.find_group("body-Sun").unwrap());
    assert!((sun - dvec2(center.x - radii.planet_base, center.y)).length() < EPS);

    // The ASC spoke is the first line of the angles group; its inner
    // endpoint is the projection of the ascendant at the inner radius
    let angles = top_level_group(&scene, "angles");
    let spoke = angles
        .children
        .iter()
        .find_map(|n| match n {
            SceneNode::Line(l) => Some(l),
            _ => None,
        })
        .unwrap();
    assert!((spoke.from - dvec2(center.x - radii.inner, center.y)).length() < EPS);

    // Same ray: the Sun, the spoke's endpoints and the center are collinear
    let to_sun = (sun - center).normalize();
    let to_spoke = (spoke.from - center).normalize();
    assert!((to_sun - to_spoke).length() < EPS);
}

#[test]
fn ascendant_value_does_not_move_the_rising_body() {
    let config = ChartConfig::default();
    let center = config.theme.center();
    let radii = &config.theme.radii;
    for asc in [47.3, 311.0] {
        let payload = payload(asc, (asc + 270.0) % 360.0, &[("Sun", asc)]);
        let scene = radix::assemble(&payload, &config, &ViewState::default()).unwrap();
        let sun = glyph_center(scene.find_group("body-Sun").unwrap());
        assert!(
            (sun - dvec2(center.x - radii.planet_base, center.y)).length() < EPS,
            "asc={asc}: sun at {sun:?}"
        );
    }
}

#[test]
fn crowded_bodies_stagger_onto_inner_tracks() {
    let payload = payload(
        0.0,
        270.0,
        &[("Sun", 10.0), ("Mercury", 12.0), ("Venus", 14.0)],
    );
    let config = ChartConfig::default();
    let scene = radix::assemble(&payload, &config, &ViewState::default()).unwrap();

    let center = config.theme.center();
    let radii = &config.theme.radii;
    for (name, track) in [("Sun", 0.0), ("Mercury", 1.0), ("Venus", 2.0)] {
        let pos = glyph_center(scene.find_group(&format!("body-{name}")).unwrap());
        let expected = radii.planet_base - track * radii.planet_step;
        let actual = (pos - center).length();
        assert!(
            (actual - expected).abs() < EPS,
            "{name}: expected radius {expected}, got {actual}"
        );
    }
}

#[test]
fn spread_bodies_all_keep_the_base_radius() {
    let payload = payload(0.0, 270.0, &[("Sun", 10.0), ("Moon", 40.0)]);
    let config = ChartConfig::default();
    let scene = radix::assemble(&payload, &config, &ViewState::default()).unwrap();
    let center = config.theme.center();
    for name in ["Sun", "Moon"] {
        let pos = glyph_center(scene.find_group(&format!("body-{name}")).unwrap());
        assert!(((pos - center).length() - config.theme.radii.planet_base).abs() < EPS);
    }
}

#[test]
fn rendering_twice_yields_identical_markup() {
    let doc = r#"{
        "ascendant": {"position": 201.9},
        "midheaven": {"position": 110.3},
        "planets": [
            {"name": "Sun", "position": 294.7, "speed": 1.019},
            {"name": "Moon", "position": 25.1, "speed": 13.2},
            {"name": "Mercury", "position": 290.1, "speed": -0.3},
            {"name": "Venus", "position": 318.6},
            {"name": "Mars", "position": 101.4},
            {"name": "Jupiter", "position": 62.0},
            {"name": "Saturn", "position": 289.2, "speed": -0.05}
        ],
        "meta": {"name": "Idempotence", "date": "1990-01-15", "place": "Seoul"}
    }"#;
    let payload = ChartPayload::from_json(doc).unwrap();
    let config = ChartConfig::default();
    let view = ViewState::default();
    let first = radix::render_svg(&payload, &config, &view).unwrap();
    let second = radix::render_svg(&payload, &config, &view).unwrap();
    assert_eq!(first, second);
}

#[test]
fn engine_round_trip_from_provider_json() {
    let doc = r#"{
        "ascendant": {"position": 123.4},
        "midheaven": {"position": 33.2},
        "planets": [
            {"name": "Sun", "position": 294.7},
            {"name": "Saturn", "position": 289.2, "speed": -0.05}
        ],
        "aspects": [
            {"planet1": "Sun", "planet2": "Saturn", "type": "Conjunction", "orb": 5.5},
            {"planet1": "Sun", "planet2": "Pluto", "type": "Square", "orb": 1.0}
        ]
    }"#;
    let mut engine = ChartEngine::default();
    engine.render(ChartPayload::from_json(doc).unwrap());
    let markup = engine.svg().unwrap();
    assert!(markup.contains("id=\"body-Sun\""));
    assert!(markup.contains("id=\"body-Saturn\""));
    // The malformed Pluto aspect was dropped; the valid one drew a line
    assert!(markup.contains("class=\"aspect-line\""));
    // Saturn is retrograde
    assert!(markup.contains("\u{211E}"));
}

#[test]
fn educational_mode_swaps_glyphs_for_labels() {
    let mut engine = ChartEngine::default();
    engine.render(payload(95.5, 5.5, &[("Sun", 100.0)]));
    engine.set_mode(DisplayMode::Educational);
    let markup = engine.svg().unwrap();
    // Written-out sign names and house keywords replace the glyphs
    assert!(markup.contains("Aries"));
    assert!(markup.contains("Self / Body"));
    // Sun in the rising sign: house 1
    assert!(markup.contains("H1"));
    assert!(!markup.contains("\u{2609}"));
}

#[test]
fn overlays_render_on_demand() {
    let mut engine = ChartEngine::default();
    engine.render(payload(0.0, 270.0, &[("Sun", 15.0)]));
    let bare = engine.svg().unwrap();
    assert!(!bare.contains("class=\"terms\""));

    engine.set_option("show-degree-terms", true);
    engine.set_option("show-decan-faces", true);
    let overlaid = engine.svg().unwrap();
    assert!(overlaid.contains("class=\"terms\""));
    assert!(overlaid.contains("class=\"decans\""));
}

#[test]
fn supplied_house_cusps_shape_the_house_band() {
    // Porphyry-style unequal cusps
    let mut p = payload(10.0, 280.0, &[("Sun", 15.0)]);
    p.house_cusps = Some(
        [
            10.0, 38.0, 65.0, 100.0, 130.0, 160.0, 190.0, 218.0, 245.0, 280.0, 310.0, 340.0,
        ]
        .into_iter()
        .map(radix::Longitude::new)
        .collect(),
    );
    let config = ChartConfig::default();
    let scene = radix::assemble(&p, &config, &ViewState::default()).unwrap();
    let houses = top_level_group(&scene, "houses");
    // Twelve cusp lines plus twelve number labels
    assert_eq!(houses.children.len(), 24);
}
