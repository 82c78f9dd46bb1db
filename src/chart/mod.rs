//! Chart assembly: payload + configuration + view state -> scene graph.
//!
//! This module is organized into submodules:
//! - `projector`: polar projection with Ascendant rotation
//! - `aspects`: aspect classification and the whole-set pair sweep
//! - `collision`: glyph track assignment
//! - `scene`: typed drawing primitives
//! - `svg`: scene serialization
//!
//! [`assemble`] walks the paint layers in a fixed order (later nodes
//! occlude earlier ones): background, degree ticks, aspect lines,
//! structural rings, zodiac band, houses, body glyphs, angle markers,
//! then the optional educational overlays and caption. Missing input
//! degrades to a skipped element or, for the mandatory angles, a skipped
//! render - assembly never fails.

pub mod aspects;
pub mod collision;
pub mod projector;
pub mod scene;
pub mod svg;

pub use aspects::{AspectHit, AspectKind, AspectRelation, classify, sweep};
pub use collision::{TrackSlot, resolve};
pub use projector::Projector;
pub use scene::{Scene, SceneNode};
pub use svg::to_svg;

use glam::{DVec2, dvec2};

use crate::config::ChartConfig;
use crate::payload::{CelestialBody, ChartMeta, ChartPayload};
use crate::types::{Longitude, SIGN_SPAN};
use crate::view::{DisplayMode, ViewState};
use crate::zodiac::{self, Element};

use scene::{Anchor, Circle, Group, Line, Path, PathData, Polygon, Stroke, Text};

/// Build the complete scene for one render pass.
///
/// Returns `None` when the payload is missing an Ascendant, a Midheaven or
/// any bodies - "not yet ready to render", not an error.
pub fn assemble(payload: &ChartPayload, config: &ChartConfig, view: &ViewState) -> Option<Scene> {
    let Some(asc) = payload.ascendant else {
        crate::log::debug!("no ascendant in payload, skipping render");
        return None;
    };
    let Some(mc) = payload.midheaven else {
        crate::log::debug!("no midheaven in payload, skipping render");
        return None;
    };
    if payload.planets.is_empty() {
        crate::log::debug!("no bodies in payload, skipping render");
        return None;
    }

    let theme = &config.theme;
    let projector = Projector::new(theme.center(), asc.position);
    let bodies = display_bodies(payload, view);
    let cusps = house_cusps(payload, asc.position);

    let mut nodes: Vec<SceneNode> = Vec::new();

    // 1. Background disc
    nodes.push(
        Circle {
            center: theme.center(),
            radius: theme.radii.outer,
            fill: Some(theme.palette.background.clone()),
            stroke: None,
        }
        .into(),
    );

    // 2. Degree ticks, three granularities over the full circle
    nodes.push(degree_ticks(&projector, config).into());

    // 3. Aspect lines go under the glyphs
    nodes.push(aspect_lines(payload, &bodies, &projector, config, view).into());

    // 4. Structural rings
    nodes.push(structural_rings(&projector, config).into());

    // 5. Zodiac band
    nodes.push(zodiac_band(&projector, config, view).into());

    // 6. Houses
    nodes.push(house_band(&projector, &cusps, config, view).into());

    // 7. Body glyphs
    nodes.push(body_glyphs(&bodies, &cusps, &projector, config, view).into());

    // 8. Angle markers
    nodes.push(angle_markers(&projector, asc.position, mc.position, config).into());

    // 9. Educational overlays and caption
    if view.show_degree_terms {
        nodes.push(term_band(&projector, config).into());
    }
    if view.show_decan_faces {
        nodes.push(decan_band(&projector, config).into());
    }
    if let Some(meta) = &payload.meta {
        nodes.push(caption(meta, config).into());
    }

    Some(Scene {
        size: theme.surface_size(),
        nodes,
    })
}

/// The bodies actually drawn this pass: the payload's planets plus any
/// enabled lots.
fn display_bodies(payload: &ChartPayload, view: &ViewState) -> Vec<CelestialBody> {
    let mut bodies = payload.planets.clone();
    if let Some(lots) = &payload.lots {
        if view.show_fortune_point {
            if let Some(point) = lots.fortuna {
                bodies.push(CelestialBody::new("Fortuna", point.position.degrees()));
            }
        }
        if view.show_spirit_point {
            if let Some(point) = lots.spirit {
                bodies.push(CelestialBody::new("Spirit", point.position.degrees()));
            }
        }
    }
    bodies
}

/// The twelve cusps in effect: supplied ones when exactly twelve arrive,
/// else whole-sign from the Ascendant.
fn house_cusps(payload: &ChartPayload, asc: Longitude) -> [Longitude; 12] {
    if let Some(list) = &payload.house_cusps {
        if list.len() == 12 {
            return std::array::from_fn(|i| list[i]);
        }
        crate::log::warn!(
            "expected 12 house cusps, got {}; falling back to whole-sign",
            list.len()
        );
    }
    zodiac::whole_sign_cusps(asc)
}

fn degree_ticks(projector: &Projector, config: &ChartConfig) -> Group {
    let radii = &config.theme.radii;
    let palette = &config.theme.palette;
    let mut group = Group::classed("ticks");
    for deg in 0..360 {
        let (len, width, color) = if deg % 10 == 0 {
            (10.0, 1.0, &palette.tick_major)
        } else if deg % 5 == 0 {
            (6.0, 0.5, &palette.tick_minor)
        } else {
            (3.0, 0.3, &palette.tick_minor)
        };
        let longitude = Longitude::new(deg as f64);
        group.push(Line::new(
            projector.project(radii.sign, longitude),
            projector.project(radii.sign - len, longitude),
            Stroke::solid(color.clone(), width),
        ));
    }
    group
}

/// An aspect pair resolved against the drawn bodies.
struct ResolvedAspect<'a> {
    a: &'a CelestialBody,
    b: &'a CelestialBody,
    kind: AspectKind,
    orb: f64,
}

/// Collect the aspects to draw: precomputed upstream entries when present
/// (skipping malformed ones), otherwise a local sweep over all pairs.
fn resolved_aspects<'a>(
    payload: &ChartPayload,
    bodies: &'a [CelestialBody],
    config: &ChartConfig,
) -> Vec<ResolvedAspect<'a>> {
    let by_name = |name: &str| bodies.iter().find(|b| b.name == name);

    if let Some(records) = &payload.aspects {
        let mut out = Vec::new();
        for record in records {
            let Ok(kind) = record.kind.parse::<AspectKind>() else {
                crate::log::warn!("skipping aspect with unknown type {:?}", record.kind);
                continue;
            };
            let (Some(a), Some(b)) = (by_name(&record.planet1), by_name(&record.planet2)) else {
                crate::log::warn!(
                    "skipping aspect {} - {}: body not in chart",
                    record.planet1,
                    record.planet2
                );
                continue;
            };
            out.push(ResolvedAspect {
                a,
                b,
                kind,
                orb: record.orb,
            });
        }
        return out;
    }

    sweep(bodies, &config.aspects)
        .into_iter()
        .filter_map(|hit| {
            let (a, b) = (by_name(&hit.a)?, by_name(&hit.b)?);
            Some(ResolvedAspect {
                a,
                b,
                kind: hit.relation.kind,
                orb: hit.relation.orb,
            })
        })
        .collect()
}

fn aspect_lines(
    payload: &ChartPayload,
    bodies: &[CelestialBody],
    projector: &Projector,
    config: &ChartConfig,
    view: &ViewState,
) -> Group {
    let mut group = Group::classed("aspects");
    let radii = &config.theme.radii;
    let palette = &config.theme.palette;

    for aspect in resolved_aspects(payload, bodies, config) {
        if aspect.orb >= config.aspects.display_orb_max {
            continue;
        }
        // A highlight narrows the set to aspects touching that body;
        // otherwise the always-show toggle governs
        match &view.highlight {
            Some(active) => {
                if aspect.a.name != *active && aspect.b.name != *active {
                    continue;
                }
            }
            None => {
                if !view.always_show_aspects {
                    continue;
                }
            }
        }

        let (mut color, mut width) = if aspect.kind.is_hard() {
            (palette.aspect_hard.clone(), 1.0)
        } else if aspect.kind.is_soft() {
            (palette.aspect_soft.clone(), 1.0)
        } else {
            (palette.aspect_neutral.clone(), 0.5)
        };
        if aspect.orb < config.aspects.tight_orb {
            width += 0.5;
            color = color.replace("0.3", "0.6");
        }

        let mut line = Line::new(
            projector.project(radii.inner, aspect.a.position),
            projector.project(radii.inner, aspect.b.position),
            Stroke::solid(color, width),
        );
        line.class = Some("aspect-line".into());
        group.push(line);
    }
    group
}

fn structural_rings(projector: &Projector, config: &ChartConfig) -> Group {
    let radii = &config.theme.radii;
    let palette = &config.theme.palette;
    let mut group = Group::classed("rings");
    let ring = |radius: f64, color: &str, width: f64| Circle {
        center: projector.center(),
        radius,
        fill: None,
        stroke: Some(Stroke::solid(color, width)),
    };
    group.push(ring(radii.outer, &palette.frame, 2.0));
    group.push(ring(radii.sign, &palette.frame, 1.0));
    group.push(ring(radii.house, &palette.ring, 0.5));
    group.push(ring(radii.inner, &palette.ring, 0.5));
    group
}

/// Wedge outline between two radii across a sector, both edges arced.
fn arc_band(
    projector: &Projector,
    r_outer: f64,
    r_inner: f64,
    from: Longitude,
    to: Longitude,
) -> PathData {
    let o1 = projector.project(r_outer, from);
    let o2 = projector.project(r_outer, to);
    let i2 = projector.project(r_inner, to);
    let i1 = projector.project(r_inner, from);
    // Increasing longitude sweeps clockwise on screen, so the outer edge
    // runs counter-sweep and the inner edge runs back with the sweep
    PathData::new()
        .move_to(o1)
        .arc_to(r_outer, false, false, o2)
        .line_to(i2)
        .arc_to(r_inner, false, true, i1)
        .close()
}

fn zodiac_band(projector: &Projector, config: &ChartConfig, view: &ViewState) -> Group {
    let radii = &config.theme.radii;
    let palette = &config.theme.palette;
    let fonts = &config.theme.fonts;
    let mut group = Group::classed("zodiac");

    for i in 0..12 {
        let start = Longitude::new(i as f64 * SIGN_SPAN);
        let end = start + SIGN_SPAN;
        group.push(Path {
            data: arc_band(projector, radii.outer, radii.sign, start, end),
            fill: None,
            stroke: Some(Stroke::solid(palette.frame.clone(), 1.0)),
        });

        let element = Element::of_sign(i);
        let mid = start + SIGN_SPAN / 2.0;
        let label_pos = projector.project((radii.outer + radii.sign) / 2.0, mid);
        let label = match view.mode {
            DisplayMode::Symbolic => {
                Text::new(label_pos, zodiac::SIGN_GLYPHS[i], fonts.sign, palette.element(element))
            }
            DisplayMode::Educational => {
                Text::new(label_pos, zodiac::SIGN_NAMES[i], fonts.label, palette.element(element))
            }
        };
        group.push(label.classed(format!("sign-glyph {}", element.class_name())));

        // Sector divider across the inner bands
        group.push(Line::new(
            projector.project(radii.inner, start),
            projector.project(radii.sign, start),
            Stroke::solid(palette.divider.clone(), 1.0),
        ));
    }
    group
}

fn house_band(
    projector: &Projector,
    cusps: &[Longitude; 12],
    config: &ChartConfig,
    view: &ViewState,
) -> Group {
    let radii = &config.theme.radii;
    let palette = &config.theme.palette;
    let fonts = &config.theme.fonts;
    let mut group = Group::classed("houses");
    let number_radius = (radii.house + radii.inner) / 2.0;

    for i in 0..12 {
        group.push(Line::new(
            projector.project(radii.inner, cusps[i]),
            projector.project(radii.sign, cusps[i]),
            Stroke::solid(palette.divider.clone(), 1.0),
        ));

        let width = cusps[(i + 1) % 12].arc_from(cusps[i]);
        if width == 0.0 {
            continue;
        }
        let mid = cusps[i] + width / 2.0;
        group.push(Text::new(
            projector.project(number_radius, mid),
            format!("{}", i + 1),
            fonts.label,
            palette.text.clone(),
        ));
        if view.mode == DisplayMode::Educational {
            group.push(Text::new(
                projector.project(number_radius - 14.0, mid),
                zodiac::HOUSE_KEYWORDS[i],
                fonts.subtext,
                palette.text.clone(),
            ));
        }
    }
    group
}

fn body_glyphs(
    bodies: &[CelestialBody],
    cusps: &[Longitude; 12],
    projector: &Projector,
    config: &ChartConfig,
    view: &ViewState,
) -> Group {
    let radii = &config.theme.radii;
    let palette = &config.theme.palette;
    let fonts = &config.theme.fonts;
    let mut group = Group::classed("bodies");

    for slot in resolve(bodies, &config.collision) {
        let body = &bodies[slot.index];
        let radius = radii.planet_base - slot.track as f64 * radii.planet_step;
        let pos = projector.project(radius, body.position);

        let active = view.highlight.as_deref() == Some(body.name.as_str());
        let class = if active {
            "body-group active"
        } else {
            "body-group"
        };
        let mut body_group =
            Group::classed(class).with_id(format!("body-{}", body.name));

        // Leader line back to the zodiac band
        body_group.push(Line::new(
            pos,
            projector.project(radii.sign - 5.0, body.position),
            Stroke::dashed(palette.leader.clone(), 0.5, "2,2"),
        ));

        body_group.push(Circle {
            center: pos,
            radius: radii.glyph,
            fill: Some(palette.glyph_fill.clone()),
            stroke: Some(Stroke::solid(palette.glyph_stroke.clone(), 1.0)),
        });

        let glyph = match view.mode {
            DisplayMode::Symbolic => match zodiac::body_glyph(&body.name) {
                Some(glyph) => Text::new(pos, glyph, fonts.glyph, palette.text.clone()),
                None => {
                    crate::log::warn!("no glyph for body {:?}, using placeholder", body.name);
                    Text::new(
                        pos,
                        zodiac::placeholder_label(&body.name),
                        fonts.label,
                        palette.text.clone(),
                    )
                }
            },
            DisplayMode::Educational => {
                Text::new(pos, body.name.clone(), fonts.label, palette.text.clone())
            }
        };
        body_group.push(glyph.classed("planet-glyph"));

        body_group.push(Text::new(
            pos + dvec2(0.0, radii.glyph + 8.0),
            body.degree_label(),
            fonts.subtext,
            palette.text.clone(),
        ));

        if body.is_retrograde() {
            body_group.push(Text::new(
                pos + dvec2(radii.glyph * 0.75, -radii.glyph * 0.75),
                "\u{211E}",
                fonts.subtext,
                palette.text.clone(),
            ));
        }

        if view.mode == DisplayMode::Educational {
            body_group.push(Text::new(
                pos + dvec2(0.0, radii.glyph + 18.0),
                format!("H{}", zodiac::house_of(body.position, cusps)),
                fonts.subtext,
                palette.text.clone(),
            ));
        }

        group.push(body_group);
    }
    group
}

fn angle_markers(
    projector: &Projector,
    asc: Longitude,
    mc: Longitude,
    config: &ChartConfig,
) -> Group {
    let radii = &config.theme.radii;
    let palette = &config.theme.palette;
    let fonts = &config.theme.fonts;
    let mut group = Group::classed("angles");

    let markers = [
        ("ASC", asc, true),
        ("DSC", asc.antipode(), false),
        ("MC", mc, true),
        ("IC", mc.antipode(), false),
    ];
    for (label, longitude, arrow) in markers {
        let inner_pt = projector.project(radii.inner, longitude);
        let outer_pt = projector.project(radii.outer + 18.0, longitude);
        group.push(Line::new(
            inner_pt,
            outer_pt,
            Stroke::dashed(palette.angle.clone(), 1.5, "4,2"),
        ));
        if arrow {
            if let Some(head) = arrowhead(inner_pt, outer_pt, 10.0, 8.0, palette.angle.clone()) {
                group.push(head);
            }
        }
        group.push(
            Text::new(
                projector.project(radii.outer + 34.0, longitude),
                label,
                fonts.label,
                palette.angle.clone(),
            )
            .bold(),
        );
    }
    group
}

/// Arrowhead polygon at `end`, pointing away from `start`. `width` is the
/// full base width. Returns `None` for a degenerate spoke.
fn arrowhead(start: DVec2, end: DVec2, length: f64, width: f64, fill: String) -> Option<Polygon> {
    let delta = end - start;
    let len = delta.length();
    if len < 0.001 {
        return None;
    }
    let unit = delta / len;
    let perp = dvec2(-unit.y, unit.x);
    let base = end - unit * length;
    let half = width / 2.0;
    Some(Polygon {
        points: vec![end, base + perp * half, base - perp * half],
        fill,
    })
}

/// Egyptian term boundaries with their ruler glyphs, just inside the
/// zodiac band.
fn term_band(projector: &Projector, config: &ChartConfig) -> Group {
    let radii = &config.theme.radii;
    let palette = &config.theme.palette;
    let fonts = &config.theme.fonts;
    let mut group = Group::classed("terms");

    for (sign, row) in zodiac::EGYPTIAN_TERMS.iter().enumerate() {
        let sign_start = sign as f64 * SIGN_SPAN;
        let mut lower = 0.0;
        for &(bound, ruler) in row {
            let boundary = Longitude::new(sign_start + bound);
            group.push(Line::new(
                projector.project(radii.sign, boundary),
                projector.project(radii.sign - 8.0, boundary),
                Stroke::solid(palette.tick_major.clone(), 0.75),
            ));
            let mid = Longitude::new(sign_start + (lower + bound) / 2.0);
            let label = zodiac::body_glyph(ruler).unwrap_or(ruler);
            group.push(Text::new(
                projector.project(radii.sign - 15.0, mid),
                label,
                fonts.subtext,
                palette.text.clone(),
            ));
            lower = bound;
        }
    }
    group
}

/// Decan (face) divisions every 10 degrees with Chaldean-order rulers.
fn decan_band(projector: &Projector, config: &ChartConfig) -> Group {
    let radii = &config.theme.radii;
    let palette = &config.theme.palette;
    let fonts = &config.theme.fonts;
    let mut group = Group::classed("decans");

    for decan in 0..36 {
        let start = Longitude::new(decan as f64 * 10.0);
        // Sign boundaries already carry a divider
        if decan % 3 != 0 {
            group.push(Line::new(
                projector.project(radii.sign - 20.0, start),
                projector.project(radii.sign - 26.0, start),
                Stroke::solid(palette.tick_minor.clone(), 0.75),
            ));
        }
        let ruler = zodiac::face_ruler(decan);
        let label = zodiac::body_glyph(ruler).unwrap_or(ruler);
        group.push(Text::new(
            projector.project(radii.sign - 33.0, start + 5.0),
            label,
            fonts.subtext,
            palette.text.clone(),
        ));
    }
    group
}

/// Birth-data caption in the top-left corner.
fn caption(meta: &ChartMeta, config: &ChartConfig) -> Group {
    let palette = &config.theme.palette;
    let fonts = &config.theme.fonts;
    let mut group = Group::classed("caption");

    let mut lines: Vec<String> = Vec::new();
    if let Some(name) = &meta.name {
        lines.push(name.clone());
    }
    match (&meta.date, &meta.time) {
        (Some(date), Some(time)) => lines.push(format!("{date} {time}")),
        (Some(date), None) => lines.push(date.clone()),
        (None, Some(time)) => lines.push(time.clone()),
        (None, None) => {}
    }
    if let Some(place) = &meta.place {
        lines.push(place.clone());
    }

    for (i, line) in lines.into_iter().enumerate() {
        group.push(
            Text::new(
                dvec2(16.0, 22.0 + i as f64 * (fonts.caption + 4.0)),
                line,
                fonts.caption,
                palette.text.clone(),
            )
            .anchored(Anchor::Start),
        );
    }
    group
}
