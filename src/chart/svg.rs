//! Scene serialization to SVG.
//!
//! One serializer over the scene graph; swapping the output dialect means
//! swapping this module, not touching the assembler. Numbers are written
//! in C `%g` style (6 significant figures, trailing zeros trimmed) so the
//! markup stays compact and stable across renders.

use enum_dispatch::enum_dispatch;
use svg::Document;
use svg::node::element as el;

use super::scene::{
    Anchor, Circle, FontWeight, Group, Line, Path, PathCmd, PathData, Polygon, Scene, SceneNode,
    Stroke, Text,
};

/// Serialize a scene to a standalone SVG document.
pub fn to_svg(scene: &Scene) -> String {
    let size = fmt_num(scene.size);
    let mut document = Document::new()
        .set("viewBox", format!("0 0 {size} {size}"))
        .set("width", size.clone())
        .set("height", size);
    for node in &scene.nodes {
        document = document.add(node.emit());
    }
    document.to_string()
}

/// Emission of one scene node as an SVG DOM node.
#[enum_dispatch]
pub(crate) trait EmitSvg {
    fn emit(&self) -> Box<dyn svg::node::Node>;
}

impl EmitSvg for Circle {
    fn emit(&self) -> Box<dyn svg::node::Node> {
        let mut node = el::Circle::new()
            .set("cx", fmt_num(self.center.x))
            .set("cy", fmt_num(self.center.y))
            .set("r", fmt_num(self.radius))
            .set("fill", self.fill.clone().unwrap_or_else(|| "none".into()));
        if let Some(stroke) = &self.stroke {
            node = apply_stroke(node, stroke);
        }
        Box::new(node)
    }
}

impl EmitSvg for Line {
    fn emit(&self) -> Box<dyn svg::node::Node> {
        let mut node = el::Line::new()
            .set("x1", fmt_num(self.from.x))
            .set("y1", fmt_num(self.from.y))
            .set("x2", fmt_num(self.to.x))
            .set("y2", fmt_num(self.to.y));
        node = apply_stroke(node, &self.stroke);
        if let Some(class) = &self.class {
            node = node.set("class", class.clone());
        }
        Box::new(node)
    }
}

impl EmitSvg for Path {
    fn emit(&self) -> Box<dyn svg::node::Node> {
        let mut node = el::Path::new()
            .set("d", path_data_string(&self.data))
            .set("fill", self.fill.clone().unwrap_or_else(|| "none".into()));
        if let Some(stroke) = &self.stroke {
            node = apply_stroke(node, stroke);
        }
        Box::new(node)
    }
}

impl EmitSvg for Text {
    fn emit(&self) -> Box<dyn svg::node::Node> {
        let anchor = match self.anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        let mut node = el::Text::new(self.content.clone())
            .set("x", fmt_num(self.pos.x))
            .set("y", fmt_num(self.pos.y))
            .set("font-size", fmt_num(self.size))
            .set("fill", self.fill.clone())
            .set("text-anchor", anchor)
            .set("dominant-baseline", "central");
        if self.weight == FontWeight::Bold {
            node = node.set("font-weight", "bold");
        }
        if let Some(class) = &self.class {
            node = node.set("class", class.clone());
        }
        Box::new(node)
    }
}

impl EmitSvg for Polygon {
    fn emit(&self) -> Box<dyn svg::node::Node> {
        let points = self
            .points
            .iter()
            .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        Box::new(
            el::Polygon::new()
                .set("points", points)
                .set("fill", self.fill.clone()),
        )
    }
}

impl EmitSvg for Group {
    fn emit(&self) -> Box<dyn svg::node::Node> {
        let mut node = el::Group::new();
        if let Some(id) = &self.id {
            node = node.set("id", id.clone());
        }
        if let Some(class) = &self.class {
            node = node.set("class", class.clone());
        }
        for child in &self.children {
            node = node.add(child.emit());
        }
        Box::new(node)
    }
}

fn apply_stroke<T: svg::node::Node>(mut node: T, stroke: &Stroke) -> T {
    node.assign("stroke", stroke.color.clone());
    node.assign("stroke-width", fmt_num(stroke.width));
    if let Some(dash) = &stroke.dash {
        node.assign("stroke-dasharray", dash.clone());
    }
    node.assign("stroke-linecap", "round");
    node
}

/// Render typed path commands into an SVG `d` attribute.
fn path_data_string(data: &PathData) -> String {
    let mut d = String::new();
    for cmd in &data.commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match cmd {
            PathCmd::MoveTo(p) => {
                d.push_str(&format!("M {} {}", fmt_num(p.x), fmt_num(p.y)));
            }
            PathCmd::LineTo(p) => {
                d.push_str(&format!("L {} {}", fmt_num(p.x), fmt_num(p.y)));
            }
            PathCmd::Arc {
                radius,
                large_arc,
                sweep,
                to,
            } => {
                let r = fmt_num(*radius);
                d.push_str(&format!(
                    "A {r} {r} 0 {} {} {} {}",
                    *large_arc as u8,
                    *sweep as u8,
                    fmt_num(to.x),
                    fmt_num(to.y)
                ));
            }
            PathCmd::Close => d.push('Z'),
        }
    }
    d
}

/// Format a number matching C's %g format (6 significant figures, trailing
/// zeros trimmed).
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    const SIG_FIGS: i32 = 6;
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(SIG_FIGS - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (SIG_FIGS - 1 - magnitude).max(0) as usize;
    let s = format!("{rounded:.decimals$}");
    let s = s.trim_end_matches('0');
    s.trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn fmt_num_trims_like_percent_g() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(250.0), "250");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(-0.5), "-0.5");
        assert_eq!(fmt_num(0.123456789), "0.123457");
        assert_eq!(fmt_num(399.99999999999994), "400");
    }

    #[test]
    fn path_data_renders_arcs_with_flags() {
        let data = PathData::new()
            .move_to(dvec2(10.0, 20.0))
            .arc_to(100.0, false, true, dvec2(30.0, 40.0))
            .close();
        assert_eq!(path_data_string(&data), "M 10 20 A 100 100 0 0 1 30 40 Z");
    }

    #[test]
    fn scene_serializes_to_svg_markup() {
        let mut group = Group::classed("bodies").with_id("body-Sun");
        group.push(Circle {
            center: dvec2(150.0, 400.0),
            radius: 16.0,
            fill: Some("#fff".into()),
            stroke: Some(Stroke::solid("#111", 1.0)),
        });
        let scene = Scene {
            size: 800.0,
            nodes: vec![group.into()],
        };
        let markup = to_svg(&scene);
        assert!(markup.starts_with("<svg"));
        assert!(markup.contains("viewBox=\"0 0 800 800\""));
        assert!(markup.contains("id=\"body-Sun\""));
        assert!(markup.contains("cx=\"150\""));
        assert!(markup.contains("stroke-linecap=\"round\""));
    }
}
