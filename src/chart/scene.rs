//! Typed scene-graph primitives.
//!
//! The assembler emits these instead of markup so the geometry core stays
//! independent of any output dialect; `chart::svg` is one serializer over
//! them and hosts can walk the graph directly (every body glyph lives in a
//! `Group` addressable by id for hover wiring).

use enum_dispatch::enum_dispatch;
use glam::DVec2;

/// Stroke styling shared by lines, paths and circles.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    /// SVG-style dash pattern, e.g. `4,2`.
    pub dash: Option<String>,
}

impl Stroke {
    pub fn solid(color: impl Into<String>, width: f64) -> Stroke {
        Stroke {
            color: color.into(),
            width,
            dash: None,
        }
    }

    pub fn dashed(color: impl Into<String>, width: f64, dash: impl Into<String>) -> Stroke {
        Stroke {
            color: color.into(),
            width,
            dash: Some(dash.into()),
        }
    }
}

/// Horizontal text anchoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Anchor {
    Start,
    #[default]
    Middle,
    End,
}

/// Font weight for text nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// One command of a path outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(DVec2),
    LineTo(DVec2),
    /// Circular arc to `to` with the given radius.
    Arc {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        to: DVec2,
    },
    Close,
}

/// An ordered list of path commands, built fluently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    pub commands: Vec<PathCmd>,
}

impl PathData {
    pub fn new() -> PathData {
        PathData::default()
    }

    pub fn move_to(mut self, to: DVec2) -> PathData {
        self.commands.push(PathCmd::MoveTo(to));
        self
    }

    pub fn line_to(mut self, to: DVec2) -> PathData {
        self.commands.push(PathCmd::LineTo(to));
        self
    }

    pub fn arc_to(mut self, radius: f64, large_arc: bool, sweep: bool, to: DVec2) -> PathData {
        self.commands.push(PathCmd::Arc {
            radius,
            large_arc,
            sweep,
            to,
        });
        self
    }

    pub fn close(mut self) -> PathData {
        self.commands.push(PathCmd::Close);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
    pub fill: Option<String>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub from: DVec2,
    pub to: DVec2,
    pub stroke: Stroke,
    pub class: Option<String>,
}

impl Line {
    pub fn new(from: DVec2, to: DVec2, stroke: Stroke) -> Line {
        Line {
            from,
            to,
            stroke,
            class: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub data: PathData,
    pub fill: Option<String>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub pos: DVec2,
    pub content: String,
    pub size: f64,
    pub fill: String,
    pub anchor: Anchor,
    pub weight: FontWeight,
    pub class: Option<String>,
}

impl Text {
    pub fn new(pos: DVec2, content: impl Into<String>, size: f64, fill: impl Into<String>) -> Text {
        Text {
            pos,
            content: content.into(),
            size,
            fill: fill.into(),
            anchor: Anchor::Middle,
            weight: FontWeight::Normal,
            class: None,
        }
    }

    pub fn bold(mut self) -> Text {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn anchored(mut self, anchor: Anchor) -> Text {
        self.anchor = anchor;
        self
    }

    pub fn classed(mut self, class: impl Into<String>) -> Text {
        self.class = Some(class.into());
        self
    }
}

/// Filled polygon (angle-marker arrowheads).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: Vec<DVec2>,
    pub fill: String,
}

/// A named, classed container of child nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub id: Option<String>,
    pub class: Option<String>,
    pub children: Vec<SceneNode>,
}

impl Group {
    pub fn classed(class: impl Into<String>) -> Group {
        Group {
            id: None,
            class: Some(class.into()),
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Group {
        self.id = Some(id.into());
        self
    }

    pub fn push(&mut self, node: impl Into<SceneNode>) {
        self.children.push(node.into());
    }
}

/// Any drawable node. Dispatch to the SVG emitter is generated by
/// `enum_dispatch` against the serializer's trait.
#[enum_dispatch(EmitSvg)]
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Circle(Circle),
    Line(Line),
    Path(Path),
    Text(Text),
    Polygon(Polygon),
    Group(Group),
}

/// A complete assembled chart: a square drawing surface plus its nodes in
/// paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: f64,
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    /// Find a group by id anywhere in the graph (body glyph groups are
    /// `body-<name>`).
    pub fn find_group(&self, id: &str) -> Option<&Group> {
        fn walk<'a>(nodes: &'a [SceneNode], id: &str) -> Option<&'a Group> {
            for node in nodes {
                if let SceneNode::Group(g) = node {
                    if g.id.as_deref() == Some(id) {
                        return Some(g);
                    }
                    if let Some(found) = walk(&g.children, id) {
                        return Some(found);
                    }
                }
            }
            None
        }
        walk(&self.nodes, id)
    }
}
