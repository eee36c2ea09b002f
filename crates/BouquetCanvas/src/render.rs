//! # Rendering System
//!
//! The Canvas never draws pixels itself. Drawers record into a [`DrawList`],
//! which bakes the current placement into every command and yields a plain
//! display list of [`DrawCommand`]s. The host (or [`crate::raster`]) is
//! responsible for interpreting those commands.

use std::ops::Range;

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outline settings for a shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Line color (RGBA, 0.0 - 1.0).
    pub color: Vec4,
    /// Line thickness in canvas pixels.
    pub width: f32,
}

/// Fill and outline of a shape. Either may be absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill: Option<Vec4>,
    pub stroke: Option<Stroke>,
}

impl ShapeStyle {
    pub fn fill(color: Vec4) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    pub fn stroke(color: Vec4, width: f32) -> Self {
        Self {
            fill: None,
            stroke: Some(Stroke { color, width }),
        }
    }

    /// Adds an outline to this style.
    pub fn with_stroke(mut self, color: Vec4, width: f32) -> Self {
        self.stroke = Some(Stroke { color, width });
        self
    }
}

/// Horizontal alignment of text relative to its anchor.
///
/// The anchor sits on the bottom edge of the line box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// One element of a vector path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathEl {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo(Vec2, Vec2),
    CubicTo(Vec2, Vec2, Vec2),
    /// A circular arc swept clockwise (y-down) from `start` to `end` radians.
    /// Connects to the current point with a line, or starts a new subpath.
    Arc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
    },
    Close,
}

/// A vector path under construction.
///
/// Built with chained calls, then handed to [`DrawList::path`] which places it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub elements: Vec<PathEl>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: Vec2) -> Self {
        self.elements.push(PathEl::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Vec2) -> Self {
        self.elements.push(PathEl::LineTo(p));
        self
    }

    pub fn quad_to(mut self, ctrl: Vec2, to: Vec2) -> Self {
        self.elements.push(PathEl::QuadTo(ctrl, to));
        self
    }

    pub fn cubic_to(mut self, c1: Vec2, c2: Vec2, to: Vec2) -> Self {
        self.elements.push(PathEl::CubicTo(c1, c2, to));
        self
    }

    pub fn arc(mut self, center: Vec2, radius: f32, start: f32, end: f32) -> Self {
        self.elements.push(PathEl::Arc {
            center,
            radius,
            start,
            end,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.elements.push(PathEl::Close);
        self
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: impl IntoIterator<Item = Vec2>) -> Self {
        let mut path = Self::new();
        for (i, p) in points.into_iter().enumerate() {
            path = if i == 0 { path.move_to(p) } else { path.line_to(p) };
        }
        path.close()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A single drawing primitive.
///
/// Coordinates are in **Canvas Space** (backing-store pixels).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Floods the whole surface.
    Fill { color: Vec4 },
    /// A circle.
    Circle {
        center: Vec2,
        radius: f32,
        style: ShapeStyle,
    },
    /// An ellipse rotated by `rotation` radians around its center.
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        style: ShapeStyle,
    },
    /// An arbitrary path.
    Path { elements: Vec<PathEl>, style: ShapeStyle },
    /// A filled disc with a soft drop shadow, used for selection feedback.
    Halo {
        center: Vec2,
        radius: f32,
        color: Vec4,
        shadow: Vec4,
        blur: f32,
    },
    /// Text to be rendered.
    Text {
        /// Bottom anchor in canvas pixels.
        anchor: Vec2,
        text: String,
        color: Vec4,
        /// Font size in pixels (approximate).
        size: f32,
        align: TextAlign,
    },
}

/// A list of draw commands representing the current frame.
pub type RenderList = Vec<DrawCommand>;

/// A rigid placement: rotate by `angle`, then translate to `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub origin: Vec2,
    pub angle: f32,
}

impl Placement {
    pub const IDENTITY: Self = Self {
        origin: Vec2::ZERO,
        angle: 0.0,
    };

    /// Maps a local point into the parent space.
    pub fn apply(&self, p: Vec2) -> Vec2 {
        if self.angle == 0.0 {
            return self.origin + p;
        }
        let (sin, cos) = self.angle.sin_cos();
        self.origin + Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
    }

    /// `child` expressed in this placement's parent space.
    pub fn then(&self, child: Placement) -> Placement {
        Placement {
            origin: self.apply(child.origin),
            angle: self.angle + child.angle,
        }
    }
}

/// Recording drawing surface.
///
/// Behaves like a canvas context with a save/restore stack restricted to
/// translation and rotation. The stack can only be manipulated through
/// [`DrawList::with_placement`], which always restores on return.
#[derive(Debug)]
pub struct DrawList {
    commands: RenderList,
    placement: Placement,
    stack: Vec<Placement>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            placement: Placement::IDENTITY,
            stack: Vec::new(),
        }
    }

    /// Number of commands recorded so far.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of placements currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The placement applied to newly recorded commands.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> RenderList {
        self.commands
    }

    /// Runs `f` with the local origin moved to `origin` and rotated by `angle`.
    pub fn with_placement<R>(
        &mut self,
        origin: Vec2,
        angle: f32,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.stack.push(self.placement);
        self.placement = self.placement.then(Placement { origin, angle });
        let result = f(self);
        if let Some(previous) = self.stack.pop() {
            self.placement = previous;
        }
        result
    }

    pub fn fill_surface(&mut self, color: Vec4) {
        self.commands.push(DrawCommand::Fill { color });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, style: ShapeStyle) {
        self.commands.push(DrawCommand::Circle {
            center: self.placement.apply(center),
            radius,
            style,
        });
    }

    pub fn ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, style: ShapeStyle) {
        self.commands.push(DrawCommand::Ellipse {
            center: self.placement.apply(center),
            radii,
            rotation: rotation + self.placement.angle,
            style,
        });
    }

    pub fn path(&mut self, path: Path, style: ShapeStyle) {
        if path.is_empty() {
            return;
        }
        let placement = self.placement;
        let elements = path
            .elements
            .into_iter()
            .map(|el| match el {
                PathEl::MoveTo(p) => PathEl::MoveTo(placement.apply(p)),
                PathEl::LineTo(p) => PathEl::LineTo(placement.apply(p)),
                PathEl::QuadTo(c, p) => PathEl::QuadTo(placement.apply(c), placement.apply(p)),
                PathEl::CubicTo(c1, c2, p) => PathEl::CubicTo(
                    placement.apply(c1),
                    placement.apply(c2),
                    placement.apply(p),
                ),
                PathEl::Arc {
                    center,
                    radius,
                    start,
                    end,
                } => PathEl::Arc {
                    center: placement.apply(center),
                    radius,
                    start: start + placement.angle,
                    end: end + placement.angle,
                },
                PathEl::Close => PathEl::Close,
            })
            .collect();
        self.commands.push(DrawCommand::Path { elements, style });
    }

    pub fn halo(&mut self, center: Vec2, radius: f32, color: Vec4, shadow: Vec4, blur: f32) {
        self.commands.push(DrawCommand::Halo {
            center: self.placement.apply(center),
            radius,
            color,
            shadow,
            blur,
        });
    }

    pub fn text(
        &mut self,
        anchor: Vec2,
        text: impl Into<String>,
        color: Vec4,
        size: f32,
        align: TextAlign,
    ) {
        self.commands.push(DrawCommand::Text {
            anchor: self.placement.apply(anchor),
            text: text.into(),
            color,
            size,
            align,
        });
    }
}

/// The compositing layer a span of commands belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Background,
    Wrapper,
    Stem,
    Highlight,
    Head,
    Ribbon,
    Watermark,
}

/// A contiguous run of commands produced for one layer (and, for per-flower
/// layers, one flower).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub layer: Layer,
    pub flower: Option<Uuid>,
    pub range: Range<usize>,
}

/// A fully composed frame: the display list plus its layer bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub commands: RenderList,
    pub spans: Vec<Span>,
}

impl Frame {
    /// Commands recorded for `layer`, in draw order.
    pub fn layer_commands(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.spans
            .iter()
            .filter(move |span| span.layer == layer)
            .flat_map(|span| self.commands[span.range.clone()].iter())
    }

    /// Spans of `layer`, in draw order.
    pub fn spans_of(&self, layer: Layer) -> impl Iterator<Item = &Span> {
        self.spans.iter().filter(move |span| span.layer == layer)
    }
}
