//! Element model: canvas elements, their kind-specific attributes, and edits.
//!
//! An [`Element`] is a shared [`ElementBase`] (identity, geometry, opacity,
//! visibility, lock) plus an [`ElementKind`] carrying only the attributes that
//! make sense for that kind. Groups own their children, whose coordinates are
//! relative to the group's origin.
//!
//! New elements enter the document as an [`ElementDraft`] (an element without
//! an id); the store assigns the id. Edits arrive as an [`ElementPatch`], a
//! sparse update where only present fields are applied.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{CREATE_OFFSET_X, CREATE_OFFSET_Y};
use crate::view::Point;

/// Unique identifier for a canvas element.
pub type ElementId = Uuid;

/// Discriminant of an element's kind, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Rectangle,
    Circle,
    Line,
    Image,
    Icon,
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// How an image fills its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

/// Axis-aligned rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Smallest rectangle covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// Attributes shared by every element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementBase {
    /// Unique identifier, immutable after creation.
    pub id: ElementId,
    /// Display name shown in the layer list.
    pub name: String,
    /// Left edge in canvas units (relative to the parent group's origin for children).
    pub x: f64,
    /// Top edge in canvas units (relative to the parent group's origin for children).
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees around the bounding-box center. Never normalized.
    pub rotation: f64,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
    pub visible: bool,
    /// Blocks move/resize/rotate/delete; property edits stay allowed.
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextProps {
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub text_decoration: TextDecoration,
    pub text_align: TextAlign,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
    pub color: String,
}

/// Rectangle and circle attributes. Circles render fully rounded regardless of `corner_radius`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeProps {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub corner_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineProps {
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageProps {
    /// Inline image source (a base64 data URI).
    pub src: String,
    pub fit: ImageFit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconProps {
    pub icon_name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupProps {
    /// Owned children in z-order, positioned relative to the group's origin.
    pub children: Vec<Element>,
}

/// Kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text(TextProps),
    Rectangle(ShapeProps),
    Circle(ShapeProps),
    Line(LineProps),
    Image(ImageProps),
    Icon(IconProps),
    Group(GroupProps),
}

impl ElementKind {
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Text(_) => ElementType::Text,
            Self::Rectangle(_) => ElementType::Rectangle,
            Self::Circle(_) => ElementType::Circle,
            Self::Line(_) => ElementType::Line,
            Self::Image(_) => ElementType::Image,
            Self::Icon(_) => ElementType::Icon,
            Self::Group(_) => ElementType::Group,
        }
    }
}

/// A canvas element as stored in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(flatten)]
    pub base: ElementBase,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.base.id
    }

    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ElementKind::Group(_))
    }

    /// Children of a group, or an empty slice for any other kind.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        match &self.kind {
            ElementKind::Group(group) => &group.children,
            _ => &[],
        }
    }

    /// Unrotated bounding box.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.base.x, self.base.y, self.base.width, self.base.height)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Whether `pt` lies inside the element's box once the element's rotation is undone.
    #[must_use]
    pub fn contains_point(&self, pt: Point) -> bool {
        let local = rotate_about(pt, self.center(), -self.base.rotation);
        let b = self.bounds();
        local.x >= b.x && local.x <= b.right() && local.y >= b.y && local.y <= b.bottom()
    }

    /// Copy of this element under a freshly generated id.
    #[must_use]
    pub fn with_fresh_id(&self) -> Element {
        let mut copy = self.clone();
        copy.base.id = Uuid::new_v4();
        copy
    }
}

/// Rotate `pt` clockwise by `degrees` around `center` (y axis pointing down).
#[must_use]
pub fn rotate_about(pt: Point, center: Point, degrees: f64) -> Point {
    if degrees == 0.0 {
        return pt;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = pt.x - center.x;
    let dy = pt.y - center.y;
    Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
}

/// An element that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDraft {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub opacity: f64,
    pub visible: bool,
    pub locked: bool,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl ElementDraft {
    /// Draft with default common attributes (unrotated, opaque, visible, unlocked).
    #[must_use]
    pub fn new(name: impl Into<String>, bounds: Rect, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            rotation: 0.0,
            opacity: 1.0,
            visible: true,
            locked: false,
            kind,
        }
    }

    /// Default text element created by a click at `at`.
    #[must_use]
    pub fn text_at(at: Point) -> Self {
        Self::new(
            "New Text",
            created_bounds(at, 150.0, 30.0),
            ElementKind::Text(TextProps {
                content: "Double-click to edit".into(),
                font_family: "Inter".into(),
                font_size: 16.0,
                font_weight: FontWeight::Normal,
                font_style: FontStyle::Normal,
                text_decoration: TextDecoration::None,
                text_align: TextAlign::Left,
                line_height: 1.4,
                color: "#1a1a1a".into(),
            }),
        )
    }

    #[must_use]
    pub fn rectangle_at(at: Point) -> Self {
        Self::new(
            "Rectangle",
            created_bounds(at, 100.0, 60.0),
            ElementKind::Rectangle(ShapeProps {
                fill: "#E5E7EB".into(),
                stroke: "#9CA3AF".into(),
                stroke_width: 1.0,
                corner_radius: 8.0,
            }),
        )
    }

    #[must_use]
    pub fn circle_at(at: Point) -> Self {
        Self::new(
            "Circle",
            created_bounds(at, 80.0, 80.0),
            ElementKind::Circle(ShapeProps {
                fill: "#DBEAFE".into(),
                stroke: "#3B82F6".into(),
                stroke_width: 1.0,
                corner_radius: 50.0,
            }),
        )
    }

    #[must_use]
    pub fn line_at(at: Point) -> Self {
        Self::new(
            "Line",
            created_bounds(at, 100.0, 2.0),
            ElementKind::Line(LineProps { stroke: "#6B7280".into(), stroke_width: 2.0 }),
        )
    }

    /// Image element occupying `bounds` with the default `cover` fit.
    #[must_use]
    pub fn image(src: impl Into<String>, bounds: Rect) -> Self {
        Self::new("Image", bounds, ElementKind::Image(ImageProps { src: src.into(), fit: ImageFit::Cover }))
    }

    #[must_use]
    pub fn icon(icon_name: impl Into<String>, bounds: Rect) -> Self {
        let icon_name = icon_name.into();
        Self::new(
            icon_name.clone(),
            bounds,
            ElementKind::Icon(IconProps { icon_name, color: "#1a1a1a".into() }),
        )
    }

    /// Whether the draft carries usable geometry and opacity.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let finite = [self.x, self.y, self.width, self.height, self.rotation]
            .iter()
            .all(|v| v.is_finite());
        finite && self.width >= 0.0 && self.height >= 0.0 && (0.0..=1.0).contains(&self.opacity)
    }

    /// Attach `id`, producing a live element.
    #[must_use]
    pub fn into_element(self, id: ElementId) -> Element {
        Element {
            base: ElementBase {
                id,
                name: self.name,
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                rotation: self.rotation,
                opacity: self.opacity,
                visible: self.visible,
                locked: self.locked,
            },
            kind: self.kind,
        }
    }
}

fn created_bounds(at: Point, width: f64, height: f64) -> Rect {
    Rect::new(at.x - CREATE_OFFSET_X, at.y - CREATE_OFFSET_Y, width, height)
}

/// Sparse update for an element. Only present fields are applied; fields that
/// do not exist on the target's kind are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,

    // Text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    /// Text or icon color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    // Shapes and lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,

    // Images and icons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<ImageFit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
}

impl ElementPatch {
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    #[must_use]
    pub fn size(width: f64, height: f64) -> Self {
        Self { width: Some(width), height: Some(height), ..Default::default() }
    }

    #[must_use]
    pub fn bounds(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn rotation(rotation: f64) -> Self {
        Self { rotation: Some(rotation), ..Default::default() }
    }

    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), ..Default::default() }
    }

    /// Merge every present field into `element`.
    pub fn apply(&self, element: &mut Element) {
        let base = &mut element.base;
        if let Some(ref name) = self.name {
            base.name.clone_from(name);
        }
        if let Some(x) = self.x {
            base.x = x;
        }
        if let Some(y) = self.y {
            base.y = y;
        }
        if let Some(w) = self.width {
            base.width = w;
        }
        if let Some(h) = self.height {
            base.height = h;
        }
        if let Some(r) = self.rotation {
            base.rotation = r;
        }
        if let Some(o) = self.opacity.filter(|o| o.is_finite()) {
            base.opacity = o.clamp(0.0, 1.0);
        }
        if let Some(v) = self.visible {
            base.visible = v;
        }
        if let Some(l) = self.locked {
            base.locked = l;
        }

        match &mut element.kind {
            ElementKind::Text(text) => self.apply_text(text),
            ElementKind::Rectangle(shape) | ElementKind::Circle(shape) => self.apply_shape(shape),
            ElementKind::Line(line) => {
                set_string(&mut line.stroke, self.stroke.as_ref());
                if let Some(w) = self.stroke_width {
                    line.stroke_width = w.max(0.0);
                }
            }
            ElementKind::Image(image) => {
                set_string(&mut image.src, self.src.as_ref());
                if let Some(fit) = self.fit {
                    image.fit = fit;
                }
            }
            ElementKind::Icon(icon) => {
                set_string(&mut icon.icon_name, self.icon_name.as_ref());
                set_string(&mut icon.color, self.color.as_ref());
            }
            ElementKind::Group(_) => {}
        }
    }

    fn apply_text(&self, text: &mut TextProps) {
        set_string(&mut text.content, self.content.as_ref());
        set_string(&mut text.font_family, self.font_family.as_ref());
        set_f64(&mut text.font_size, self.font_size);
        if let Some(w) = self.font_weight {
            text.font_weight = w;
        }
        if let Some(s) = self.font_style {
            text.font_style = s;
        }
        if let Some(d) = self.text_decoration {
            text.text_decoration = d;
        }
        if let Some(a) = self.text_align {
            text.text_align = a;
        }
        set_f64(&mut text.line_height, self.line_height);
        set_string(&mut text.color, self.color.as_ref());
    }

    fn apply_shape(&self, shape: &mut ShapeProps) {
        set_string(&mut shape.fill, self.fill.as_ref());
        set_string(&mut shape.stroke, self.stroke.as_ref());
        if let Some(w) = self.stroke_width {
            shape.stroke_width = w.max(0.0);
        }
        set_f64(&mut shape.corner_radius, self.corner_radius);
    }
}

fn set_string(target: &mut String, value: Option<&String>) {
    if let Some(v) = value {
        target.clone_from(v);
    }
}

fn set_f64(target: &mut f64, value: Option<f64>) {
    if let Some(v) = value {
        *target = v;
    }
}
