use crate::capture::surface::Rgba8;

/// Freehand paths drop points past this cap rather than growing unbounded.
pub const MAX_FREEHAND_POINTS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const RED: Self = Self::rgba(1.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    pub fn to_rgba8(self) -> Rgba8 {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba8::rgba(byte(self.r), byte(self.g), byte(self.b), byte(self.a))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::RED
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Arial".to_string(),
            size: 14.0,
            bold: false,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Arrow,
    Rectangle,
    Ellipse,
    Text,
    Freehand,
}

/// The current brush. Copied into every annotation at creation time so that
/// later tool changes never retroactively alter existing annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub stroke: Color,
    pub line_width: f32,
    pub fill: bool,
    pub font: FontSpec,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            stroke: Color::RED,
            line_width: 2.0,
            fill: false,
            font: FontSpec::default(),
        }
    }
}

/// Shape bounds as drag start/end points. Semantics vary by variant: drag
/// endpoints for arrow/rectangle/ellipse, anchor plus measured extent for
/// text, point bounding box for freehand.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Bounds {
    pub fn at_point(x: f32, y: f32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x,
            y2: y,
        }
    }

    /// `(min x, min y, |dx|, |dy|)`.
    pub fn normalized(&self) -> (f32, f32, f32, f32) {
        (
            self.x1.min(self.x2),
            self.y1.min(self.y2),
            (self.x2 - self.x1).abs(),
            (self.y2 - self.y1).abs(),
        )
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x1 += dx;
        self.y1 += dy;
        self.x2 += dx;
        self.y2 += dy;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationKind {
    Arrow,
    Rectangle,
    Ellipse,
    Text(String),
    Freehand(Vec<(f32, f32)>),
}

/// One vector shape or text object overlaid on a captured image.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub settings: ToolSettings,
    pub bounds: Bounds,
    pub kind: AnnotationKind,
}

impl Annotation {
    /// Deep-copies the settings (including the font family string) and
    /// zero-initializes the geometry.
    pub fn new(tool: ToolKind, settings: &ToolSettings) -> Self {
        let kind = match tool {
            ToolKind::Arrow => AnnotationKind::Arrow,
            ToolKind::Rectangle => AnnotationKind::Rectangle,
            ToolKind::Ellipse => AnnotationKind::Ellipse,
            ToolKind::Text => AnnotationKind::Text(String::new()),
            ToolKind::Freehand => AnnotationKind::Freehand(Vec::new()),
        };
        Self {
            settings: settings.clone(),
            bounds: Bounds::default(),
            kind,
        }
    }

    pub fn tool(&self) -> ToolKind {
        match self.kind {
            AnnotationKind::Arrow => ToolKind::Arrow,
            AnnotationKind::Rectangle => ToolKind::Rectangle,
            AnnotationKind::Ellipse => ToolKind::Ellipse,
            AnnotationKind::Text(_) => ToolKind::Text,
            AnnotationKind::Freehand(_) => ToolKind::Freehand,
        }
    }

    /// Append a freehand point, keeping the bounding box current. Points past
    /// the cap are dropped. No-op for other variants.
    pub fn push_point(&mut self, x: f32, y: f32) {
        let AnnotationKind::Freehand(points) = &mut self.kind else {
            return;
        };
        if points.len() >= MAX_FREEHAND_POINTS {
            return;
        }
        if points.is_empty() {
            self.bounds = Bounds::at_point(x, y);
        } else {
            self.bounds.x1 = self.bounds.x1.min(x);
            self.bounds.y1 = self.bounds.y1.min(y);
            self.bounds.x2 = self.bounds.x2.max(x);
            self.bounds.y2 = self.bounds.y2.max(y);
        }
        points.push((x, y));
    }
}
