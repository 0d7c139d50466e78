use crate::annotate::model::{Annotation, AnnotationKind, Color};
use crate::annotate::text::TextShaper;
use crate::capture::surface::{PixelSurface, Rgba8};

const ARROW_SHAFT_WIDTH: f32 = 3.0;
const ARROW_HEAD_SETBACK: f32 = 12.0;
const ARROW_OUTLINE_WIDTH: f32 = 1.0;

/// Head length is proportional to the shaft but clamped so short arrows do
/// not get oversized heads and long arrows do not get vanishing ones.
pub fn arrow_head_length(shaft_length: f32) -> f32 {
    (shaft_length * 0.15).clamp(12.0, 20.0)
}

fn stamp_brush(surface: &mut PixelSurface, cx: i32, cy: i32, radius: f32, color: Rgba8) {
    let r = radius.max(0.0);
    let span = r.ceil() as i32;
    for dy in -span..=span {
        for dx in -span..=span {
            if (dx * dx + dy * dy) as f32 <= r * r {
                let (x, y) = (cx + dx, cy + dy);
                if surface.contains(x, y) {
                    surface.blend_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
}

/// Elliptical pen used for ellipse outlines, where the stroke thickness
/// follows the axis ratio of the shape being drawn.
fn stamp_elliptical_brush(
    surface: &mut PixelSurface,
    cx: i32,
    cy: i32,
    rx: f32,
    ry: f32,
    color: Rgba8,
) {
    let (rx, ry) = (rx.max(0.5), ry.max(0.5));
    let (span_x, span_y) = (rx.ceil() as i32, ry.ceil() as i32);
    for dy in -span_y..=span_y {
        for dx in -span_x..=span_x {
            let nx = dx as f32 / rx;
            let ny = dy as f32 / ry;
            if nx * nx + ny * ny <= 1.0 {
                let (x, y) = (cx + dx, cy + dy);
                if surface.contains(x, y) {
                    surface.blend_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
}

/// Bresenham walk stamping a circular brush at every step.
pub fn draw_segment(
    surface: &mut PixelSurface,
    start: (f32, f32),
    end: (f32, f32),
    color: Color,
    line_width: f32,
) {
    let src = color.to_rgba8();
    let radius = (line_width / 2.0).max(0.5);
    let mut x0 = start.0.round() as i32;
    let mut y0 = start.1.round() as i32;
    let x1 = end.0.round() as i32;
    let y1 = end.1.round() as i32;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        stamp_brush(surface, x0, y0, radius, src);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

pub fn stroke_polyline(
    surface: &mut PixelSurface,
    points: &[(f32, f32)],
    color: Color,
    line_width: f32,
) {
    match points {
        [] => {}
        [only] => draw_segment(surface, *only, *only, color, line_width),
        _ => {
            for pair in points.windows(2) {
                draw_segment(surface, pair[0], pair[1], color, line_width);
            }
        }
    }
}

pub fn fill_rect(surface: &mut PixelSurface, x: f32, y: f32, w: f32, h: f32, color: Color) {
    let src = color.to_rgba8();
    let x0 = x.round() as i32;
    let y0 = y.round() as i32;
    let x1 = (x + w).round() as i32;
    let y1 = (y + h).round() as i32;
    for py in y0..=y1 {
        for px in x0..=x1 {
            if surface.contains(px, py) {
                surface.blend_pixel(px as u32, py as u32, src);
            }
        }
    }
}

pub fn stroke_rect(
    surface: &mut PixelSurface,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    color: Color,
    line_width: f32,
) {
    let corners = [
        (x, y),
        (x + w, y),
        (x + w, y + h),
        (x, y + h),
        (x, y),
    ];
    stroke_polyline(surface, &corners, color, line_width);
}

pub fn fill_ellipse(
    surface: &mut PixelSurface,
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
    color: Color,
) {
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    let src = color.to_rgba8();
    let y0 = (cy - ry).floor() as i32;
    let y1 = (cy + ry).ceil() as i32;
    for py in y0..=y1 {
        let ny = (py as f32 - cy) / ry;
        if ny.abs() > 1.0 {
            continue;
        }
        let half = rx * (1.0 - ny * ny).sqrt();
        let x0 = (cx - half).round() as i32;
        let x1 = (cx + half).round() as i32;
        for px in x0..=x1 {
            if surface.contains(px, py) {
                surface.blend_pixel(px as u32, py as u32, src);
            }
        }
    }
}

/// Walk the ellipse parametrically, stamping a pen whose radii scale with
/// the axis ratio. The stroke is therefore thinner along the shorter axis,
/// matching the look of a uniformly scaled circle outline.
pub fn stroke_ellipse(
    surface: &mut PixelSurface,
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
    color: Color,
    line_width: f32,
) {
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    let src = color.to_rgba8();
    let r_max = rx.max(ry);
    let pen_rx = (line_width / 2.0) * (rx / r_max);
    let pen_ry = (line_width / 2.0) * (ry / r_max);

    let circumference = std::f32::consts::PI * (3.0 * (rx + ry) - ((3.0 * rx + ry) * (rx + 3.0 * ry)).sqrt());
    let steps = (circumference.ceil() as usize).max(16);
    for i in 0..steps {
        let theta = (i as f32 / steps as f32) * std::f32::consts::TAU;
        let px = (cx + rx * theta.cos()).round() as i32;
        let py = (cy + ry * theta.sin()).round() as i32;
        stamp_elliptical_brush(surface, px, py, pen_rx, pen_ry, src);
    }
}

pub fn fill_triangle(
    surface: &mut PixelSurface,
    a: (f32, f32),
    b: (f32, f32),
    c: (f32, f32),
    color: Color,
) {
    let src = color.to_rgba8();
    let edge = |p: (f32, f32), q: (f32, f32), r: (f32, f32)| {
        (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0)
    };
    let area = edge(a, b, c);
    if area.abs() <= f32::EPSILON {
        return;
    }
    let x0 = a.0.min(b.0).min(c.0).floor() as i32;
    let x1 = a.0.max(b.0).max(c.0).ceil() as i32;
    let y0 = a.1.min(b.1).min(c.1).floor() as i32;
    let y1 = a.1.max(b.1).max(c.1).ceil() as i32;
    for py in y0..=y1 {
        for px in x0..=x1 {
            let p = (px as f32 + 0.5, py as f32 + 0.5);
            let w0 = edge(a, b, p) / area;
            let w1 = edge(b, c, p) / area;
            let w2 = edge(c, a, p) / area;
            if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 && surface.contains(px, py) {
                surface.blend_pixel(px as u32, py as u32, src);
            }
        }
    }
}

fn render_arrow(surface: &mut PixelSurface, annotation: &Annotation) {
    let b = annotation.bounds;
    let color = annotation.settings.stroke;
    let dx = b.x2 - b.x1;
    let dy = b.y2 - b.y1;
    let length = (dx * dx + dy * dy).sqrt();
    if length <= f32::EPSILON {
        return;
    }
    let (ux, uy) = (dx / length, dy / length);

    // Shaft stops short of the tip so the head covers the joint.
    let shaft_end = (b.x2 - ARROW_HEAD_SETBACK * ux, b.y2 - ARROW_HEAD_SETBACK * uy);
    draw_segment(surface, (b.x1, b.y1), shaft_end, color, ARROW_SHAFT_WIDTH);

    let head_len = arrow_head_length(length);
    let head_width = head_len * 0.8;
    let tip = (b.x2, b.y2);
    let back = (b.x2 - head_len * ux, b.y2 - head_len * uy);
    let left = (back.0 - (head_width * 0.5) * uy, back.1 + (head_width * 0.5) * ux);
    let right = (back.0 + (head_width * 0.5) * uy, back.1 - (head_width * 0.5) * ux);

    fill_triangle(surface, tip, left, right, color);
    stroke_polyline(surface, &[tip, left, right, tip], color, ARROW_OUTLINE_WIDTH);
}

/// Rasterize one annotation onto the surface. Text bounds are updated as a
/// side effect: they are only authoritative after at least one render.
pub fn render_annotation(
    surface: &mut PixelSurface,
    annotation: &mut Annotation,
    shaper: &dyn TextShaper,
) {
    let settings = annotation.settings.clone();
    match &annotation.kind {
        AnnotationKind::Arrow => render_arrow(surface, annotation),
        AnnotationKind::Rectangle => {
            let (x, y, w, h) = annotation.bounds.normalized();
            if settings.fill {
                fill_rect(surface, x, y, w, h, settings.stroke);
            }
            stroke_rect(surface, x, y, w, h, settings.stroke, settings.line_width);
        }
        AnnotationKind::Ellipse => {
            let (x, y, w, h) = annotation.bounds.normalized();
            let (cx, cy) = (x + w / 2.0, y + h / 2.0);
            let (rx, ry) = (w / 2.0, h / 2.0);
            if settings.fill {
                fill_ellipse(surface, cx, cy, rx, ry, settings.stroke);
            }
            stroke_ellipse(surface, cx, cy, rx, ry, settings.stroke, settings.line_width);
        }
        AnnotationKind::Text(text) => {
            let extent = shaper.measure(text, &settings.font);
            annotation.bounds.x2 = annotation.bounds.x1 + extent.width;
            annotation.bounds.y2 = annotation.bounds.y1 + extent.height;
            shaper.draw(
                surface,
                annotation.bounds.x1,
                annotation.bounds.y1,
                text,
                &settings.font,
                settings.stroke,
            );
        }
        AnnotationKind::Freehand(points) => {
            stroke_polyline(surface, points, settings.stroke, settings.line_width);
        }
    }
}
