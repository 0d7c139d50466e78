use crate::annotate::model::FontSpec;
use crate::annotate::text::TextShaper;
use crate::capture::surface::{PixelSurface, Rgba8};
use crate::select::state::SelectionTracker;

pub const CROSSHAIR_SIZE: i32 = 12;
const CROSSHAIR_COLOR: Rgba8 = Rgba8::rgba(255, 0, 0, 255);
const WASH: Rgba8 = Rgba8::rgba(0, 0, 0, 128);
const LABEL_BACKDROP: Rgba8 = Rgba8::rgba(0, 0, 0, 179);
const DASH_RUN: i32 = 4;

/// Paint one frame of the selection overlay: the frozen snapshot, a dark
/// wash with a cutout over the active selection, its dashed border and
/// dimension label, and the crosshair at the pointer.
pub fn paint_overlay(
    scene: &mut PixelSurface,
    snapshot: &PixelSurface,
    tracker: &SelectionTracker,
    shaper: &dyn TextShaper,
) {
    scene.blit(snapshot, 0, 0);
    wash_surface(scene);

    if tracker.is_selecting() {
        let area = tracker.selection().normalized();
        if !area.is_empty() {
            reveal_snapshot(scene, snapshot, area.x, area.y, area.width, area.height);
            dashed_border(scene, area.x, area.y, area.width, area.height);
            dimension_label(scene, shaper, area.x, area.y, area.width, area.height);
        }
    }

    let (px, py) = tracker.pointer();
    crosshair(scene, px, py);
}

fn wash_surface(scene: &mut PixelSurface) {
    for y in 0..scene.height() {
        for x in 0..scene.width() {
            scene.blend_pixel(x, y, WASH);
        }
    }
}

/// Clear the wash inside the selection by restoring the raw snapshot there.
fn reveal_snapshot(
    scene: &mut PixelSurface,
    snapshot: &PixelSurface,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) {
    for sy in y..y + height {
        for sx in x..x + width {
            if scene.contains(sx, sy) && snapshot.contains(sx, sy) {
                scene.put_pixel(sx as u32, sy as u32, snapshot.pixel(sx as u32, sy as u32));
            }
        }
    }
}

/// Single-pixel white border, dashed 4 on / 4 off, with the dash phase
/// running continuously around the perimeter.
fn dashed_border(scene: &mut PixelSurface, x: i32, y: i32, width: i32, height: i32) {
    let mut phase = 0;
    let mut plot = |px: i32, py: i32, phase: &mut i32| {
        if (*phase / DASH_RUN) % 2 == 0 && scene.contains(px, py) {
            scene.put_pixel(px as u32, py as u32, Rgba8::WHITE);
        }
        *phase += 1;
    };
    for px in x..=x + width {
        plot(px, y, &mut phase);
    }
    for py in y + 1..=y + height {
        plot(x + width, py, &mut phase);
    }
    for px in (x..x + width).rev() {
        plot(px, y + height, &mut phase);
    }
    for py in (y + 1..y + height).rev() {
        plot(x, py, &mut phase);
    }
}

/// `"{width}x{height}"` near the selection's top-right, over a dark box so
/// it stays legible on any snapshot.
fn dimension_label(
    scene: &mut PixelSurface,
    shaper: &dyn TextShaper,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) {
    let label = format!("{}x{}", width, height);
    let font = FontSpec::default();
    let extent = shaper.measure(&label, &font);

    let text_x = (x + width) as f32 - extent.width - 10.0;
    let text_top = y as f32 - 10.0 - extent.height;

    let box_x = (text_x - 5.0).round() as i32;
    let box_y = (text_top - 5.0).round() as i32;
    let box_w = (extent.width + 10.0).round() as i32;
    let box_h = (extent.height + 10.0).round() as i32;
    for py in box_y..box_y + box_h {
        for px in box_x..box_x + box_w {
            if scene.contains(px, py) {
                scene.blend_pixel(px as u32, py as u32, LABEL_BACKDROP);
            }
        }
    }

    shaper.draw(
        scene,
        text_x,
        text_top,
        &label,
        &font,
        crate::annotate::model::Color::WHITE,
    );
}

/// Two perpendicular 2-pixel strokes centered on the pointer.
fn crosshair(scene: &mut PixelSurface, x: i32, y: i32) {
    for px in x - CROSSHAIR_SIZE..=x + CROSSHAIR_SIZE {
        for py in y - 1..=y {
            if scene.contains(px, py) {
                scene.put_pixel(px as u32, py as u32, CROSSHAIR_COLOR);
            }
        }
    }
    for py in y - CROSSHAIR_SIZE..=y + CROSSHAIR_SIZE {
        for px in x - 1..=x {
            if scene.contains(px, py) {
                scene.put_pixel(px as u32, py as u32, CROSSHAIR_COLOR);
            }
        }
    }
}
