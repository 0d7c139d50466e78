use crate::annotate::model::{Color, FontSpec};
use crate::capture::surface::PixelSurface;
use ab_glyph::{point, Font, FontArc, ScaleFont};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Measured size of a laid-out run of text, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

/// Seam between the annotation pipeline and glyph rasterization. Rendering
/// and hit testing only ever see measured extents and blended pixels, so
/// tests can substitute deterministic metrics for a real font stack.
pub trait TextShaper {
    fn measure(&self, text: &str, font: &FontSpec) -> TextExtent;

    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw(&self, surface: &mut PixelSurface, x: f32, y: f32, text: &str, font: &FontSpec, color: Color);
}

/// Production shaper backed by system font files. Lookups walk the font
/// directories once per family/style combination; the parsed font (or the
/// fact that none matched) is cached for the rest of the shaper's life.
pub struct GlyphShaper {
    font_dirs: Vec<PathBuf>,
    cache: RefCell<HashMap<(String, bool, bool), Option<FontArc>>>,
}

impl Default for GlyphShaper {
    fn default() -> Self {
        Self::with_font_dirs(system_font_dirs())
    }
}

impl GlyphShaper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_dirs(font_dirs: Vec<PathBuf>) -> Self {
        Self {
            font_dirs,
            cache: RefCell::new(HashMap::new()),
        }
    }

    fn resolve(&self, font: &FontSpec) -> Option<FontArc> {
        let key = (
            font.family.to_ascii_lowercase(),
            font.bold,
            font.italic,
        );
        if let Some(cached) = self.cache.borrow().get(&key) {
            return cached.clone();
        }
        let resolved = self.scan_for(font);
        self.cache.borrow_mut().insert(key, resolved.clone());
        resolved
    }

    fn scan_for(&self, font: &FontSpec) -> Option<FontArc> {
        let needle = font.family.to_ascii_lowercase().replace(' ', "");
        let mut fallback = None;
        for dir in &self.font_dirs {
            for entry in walkdir::WalkDir::new(dir)
                .follow_links(true)
                .into_iter()
                .filter_map(Result::ok)
            {
                let path = entry.path();
                let ext_matches = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
                    .unwrap_or(false);
                if !ext_matches {
                    continue;
                }
                let stem = match path.file_stem().and_then(|s| s.to_str()) {
                    Some(stem) => stem.to_ascii_lowercase(),
                    None => continue,
                };
                if !stem.replace(['-', '_', ' '], "").contains(&needle) {
                    continue;
                }
                let style_matches = stem.contains("bold") == font.bold
                    && (stem.contains("italic") || stem.contains("oblique")) == font.italic;
                let bytes = match std::fs::read(path) {
                    Ok(bytes) => bytes,
                    Err(_) => continue,
                };
                let Ok(loaded) = ab_glyph::FontVec::try_from_vec(bytes).map(FontArc::from) else {
                    continue;
                };
                if style_matches {
                    debug!(path = %path.display(), "resolved font");
                    return Some(loaded);
                }
                fallback.get_or_insert(loaded);
            }
        }
        if fallback.is_none() {
            warn!(family = %font.family, "no matching system font found");
        }
        fallback
    }

    #[cfg(test)]
    fn cached_lookups(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl TextShaper for GlyphShaper {
    fn measure(&self, text: &str, font: &FontSpec) -> TextExtent {
        let Some(face) = self.resolve(font) else {
            return TextExtent::default();
        };
        if text.is_empty() {
            return TextExtent::default();
        }
        let scaled = face.as_scaled(font.size);
        let width: f32 = text
            .chars()
            .map(|ch| scaled.h_advance(scaled.scaled_glyph(ch).id))
            .sum();
        TextExtent {
            width,
            height: scaled.ascent() - scaled.descent(),
        }
    }

    fn draw(
        &self,
        surface: &mut PixelSurface,
        x: f32,
        y: f32,
        text: &str,
        font: &FontSpec,
        color: Color,
    ) {
        if text.is_empty() {
            return;
        }
        let Some(face) = self.resolve(font) else {
            return;
        };
        let scaled = face.as_scaled(font.size);
        let base = color.to_rgba8();
        let mut caret = point(x, y + scaled.ascent());
        for ch in text.chars() {
            let mut glyph = scaled.scaled_glyph(ch);
            glyph.position = caret;
            caret.x += scaled.h_advance(glyph.id);
            if let Some(outlined) = scaled.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px = gx as i32 + bounds.min.x as i32;
                    let py = gy as i32 + bounds.min.y as i32;
                    if surface.contains(px, py) {
                        let alpha = (base.a as f32 * coverage).round().clamp(0.0, 255.0) as u8;
                        let src = crate::capture::surface::Rgba8::rgba(base.r, base.g, base.b, alpha);
                        surface.blend_pixel(px as u32, py as u32, src);
                    }
                });
            }
        }
    }
}

fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if cfg!(windows) {
        if let Ok(windir) = std::env::var("WINDIR") {
            dirs.push(PathBuf::from(windir).join("Fonts"));
        } else {
            dirs.push(PathBuf::from(r"C:\Windows\Fonts"));
        }
    } else {
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(home) = dirs_next::home_dir() {
            dirs.push(home.join(".local/share/fonts"));
            dirs.push(home.join(".fonts"));
        }
    }
    dirs
}

/// Deterministic shaper for tests: every character is `advance` wide and
/// runs are `line_height` tall; drawing fills the extent with the color.
#[derive(Debug, Clone, Copy)]
pub struct FixedMetrics {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            advance: 8.0,
            line_height: 16.0,
        }
    }
}

impl TextShaper for FixedMetrics {
    fn measure(&self, text: &str, _font: &FontSpec) -> TextExtent {
        if text.is_empty() {
            return TextExtent::default();
        }
        TextExtent {
            width: self.advance * text.chars().count() as f32,
            height: self.line_height,
        }
    }

    fn draw(
        &self,
        surface: &mut PixelSurface,
        x: f32,
        y: f32,
        text: &str,
        font: &FontSpec,
        color: Color,
    ) {
        let extent = self.measure(text, font);
        let src = color.to_rgba8();
        let (x0, y0) = (x.round() as i32, y.round() as i32);
        let (x1, y1) = ((x + extent.width).round() as i32, (y + extent.height).round() as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                if surface.contains(px, py) {
                    surface.blend_pixel(px as u32, py as u32, src);
                }
            }
        }
    }
}
