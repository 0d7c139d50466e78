use crate::capture::surface::PixelSurface;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use tracing::info;

pub const JPEG_QUALITY: u8 = 100;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Formats we recognize but deliberately do not encode. These fail loudly
/// instead of falling back to a guessed format.
const REJECTED_FORMATS: &[&str] = &[
    "svg", "heic", "heif", "raw", "psd", "eps", "ai", "avif", "cr2", "cr3",
];

fn rgba_image(surface: &PixelSurface) -> RgbaImage {
    RgbaImage::from_fn(surface.width(), surface.height(), |x, y| {
        let px = surface.pixel(x, y);
        Rgba([px.r, px.g, px.b, px.a])
    })
}

/// Encode the surface and write it to `path`, choosing the codec from the
/// extension (case-insensitive). The file is only created once the encode
/// has fully succeeded in memory, so a codec failure leaves nothing behind.
pub fn export_to_file(surface: &PixelSurface, path: &Path) -> Result<(), ExportError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| ExportError::UnsupportedFormat("missing extension".into()))?;

    if REJECTED_FORMATS.contains(&ext.as_str()) {
        return Err(ExportError::UnsupportedFormat(ext));
    }

    let image = rgba_image(surface);
    let mut cursor = Cursor::new(Vec::new());
    match ext.as_str() {
        "png" => image.write_to(&mut cursor, ImageFormat::Png)?,
        "jpg" | "jpeg" => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgba8(image).to_rgb8();
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY))?;
        }
        "gif" => image.write_to(&mut cursor, ImageFormat::Gif)?,
        "tif" | "tiff" => image.write_to(&mut cursor, ImageFormat::Tiff)?,
        "webp" => image.write_to(&mut cursor, ImageFormat::WebP)?,
        "bmp" => image.write_to(&mut cursor, ImageFormat::Bmp)?,
        "ico" => image.write_to(&mut cursor, ImageFormat::Ico)?,
        _ => return Err(ExportError::UnsupportedFormat(ext)),
    }

    std::fs::write(path, cursor.get_ref())?;
    info!(path = %path.display(), bytes = cursor.get_ref().len(), "image exported");
    Ok(())
}
