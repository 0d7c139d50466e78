use crate::capture::surface::PixelSurface;
use crate::compose::convert::to_rgba_bytes;
use anyhow::Context;
use std::borrow::Cow;
use tracing::info;

/// Place the flattened image on the system clipboard, replacing any prior
/// image content.
pub fn copy_to_clipboard(surface: &PixelSurface) -> anyhow::Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("failed to open clipboard")?;
    clipboard
        .set_image(arboard::ImageData {
            width: surface.width() as usize,
            height: surface.height() as usize,
            bytes: Cow::Owned(to_rgba_bytes(surface)),
        })
        .context("failed to place image on clipboard")?;
    info!(
        width = surface.width(),
        height = surface.height(),
        "image copied to clipboard"
    );
    Ok(())
}
