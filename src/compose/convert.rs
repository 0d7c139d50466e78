use crate::capture::surface::PixelSurface;

/// Repack a surface into tightly packed RGBA bytes, the layout clipboards
/// and image encoders expect. A pure channel permutation: row padding is
/// dropped and alpha is carried through untouched.
pub fn to_rgba_bytes(surface: &PixelSurface) -> Vec<u8> {
    let mut out = Vec::with_capacity(surface.width() as usize * surface.height() as usize * 4);
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let px = surface.pixel(x, y);
            out.extend_from_slice(&[px.r, px.g, px.b, px.a]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::to_rgba_bytes;
    use crate::capture::surface::{ChannelOrder, PixelSurface, Rgba8};

    #[test]
    fn bgra_storage_is_permuted_to_rgba() {
        let mut surface = PixelSurface::new(2, 1, ChannelOrder::Bgra);
        surface.put_pixel(0, 0, Rgba8::rgba(1, 2, 3, 4));
        surface.put_pixel(1, 0, Rgba8::rgba(5, 6, 7, 8));
        assert_eq!(to_rgba_bytes(&surface), [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn row_padding_is_dropped() {
        let mut surface = PixelSurface::with_stride(1, 2, 16, ChannelOrder::Bgra);
        surface.put_pixel(0, 0, Rgba8::rgba(9, 8, 7, 6));
        surface.put_pixel(0, 1, Rgba8::rgba(1, 2, 3, 4));
        assert_eq!(to_rgba_bytes(&surface), [9, 8, 7, 6, 1, 2, 3, 4]);
    }

    #[test]
    fn alpha_is_preserved_exactly() {
        let mut surface = PixelSurface::new(1, 1, ChannelOrder::Bgra);
        surface.put_pixel(0, 0, Rgba8::rgba(10, 20, 30, 0));
        assert_eq!(to_rgba_bytes(&surface)[3], 0);
    }
}
