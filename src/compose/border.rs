use crate::capture::surface::{PixelSurface, Rgba8};

/// Default frame drawn around every fresh capture before editing.
pub const CAPTURE_BORDER_WIDTH: u32 = 3;

/// Frame a surface: the result is `(W + 2b) x (H + 2b)` with the original
/// pasted at `(b, b)` and a solid border of thickness `b` around it.
pub fn add_border(surface: &PixelSurface, border_width: u32, color: Rgba8) -> PixelSurface {
    let b = border_width;
    let mut out = PixelSurface::new(
        surface.width() + 2 * b,
        surface.height() + 2 * b,
        surface.order(),
    );
    out.blit(surface, b as i32, b as i32);

    let (w, h) = (out.width(), out.height());
    for y in 0..h {
        for x in 0..w {
            if x < b || y < b || x >= w - b || y >= h - b {
                out.put_pixel(x, y, color);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::add_border;
    use crate::capture::surface::{ChannelOrder, PixelSurface, Rgba8};

    #[test]
    fn output_grows_by_twice_the_border() {
        let surface = PixelSurface::new(10, 6, ChannelOrder::Rgba);
        let out = add_border(&surface, 3, Rgba8::BLACK);
        assert_eq!((out.width(), out.height()), (16, 12));
    }

    #[test]
    fn content_is_unchanged_at_the_border_offset() {
        let mut surface = PixelSurface::new(4, 4, ChannelOrder::Rgba);
        surface.fill(Rgba8::rgba(7, 8, 9, 255));
        surface.put_pixel(0, 0, Rgba8::WHITE);
        let out = add_border(&surface, 2, Rgba8::BLACK);
        assert_eq!(out.pixel(2, 2), Rgba8::WHITE);
        assert_eq!(out.pixel(3, 3), Rgba8::rgba(7, 8, 9, 255));
        assert_eq!(out.pixel(5, 5), Rgba8::rgba(7, 8, 9, 255));
    }

    #[test]
    fn ring_of_exactly_border_width_is_painted() {
        let mut surface = PixelSurface::new(4, 4, ChannelOrder::Rgba);
        surface.fill(Rgba8::WHITE);
        let out = add_border(&surface, 2, Rgba8::BLACK);
        assert_eq!(out.pixel(0, 0), Rgba8::BLACK);
        assert_eq!(out.pixel(1, 3), Rgba8::BLACK);
        assert_eq!(out.pixel(7, 7), Rgba8::BLACK);
        assert_eq!(out.pixel(2, 2), Rgba8::WHITE);
    }

    #[test]
    fn zero_width_border_is_an_identity_copy() {
        let mut surface = PixelSurface::new(3, 3, ChannelOrder::Rgba);
        surface.fill(Rgba8::rgba(1, 2, 3, 4));
        let out = add_border(&surface, 0, Rgba8::BLACK);
        assert_eq!(out, surface);
    }
}
